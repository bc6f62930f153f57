// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorSlot)
    clippy::module_name_repetitions
)]

//! # Markblock
//!
//! A markdown block for the terminal with two modes:
//! - **Preview**: the document rendered to HTML and drawn as styled text
//! - **Edit File**: a rope-backed source editor, loaded on first use
//!
//! ## Architecture
//!
//! Markblock uses The Elm Architecture (TEA) pattern:
//! - **Model**: Document text, mode flag, editor slot
//! - **Message**: Mode switches, edits, scrolling
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Controller state, update function and event loop
//! - [`markdown`]: Markdown to [`markdown::TrustedHtml`] rendering
//! - [`editor`]: Text buffer, editor surface and lazy editor loading
//! - [`ui`]: Terminal UI components
//! - [`export`]: Non-interactive HTML rendering of the block
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod editor;
pub mod export;
pub mod markdown;
pub mod ui;

/// The document shown when no other text is supplied.
pub const DEFAULT_DOCUMENT: &str = include_str!("../assets/about.md");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Mode, Model};
    pub use crate::editor::{EditorProvider, EditorSlot, TextEditor};
    pub use crate::markdown::{TrustedHtml, render};
    pub use crate::ui::viewport::Viewport;
}
