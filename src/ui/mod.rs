//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`html`]: Turns rendered preview markup into terminal lines
//! - [`viewport`]: Scroll position and visible range management
//! - [`style`]: Theming and colors

pub mod html;
pub mod style;
pub mod viewport;

mod render;
mod status;

pub use render::{
    HeaderControl, editor_gutter_width, header_control_at, line_number_width,
    preview_content_width, render,
};

pub const DOCUMENT_LEFT_PADDING: u16 = 2;
/// Rows above the content area taken by the mode-switch controls.
pub const HEADER_ROWS: u16 = 1;

#[cfg(test)]
mod tests;
