//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Mode, Model, ToastLevel};
pub use update::{Message, update};

use std::sync::Arc;

use crate::editor::{EditorProvider, SourceEditorProvider};
use crate::ui::style::Theme;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    initial_text: String,
    theme: Theme,
    line_numbers: bool,
    editor_provider: Arc<dyn EditorProvider>,
}

impl App {
    /// Create a new application showing `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            initial_text: text.into(),
            theme: Theme::default(),
            line_numbers: true,
            editor_provider: Arc::new(SourceEditorProvider),
        }
    }

    /// Set the color theme.
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Show or hide the editor's line-number gutter.
    pub const fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.line_numbers = enabled;
        self
    }

    /// Use a different source of editors.
    pub fn with_editor_provider(mut self, provider: Arc<dyn EditorProvider>) -> Self {
        self.editor_provider = provider;
        self
    }

    /// The initial model for a terminal of the given size.
    pub fn model(&self, terminal_size: (u16, u16)) -> Model {
        let mut model = Model::new(self.initial_text.clone(), terminal_size);
        model.theme = self.theme;
        model.line_numbers = self.line_numbers;
        model
    }

    fn editor_provider(&self) -> Arc<dyn EditorProvider> {
        Arc::clone(&self.editor_provider)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(crate::DEFAULT_DOCUMENT)
    }
}
