use crate::app::{Mode, Model};
use crate::editor::{EditorInput, LoadResult};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug)]
pub enum Message {
    // Block
    /// Show the rendered document
    ShowPreview,
    /// Show the editor, loading it first if needed
    ShowEdit,
    /// Replace the document text
    EditText(String),
    /// A background editor load finished
    EditorLoaded(LoadResult),
    /// Input for the mounted editor
    Editor(EditorInput),

    // Navigation
    /// Scroll up by n lines
    ScrollUp(usize),
    /// Scroll down by n lines
    ScrollDown(usize),
    /// Scroll up one page
    PageUp,
    /// Scroll down one page
    PageDown,
    /// Go to beginning of document
    GoToTop,
    /// Go to end of document
    GoToBottom,

    // Application
    /// Terminal resized
    Resize(u16, u16),
    /// Force redraw
    Redraw,
    /// Quit application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of The Elm Architecture - all state changes
/// happen here in a predictable, testable way.
///
/// # Example
///
/// ```
/// use markblock::app::{Message, Mode, Model, update};
///
/// let model = Model::new("# Hello", (80, 24));
/// let model = update(model, Message::ShowEdit);
/// assert_eq!(model.mode, Mode::Edit);
/// ```
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::ShowPreview => {
            if model.mode != Mode::Preview {
                tracing::info!("showing preview");
            }
            model.mode = Mode::Preview;
        }
        Message::ShowEdit => {
            if model.mode != Mode::Edit {
                tracing::info!(editor = model.editor.label(), "showing editor");
            }
            model.mode = Mode::Edit;
            model.mount_editor();
        }
        Message::EditText(text) => model.set_text(text),
        Message::EditorLoaded(result) => model.finish_editor_load(result),
        Message::Editor(input) => {
            if model.mode != Mode::Edit {
                return model;
            }
            let changed = model
                .editor
                .editor_mut()
                .and_then(|editor| editor.apply(input));
            if let Some(text) = changed {
                return update(model, Message::EditText(text));
            }
        }

        // Navigation
        Message::ScrollUp(n) => {
            model.sync_preview_layout();
            model.viewport.scroll_up(n);
        }
        Message::ScrollDown(n) => {
            model.sync_preview_layout();
            model.viewport.scroll_down(n);
        }
        Message::PageUp => {
            model.sync_preview_layout();
            model.viewport.page_up();
        }
        Message::PageDown => {
            model.sync_preview_layout();
            model.viewport.page_down();
        }
        Message::GoToTop => {
            model.sync_preview_layout();
            model.viewport.go_to_top();
        }
        Message::GoToBottom => {
            model.sync_preview_layout();
            model.viewport.go_to_bottom();
        }

        // Application
        Message::Resize(width, height) => model.resize(width, height),
        Message::Redraw => {}
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}
