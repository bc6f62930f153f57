//! The editing half of the block.
//!
//! - [`TextBuffer`]: rope-backed text with a cursor
//! - [`SourceEditor`]: the editor surface built on the buffer
//! - [`EditorProvider`] / [`EditorLoader`]: load an editor on a worker
//!   thread the first time edit mode is entered
//! - [`EditorSlot`]: the controller's view of that load

mod buffer;
mod provider;
mod source;

use std::fmt;

pub use buffer::{Cursor, Direction, TextBuffer};
pub use provider::{
    EditorLoadError, EditorLoader, EditorProvider, EditorSlot, LoadResult, SourceEditorProvider,
};
pub use source::SourceEditor;

/// A single edit or navigation request sent to an editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorInput {
    /// Type a character at the cursor
    Insert(char),
    /// Insert pasted text at the cursor; `\r\n` and `\r` become `\n`
    Paste(String),
    /// Break the line at the cursor
    Newline,
    /// Delete before the cursor
    Backspace,
    /// Delete under the cursor
    Delete,
    Move(Direction),
    Home,
    End,
    WordLeft,
    WordRight,
    DocumentStart,
    DocumentEnd,
    /// Place the cursor at a line and character column (mouse click)
    MoveTo { line: usize, column: usize },
    ScrollUp(usize),
    ScrollDown(usize),
}

/// An editor surface the controller can mount and feed input to.
///
/// The controller owns the document text. An editor is a controlled
/// input: it is mounted with the current text and reports the full new text
/// after every input that changed it.
pub trait TextEditor: fmt::Debug + Send {
    /// Show `text`. Mounting the text the editor already holds keeps the
    /// cursor where it was.
    fn mount(&mut self, text: &str);

    /// Apply one input. Returns the new text when the contents changed.
    fn apply(&mut self, input: EditorInput) -> Option<String>;

    /// Current contents.
    fn text(&self) -> String;

    fn line_count(&self) -> usize;

    /// Line content without its line ending.
    fn line_at(&self, line_idx: usize) -> Option<String>;

    fn cursor(&self) -> Cursor;

    /// First visible line.
    fn scroll_offset(&self) -> usize;

    /// Number of rows available for text; used to keep the cursor visible.
    fn set_viewport_height(&mut self, rows: usize);
}
