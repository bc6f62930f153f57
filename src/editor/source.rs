use super::{Cursor, EditorInput, TextBuffer, TextEditor};

const TAB_AS_SPACES: &str = "    ";

/// Plain-text markdown source editor.
#[derive(Debug)]
pub struct SourceEditor {
    buffer: TextBuffer,
    scroll_offset: usize,
    viewport_height: usize,
}

impl SourceEditor {
    pub fn new() -> Self {
        Self {
            buffer: TextBuffer::empty(),
            scroll_offset: 0,
            viewport_height: 0,
        }
    }

    /// Scroll so the cursor line is on screen.
    fn follow_cursor(&mut self) {
        let line = self.buffer.cursor().line;
        if self.viewport_height == 0 || line < self.scroll_offset {
            self.scroll_offset = line;
        } else if line >= self.scroll_offset + self.viewport_height {
            self.scroll_offset = line + 1 - self.viewport_height;
        }
    }

    fn max_scroll(&self) -> usize {
        self.buffer.line_count().saturating_sub(1)
    }
}

impl Default for SourceEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEditor for SourceEditor {
    fn mount(&mut self, text: &str) {
        if self.buffer.text() == text {
            return;
        }
        self.buffer.replace(text);
        self.scroll_offset = 0;
    }

    fn apply(&mut self, input: EditorInput) -> Option<String> {
        let changed = match input {
            EditorInput::Insert('\t') => {
                self.buffer.insert_str(TAB_AS_SPACES);
                true
            }
            EditorInput::Insert(ch) => {
                self.buffer.insert_char(ch);
                true
            }
            EditorInput::Paste(text) => {
                // Terminals deliver pasted line breaks as \r or \r\n.
                let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
                self.buffer.insert_str(&normalized);
                !normalized.is_empty()
            }
            EditorInput::Newline => {
                self.buffer.split_line();
                true
            }
            EditorInput::Backspace => self.buffer.delete_back(),
            EditorInput::Delete => self.buffer.delete_forward(),
            EditorInput::Move(direction) => {
                self.buffer.move_cursor(direction);
                false
            }
            EditorInput::Home => {
                self.buffer.move_home();
                false
            }
            EditorInput::End => {
                self.buffer.move_end();
                false
            }
            EditorInput::WordLeft => {
                self.buffer.move_word_left();
                false
            }
            EditorInput::WordRight => {
                self.buffer.move_word_right();
                false
            }
            EditorInput::DocumentStart => {
                self.buffer.move_to_start();
                false
            }
            EditorInput::DocumentEnd => {
                self.buffer.move_to_end();
                false
            }
            EditorInput::MoveTo { line, column } => {
                let text = self.buffer.line_at(line).unwrap_or_default();
                let byte_col = text
                    .char_indices()
                    .nth(column)
                    .map_or(text.len(), |(idx, _)| idx);
                self.buffer.move_to(line, byte_col);
                false
            }
            EditorInput::ScrollUp(n) => {
                self.scroll_offset = self.scroll_offset.saturating_sub(n);
                return None;
            }
            EditorInput::ScrollDown(n) => {
                self.scroll_offset = (self.scroll_offset + n).min(self.max_scroll());
                return None;
            }
        };
        self.follow_cursor();
        changed.then(|| self.buffer.text())
    }

    fn text(&self) -> String {
        self.buffer.text()
    }

    fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    fn line_at(&self, line_idx: usize) -> Option<String> {
        self.buffer.line_at(line_idx)
    }

    fn cursor(&self) -> Cursor {
        self.buffer.cursor()
    }

    fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn set_viewport_height(&mut self, rows: usize) {
        self.viewport_height = rows;
        self.follow_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Direction;

    fn mounted(text: &str) -> SourceEditor {
        let mut editor = SourceEditor::new();
        editor.mount(text);
        editor
    }

    #[test]
    fn test_mount_shows_text() {
        let editor = mounted("# Title\nbody");
        assert_eq!(editor.text(), "# Title\nbody");
        assert_eq!(editor.line_count(), 2);
        assert_eq!(editor.line_at(1), Some("body".to_string()));
    }

    #[test]
    fn test_mount_same_text_keeps_cursor() {
        let mut editor = mounted("hello");
        editor.apply(EditorInput::End);
        editor.mount("hello");
        assert_eq!(editor.cursor().col, 5);
    }

    #[test]
    fn test_mount_new_text_resets_cursor() {
        let mut editor = mounted("hello");
        editor.apply(EditorInput::End);
        editor.mount("other");
        assert_eq!(editor.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_edits_report_new_text() {
        let mut editor = mounted("ello");
        assert_eq!(editor.apply(EditorInput::Insert('h')), Some("hello".to_string()));
        assert_eq!(editor.apply(EditorInput::Newline), Some("h\nello".to_string()));
        assert_eq!(editor.apply(EditorInput::Backspace), Some("hello".to_string()));
    }

    #[test]
    fn test_navigation_reports_nothing() {
        let mut editor = mounted("hello\nworld");
        assert_eq!(editor.apply(EditorInput::Move(Direction::Down)), None);
        assert_eq!(editor.apply(EditorInput::WordRight), None);
        assert_eq!(editor.apply(EditorInput::DocumentEnd), None);
        assert_eq!(editor.text(), "hello\nworld");
    }

    #[test]
    fn test_failed_delete_reports_nothing() {
        let mut editor = mounted("hi");
        assert_eq!(editor.apply(EditorInput::Backspace), None);
    }

    #[test]
    fn test_paste_normalizes_line_breaks() {
        let mut editor = mounted("");
        let text = editor.apply(EditorInput::Paste("a\r\nb\rc".to_string()));
        assert_eq!(text.as_deref(), Some("a\nb\nc"));
        assert_eq!(editor.cursor(), Cursor::at(2, 1));
    }

    #[test]
    fn test_tab_inserts_spaces() {
        let mut editor = mounted("x");
        assert_eq!(
            editor.apply(EditorInput::Insert('\t')).as_deref(),
            Some("    x")
        );
    }

    #[test]
    fn test_move_to_uses_character_columns() {
        let mut editor = mounted("héllo");
        editor.apply(EditorInput::MoveTo { line: 0, column: 2 });
        assert_eq!(editor.cursor().col, 3);
    }

    #[test]
    fn test_cursor_stays_visible_while_typing() {
        let mut editor = mounted("");
        editor.set_viewport_height(3);
        for _ in 0..5 {
            editor.apply(EditorInput::Newline);
        }
        assert_eq!(editor.cursor().line, 5);
        assert_eq!(editor.scroll_offset(), 3);
        editor.apply(EditorInput::DocumentStart);
        assert_eq!(editor.scroll_offset(), 0);
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut editor = mounted("a\nb\nc");
        editor.apply(EditorInput::ScrollDown(10));
        assert_eq!(editor.scroll_offset(), 2);
        editor.apply(EditorInput::ScrollUp(10));
        assert_eq!(editor.scroll_offset(), 0);
    }
}
