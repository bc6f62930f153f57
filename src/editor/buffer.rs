use ropey::Rope;

/// Cursor position in a [`TextBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Byte offset within the line.
    pub col: usize,
    /// Column vertical movement tries to return to.
    goal: usize,
}

impl Cursor {
    /// Cursor at the start of the buffer.
    pub const fn new() -> Self {
        Self::at(0, 0)
    }

    /// Cursor at a line and byte column.
    pub const fn at(line: usize, col: usize) -> Self {
        Self {
            line,
            col,
            goal: col,
        }
    }

    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.goal = col;
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Direction for cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Rope-backed text with a single cursor.
///
/// Columns are byte offsets into the line and always sit on a char
/// boundary. Lines are split on `\n`; a trailing `\r` is treated as part
/// of the line ending.
pub struct TextBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
        }
    }

    pub fn empty() -> Self {
        Self::from_text("")
    }

    /// Replace the whole contents and move the cursor to the start.
    pub fn replace(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
        self.cursor = Cursor::new();
    }

    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Number of lines; an empty buffer has one.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line content without its line ending.
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let raw = self.rope.line(line_idx).to_string();
        let content = raw.strip_suffix('\n').unwrap_or(&raw);
        let content = content.strip_suffix('\r').unwrap_or(content);
        Some(content.to_string())
    }

    /// Byte length of a line without its line ending.
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        let idx = self.cursor_char_idx();
        self.rope.insert_char(idx, ch);
        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        } else {
            self.cursor.set_col(self.cursor.col + ch.len_utf8());
        }
    }

    /// Insert text at the cursor and leave the cursor after it.
    pub fn insert_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        let start = self.cursor_char_idx();
        self.rope.insert(start, s);
        let end = start + s.chars().count();
        let line = self.rope.char_to_line(end);
        let col = self
            .rope
            .line(line)
            .char_to_byte(end - self.rope.line_to_char(line));
        self.cursor.line = line;
        self.cursor.set_col(col);
    }

    /// Break the line at the cursor (Enter).
    pub fn split_line(&mut self) {
        self.insert_char('\n');
    }

    /// Remove the character before the cursor, joining lines at column 0.
    ///
    /// Returns `true` when something was removed.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 {
            if self.cursor.line == 0 {
                return false;
            }
            let prev = self.cursor.line - 1;
            let prev_len = self.line_len(prev);
            let join_at = self.content_end_char(prev);
            let line_start = self.rope.line_to_char(self.cursor.line);
            self.rope.remove(join_at..line_start);
            self.cursor.line = prev;
            self.cursor.set_col(prev_len);
        } else {
            let idx = self.cursor_char_idx();
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let width = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.rope.remove(idx - 1..idx);
            self.cursor.set_col(self.cursor.col - width);
        }
        true
    }

    /// Remove the character under the cursor, joining lines at line end.
    ///
    /// Returns `true` when something was removed.
    pub fn delete_forward(&mut self) -> bool {
        let line = self.cursor.line;
        if self.cursor.col < self.line_len(line) {
            let idx = self.cursor_char_idx();
            self.rope.remove(idx..=idx);
            return true;
        }
        if line + 1 >= self.line_count() {
            return false;
        }
        let join_at = self.content_end_char(line);
        let next_start = self.rope.line_to_char(line + 1);
        self.rope.remove(join_at..next_start);
        true
    }

    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_vertical(-1),
            Direction::Down => self.move_vertical(1),
        }
    }

    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Jump to the start of the previous word, or the end of the previous line.
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.move_end();
            }
            return;
        }
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = line[..self.cursor.col].trim_end_matches(|c: char| !is_word_char(c));
        let start = before
            .char_indices()
            .rev()
            .take_while(|(_, c)| is_word_char(*c))
            .last()
            .map_or(before.len(), |(idx, _)| idx);
        self.cursor.set_col(start);
    }

    /// Jump past the current word and the gap after it, or to the next line.
    pub fn move_word_right(&mut self) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        if self.cursor.col >= line.len() {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }
        let after = &line[self.cursor.col..];
        let word_end = after.find(|c: char| !is_word_char(c)).unwrap_or(after.len());
        let gap = &after[word_end..];
        let gap_end = gap.find(is_word_char).unwrap_or(gap.len());
        self.cursor.set_col(self.cursor.col + word_end + gap_end);
    }

    /// Move to a line and byte column, clamped to the buffer.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.cursor.line = line.min(self.line_count().saturating_sub(1));
        let text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = col.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    pub const fn move_to_start(&mut self) {
        self.cursor = Cursor::new();
    }

    pub fn move_to_end(&mut self) {
        self.cursor.line = self.line_count().saturating_sub(1);
        self.move_end();
    }

    fn cursor_char_idx(&self) -> usize {
        let line = self.rope.line(self.cursor.line);
        let col = self.cursor.col.min(line.len_bytes());
        self.rope.line_to_char(self.cursor.line) + line.byte_to_char(col)
    }

    /// Char index just past the content of `line_idx`, before its line ending.
    fn content_end_char(&self, line_idx: usize) -> usize {
        let content_chars = self
            .line_at(line_idx)
            .map_or(0, |content| content.chars().count());
        self.rope.line_to_char(line_idx) + content_chars
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let width = line[..self.cursor.col]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - width);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.move_end();
        }
    }

    fn move_right(&mut self) {
        let line = self.line_at(self.cursor.line).unwrap_or_default();
        if let Some(ch) = line[self.cursor.col.min(line.len())..].chars().next() {
            self.cursor.set_col(self.cursor.col + ch.len_utf8());
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_vertical(&mut self, delta: isize) {
        let Some(target) = self.cursor.line.checked_add_signed(delta) else {
            return;
        };
        if target >= self.line_count() {
            return;
        }
        self.cursor.line = target;
        let text = self.line_at(target).unwrap_or_default();
        let mut col = self.cursor.goal.min(text.len());
        while !text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.col = col;
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl std::fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextBuffer")
            .field("lines", &self.rope.len_lines())
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_empty_line() {
        let buf = TextBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert_eq!(buf.line_at(1), None);
    }

    #[test]
    fn test_line_at_strips_crlf() {
        let buf = TextBuffer::from_text("one\r\ntwo");
        assert_eq!(buf.line_at(0), Some("one".to_string()));
        assert_eq!(buf.line_len(0), 3);
    }

    #[test]
    fn test_text_is_preserved_verbatim() {
        let content = "# Title\n\n* item\n";
        assert_eq!(TextBuffer::from_text(content).text(), content);
    }

    #[test]
    fn test_replace_resets_cursor() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to_end();
        buf.replace("new");
        assert_eq!(buf.text(), "new");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut buf = TextBuffer::from_text("hllo");
        buf.move_cursor(Direction::Right);
        buf.insert_char('e');
        assert_eq!(buf.text(), "hello");
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_insert_multibyte_char_moves_by_bytes() {
        let mut buf = TextBuffer::from_text("caf");
        buf.move_end();
        buf.insert_char('é');
        assert_eq!(buf.text(), "café");
        assert_eq!(buf.cursor().col, 5);
    }

    #[test]
    fn test_insert_str_across_lines() {
        let mut buf = TextBuffer::from_text("ad");
        buf.move_cursor(Direction::Right);
        buf.insert_str("b\nc");
        assert_eq!(buf.text(), "ab\ncd");
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
    }

    #[test]
    fn test_split_line_in_middle() {
        let mut buf = TextBuffer::from_text("hello world");
        buf.move_to(0, 5);
        buf.split_line();
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some(" world".to_string()));
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_delete_back_at_origin_is_noop() {
        let mut buf = TextBuffer::from_text("hello");
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "hello");
    }

    #[test]
    fn test_delete_back_multibyte() {
        let mut buf = TextBuffer::from_text("café");
        buf.move_end();
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "caf");
        assert_eq!(buf.cursor().col, 3);
    }

    #[test]
    fn test_delete_back_joins_lines() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_back_joins_crlf_lines() {
        let mut buf = TextBuffer::from_text("hello\r\nworld");
        buf.move_to(1, 0);
        buf.delete_back();
        assert_eq!(buf.text(), "helloworld");
    }

    #[test]
    fn test_delete_forward_joins_lines() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to(0, 5);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "helloworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut buf = TextBuffer::from_text("hello");
        buf.move_end();
        assert!(!buf.delete_forward());
    }

    #[test]
    fn test_left_and_right_wrap_between_lines() {
        let mut buf = TextBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
        buf.move_cursor(Direction::Right);
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
    }

    #[test]
    fn test_vertical_movement_remembers_goal_column() {
        let mut buf = TextBuffer::from_text("hello\nhi\nworld");
        buf.move_to(0, 4);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
        buf.move_cursor(Direction::Down);
        assert_eq!((buf.cursor().line, buf.cursor().col), (2, 4));
    }

    #[test]
    fn test_vertical_movement_respects_char_boundaries() {
        let mut buf = TextBuffer::from_text("abcd\néé");
        buf.move_to(0, 3);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_up_at_first_line_is_noop() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to(0, 2);
        buf.move_cursor(Direction::Up);
        assert_eq!(buf.cursor(), Cursor::at(0, 2));
    }

    #[test]
    fn test_word_movement() {
        let mut buf = TextBuffer::from_text("hello, world");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 7);
        buf.move_end();
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 7);
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_word_movement_wraps_lines() {
        let mut buf = TextBuffer::from_text("one\ntwo");
        buf.move_end();
        buf.move_word_right();
        assert_eq!(buf.cursor(), Cursor::at(1, 0));
        buf.move_word_left();
        assert_eq!(buf.cursor(), Cursor::at(0, 3));
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = TextBuffer::from_text("hello");
        buf.move_to(9, 99);
        assert_eq!(buf.cursor(), Cursor::at(0, 5));
    }

    #[test]
    fn test_move_to_start_and_end() {
        let mut buf = TextBuffer::from_text("hello\nworld");
        buf.move_to_end();
        assert_eq!(buf.cursor(), Cursor::at(1, 5));
        buf.move_to_start();
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
    }
}
