use ropey::Rope;

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column (byte offset within the line).
    pub col: usize,
    /// Remembered column for vertical movement (sticky column).
    col_memory: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self {
            line: 0,
            col: 0,
            col_memory: 0,
        }
    }

    /// Update column and reset column memory to match.
    const fn set_col(&mut self, col: usize) {
        self.col = col;
        self.col_memory = col;
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

/// A text buffer backed by a rope data structure.
///
/// Provides efficient insertion, deletion, and line-based operations for
/// the markdown source. The cursor tracks the current editing position.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
}

impl EditorBuffer {
    /// Create a new buffer from a string, cursor at the end of the text.
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let mut buffer = Self {
            rope,
            cursor: Cursor::new(),
        };
        buffer.move_to_end();
        buffer
    }

    /// Create an empty buffer.
    pub fn empty() -> Self {
        Self {
            rope: Rope::from_str(""),
            cursor: Cursor::new(),
        }
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of characters in the buffer.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// True when the buffer is empty or whitespace-only.
    pub fn is_blank(&self) -> bool {
        self.rope.chars().all(char::is_whitespace)
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_at(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let line = self.rope.line(line_idx);
        let s = line.to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in bytes (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_at(line_idx).map_or(0, |s| s.len())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert a character at the cursor position.
    pub fn insert_char(&mut self, ch: char) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, ch);
        self.cursor.set_col(self.cursor.col + ch.len_utf8());
    }

    /// Split the current line at the cursor (Enter key).
    pub fn split_line(&mut self) {
        let char_idx = self.cursor_char_idx();
        self.rope.insert_char(char_idx, '\n');
        self.cursor.line += 1;
        self.cursor.set_col(0);
    }

    /// Delete the character before the cursor (Backspace).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_back(&mut self) -> bool {
        if self.cursor.col == 0 && self.cursor.line == 0 {
            return false;
        }

        if self.cursor.col == 0 {
            // Join with previous line
            let prev_line_len = self.line_len(self.cursor.line - 1);
            let char_idx = self.cursor_char_idx();
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.line -= 1;
            self.cursor.set_col(prev_line_len);
        } else {
            let char_idx = self.cursor_char_idx();
            let line = self.rope.line(self.cursor.line);
            let line_str = line.to_string();
            let before = &line_str[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.rope.remove(char_idx - 1..char_idx);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        }
        true
    }

    /// Delete the character at the cursor (Delete key).
    ///
    /// Returns `true` if a character was deleted.
    pub fn delete_forward(&mut self) -> bool {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len && self.cursor.line + 1 >= self.line_count() {
            return false;
        }

        let char_idx = self.cursor_char_idx();
        self.rope.remove(char_idx..=char_idx);
        true
    }

    /// Move the cursor in the given direction.
    pub fn move_cursor(&mut self, direction: Direction) {
        match direction {
            Direction::Left => self.move_left(),
            Direction::Right => self.move_right(),
            Direction::Up => self.move_up(),
            Direction::Down => self.move_down(),
        }
    }

    /// Move cursor to the beginning of the line (Home).
    pub const fn move_home(&mut self) {
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the line (End).
    pub fn move_end(&mut self) {
        let len = self.line_len(self.cursor.line);
        self.cursor.set_col(len);
    }

    /// Move cursor one word to the left (Ctrl+Left).
    pub fn move_word_left(&mut self) {
        if self.cursor.col == 0 {
            if self.cursor.line > 0 {
                self.cursor.line -= 1;
                self.cursor.set_col(self.line_len(self.cursor.line));
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let before = &line[..self.cursor.col];
        let trimmed = before.trim_end();

        if trimmed.is_empty() {
            self.cursor.set_col(0);
            return;
        }

        let pos = trimmed
            .rfind(|c: char| !c.is_alphanumeric() && c != '_')
            .map_or(0, |i| i + 1);
        self.cursor.set_col(pos);
    }

    /// Move cursor one word to the right (Ctrl+Right).
    pub fn move_word_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);

        if self.cursor.col >= line_len {
            if self.cursor.line + 1 < self.line_count() {
                self.cursor.line += 1;
                self.cursor.set_col(0);
            }
            return;
        }

        let line = self.line_at(self.cursor.line).unwrap_or_default();
        let after = &line[self.cursor.col..];

        let word_end = after
            .find(|c: char| !c.is_alphanumeric() && c != '_')
            .unwrap_or(after.len());
        let rest = &after[word_end..];
        let space_end = rest
            .find(|c: char| c.is_alphanumeric() || c == '_')
            .unwrap_or(rest.len());

        self.cursor.set_col(self.cursor.col + word_end + space_end);
    }

    /// Move cursor to a specific line and column, clamped to the buffer.
    ///
    /// A column falling inside a multibyte character snaps back to the
    /// start of that character.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let max_line = self.line_count().saturating_sub(1);
        self.cursor.line = line.min(max_line);
        let text = self.line_at(self.cursor.line).unwrap_or_default();
        let mut col = col.min(text.len());
        while col > 0 && !text.is_char_boundary(col) {
            col -= 1;
        }
        self.cursor.set_col(col);
    }

    /// Move cursor to the start of the buffer (Ctrl+Home).
    pub const fn move_to_start(&mut self) {
        self.cursor.line = 0;
        self.cursor.set_col(0);
    }

    /// Move cursor to the end of the buffer (Ctrl+End).
    pub fn move_to_end(&mut self) {
        let last_line = self.line_count().saturating_sub(1);
        self.cursor.line = last_line;
        self.cursor.set_col(self.line_len(last_line));
    }

    // --- Private helpers ---

    /// Convert cursor position to a ropey char index.
    fn cursor_char_idx(&self) -> usize {
        let line_start = self.rope.line_to_char(self.cursor.line);
        let line = self.rope.line(self.cursor.line);
        let line_str: String = line.chars().collect();
        let byte_col = self.cursor.col.min(line_str.len());
        let char_offset = line_str[..byte_col].chars().count();
        line_start + char_offset
    }

    fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let before = &line[..self.cursor.col];
            let prev_char_len = before.chars().next_back().map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col - prev_char_len);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.set_col(self.line_len(self.cursor.line));
        }
    }

    fn move_right(&mut self) {
        let line_len = self.line_len(self.cursor.line);
        if self.cursor.col < line_len {
            let line = self.line_at(self.cursor.line).unwrap_or_default();
            let next_char_len = line[self.cursor.col..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor.set_col(self.cursor.col + next_char_len);
        } else if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            self.cursor.set_col(0);
        }
    }

    fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }

    fn move_down(&mut self) {
        if self.cursor.line + 1 < self.line_count() {
            self.cursor.line += 1;
            let max_col = self.line_len(self.cursor.line);
            self.cursor.col = self.cursor.col_memory.min(max_col);
        }
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::empty();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_at(0), Some(String::new()));
        assert!(buf.is_blank());
    }

    #[test]
    fn test_from_text_preserves_content() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_at(0), Some("hello".to_string()));
        assert_eq!(buf.line_at(1), Some("world".to_string()));
        assert_eq!(buf.text(), "hello\nworld");
    }

    #[test]
    fn test_from_text_places_cursor_at_end() {
        let buf = EditorBuffer::from_text("hello\nworld");
        let cursor = buf.cursor();
        assert_eq!(cursor.line, 1);
        assert_eq!(cursor.col, 5);
    }

    #[test]
    fn test_insert_char_advances_cursor() {
        let mut buf = EditorBuffer::empty();
        buf.insert_char('a');
        buf.insert_char('b');
        assert_eq!(buf.text(), "ab");
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut buf = EditorBuffer::empty();
        buf.insert_char('é');
        buf.insert_char('x');
        assert_eq!(buf.text(), "éx");
        assert_eq!(buf.cursor().col, 3);
    }

    #[test]
    fn test_split_line_at_cursor() {
        let mut buf = EditorBuffer::from_text("hello");
        buf.move_to(0, 2);
        buf.split_line();
        assert_eq!(buf.text(), "he\nllo");
        assert_eq!(buf.cursor().line, 1);
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_delete_back_at_line_start_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "abcd");
        assert_eq!(buf.cursor().line, 0);
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_delete_back_at_buffer_start_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.move_to(0, 0);
        assert!(!buf.delete_back());
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_delete_forward_at_line_end_joins_lines() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(0, 2);
        assert!(buf.delete_forward());
        assert_eq!(buf.text(), "abcd");
    }

    #[test]
    fn test_delete_forward_at_buffer_end_is_noop() {
        let mut buf = EditorBuffer::from_text("ab");
        assert!(!buf.delete_forward());
        assert_eq!(buf.text(), "ab");
    }

    #[test]
    fn test_vertical_movement_remembers_column() {
        let mut buf = EditorBuffer::from_text("a long line\nab\nanother long line");
        buf.move_to(0, 8);
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 2, "clamped to short line");
        buf.move_cursor(Direction::Down);
        assert_eq!(buf.cursor().col, 8, "sticky column restored");
    }

    #[test]
    fn test_move_left_across_line_boundary() {
        let mut buf = EditorBuffer::from_text("ab\ncd");
        buf.move_to(1, 0);
        buf.move_cursor(Direction::Left);
        assert_eq!(buf.cursor().line, 0);
        assert_eq!(buf.cursor().col, 2);
    }

    #[test]
    fn test_word_motion() {
        let mut buf = EditorBuffer::from_text("alpha beta_gamma delta");
        buf.move_to(0, 0);
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 6, "start of beta_gamma");
        buf.move_word_right();
        assert_eq!(buf.cursor().col, 17, "start of delta");
        buf.move_word_left();
        assert_eq!(buf.cursor().col, 6);
    }

    #[test]
    fn test_move_to_aligns_inside_multibyte_char() {
        let mut buf = EditorBuffer::from_text("héllo");
        buf.move_to(0, 2);
        assert_eq!(buf.cursor().col, 1, "snaps back to the start of é");
    }

    #[test]
    fn test_insert_after_move_to_inside_multibyte_char() {
        let mut buf = EditorBuffer::from_text("héllo");
        buf.move_to(0, 2);
        buf.insert_char('x');
        assert_eq!(buf.text(), "hxéllo");
    }

    #[test]
    fn test_delete_back_after_move_to_inside_multibyte_char() {
        let mut buf = EditorBuffer::from_text("héllo");
        buf.move_to(0, 2);
        assert!(buf.delete_back());
        assert_eq!(buf.text(), "éllo");
        assert_eq!(buf.cursor().col, 0);
    }

    #[test]
    fn test_char_count_counts_chars_not_bytes() {
        let buf = EditorBuffer::from_text("héllo");
        assert_eq!(buf.char_count(), 5);
    }

    #[test]
    fn test_is_blank_for_whitespace_only() {
        let buf = EditorBuffer::from_text("  \n\t\n");
        assert!(buf.is_blank());
        let buf = EditorBuffer::from_text("  x  ");
        assert!(!buf.is_blank());
    }
}
