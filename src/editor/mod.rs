//! Source editor: the text the user submits.

use unicode_width::UnicodeWidthStr;

use crate::utils::unicode::char_to_byte_index;

/// Spaces inserted by the Tab key.
pub const TAB: &str = "    ";

/// What the controller needs from whatever hosts the source text.
pub trait EditorSurface {
    fn text(&self) -> &str;
    /// Replace the whole buffer.
    fn set_text(&mut self, text: String);
    fn focus(&mut self);
}

/// Multi-line buffer with a caret and an optional selection, both measured
/// in chars.
#[derive(Debug, Clone, Default)]
pub struct Editor {
    text: String,
    caret: usize,
    anchor: Option<usize>,
    focused: bool,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut editor = Self::default();
        editor.set_text(text.into());
        editor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Selected char range, ordered.
    pub fn selection(&self) -> Option<(usize, usize)> {
        let anchor = self.anchor?;
        if anchor == self.caret {
            return None;
        }
        Some((anchor.min(self.caret), anchor.max(self.caret)))
    }

    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.char_len();
        self.anchor = Some(start.min(len));
        self.caret = end.min(len);
    }

    pub fn select_all(&mut self) {
        self.select(0, self.char_len());
    }

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        let (from, to) = (
            char_to_byte_index(&self.text, start),
            char_to_byte_index(&self.text, end),
        );
        self.text.replace_range(from..to, "");
        self.caret = start;
        self.anchor = None;
        true
    }

    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        let at = char_to_byte_index(&self.text, self.caret);
        self.text.insert_str(at, s);
        self.caret += s.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    pub fn newline(&mut self) {
        self.insert_char('\n');
    }

    /// Four literal spaces at the caret, replacing any selection.
    pub fn insert_tab(&mut self) {
        self.insert_str(TAB);
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() || self.caret == 0 {
            return;
        }
        let from = char_to_byte_index(&self.text, self.caret - 1);
        let to = char_to_byte_index(&self.text, self.caret);
        self.text.replace_range(from..to, "");
        self.caret -= 1;
    }

    pub fn delete(&mut self) {
        if self.delete_selection() || self.caret >= self.char_len() {
            return;
        }
        let from = char_to_byte_index(&self.text, self.caret);
        let to = char_to_byte_index(&self.text, self.caret + 1);
        self.text.replace_range(from..to, "");
    }

    /// Move the caret; with `extend` the selection grows from where it was.
    fn move_to(&mut self, pos: usize, extend: bool) {
        if extend {
            self.anchor.get_or_insert(self.caret);
        } else {
            self.anchor = None;
        }
        self.caret = pos.min(self.char_len());
    }

    pub fn move_left(&mut self, extend: bool) {
        self.move_to(self.caret.saturating_sub(1), extend);
    }

    pub fn move_right(&mut self, extend: bool) {
        self.move_to(self.caret + 1, extend);
    }

    pub fn move_home(&mut self, extend: bool) {
        let (line_start, _) = self.line_bounds(self.caret);
        self.move_to(line_start, extend);
    }

    pub fn move_end(&mut self, extend: bool) {
        let (_, line_end) = self.line_bounds(self.caret);
        self.move_to(line_end, extend);
    }

    pub fn move_up(&mut self, extend: bool) {
        let (line_start, _) = self.line_bounds(self.caret);
        if line_start == 0 {
            self.move_to(0, extend);
            return;
        }
        let column = self.caret - line_start;
        let (prev_start, prev_end) = self.line_bounds(line_start - 1);
        self.move_to((prev_start + column).min(prev_end), extend);
    }

    pub fn move_down(&mut self, extend: bool) {
        let (line_start, line_end) = self.line_bounds(self.caret);
        if line_end >= self.char_len() {
            self.move_to(line_end, extend);
            return;
        }
        let column = self.caret - line_start;
        let (next_start, next_end) = self.line_bounds(line_end + 1);
        self.move_to((next_start + column).min(next_end), extend);
    }

    /// Char range `[start, end)` of the line containing `pos`, newline excluded.
    fn line_bounds(&self, pos: usize) -> (usize, usize) {
        let chars: Vec<char> = self.text.chars().collect();
        let pos = pos.min(chars.len());
        let start = chars[..pos]
            .iter()
            .rposition(|&c| c == '\n')
            .map_or(0, |i| i + 1);
        let end = chars[pos..]
            .iter()
            .position(|&c| c == '\n')
            .map_or(chars.len(), |i| pos + i);
        (start, end)
    }

    /// Caret row and display column, for placing the terminal cursor.
    pub fn caret_position(&self) -> (usize, usize) {
        let before = &self.text[..char_to_byte_index(&self.text, self.caret)];
        let row = before.matches('\n').count();
        let line = before.rsplit('\n').next().unwrap_or("");
        (row, UnicodeWidthStr::width(line))
    }
}

impl EditorSurface for Editor {
    fn text(&self) -> &str {
        &self.text
    }

    fn set_text(&mut self, text: String) {
        self.text = text;
        self.caret = self.char_len();
        self.anchor = None;
    }

    fn focus(&mut self) {
        self.focused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tab_inserts_four_spaces_at_caret() {
        let mut ed = Editor::with_text("ab");
        ed.move_left(false);
        ed.insert_tab();
        assert_eq!(ed.text(), "a    b");
        assert_eq!(ed.caret, 5);
    }

    #[test]
    fn tab_replaces_selection() {
        let mut ed = Editor::with_text("if x then");
        ed.select(3, 4);
        ed.insert_tab();
        assert_eq!(ed.text(), format!("if {TAB} then"));
        assert_eq!(ed.caret, 7);
        assert_eq!(ed.selection(), None);
    }

    #[test]
    fn backspace_and_delete_handle_multibyte_chars() {
        let mut ed = Editor::with_text("a🎯b");
        ed.move_left(false);
        ed.backspace();
        assert_eq!(ed.text(), "ab");
        ed.move_home(false);
        ed.delete();
        assert_eq!(ed.text(), "b");
    }

    #[test]
    fn vertical_moves_keep_column_when_possible() {
        let mut ed = Editor::with_text("first line\nab\nthird line");
        // caret at end of "third line" (column 10)
        ed.move_up(false);
        assert_eq!(ed.caret_position(), (1, 2));
        ed.move_up(false);
        assert_eq!(ed.caret_position(), (0, 2));
        ed.move_down(false);
        ed.move_down(false);
        assert_eq!(ed.caret_position(), (2, 2));
    }

    #[test]
    fn shift_movement_extends_selection() {
        let mut ed = Editor::with_text("hello");
        ed.move_home(false);
        ed.move_right(true);
        ed.move_right(true);
        assert_eq!(ed.selection(), Some((0, 2)));
        ed.insert_char('J');
        assert_eq!(ed.text(), "Jllo");
    }

    #[test]
    fn set_text_overwrites_and_moves_caret_to_end() {
        let mut ed = Editor::with_text("old");
        ed.set_text("new text".into());
        assert_eq!(ed.text(), "new text");
        assert_eq!(ed.caret, 8);
    }

    #[test]
    fn empty_set_text_resets_caret_and_selection() {
        let mut ed = Editor::with_text("print(1)");
        ed.select_all();
        ed.set_text(String::new());
        assert_eq!(ed.text(), "");
        assert_eq!(ed.caret, 0);
        assert_eq!(ed.selection(), None);
        ed.insert_char('x');
        assert_eq!(ed.text(), "x");
    }
}
