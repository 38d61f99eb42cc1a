//! Editable text surface
//!
//! Holds the text being annotated, a caret, and an optional selection
//! anchor. All offsets are char offsets into the whole value, so a
//! selection reported from here indexes the full text.

use crate::capture::{CandidateSelection, SelectionSource};
use crate::model::TextRange;

#[derive(Debug, Clone)]
pub struct TextSurface {
    /// Current caret position (row, col), col in chars
    pub row: usize,
    pub col: usize,
    content: String,
    /// Char offset at which each line starts
    line_starts: Vec<usize>,
    lines: Vec<String>,
    /// Selection anchor as a char offset; the caret is the other end
    anchor: Option<usize>,
}

impl TextSurface {
    pub fn new(content: &str) -> Self {
        let mut surface = Self {
            row: 0,
            col: 0,
            content: String::new(),
            line_starts: vec![0],
            lines: vec![String::new()],
            anchor: None,
        };
        surface.set_content(content);
        surface
    }

    /// Replace content, recompute line offsets and reset caret and selection
    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
        self.reindex();
        self.row = 0;
        self.col = 0;
        self.anchor = None;
    }

    fn reindex(&mut self) {
        self.lines = self.content.split('\n').map(String::from).collect();
        self.line_starts.clear();
        let mut start = 0;
        for line in &self.lines {
            self.line_starts.push(start);
            start += line.chars().count() + 1;
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Get current caret position as (row, col)
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|s| s.as_str())
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines.get(row).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Convert (row, col) to char offset
    pub fn cursor_to_offset(&self, row: usize, col: usize) -> usize {
        match self.line_starts.get(row) {
            Some(&start) => start + col.min(self.line_len(row)),
            None => self.char_count(),
        }
    }

    /// Convert char offset to (row, col)
    pub fn offset_to_cursor(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.char_count());
        for (i, &start) in self.line_starts.iter().enumerate().rev() {
            if offset >= start {
                return (i, offset - start);
            }
        }
        (0, 0)
    }

    pub fn caret_offset(&self) -> usize {
        self.cursor_to_offset(self.row, self.col)
    }

    pub fn set_cursor_offset(&mut self, offset: usize) {
        let (row, col) = self.offset_to_cursor(offset);
        self.row = row;
        self.col = col;
    }

    // Selection

    /// Drop an anchor at the caret; moving the caret extends the selection
    pub fn begin_selection(&mut self) {
        self.anchor = Some(self.caret_offset());
    }

    /// Select an explicit char range, like setting selectionStart/End
    pub fn select(&mut self, start: usize, end: usize) {
        let count = self.char_count();
        self.anchor = Some(start.min(count));
        self.set_cursor_offset(end);
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    pub fn has_selection(&self) -> bool {
        self.anchor.is_some()
    }

    /// Ordered selection range; may be empty when the caret sits on the anchor
    pub fn selection_range(&self) -> Option<TextRange> {
        let anchor = self.anchor?;
        Some(TextRange::new(anchor, self.caret_offset()))
    }

    fn slice_chars(&self, range: TextRange) -> String {
        self.content
            .chars()
            .skip(range.start_offset)
            .take(range.len())
            .collect()
    }

    // Editing

    fn byte_index(&self, offset: usize) -> usize {
        self.content
            .char_indices()
            .nth(offset)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        self.anchor = None;
        let offset = self.caret_offset();
        let at = self.byte_index(offset);
        self.content.insert(at, ch);
        self.reindex();
        self.set_cursor_offset(offset + 1);
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    /// Delete the char before the caret
    pub fn backspace(&mut self) {
        self.anchor = None;
        let offset = self.caret_offset();
        if offset == 0 {
            return;
        }
        let at = self.byte_index(offset - 1);
        self.content.remove(at);
        self.reindex();
        self.set_cursor_offset(offset - 1);
    }

    /// Delete the char under the caret
    pub fn delete(&mut self) {
        self.anchor = None;
        let offset = self.caret_offset();
        if offset >= self.char_count() {
            return;
        }
        let at = self.byte_index(offset);
        self.content.remove(at);
        self.reindex();
        self.set_cursor_offset(offset);
    }

    // Caret movement

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            // Move to end of previous line
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            // Move to start of next line
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_to_start(&mut self) {
        self.col = 0;
    }

    pub fn move_to_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    pub fn move_to_top(&mut self) {
        self.row = 0;
        self.col = 0;
    }

    pub fn move_to_bottom(&mut self) {
        self.row = self.lines.len().saturating_sub(1);
        self.col = 0;
    }

    pub fn move_word_forward(&mut self) {
        let chars: Vec<char> = match self.lines.get(self.row) {
            Some(line) => line.chars().collect(),
            None => return,
        };
        let mut col = self.col;

        // Skip current word (non-whitespace)
        while col < chars.len() && !chars[col].is_whitespace() {
            col += 1;
        }
        // Skip whitespace
        while col < chars.len() && chars[col].is_whitespace() {
            col += 1;
        }

        if col >= chars.len() && self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        } else {
            self.col = col;
        }
    }

    pub fn move_word_back(&mut self) {
        if self.col == 0 {
            if self.row > 0 {
                self.row -= 1;
                self.col = self.line_len(self.row);
            }
            return;
        }

        let chars: Vec<char> = match self.lines.get(self.row) {
            Some(line) => line.chars().collect(),
            None => return,
        };
        let mut col = self.col.min(chars.len());

        while col > 0 && chars[col - 1].is_whitespace() {
            col -= 1;
        }
        while col > 0 && !chars[col - 1].is_whitespace() {
            col -= 1;
        }

        self.col = col;
    }
}

impl Default for TextSurface {
    fn default() -> Self {
        Self::new("")
    }
}

impl SelectionSource for TextSurface {
    fn selection(&self) -> Option<CandidateSelection> {
        let range = self.selection_range()?;
        if range.is_empty() {
            return None;
        }
        let text = self.slice_chars(range);
        if text.is_empty() {
            return None;
        }
        Some(CandidateSelection::new(range.start_offset, range.end_offset, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_movement() {
        let mut surface = TextSurface::new("Hello\nWorld\nTest");

        assert_eq!(surface.cursor(), (0, 0));

        surface.move_down();
        assert_eq!(surface.cursor(), (1, 0));

        surface.move_right();
        surface.move_right();
        assert_eq!(surface.cursor(), (1, 2));

        surface.move_up();
        assert_eq!(surface.cursor(), (0, 2));
    }

    #[test]
    fn test_offset_conversion() {
        let surface = TextSurface::new("Hello\nWorld");

        assert_eq!(surface.cursor_to_offset(0, 0), 0);
        assert_eq!(surface.cursor_to_offset(0, 5), 5);
        assert_eq!(surface.cursor_to_offset(1, 0), 6);
        assert_eq!(surface.cursor_to_offset(1, 5), 11);
        assert_eq!(surface.cursor_to_offset(7, 0), 11);

        assert_eq!(surface.offset_to_cursor(0), (0, 0));
        assert_eq!(surface.offset_to_cursor(6), (1, 0));
        assert_eq!(surface.offset_to_cursor(8), (1, 2));
    }

    #[test]
    fn test_offsets_count_chars_not_bytes() {
        let surface = TextSurface::new("crème\nbrûlée");
        assert_eq!(surface.cursor_to_offset(1, 0), 6);
        assert_eq!(surface.char_count(), 12);
    }

    #[test]
    fn test_selection_reports_full_text_offsets() {
        let mut surface = TextSurface::new("Lemon Herb\nRoasted Chicken");
        surface.set_cursor_offset(11);
        surface.begin_selection();
        surface.move_word_forward();
        let candidate = surface.selection().unwrap();
        assert_eq!(candidate, CandidateSelection::new(11, 19, "Roasted "));
    }

    #[test]
    fn test_backwards_selection_is_ordered() {
        let mut surface = TextSurface::new("garlic, rosemary");
        surface.select(14, 8);
        let candidate = surface.selection().unwrap();
        assert_eq!((candidate.start, candidate.end), (8, 14));
        assert_eq!(candidate.text, "rosema");
    }

    #[test]
    fn test_collapsed_or_missing_selection_is_none() {
        let mut surface = TextSurface::new("thyme");
        assert_eq!(surface.selection(), None);
        surface.set_cursor_offset(2);
        surface.begin_selection();
        assert_eq!(surface.selection(), None);
    }

    #[test]
    fn test_editing() {
        let mut surface = TextSurface::new("ab");
        surface.set_cursor_offset(1);
        surface.insert_char('é');
        assert_eq!(surface.content(), "aéb");
        assert_eq!(surface.caret_offset(), 2);

        surface.insert_newline();
        assert_eq!(surface.content(), "aé\nb");
        assert_eq!(surface.cursor(), (1, 0));

        surface.backspace();
        assert_eq!(surface.content(), "aéb");
        assert_eq!(surface.cursor(), (0, 2));

        surface.delete();
        assert_eq!(surface.content(), "aé");

        surface.move_to_top();
        surface.backspace();
        assert_eq!(surface.content(), "aé");
    }

    #[test]
    fn test_editing_clears_selection() {
        let mut surface = TextSurface::new("olive oil");
        surface.select(0, 5);
        surface.insert_char('!');
        assert!(!surface.has_selection());
    }
}
