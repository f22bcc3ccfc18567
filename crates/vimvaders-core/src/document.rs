//! The overlay document and its cursor.
//!
//! ## Learning: Composition over Inheritance
//!
//! `Document` composes a `TextBuffer` with the cursor that moves over
//! it. Only the interpreter holds a `&mut Document`; the host reads it
//! through shared references for drawing.

use vimvaders_buffer::{LineRange, Position, TextBuffer};

use crate::CoreResult;

/// The text the player "edits", plus where the cursor sits in it.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The underlying text buffer
    buffer: TextBuffer,

    /// Cursor position; always valid for `buffer`
    cursor: Position,
}

impl Document {
    /// Creates a document from lines with the cursor at the origin.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            buffer: TextBuffer::from_lines(lines),
            cursor: Position::ZERO,
        }
    }

    /// Returns the text buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// Returns the cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Returns every line, for drawing.
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines()
    }

    /// Moves the cursor, refusing positions outside the document.
    pub fn move_cursor(&mut self, position: Position) -> CoreResult<()> {
        self.buffer.check_position(position)?;
        self.cursor = position;
        Ok(())
    }

    /// Swaps in new content and puts the cursor back at the origin.
    pub fn replace(&mut self, lines: &[String]) {
        self.buffer.replace_lines(lines);
        self.cursor = Position::ZERO;
    }

    /// Blanks out the selection between `anchor` and the cursor.
    ///
    /// Returns the range that was cleared, with its old text. Cross-line
    /// selections have no range and delete nothing.
    pub fn delete_selection(&mut self, anchor: Position) -> Option<LineRange> {
        let mut range = self.buffer.selection_range(anchor, self.cursor)?;
        range.text = self.buffer.delete_range(&range)?;
        Some(range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;

    #[test]
    fn test_move_cursor_validates() {
        let mut doc = Document::from_lines(["abc"]);
        assert!(doc.move_cursor(Position::new(0, 3)).is_ok());
        assert!(matches!(
            doc.move_cursor(Position::new(1, 0)),
            Err(CoreError::Buffer(_))
        ));
        assert_eq!(doc.cursor(), Position::new(0, 3));
    }

    #[test]
    fn test_replace_resets_cursor() {
        let mut doc = Document::from_lines(["abc def"]);
        doc.move_cursor(Position::new(0, 4)).unwrap();
        doc.replace(&["xyz".to_string(), "uvw".to_string()]);

        assert_eq!(doc.cursor(), Position::ZERO);
        assert_eq!(doc.lines(), vec!["xyz", "uvw"]);
    }

    #[test]
    fn test_cross_line_selection_deletes_nothing() {
        let mut doc = Document::from_lines(["abc", "def"]);
        doc.move_cursor(Position::new(1, 2)).unwrap();

        assert!(doc.delete_selection(Position::new(0, 0)).is_none());
        assert_eq!(doc.lines(), vec!["abc", "def"]);
    }
}
