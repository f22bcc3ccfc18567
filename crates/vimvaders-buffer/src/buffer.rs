//! Fixed-layout text buffer backed by a rope.
//!
//! ## Why Rope?
//!
//! The overlay documents are small, but a rope gives us char-indexed line
//! access without re-walking UTF-8 on every motion, and in-place edits
//! that never reallocate the whole text.
//!
//! ## Learning: Length-Preserving Edits
//!
//! The game never inserts text and never shortens a line. Deleting a
//! selection overwrites it with blanks, so a `Position` taken before the
//! edit still points at the same column afterwards.

use ropey::{Rope, RopeSlice};

use crate::selection::{LineRange, WordSpan};
use crate::word::{
    first_non_blank, is_blank, scan_word_end, scan_word_start, skip_blanks_backward,
    skip_blanks_forward,
};
use crate::{BufferError, BufferResult, Position};

/// The overlay document: a fixed number of lines held in a rope.
///
/// Lines are stored joined by `\n`; callers never see the separator.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    /// Line text, joined by `\n` without a trailing separator
    rope: Rope,

    /// Number of logical lines (an empty rope may hold zero or one)
    line_count: usize,
}

impl TextBuffer {
    /// Creates an empty buffer with no lines.
    ///
    /// # Example
    /// ```
    /// use vimvaders_buffer::TextBuffer;
    ///
    /// let buffer = TextBuffer::new();
    /// assert!(buffer.is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            line_count: 0,
        }
    }

    /// Creates a buffer from a list of lines.
    ///
    /// Line breaks inside a line are turned into blanks so the line
    /// count always matches the input.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut buffer = Self::new();
        buffer.replace_lines(lines);
        buffer
    }

    /// Swaps in a whole new document.
    pub fn replace_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut text = String::new();
        let mut count = 0;
        for line in lines {
            if count > 0 {
                text.push('\n');
            }
            text.extend(line.as_ref().chars().map(sanitize));
            count += 1;
        }
        self.rope = Rope::from_str(&text);
        self.line_count = count;
    }

    // ==================== Text Access ====================

    /// Returns a line's text without its separator.
    pub fn line(&self, line_idx: usize) -> Option<String> {
        self.line_slice(line_idx).map(String::from)
    }

    /// Returns every line, in order.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count)
            .filter_map(|idx| self.line(idx))
            .collect()
    }

    /// Returns the character at a position, if there is one.
    pub fn char_at(&self, pos: Position) -> Option<char> {
        let line = self.line_slice(pos.line)?;
        (pos.column < line.len_chars()).then(|| line.char(pos.column))
    }

    fn line_slice(&self, line_idx: usize) -> Option<RopeSlice<'_>> {
        if line_idx >= self.line_count {
            return None;
        }
        let line = self.rope.line(line_idx);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            Some(line.slice(..len - 1))
        } else {
            Some(line)
        }
    }

    // ==================== Measurements ====================

    /// Returns true if the buffer has no lines.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }

    /// Returns the number of lines in the document.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Returns the length of a line in characters.
    pub fn line_len(&self, line_idx: usize) -> Option<usize> {
        self.line_slice(line_idx).map(|line| line.len_chars())
    }

    // ==================== Validation ====================

    /// Checks that a position addresses an existing line and column.
    ///
    /// The column may equal the line length.
    pub fn check_position(&self, pos: Position) -> BufferResult<()> {
        match self.line_len(pos.line) {
            Some(len) if pos.column <= len => Ok(()),
            _ => Err(BufferError::PositionOutOfBounds {
                line: pos.line,
                column: pos.column,
            }),
        }
    }

    /// Pulls a position back inside the document.
    ///
    /// An empty document clamps everything to the origin.
    pub fn clamp(&self, pos: Position) -> Position {
        if self.line_count == 0 {
            return Position::ZERO;
        }
        let line = pos.line.min(self.line_count - 1);
        let len = self.line_len(line).unwrap_or(0);
        Position::new(line, pos.column.min(len))
    }

    // ==================== Words ====================

    /// Returns the word under a position.
    ///
    /// Scans left while the previous character is non-blank and right
    /// while the current character is non-blank. On a blank that follows
    /// a word, the span is that preceding word.
    pub fn word_at(&self, pos: Position) -> Option<WordSpan> {
        let line = self.line_slice(pos.line)?;
        if pos.column > line.len_chars() {
            return None;
        }

        let start = scan_word_start(line, pos.column);
        let end = scan_word_end(line, pos.column);

        Some(WordSpan {
            text: line.slice(start..end).into(),
            start,
            end,
            line: pos.line,
        })
    }

    /// `w`: start of the next word.
    ///
    /// Skips the rest of the current word and the blanks after it. When
    /// the line runs out, lands on the first non-blank of a later line.
    /// With no later word, stops at the end of the current line, and from
    /// there wraps to the start of the document.
    pub fn next_word_boundary(&self, pos: Position) -> Position {
        if self.is_empty() {
            return Position::ZERO;
        }
        let pos = self.clamp(pos);
        let Some(line) = self.line_slice(pos.line) else {
            return Position::ZERO;
        };
        let len = line.len_chars();

        if pos.column < len {
            let col = skip_blanks_forward(line, scan_word_end(line, pos.column));
            if col < len {
                return Position::new(pos.line, col);
            }
            return self
                .first_word_after(pos.line)
                .unwrap_or(Position::new(pos.line, len));
        }

        self.first_word_after(pos.line).unwrap_or(Position::ZERO)
    }

    /// `b`: start of the previous word.
    ///
    /// From column 0, retries from the end of the previous line, wrapping
    /// from the first line to the last. A document with no words at all
    /// sends the cursor to the origin.
    pub fn previous_word_boundary(&self, pos: Position) -> Position {
        if self.is_empty() {
            return Position::ZERO;
        }
        let mut pos = self.clamp(pos);

        for _ in 0..=self.line_count {
            if pos.column > 0 {
                if let Some(line) = self.line_slice(pos.line) {
                    let col = scan_word_start(line, skip_blanks_backward(line, pos.column));
                    return Position::new(pos.line, col);
                }
            }

            let prev = if pos.line == 0 {
                self.line_count - 1
            } else {
                pos.line - 1
            };
            pos = Position::new(prev, self.line_len(prev).unwrap_or(0));
        }

        Position::ZERO
    }

    fn first_word_after(&self, line_idx: usize) -> Option<Position> {
        (line_idx + 1..self.line_count).find_map(|idx| {
            let line = self.line_slice(idx)?;
            first_non_blank(line).map(|col| Position::new(idx, col))
        })
    }

    // ==================== Selection ====================

    /// Builds the selection between an anchor and the cursor.
    ///
    /// Only same-line selections exist; anything else is `None`.
    pub fn selection_range(&self, anchor: Position, cursor: Position) -> Option<LineRange> {
        if !anchor.same_line(&cursor) {
            return None;
        }
        let line = self.line_slice(anchor.line)?;
        let len = line.len_chars();
        let start = anchor.column.min(cursor.column).min(len);
        let end = anchor.column.max(cursor.column).min(len);

        Some(LineRange {
            line: anchor.line,
            start,
            end,
            text: line.slice(start..end).into(),
        })
    }

    // ==================== Mutations ====================

    /// Overwrites a range with blanks and returns what was there.
    ///
    /// The line keeps its length. A range that does not fit the current
    /// document returns `None` and leaves the buffer untouched.
    pub fn delete_range(&mut self, range: &LineRange) -> Option<String> {
        let len = self.line_len(range.line)?;
        if range.start > range.end || range.end > len {
            return None;
        }

        let line_start = self.rope.line_to_char(range.line);
        let from = line_start + range.start;
        let to = line_start + range.end;

        let removed: String = self.rope.slice(from..to).into();
        self.rope.remove(from..to);
        self.rope.insert(from, &" ".repeat(range.end - range.start));

        Some(removed)
    }

    /// Same as [`delete_range`](Self::delete_range), with a reason on failure.
    pub fn try_delete_range(&mut self, range: &LineRange) -> BufferResult<String> {
        self.delete_range(range).ok_or(BufferError::InvalidRange {
            line: range.line,
            start: range.start,
            end: range.end,
        })
    }

    /// Returns true if the line holds nothing but blanks.
    pub fn is_blank_line(&self, line_idx: usize) -> bool {
        self.line_slice(line_idx)
            .is_some_and(|line| line.chars().all(is_blank))
    }
}

/// Keeps line separators out of individual lines.
fn sanitize(c: char) -> char {
    match c {
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}' => ' ',
        other => other,
    }
}

impl<S: AsRef<str>> FromIterator<S> for TextBuffer {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from_lines(iter)
    }
}
