//! Word spans and single-line selection ranges.
//!
//! ## Learning: Range Types
//!
//! Both types use exclusive ends, like `Range<usize>`:
//! - Empty ranges (start == end) are natural
//! - Length is simply `end - start`
//! - Slicing a line by `start..end` needs no adjustment

use serde::{Deserialize, Serialize};

/// The run of non-blank characters around a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSpan {
    /// The word itself
    pub text: String,
    /// First column of the word (inclusive)
    pub start: usize,
    /// Column just past the word (exclusive)
    pub end: usize,
    /// Line the word sits on
    pub line: usize,
}

impl WordSpan {
    /// Number of characters in the word.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for a zero-width span.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A selection confined to one line.
///
/// Selections that would cross lines are never built; see
/// [`crate::TextBuffer::selection_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    /// Line the selection sits on
    pub line: usize,
    /// Start column (inclusive)
    pub start: usize,
    /// End column (exclusive)
    pub end: usize,
    /// Selected text
    pub text: String,
}

impl LineRange {
    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if a column falls inside the selection.
    pub fn contains(&self, column: usize) -> bool {
        column >= self.start && column < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_contains() {
        let range = LineRange {
            line: 0,
            start: 4,
            end: 7,
            text: "def".to_string(),
        };
        assert_eq!(range.len(), 3);
        assert!(range.contains(4));
        assert!(!range.contains(7)); // End is exclusive
    }

    #[test]
    fn test_empty_span() {
        let span = WordSpan {
            text: String::new(),
            start: 3,
            end: 3,
            line: 1,
        };
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }
}
