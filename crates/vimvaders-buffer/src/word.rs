//! Single-line scanning helpers for word motions.
//!
//! The overlay uses a deliberately small character model: the space
//! character is blank and everything else, punctuation included, belongs
//! to a word. `hello.world` is one word; `a, b` is two (`a,` and `b`).

use ropey::RopeSlice;

/// Returns true for the one character that separates words.
#[inline]
pub fn is_blank(c: char) -> bool {
    c == ' '
}

/// Column where the word containing `col` begins.
pub(crate) fn scan_word_start(line: RopeSlice<'_>, col: usize) -> usize {
    let mut start = col;
    while start > 0 && !is_blank(line.char(start - 1)) {
        start -= 1;
    }
    start
}

/// Column just past the word that begins at or contains `col`.
pub(crate) fn scan_word_end(line: RopeSlice<'_>, col: usize) -> usize {
    let len = line.len_chars();
    let mut end = col;
    while end < len && !is_blank(line.char(end)) {
        end += 1;
    }
    end
}

/// Skips blanks to the right of `col`.
pub(crate) fn skip_blanks_forward(line: RopeSlice<'_>, col: usize) -> usize {
    let len = line.len_chars();
    let mut col = col;
    while col < len && is_blank(line.char(col)) {
        col += 1;
    }
    col
}

/// Skips blanks to the left of `col`.
pub(crate) fn skip_blanks_backward(line: RopeSlice<'_>, col: usize) -> usize {
    let mut col = col;
    while col > 0 && is_blank(line.char(col - 1)) {
        col -= 1;
    }
    col
}

/// First non-blank column of a line, if any.
pub(crate) fn first_non_blank(line: RopeSlice<'_>) -> Option<usize> {
    line.chars().position(|c| !is_blank(c))
}
