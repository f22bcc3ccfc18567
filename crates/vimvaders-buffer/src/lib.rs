//! # Vimvaders Buffer
//!
//! The text model behind the in-game editor overlay.
//!
//! ## Key Concepts
//!
//! ### Fixed Layout
//! - `TextBuffer` holds a fixed number of lines, replaced wholesale when
//!   the tutorial stage changes
//! - Deletion never removes characters: the range is overwritten with
//!   blanks, so every column keeps its index
//!
//! ### No Panics on Bad Input
//! - Queries that cannot answer return `None`
//! - Motions always land on a valid `Position`, wrapping around the
//!   document when they run off either end

mod buffer;
mod cursor;
mod selection;
mod word;

pub use buffer::TextBuffer;
pub use cursor::Position;
pub use selection::{LineRange, WordSpan};
pub use word::is_blank;

/// Result type for buffer operations
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur during buffer operations
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("Position {line}:{column} is out of bounds")]
    PositionOutOfBounds { line: usize, column: usize },

    #[error("Range {start}..{end} on line {line} is invalid")]
    InvalidRange {
        line: usize,
        start: usize,
        end: usize,
    },
}
