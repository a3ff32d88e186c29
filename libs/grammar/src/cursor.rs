//! # Cursor
//!
//! Immutable position inside a source text.
//!
//! ## Example
//!
//! ```rust
//! use grammar::{Source, TextSource};
//!
//! let mut source = TextSource::new("ab\ncd");
//! source.advance();
//! source.advance();
//! source.advance();
//! let cursor = source.cursor();
//! assert_eq!(cursor.offset(), 3);
//! assert_eq!(cursor.line(), 1);
//! assert_eq!(cursor.column(), 0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CURSOR
// =============================================================================

/// Position in a source text: byte offset, line and column (both 0-indexed).
///
/// Cursors are plain values. A source hands them out with
/// [`Source::cursor`](crate::Source::cursor) and accepts them back with
/// [`Source::restore`](crate::Source::restore); any cursor obtained from a
/// source is valid for that source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Cursor {
    offset: usize,
    line: usize,
    column: usize,
}

impl Cursor {
    /// Cursor at the very beginning of a text.
    pub const fn start() -> Self {
        Self {
            offset: 0,
            line: 0,
            column: 0,
        }
    }

    pub(crate) const fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Byte offset into the source text.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Line number (0-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column in characters (0-indexed).
    pub fn column(&self) -> usize {
        self.column
    }

    /// Moves past `ch`, which occupies `width` bytes of the source.
    ///
    /// A line break (already normalized by the source) starts a new line.
    pub(crate) fn step(self, ch: char, width: usize) -> Self {
        if ch == '\n' {
            Self::new(self.offset + width, self.line + 1, 0)
        } else {
            Self::new(self.offset + width, self.line, self.column + 1)
        }
    }
}

/// Displays the position 1-indexed, the way editors count.
impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

// =============================================================================
// TESTS
// =============================================================================
