//! # Sources
//!
//! Forward-only character readers over an in-memory text.
//!
//! Two readers implement [`Source`]:
//!
//! - [`TextSource`] reads the text as is.
//! - [`CommentSkippingSource`] wraps a [`TextSource`] and steps over `//` and
//!   `/* */` comments whenever the cursor moves, so a grammar never observes
//!   a comment character.
//!
//! Both normalize line endings: `\r\n`, `\n\r` and a lone `\r` are read as a
//! single `'\n'`.
//!
//! ## Example
//!
//! ```rust
//! use grammar::{CommentSkippingSource, Source};
//!
//! let mut source = CommentSkippingSource::new("/* lead */x");
//! assert_eq!(source.peek(), Some('x'));
//! source.advance();
//! assert!(source.is_at_end());
//! ```

use crate::cursor::Cursor;
use config::constants::{
    BLOCK_COMMENT_CLOSE, BLOCK_COMMENT_OPEN, LINE_COMMENT, SNIPPET_CURSOR_MARKER,
};

// =============================================================================
// SOURCE TRAIT
// =============================================================================

/// Character reader driven by the grammar engine.
///
/// A source owns exactly one mutable thing, its cursor. The text is shared and
/// read-only for the whole parse.
pub trait Source {
    /// Full text being read.
    fn text(&self) -> &str;

    /// Current position.
    fn cursor(&self) -> Cursor;

    /// Moves back (or forward) to a position previously returned by
    /// [`Source::cursor`].
    fn restore(&mut self, cursor: Cursor);

    /// Character under the cursor, or `None` at end of input.
    fn peek(&self) -> Option<char>;

    /// Moves one logical character forward. Does nothing at end of input.
    fn advance(&mut self);

    /// Returns true once every character has been consumed.
    fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    /// Raw text between two cursors of this source.
    ///
    /// The slice is taken from the underlying text, so comments skipped by a
    /// [`CommentSkippingSource`] are part of it.
    fn slice(&self, from: Cursor, to: Cursor) -> &str {
        let text = self.text();
        let end = to.offset().min(text.len());
        let start = from.offset().min(end);
        &text[start..end]
    }

    /// Context snippet around the current cursor.
    fn snippet(&self, radius: usize) -> String {
        snippet_at(self.text(), self.cursor().offset(), radius)
    }
}

/// Renders up to `radius` characters either side of `offset`, with the
/// cursor marked by [`SNIPPET_CURSOR_MARKER`].
///
/// Control characters are shown as spaces so the snippet stays on one line.
///
/// ## Example
///
/// ```rust
/// use grammar::source::snippet_at;
///
/// assert_eq!(snippet_at("2 + 3 * 4", 4, 2), "+ |3 ");
/// ```
pub fn snippet_at(text: &str, offset: usize, radius: usize) -> String {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let (before, after) = text.split_at(offset);
    let skip = before.chars().count().saturating_sub(radius);
    let mut snippet: String = before.chars().skip(skip).map(printable).collect();
    snippet.push(SNIPPET_CURSOR_MARKER);
    snippet.extend(after.chars().take(radius).map(printable));
    snippet
}

fn printable(ch: char) -> char {
    if ch.is_control() {
        ' '
    } else {
        ch
    }
}

// =============================================================================
// TEXT SOURCE
// =============================================================================

/// Plain reader over a text buffer.
#[derive(Debug, Clone)]
pub struct TextSource<'a> {
    text: &'a str,
    cursor: Cursor,
}

impl<'a> TextSource<'a> {
    /// Creates a reader positioned at the start of `text`.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            cursor: Cursor::start(),
        }
    }

    fn rest(&self) -> &'a str {
        self.text.get(self.cursor.offset()..).unwrap_or("")
    }
}

impl Source for TextSource<'_> {
    fn text(&self) -> &str {
        self.text
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn restore(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn peek(&self) -> Option<char> {
        match self.rest().chars().next()? {
            '\r' => Some('\n'),
            ch => Some(ch),
        }
    }

    fn advance(&mut self) {
        let mut chars = self.rest().chars();
        let Some(ch) = chars.next() else {
            return;
        };
        let mut width = ch.len_utf8();
        let logical = match ch {
            '\r' | '\n' => {
                let partner = if ch == '\r' { '\n' } else { '\r' };
                if chars.next() == Some(partner) {
                    width += 1;
                }
                '\n'
            }
            other => other,
        };
        self.cursor = self.cursor.step(logical, width);
    }
}

// =============================================================================
// COMMENT SKIPPING SOURCE
// =============================================================================

/// Reader that hides `//` line comments and `/* */` block comments.
///
/// Comments are skipped after construction and after every
/// [`Source::advance`], so [`Source::peek`] never returns a comment
/// character. A line comment stops before its line break; an unterminated
/// block comment runs to the end of the input.
#[derive(Debug, Clone)]
pub struct CommentSkippingSource<'a> {
    inner: TextSource<'a>,
}

impl<'a> CommentSkippingSource<'a> {
    /// Creates a reader positioned at the first non-comment character.
    pub fn new(text: &'a str) -> Self {
        let mut source = Self {
            inner: TextSource::new(text),
        };
        source.skip_comments();
        source
    }

    fn skip_comments(&mut self) {
        loop {
            let rest = self.inner.rest();
            if rest.starts_with(LINE_COMMENT) {
                while !matches!(self.inner.peek(), None | Some('\n')) {
                    self.inner.advance();
                }
            } else if rest.starts_with(BLOCK_COMMENT_OPEN) {
                self.skip_chars(BLOCK_COMMENT_OPEN.chars().count());
                while !self.inner.is_at_end() && !self.inner.rest().starts_with(BLOCK_COMMENT_CLOSE)
                {
                    self.inner.advance();
                }
                self.skip_chars(BLOCK_COMMENT_CLOSE.chars().count());
            } else {
                break;
            }
        }
    }

    fn skip_chars(&mut self, count: usize) {
        for _ in 0..count {
            self.inner.advance();
        }
    }
}

impl Source for CommentSkippingSource<'_> {
    fn text(&self) -> &str {
        self.inner.text()
    }

    fn cursor(&self) -> Cursor {
        self.inner.cursor()
    }

    fn restore(&mut self, cursor: Cursor) {
        self.inner.restore(cursor);
    }

    fn peek(&self) -> Option<char> {
        self.inner.peek()
    }

    fn advance(&mut self) {
        self.inner.advance();
        self.skip_comments();
    }
}

// =============================================================================
// TESTS
// =============================================================================
