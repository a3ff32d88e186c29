//! # Configuration Constants
//!
//! Centralized constants for the grammar engine. Whitespace handling,
//! comment syntax, numeric alphabets and diagnostic limits are defined here.
//!
//! ## Categories
//!
//! - **Characters**: Whitespace set and comment delimiters
//! - **Numbers**: Digit alphabet and radix bounds
//! - **Diagnostics**: Trace label and context snippet widths
//! - **Limits**: Maximum nesting of grammar attempts

// =============================================================================
// CHARACTER CONSTANTS
// =============================================================================

/// Characters skipped by whitespace-skipping sequences and repetitions.
///
/// Line endings are normalized by the source before the grammar sees them,
/// but `'\r'` is listed so that raw slices can be trimmed with the same set.
///
/// # Example
///
/// ```rust
/// use config::constants::WHITESPACE;
///
/// assert!(WHITESPACE.contains(&' '));
/// assert!(!WHITESPACE.contains(&'x'));
/// ```
pub const WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\u{0B}', '\u{0C}'];

/// Opens a comment that runs to the end of the line.
pub const LINE_COMMENT: &str = "//";

/// Opens a block comment.
pub const BLOCK_COMMENT_OPEN: &str = "/*";

/// Closes a block comment.
///
/// An unterminated block comment extends to the end of the input.
pub const BLOCK_COMMENT_CLOSE: &str = "*/";

/// Returns true if `ch` belongs to [`WHITESPACE`].
///
/// # Example
///
/// ```rust
/// use config::constants::is_whitespace;
///
/// assert!(is_whitespace('\n'));
/// assert!(!is_whitespace('_'));
/// ```
pub fn is_whitespace(ch: char) -> bool {
    WHITESPACE.contains(&ch)
}

// =============================================================================
// NUMBER CONSTANTS
// =============================================================================

/// Digit alphabet for unsigned integers in any base up to [`MAX_RADIX`].
///
/// A base `B` grammar accepts the first `B` symbols of this alphabet,
/// compared case-insensitively.
///
/// # Example
///
/// ```rust
/// use config::constants::DIGIT_ALPHABET;
///
/// let hex: &str = &DIGIT_ALPHABET[..16];
/// assert_eq!(hex, "0123456789abcdef");
/// ```
pub const DIGIT_ALPHABET: &str = "0123456789abcdefghijklmnopqrstuvwxyz";

/// Smallest base an integer grammar accepts.
pub const MIN_RADIX: u32 = 2;

/// Largest base an integer grammar accepts (one symbol per alphabet entry).
pub const MAX_RADIX: u32 = 36;

/// Base used by rational literals unless another is requested.
pub const DEFAULT_RATIONAL_BASE: u32 = 10;

// =============================================================================
// DIAGNOSTIC CONSTANTS
// =============================================================================

/// Number of characters shown either side of the cursor in a context snippet.
///
/// # Example
///
/// ```rust
/// use config::constants::SNIPPET_RADIUS;
///
/// // A snippet never exceeds both sides plus the cursor marker.
/// let max_len = SNIPPET_RADIUS * 2 + 1;
/// assert!(max_len > SNIPPET_RADIUS);
/// ```
pub const SNIPPET_RADIUS: usize = 8;

/// Marker inserted into a context snippet at the cursor position.
pub const SNIPPET_CURSOR_MARKER: char = '|';

/// Maximum width of a grammar label in a trace line.
///
/// Labels are rendered from the grammar tree and can be arbitrarily long;
/// longer labels are cut and suffixed with `...`.
pub const TRACE_LABEL_WIDTH: usize = 48;

/// Indentation per nesting level when a trace is rendered as text.
pub const TRACE_INDENT: usize = 2;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum nesting of grammar attempts in a single parse.
///
/// Deeper nesting (for example thousands of opening parentheses) is
/// rejected with a recursion-limit error. The stack itself is grown on
/// demand, see [`STACKER_STACK_SIZE_BYTES`].
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_ATTEMPT_DEPTH;
///
/// let current_depth = 500;
/// assert!(current_depth < MAX_ATTEMPT_DEPTH);
/// ```
pub const MAX_ATTEMPT_DEPTH: usize = 1024;

/// Bytes of stack space allocated when a recursive parse or tree walk runs
/// low on stack, using the `stacker` crate.
///
/// # Examples
/// ```
/// use config::constants::STACKER_STACK_SIZE_BYTES;
/// assert!(STACKER_STACK_SIZE_BYTES >= 1024);
/// ```
pub const STACKER_STACK_SIZE_BYTES: usize = 8 * 1024 * 1024;

/// Remaining stack below which a new segment of
/// [`STACKER_STACK_SIZE_BYTES`] is allocated.
///
/// # Examples
/// ```
/// use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
/// assert!(STACKER_RED_ZONE_BYTES < STACKER_STACK_SIZE_BYTES);
/// ```
pub const STACKER_RED_ZONE_BYTES: usize = STACKER_STACK_SIZE_BYTES / 32;
