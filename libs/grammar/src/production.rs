//! # Productions
//!
//! Extension point for matchers written in Rust rather than composed from
//! nodes.
//!
//! A production usually owns a small internal grammar wired to private
//! slots, runs it with [`ParseContext::attempt`], then turns the captured
//! pieces into a value and saves it to the caller's sink. The numeric and
//! string terminals in [`crate::terminals`] are built this way.
//!
//! ## Example
//!
//! ```rust
//! use grammar::{Grammar, GrammarError, ParseContext, Production, Sink, Slot};
//! use std::rc::Rc;
//!
//! /// Counts a run of `*` characters.
//! #[derive(Debug)]
//! struct Stars {
//!     sink: Sink<usize>,
//! }
//!
//! impl Production for Stars {
//!     fn name(&self) -> &str {
//!         "stars"
//!     }
//!
//!     fn matches(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError> {
//!         let mut count = 0;
//!         while ctx.peek() == Some('*') {
//!             ctx.advance();
//!             count += 1;
//!         }
//!         ctx.save(&self.sink, count);
//!         Ok(count > 0)
//!     }
//!
//!     fn detached(&self) -> Rc<dyn Production> {
//!         Rc::new(Stars { sink: Sink::discard() })
//!     }
//! }
//!
//! let count = Slot::new();
//! let grammar = Grammar::production(Stars { sink: Sink::slot(count.clone()) });
//! assert!(grammar.matches_str("***!").unwrap());
//! assert_eq!(count.get(), Some(3));
//! ```

use crate::context::ParseContext;
use crate::error::GrammarError;
use std::fmt;
use std::rc::Rc;

/// A custom grammar node.
pub trait Production: fmt::Debug {
    /// Name shown in traces, as `<name>`.
    fn name(&self) -> &str;

    /// Matches at the context's cursor.
    ///
    /// Always called under the backtracking protocol: returning `Ok(false)`
    /// undoes every cursor move and every capture saved through
    /// [`ParseContext::save`].
    fn matches(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError>;

    /// Copy of this production whose output sinks discard.
    fn detached(&self) -> Rc<dyn Production>;
}
