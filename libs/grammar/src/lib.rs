//! # Grammar
//!
//! A backtracking parser-combinator engine with reversible capture sinks.
//!
//! ## Architecture
//!
//! ```text
//! Source → ParseContext ─attempt→ Grammar tree → Sinks
//!              │                      │
//!              └── undo journal ◄─────┘
//! ```
//!
//! Grammars are values built from small constructors and composed with
//! operators or builder methods. Each node may write what it matched into a
//! [`Sink`]. Every node runs through the same attempt protocol, which undoes
//! cursor moves and sink writes of a failed branch, so alternation,
//! repetition and lookahead compose without leaking partial results.
//!
//! ## Example
//!
//! ```rust
//! use grammar::{Collection, Grammar, IntegerLiteral, Sink};
//!
//! let numbers = Collection::new();
//! let number = IntegerLiteral::<i64>::new(Sink::collect(numbers.clone())).grammar();
//! let list = Grammar::char('[')
//!     >> (number.clone() >> (Grammar::char(',') >> number).zero_or_more_ws()).optional()
//!     >> Grammar::char(']');
//!
//! assert!(list.matches_str("[0x10, 010, 101b, -3]").unwrap());
//! assert_eq!(numbers.to_vec(), vec![16, 8, 5, -3]);
//! ```
//!
//! ## Pipeline Integration
//!
//! ```text
//! config → grammar → expression → calc
//! ```

pub mod context;
pub mod cursor;
pub mod error;
pub mod grammar;
pub mod journal;
pub mod production;
pub mod rule;
pub mod sink;
pub mod source;
pub mod terminals;
pub mod trace;

// Re-export public API
pub use context::{parse, CancelFlag, ParseContext, ParseOptions, ParseOutcome};
pub use cursor::Cursor;
pub use error::GrammarError;
pub use grammar::{Case, CharMatcher, Grammar};
pub use journal::{Journal, JournalMark};
pub use production::Production;
pub use rule::{Rule, RuleRef};
pub use sink::{Collection, Flag, Sink, SinkSnapshot, Slot, TextBuffer};
pub use source::{CommentSkippingSource, Source, TextSource};
pub use terminals::{Integer, IntegerLiteral, QuotedString, RationalLiteral, Real, UnsignedInteger};
pub use trace::{Outcome, Trace, TraceEvent};
