//! # Expression
//!
//! Arithmetic expressions on top of the grammar engine.
//!
//! ## Architecture
//!
//! ```text
//! text → ExpressionGrammar ─operands/operators→ TreeBuilder → Expression → evaluate
//! ```
//!
//! The front end collects a flat run of operands and operators per nesting
//! level. The tree builder turns each run into n-ary nodes grouped by
//! precedence, so `1+2+3` is one `Add` node with three children.
//!
//! ## Example
//!
//! ```rust
//! let tree = expression::parse("2 + 3 * 4").unwrap();
//! assert_eq!(tree.to_string(), "Add(2, Mul(3, 4))");
//! assert_eq!(tree.evaluate().unwrap(), 14.0);
//!
//! let tree = expression::parse_skipping_comments("(1 + 2) /* sum */ * 3").unwrap();
//! assert_eq!(tree.to_string(), "Mul(Add(1, 2), 3)");
//! ```

pub mod ast;
pub mod builder;
pub mod error;
pub mod eval;
pub mod front_end;
pub mod operator;

// Re-export public API
pub use ast::Expression;
pub use builder::TreeBuilder;
pub use error::{BuildError, ExpressionError};
pub use front_end::{parse, parse_skipping_comments, ExpressionGrammar, NAryExpression};
pub use operator::{BinaryOperator, Precedence, UnaryOperator};
