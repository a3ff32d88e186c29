//! # Expression Tree
//!
//! Owned tree produced by the front end.
//!
//! N-ary nodes keep all operands of a run of the same operator together, so
//! `1+2+3` is a single `Add` node with three children.
//!
//! ## Example
//!
//! ```rust
//! use expression::{BinaryOperator, Expression};
//!
//! let tree = Expression::nary(
//!     BinaryOperator::Add,
//!     vec![
//!         Expression::literal(2.0),
//!         Expression::nary(
//!             BinaryOperator::Multiply,
//!             vec![Expression::literal(3.0), Expression::literal(4.0)],
//!         ),
//!     ],
//! );
//! assert_eq!(tree.to_string(), "Add(2, Mul(3, 4))");
//! ```

use crate::operator::{BinaryOperator, UnaryOperator};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use serde::{Deserialize, Serialize};
use stacker::maybe_grow;
use std::fmt::{self, Write};

/// Node of an expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Numeric literal.
    Literal(f64),
    /// Operator applied to two or more operands, left to right.
    NAry {
        /// Operator joining the operands.
        operator: BinaryOperator,
        /// Operands in source order.
        operands: Vec<Expression>,
    },
    /// Operator applied to one operand.
    Unary {
        /// Applied operator.
        operator: UnaryOperator,
        /// Operand.
        operand: Box<Expression>,
    },
}

impl Expression {
    /// Literal node.
    pub fn literal(value: f64) -> Self {
        Expression::Literal(value)
    }

    /// N-ary node.
    pub fn nary(operator: BinaryOperator, operands: Vec<Expression>) -> Self {
        Expression::NAry { operator, operands }
    }

    /// Unary node.
    pub fn unary(operator: UnaryOperator, operand: Expression) -> Self {
        Expression::Unary {
            operator,
            operand: Box::new(operand),
        }
    }

    /// Number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match self {
            Expression::Literal(_) => 1,
            Expression::NAry { operands, .. } => {
                1 + operands.iter().map(Expression::node_count).sum::<usize>()
            }
            Expression::Unary { operand, .. } => 1 + operand.node_count(),
        })
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match self {
            Expression::Literal(_) => 1,
            Expression::NAry { operands, .. } => {
                1 + operands.iter().map(Expression::depth).max().unwrap_or(0)
            }
            Expression::Unary { operand, .. } => 1 + operand.depth(),
        })
    }

    /// Indented multi-line rendering, one node per line.
    ///
    /// ```text
    /// Add
    ///   2
    ///   Mul
    ///     3
    ///     4
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || {
            self.write_pretty_node(out, depth)
        })
    }

    fn write_pretty_node(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        // Writing into a String cannot fail.
        match self {
            Expression::Literal(value) => {
                let _ = writeln!(out, "{indent}{value}");
            }
            Expression::NAry { operator, operands } => {
                let _ = writeln!(out, "{indent}{}", operator.name());
                for operand in operands {
                    operand.write_pretty(out, depth + 1);
                }
            }
            Expression::Unary { operator, operand } => {
                let _ = writeln!(out, "{indent}{}", operator.name());
                operand.write_pretty(out, depth + 1);
            }
        }
    }
}

/// Prefix form: `Add(2, Mul(3, 4))`, `BoolNot(1)`.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || match self {
            Expression::Literal(value) => write!(f, "{value}"),
            Expression::NAry { operator, operands } => {
                write!(f, "{}(", operator.name())?;
                for (index, operand) in operands.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{operand}")?;
                }
                f.write_str(")")
            }
            Expression::Unary { operator, operand } => write!(f, "{}({operand})", operator.name()),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: f64) -> Expression {
        Expression::literal(value)
    }

    #[test]
    fn test_display_unary() {
        let tree = Expression::unary(UnaryOperator::BoolNot, lit(1.0));
        assert_eq!(tree.to_string(), "BoolNot(1)");
    }

    #[test]
    fn test_display_fraction() {
        let tree = Expression::nary(BinaryOperator::Divide, vec![lit(1.5), lit(0.25)]);
        assert_eq!(tree.to_string(), "Div(1.5, 0.25)");
    }

    #[test]
    fn test_pretty_indents_children() {
        let tree = Expression::nary(
            BinaryOperator::Add,
            vec![lit(2.0), Expression::nary(BinaryOperator::Multiply, vec![lit(3.0), lit(4.0)])],
        );
        assert_eq!(tree.pretty(), "Add\n  2\n  Mul\n    3\n    4\n");
        assert_eq!(tree.node_count(), 5);
        assert_eq!(tree.depth(), 3);
    }
}
