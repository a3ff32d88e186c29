//! # Tree Builder
//!
//! Turns a flat run of operands and the binary operators between them into
//! one precedence-correct tree, in a single recursive pass.
//!
//! ## Algorithm
//!
//! Precedence climbing over two cursors (operands and operators):
//!
//! 1. Open a node for the next operator, with the current operand as its
//!    first child.
//! 2. While the same operator follows, append operands to that node, so a
//!    run like `a+b+c` becomes one `Add` with three children.
//! 3. When a tighter operator follows, the pending right operand becomes the
//!    first operand of a subtree built for that operator, and the subtree
//!    replaces it.
//! 4. When a looser or equal operator follows, close the node. The node
//!    becomes the left operand of whatever is built next.
//!
//! A subtree built under step 3 also absorbs a following run of its
//! enclosing operator when that operator is associative, which gives
//! `2+3*4+5` the shape `Add(2, Add(Mul(3, 4), 5))`.
//!
//! ## Example
//!
//! ```rust
//! use expression::{BinaryOperator, Expression, TreeBuilder};
//!
//! let tree = TreeBuilder::build(
//!     vec![Expression::literal(2.0), Expression::literal(3.0), Expression::literal(4.0)],
//!     vec![BinaryOperator::Multiply, BinaryOperator::Add],
//! )
//! .unwrap();
//! assert_eq!(tree.to_string(), "Add(Mul(2, 3), 4)");
//! ```

use crate::ast::Expression;
use crate::error::BuildError;
use crate::operator::BinaryOperator;
use std::iter::Peekable;
use std::vec;

/// Consumes one operand/operator run.
pub struct TreeBuilder {
    operands: vec::IntoIter<Expression>,
    operators: Peekable<vec::IntoIter<BinaryOperator>>,
}

impl TreeBuilder {
    /// Builds a tree from `operands` joined by `operators`.
    ///
    /// ## Parameters
    ///
    /// - `operands`: Operands in source order
    /// - `operators`: Operators in source order, one fewer than `operands`
    pub fn build(
        operands: Vec<Expression>,
        operators: Vec<BinaryOperator>,
    ) -> Result<Expression, BuildError> {
        if operands.is_empty() {
            return Err(BuildError::Empty);
        }
        if operators.len() + 1 != operands.len() {
            return Err(BuildError::Arity {
                operands: operands.len(),
                expected: operands.len() - 1,
                operators: operators.len(),
            });
        }

        let mut builder = Self {
            operands: operands.into_iter(),
            operators: operators.into_iter().peekable(),
        };
        let first = builder.operands.next().ok_or(BuildError::Empty)?;
        builder.climb(first, None)
    }

    /// Builds from `first` onwards while operators continue under `ceiling`.
    fn climb(
        &mut self,
        first: Expression,
        ceiling: Option<BinaryOperator>,
    ) -> Result<Expression, BuildError> {
        let mut left = first;
        while let Some(&operator) = self.operators.peek() {
            if !continues_under(operator, ceiling) {
                break;
            }
            self.operators.next();

            let mut operands = vec![left];
            let mut right = self.next_operand(operator)?;
            while let Some(&next) = self.operators.peek() {
                if next == operator {
                    self.operators.next();
                    operands.push(right);
                    right = self.next_operand(operator)?;
                } else if next.binds_tighter_than(operator) {
                    right = self.climb(right, Some(operator))?;
                } else {
                    break;
                }
            }
            operands.push(right);
            left = Expression::nary(operator, operands);
        }
        Ok(left)
    }

    fn next_operand(&mut self, after: BinaryOperator) -> Result<Expression, BuildError> {
        self.operands
            .next()
            .ok_or_else(|| BuildError::MissingOperand(after.symbol().to_string()))
    }
}

/// Whether `operator` extends a subtree opened under `ceiling`.
fn continues_under(operator: BinaryOperator, ceiling: Option<BinaryOperator>) -> bool {
    match ceiling {
        None => true,
        Some(ceiling) => {
            operator.binds_tighter_than(ceiling) || (operator == ceiling && ceiling.is_associative())
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::BinaryOperator::*;

    fn shape(ops: &[BinaryOperator]) -> String {
        let operands = (0..=ops.len()).map(|n| Expression::literal(n as f64)).collect();
        TreeBuilder::build(operands, ops.to_vec()).unwrap().to_string()
    }

    #[test]
    fn test_single_operand() {
        assert_eq!(shape(&[]), "0");
    }

    #[test]
    fn test_same_operator_chains() {
        assert_eq!(shape(&[Add, Add, Add]), "Add(0, 1, 2, 3)");
    }

    #[test]
    fn test_tighter_right() {
        assert_eq!(shape(&[Add, Multiply]), "Add(0, Mul(1, 2))");
    }

    #[test]
    fn test_tighter_left() {
        assert_eq!(shape(&[Multiply, Add]), "Add(Mul(0, 1), 2)");
    }

    #[test]
    fn test_tighter_middle() {
        assert_eq!(shape(&[Add, Multiply, Add]), "Add(0, Add(Mul(1, 2), 3))");
    }

    #[test]
    fn test_equal_precedence_groups_left() {
        assert_eq!(shape(&[Add, Subtract]), "Sub(Add(0, 1), 2)");
        assert_eq!(shape(&[Subtract, Add]), "Add(Sub(0, 1), 2)");
        assert_eq!(shape(&[Divide, Multiply]), "Mul(Div(0, 1), 2)");
    }

    #[test]
    fn test_non_associative_stays_correct() {
        assert_eq!(shape(&[Subtract, Multiply, Add]), "Add(Sub(0, Mul(1, 2)), 3)");
        assert_eq!(shape(&[Subtract, Multiply, Subtract]), "Sub(Sub(0, Mul(1, 2)), 3)");
    }

    #[test]
    fn test_multiple_levels() {
        assert_eq!(
            shape(&[Less, Add, Multiply, Subtract]),
            "Lt(0, Sub(Add(1, Mul(2, 3)), 4))"
        );
        assert_eq!(shape(&[Or, And, Equal]), "Or(0, And(1, Eq(2, 3)))");
    }

    #[test]
    fn test_arity_errors() {
        let one = || vec![Expression::literal(1.0)];
        assert_eq!(TreeBuilder::build(vec![], vec![]), Err(BuildError::Empty));
        assert_eq!(
            TreeBuilder::build(one(), vec![Add]),
            Err(BuildError::Arity {
                operands: 1,
                expected: 0,
                operators: 1
            })
        );
    }
}
