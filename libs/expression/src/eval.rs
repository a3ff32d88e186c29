//! # Evaluation
//!
//! Reduces an expression tree to a number.
//!
//! N-ary nodes fold their operands left to right. Comparisons and logic
//! produce `1.0` for true and `0.0` for false; any non-zero operand counts as
//! true.

use crate::ast::Expression;
use crate::error::ExpressionError;
use crate::operator::{BinaryOperator, UnaryOperator};
use config::constants::{STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES};
use stacker::maybe_grow;

impl Expression {
    /// Computes the value of the tree.
    ///
    /// ## Example
    ///
    /// ```rust
    /// let tree = expression::parse("2 + 3 * 4").unwrap();
    /// assert_eq!(tree.evaluate().unwrap(), 14.0);
    /// ```
    pub fn evaluate(&self) -> Result<f64, ExpressionError> {
        maybe_grow(STACKER_RED_ZONE_BYTES, STACKER_STACK_SIZE_BYTES, || self.evaluate_node())
    }

    fn evaluate_node(&self) -> Result<f64, ExpressionError> {
        match self {
            Expression::Literal(value) => Ok(*value),
            Expression::Unary { operator, operand } => {
                let value = operand.evaluate()?;
                Ok(match operator {
                    UnaryOperator::BoolNot => truth(value == 0.0),
                })
            }
            Expression::NAry { operator, operands } => {
                let mut values = operands.iter().map(Expression::evaluate);
                let first = match values.next() {
                    Some(value) => value?,
                    None => return Ok(0.0),
                };
                values.try_fold(first, |left, right| apply(*operator, left, right?))
            }
        }
    }
}

fn apply(operator: BinaryOperator, left: f64, right: f64) -> Result<f64, ExpressionError> {
    let value = match operator {
        BinaryOperator::Or => truth(left != 0.0 || right != 0.0),
        BinaryOperator::And => truth(left != 0.0 && right != 0.0),
        BinaryOperator::Equal => truth(left == right),
        BinaryOperator::NotEqual => truth(left != right),
        BinaryOperator::Less => truth(left < right),
        BinaryOperator::LessEqual => truth(left <= right),
        BinaryOperator::Greater => truth(left > right),
        BinaryOperator::GreaterEqual => truth(left >= right),
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide | BinaryOperator::Modulo if right == 0.0 => {
            return Err(ExpressionError::DivisionByZero)
        }
        BinaryOperator::Divide => left / right,
        BinaryOperator::Modulo => left % right,
    };
    Ok(value)
}

fn truth(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
