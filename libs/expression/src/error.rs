//! # Expression Errors
//!
//! Error types for parsing, tree building and evaluation.
//!
//! [`BuildError`] is returned by [`crate::TreeBuilder`] only. The front end
//! treats a rejected operand run as a no-match.

use grammar::GrammarError;
use thiserror::Error;

/// Errors from turning an operand/operator run into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The run needs exactly one operator fewer than operands.
    #[error("Expected {expected} operators for {operands} operands, got {operators}")]
    Arity {
        /// Operand count.
        operands: usize,
        /// Expected operator count.
        expected: usize,
        /// Actual operator count.
        operators: usize,
    },

    /// No operands at all.
    #[error("No operands to build a tree from")]
    Empty,

    /// An operator was left without a right-hand operand.
    #[error("Operator {0} has no right-hand operand")]
    MissingOperand(String),
}

/// Errors that can occur while parsing or evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    /// The input did not reduce to an expression.
    #[error("No expression at line {line}, column {column}: {context}")]
    NoExpression {
        /// Line of the furthest position reached (1-indexed).
        line: usize,
        /// Column of the furthest position reached (1-indexed).
        column: usize,
        /// Text around that position.
        context: String,
    },

    /// The grammar engine aborted.
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),

    /// The parse was cancelled.
    #[error("Parse cancelled")]
    Cancelled,

    /// Division or remainder by zero.
    #[error("Division by zero")]
    DivisionByZero,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpressionError::NoExpression {
            line: 1,
            column: 4,
            context: "2 +|".to_string(),
        };
        assert_eq!(err.to_string(), "No expression at line 1, column 4: 2 +|");
    }

    #[test]
    fn test_from_grammar_error() {
        let err: ExpressionError = GrammarError::undefined_rule("expr").into();
        assert!(matches!(err, ExpressionError::Grammar(_)));
        assert!(err.to_string().contains("Undefined rule"));
    }

    #[test]
    fn test_build_error_display() {
        let err = BuildError::Arity {
            operands: 2,
            expected: 1,
            operators: 3,
        };
        assert!(err.to_string().contains("got 3"));
    }
}
