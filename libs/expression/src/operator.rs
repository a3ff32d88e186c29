//! # Operators
//!
//! Binary and unary operators with their precedence.
//!
//! ## Operator Precedence
//!
//! | Precedence | Operators | Associative |
//! |------------|-----------|-------------|
//! | 1 | `\|\|` | yes |
//! | 2 | `&&` | yes |
//! | 3 | `==` `!=` | no |
//! | 4 | `<` `<=` `>` `>=` | no |
//! | 5 | `+` `-` | `+` only |
//! | 6 | `*` `/` `%` | `*` only |
//! | unary | `!` | |
//!
//! Operators of equal precedence group left to right.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// PRECEDENCE
// =============================================================================

/// Binary operator precedence levels.
///
/// Higher values bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Precedence {
    /// Logical or: `||`
    Or = 1,
    /// Logical and: `&&`
    And = 2,
    /// Equality: `== !=`
    Equality = 3,
    /// Comparison: `< <= > >=`
    Comparison = 4,
    /// Addition/subtraction: `+ -`
    Term = 5,
    /// Multiplication/division/remainder: `* / %`
    Factor = 6,
}

// =============================================================================
// BINARY OPERATORS
// =============================================================================

/// Operator joining two or more operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `<`
    Less,
    /// `<=`
    LessEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterEqual,
    /// `+`
    Add,
    /// `-`
    Subtract,
    /// `*`
    Multiply,
    /// `/`
    Divide,
    /// `%`
    Modulo,
}

impl BinaryOperator {
    /// Every operator, longest symbol first so a prefix never shadows a
    /// longer token.
    pub const ALL: [BinaryOperator; 13] = [
        BinaryOperator::Or,
        BinaryOperator::And,
        BinaryOperator::Equal,
        BinaryOperator::NotEqual,
        BinaryOperator::LessEqual,
        BinaryOperator::GreaterEqual,
        BinaryOperator::Less,
        BinaryOperator::Greater,
        BinaryOperator::Add,
        BinaryOperator::Subtract,
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Modulo,
    ];

    /// Source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Or => "||",
            BinaryOperator::And => "&&",
            BinaryOperator::Equal => "==",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
        }
    }

    /// Operator spelled `symbol`.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Name used when printing trees, e.g. `Add(1, 2)`.
    pub fn name(self) -> &'static str {
        match self {
            BinaryOperator::Or => "Or",
            BinaryOperator::And => "And",
            BinaryOperator::Equal => "Eq",
            BinaryOperator::NotEqual => "Ne",
            BinaryOperator::Less => "Lt",
            BinaryOperator::LessEqual => "Le",
            BinaryOperator::Greater => "Gt",
            BinaryOperator::GreaterEqual => "Ge",
            BinaryOperator::Add => "Add",
            BinaryOperator::Subtract => "Sub",
            BinaryOperator::Multiply => "Mul",
            BinaryOperator::Divide => "Div",
            BinaryOperator::Modulo => "Mod",
        }
    }

    /// Precedence level.
    pub fn precedence(self) -> Precedence {
        match self {
            BinaryOperator::Or => Precedence::Or,
            BinaryOperator::And => Precedence::And,
            BinaryOperator::Equal | BinaryOperator::NotEqual => Precedence::Equality,
            BinaryOperator::Less
            | BinaryOperator::LessEqual
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEqual => Precedence::Comparison,
            BinaryOperator::Add | BinaryOperator::Subtract => Precedence::Term,
            BinaryOperator::Multiply | BinaryOperator::Divide | BinaryOperator::Modulo => {
                Precedence::Factor
            }
        }
    }

    /// Returns true if `self` binds strictly tighter than `other`.
    pub fn binds_tighter_than(self, other: BinaryOperator) -> bool {
        self.precedence() > other.precedence()
    }

    /// Returns true if `(a op b) op c` equals `a op (b op c)`.
    pub fn is_associative(self) -> bool {
        matches!(
            self,
            BinaryOperator::Add | BinaryOperator::Multiply | BinaryOperator::And | BinaryOperator::Or
        )
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// =============================================================================
// UNARY OPERATORS
// =============================================================================

/// Operator applied to a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOperator {
    /// `!`: 1 for zero, 0 otherwise.
    BoolNot,
}

impl UnaryOperator {
    /// Source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOperator::BoolNot => "!",
        }
    }

    /// Name used when printing trees.
    pub fn name(self) -> &'static str {
        match self {
            UnaryOperator::BoolNot => "BoolNot",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_round_trip() {
        for op in BinaryOperator::ALL {
            assert_eq!(BinaryOperator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(BinaryOperator::from_symbol("^"), None);
    }

    #[test]
    fn test_longer_symbols_listed_first() {
        for (index, op) in BinaryOperator::ALL.iter().enumerate() {
            for later in &BinaryOperator::ALL[index + 1..] {
                assert!(
                    !later.symbol().starts_with(op.symbol()),
                    "{op} shadows {later}"
                );
            }
        }
    }

    #[test]
    fn test_precedence_order() {
        assert!(BinaryOperator::Multiply.binds_tighter_than(BinaryOperator::Add));
        assert!(BinaryOperator::Add.binds_tighter_than(BinaryOperator::Less));
        assert!(BinaryOperator::Less.binds_tighter_than(BinaryOperator::Equal));
        assert!(BinaryOperator::Equal.binds_tighter_than(BinaryOperator::And));
        assert!(BinaryOperator::And.binds_tighter_than(BinaryOperator::Or));
        assert!(!BinaryOperator::Add.binds_tighter_than(BinaryOperator::Subtract));
    }

    #[test]
    fn test_associativity() {
        assert!(BinaryOperator::Add.is_associative());
        assert!(!BinaryOperator::Subtract.is_associative());
        assert!(!BinaryOperator::Divide.is_associative());
    }
}
