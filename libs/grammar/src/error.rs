//! # Grammar Errors
//!
//! Fatal engine errors.
//!
//! A grammar that simply does not match is not an error: matching returns
//! `Ok(false)`. The variants here are raised for grammars that cannot be run
//! safely, and they abort the whole parse.

use crate::cursor::Cursor;
use thiserror::Error;

/// Errors that abort a parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    /// A repetition's child matched without consuming input, which would
    /// loop forever.
    #[error("Ambiguous grammar: {rule} matched empty input inside a repetition at line {line}, column {column}")]
    AmbiguousGrammar {
        /// Label of the offending child.
        rule: String,
        /// Line (1-indexed).
        line: usize,
        /// Column (1-indexed).
        column: usize,
    },

    /// Attempts nested deeper than the configured limit.
    #[error("Recursion limit of {limit} nested attempts exceeded at line {line}, column {column}")]
    RecursionLimit {
        /// Configured limit.
        limit: usize,
        /// Line (1-indexed).
        line: usize,
        /// Column (1-indexed).
        column: usize,
    },

    /// A rule was run before being defined, or after its owner was dropped.
    #[error("Undefined rule: {name}")]
    UndefinedRule {
        /// Rule name.
        name: String,
    },

    /// A rule was given a second body.
    #[error("Rule already defined: {name}")]
    RuleRedefined {
        /// Rule name.
        name: String,
    },

    /// An integer grammar was asked for a base outside the digit alphabet.
    #[error("Invalid radix {radix}: expected a base between 2 and 36")]
    InvalidRadix {
        /// Requested base.
        radix: u32,
    },
}

impl GrammarError {
    /// Ambiguous repetition of `rule` at `at`.
    pub fn ambiguous(rule: impl Into<String>, at: Cursor) -> Self {
        Self::AmbiguousGrammar {
            rule: rule.into(),
            line: at.line() + 1,
            column: at.column() + 1,
        }
    }

    /// Recursion limit `limit` hit at `at`.
    pub fn recursion_limit(limit: usize, at: Cursor) -> Self {
        Self::RecursionLimit {
            limit,
            line: at.line() + 1,
            column: at.column() + 1,
        }
    }

    /// Rule `name` has no body.
    pub fn undefined_rule(name: impl Into<String>) -> Self {
        Self::UndefinedRule { name: name.into() }
    }
}

// =============================================================================
// TESTS
// =============================================================================
