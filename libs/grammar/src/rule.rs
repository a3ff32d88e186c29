//! # Rules
//!
//! Forward-declared grammar nodes for recursive grammars.
//!
//! A [`Rule`] is declared first, referenced from any number of grammars, then
//! given a body once. The body may refer back to the rule itself. References
//! are weak, so the rule owner must outlive every parse that reaches it; a
//! dangling reference fails with [`GrammarError::UndefinedRule`].
//!
//! ## Example
//!
//! ```rust
//! use grammar::{Grammar, Rule};
//!
//! // nested := '(' nested? ')'
//! let nested = Rule::declare("nested");
//! nested
//!     .define(Grammar::char('(') + nested.grammar().optional() + ')')
//!     .unwrap();
//! let balanced = nested.grammar() + Grammar::end_of_input();
//!
//! assert!(balanced.matches_str("((()))").unwrap());
//! assert!(!balanced.matches_str("(()").unwrap());
//! ```

use crate::context::ParseContext;
use crate::error::GrammarError;
use crate::grammar::Grammar;
use std::cell::OnceCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Owner of a recursive grammar's body.
#[derive(Clone)]
pub struct Rule {
    name: Rc<str>,
    body: Rc<OnceCell<Grammar>>,
}

impl Rule {
    /// Declares a rule without a body.
    pub fn declare(name: &str) -> Self {
        Self {
            name: Rc::from(name),
            body: Rc::new(OnceCell::new()),
        }
    }

    /// Gives the rule its body. A rule can be defined once.
    pub fn define(&self, body: Grammar) -> Result<(), GrammarError> {
        self.body.set(body).map_err(|_| GrammarError::RuleRedefined {
            name: self.name.to_string(),
        })
    }

    /// Rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true once [`Rule::define`] succeeded.
    pub fn is_defined(&self) -> bool {
        self.body.get().is_some()
    }

    /// Grammar node that runs this rule.
    pub fn grammar(&self) -> Grammar {
        Grammar::Rule(self.reference())
    }

    /// Weak reference to this rule.
    pub fn reference(&self) -> RuleRef {
        RuleRef {
            name: Rc::clone(&self.name),
            body: Rc::downgrade(&self.body),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("defined", &self.is_defined())
            .finish()
    }
}

/// Weak reference to a [`Rule`], held by grammar trees.
#[derive(Clone)]
pub struct RuleRef {
    name: Rc<str>,
    body: Weak<OnceCell<Grammar>>,
}

impl RuleRef {
    /// Name of the referenced rule.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn run(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError> {
        let body = self
            .body
            .upgrade()
            .ok_or_else(|| GrammarError::undefined_rule(self.name()))?;
        match body.get() {
            Some(grammar) => grammar.match_in(ctx),
            None => Err(GrammarError::undefined_rule(self.name())),
        }
    }
}

impl fmt::Debug for RuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleRef(<{}>)", self.name)
    }
}

// =============================================================================
// TESTS
// =============================================================================
