//! # Grammar Nodes
//!
//! The combinator tree. A [`Grammar`] is a plain value: build it once from the
//! constructors and the composition DSL, then run it against any number of
//! sources.
//!
//! ## Node Kinds
//!
//! | Node | Matches |
//! |------|---------|
//! | [`Grammar::Char`] | one character accepted by a [`CharMatcher`] |
//! | [`Grammar::Literal`] | an exact string |
//! | [`Grammar::EndOfInput`] | only at end of input, consuming nothing |
//! | [`Grammar::EndOfLine`] | a line break, or end of input |
//! | [`Grammar::Space`] | a possibly empty run of whitespace |
//! | [`Grammar::Empty`] | always, consuming nothing |
//! | [`Grammar::Not`] | only where its child does not, consuming nothing |
//! | [`Grammar::Optional`] | its child, or nothing |
//! | [`Grammar::Repeat`] | its child as many times as possible, at least `min` |
//! | [`Grammar::Sequence`] | both children in order |
//! | [`Grammar::Alternation`] | the first child that matches |
//! | [`Grammar::Capture`] | its child, saving the matched text |
//! | [`Grammar::Production`] | whatever a [`Production`] implementation accepts |
//! | [`Grammar::Rule`] | the body of a forward-declared [`Rule`](crate::Rule) |
//!
//! ## Example
//!
//! ```rust
//! use grammar::{Collection, Grammar, Sink};
//!
//! let letters = Collection::new();
//! let word = Grammar::range('a', 'z')
//!     .save_char(Sink::collect(letters.clone()))
//!     .one_or_more();
//! let list = word.clone() + (Grammar::char(',') >> word).zero_or_more_ws();
//!
//! assert!(list.matches_str("ab, c").unwrap());
//! assert_eq!(letters.to_vec(), vec!['a', 'b', 'c']);
//! ```

mod display;
mod dsl;
mod matching;

use crate::context::{parse, ParseOptions, ParseOutcome};
use crate::error::GrammarError;
use crate::production::Production;
use crate::rule::RuleRef;
use crate::sink::Sink;
use crate::source::TextSource;
use std::rc::Rc;

// =============================================================================
// CHARACTER MATCHING
// =============================================================================

/// Character comparison mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Case {
    /// Characters must be equal.
    #[default]
    Sensitive,
    /// Characters are compared after simple lower/upper mapping.
    Insensitive,
}

/// Set of characters accepted by a [`Grammar::Char`] node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharMatcher {
    /// Exactly this character.
    Exact(char),
    /// Any character of the set.
    OneOf(Rc<str>),
    /// Any character outside the set.
    NoneOf(Rc<str>),
    /// Any character in the inclusive range.
    Range(char, char),
    /// Any character at all.
    Any,
}

impl CharMatcher {
    /// Returns true if `ch` is accepted under `case`.
    pub fn accepts(&self, ch: char, case: Case) -> bool {
        let same = |expected: char| equal_under(expected, ch, case);
        match self {
            CharMatcher::Exact(expected) => same(*expected),
            CharMatcher::OneOf(set) => set.chars().any(same),
            CharMatcher::NoneOf(set) => !set.chars().any(same),
            CharMatcher::Range(low, high) => {
                let within = |c: char| (*low..=*high).contains(&c);
                within(ch)
                    || (case == Case::Insensitive && (within(lower(ch)) || within(upper(ch))))
            }
            CharMatcher::Any => true,
        }
    }
}

fn equal_under(a: char, b: char, case: Case) -> bool {
    a == b || (case == Case::Insensitive && lower(a) == lower(b))
}

fn lower(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

fn upper(ch: char) -> char {
    ch.to_uppercase().next().unwrap_or(ch)
}

// =============================================================================
// GRAMMAR
// =============================================================================

/// A node of the combinator tree.
///
/// Cloning copies the structure but keeps every sink bound to the same
/// destination, so captures from either copy land in the same place. Use
/// [`Grammar::detached`] for a copy that captures nothing.
#[derive(Debug, Clone)]
pub enum Grammar {
    /// One character.
    Char {
        /// Accepted characters.
        matcher: CharMatcher,
        /// Comparison mode.
        case: Case,
        /// Character saved instead of the matched one.
        substitute: Option<char>,
        /// Destination of the saved character.
        sink: Sink<char>,
    },
    /// An exact string.
    Literal {
        /// Expected text.
        text: Rc<str>,
        /// Comparison mode.
        case: Case,
        /// Destination of the matched text.
        sink: Sink<String>,
    },
    /// End of input.
    EndOfInput,
    /// A line break, or end of input.
    EndOfLine,
    /// Optional whitespace run.
    Space,
    /// Matches nothing, always succeeds.
    Empty,
    /// Negative lookahead.
    Not(Box<Grammar>),
    /// Zero or one occurrence.
    Optional(Box<Grammar>),
    /// Greedy repetition.
    Repeat {
        /// Repeated node.
        child: Box<Grammar>,
        /// Minimum number of matches.
        min: usize,
        /// Skip whitespace between matches.
        skip_whitespace: bool,
    },
    /// Two nodes in order.
    Sequence {
        /// First node.
        lhs: Box<Grammar>,
        /// Second node.
        rhs: Box<Grammar>,
        /// Skip whitespace between the two.
        skip_whitespace: bool,
    },
    /// First match of two nodes.
    Alternation {
        /// Tried first.
        lhs: Box<Grammar>,
        /// Tried when `lhs` fails.
        rhs: Box<Grammar>,
    },
    /// Saves the raw text matched by the child.
    Capture {
        /// Matched node.
        child: Box<Grammar>,
        /// Destination of the text.
        sink: Sink<String>,
    },
    /// Custom matcher.
    Production(Rc<dyn Production>),
    /// Reference to a forward-declared rule.
    Rule(RuleRef),
}

// =============================================================================
// CONSTRUCTORS
// =============================================================================

impl Grammar {
    fn char_node(matcher: CharMatcher) -> Self {
        Grammar::Char {
            matcher,
            case: Case::Sensitive,
            substitute: None,
            sink: Sink::discard(),
        }
    }

    /// Exactly `ch`.
    pub fn char(ch: char) -> Self {
        Self::char_node(CharMatcher::Exact(ch))
    }

    /// Any character of `set`.
    pub fn one_of(set: &str) -> Self {
        Self::char_node(CharMatcher::OneOf(Rc::from(set)))
    }

    /// Any character not in `set`. Fails at end of input.
    pub fn none_of(set: &str) -> Self {
        Self::char_node(CharMatcher::NoneOf(Rc::from(set)))
    }

    /// Any character from `low` to `high` inclusive.
    pub fn range(low: char, high: char) -> Self {
        Self::char_node(CharMatcher::Range(low, high))
    }

    /// Any single character. Fails at end of input.
    pub fn any() -> Self {
        Self::char_node(CharMatcher::Any)
    }

    /// Exactly `text`.
    pub fn literal(text: &str) -> Self {
        Grammar::Literal {
            text: Rc::from(text),
            case: Case::Sensitive,
            sink: Sink::discard(),
        }
    }

    /// End of input.
    pub fn end_of_input() -> Self {
        Grammar::EndOfInput
    }

    /// A line break, or end of input.
    pub fn end_of_line() -> Self {
        Grammar::EndOfLine
    }

    /// Optional whitespace run.
    pub fn space() -> Self {
        Grammar::Space
    }

    /// Always matches, consuming nothing.
    pub fn empty() -> Self {
        Grammar::Empty
    }

    /// Node backed by a custom [`Production`].
    pub fn production(production: impl Production + 'static) -> Self {
        Grammar::Production(Rc::new(production))
    }

    /// All of `items` in order.
    ///
    /// An empty list matches nothing and always succeeds.
    pub fn sequence(items: impl IntoIterator<Item = Grammar>) -> Self {
        items
            .into_iter()
            .reduce(Grammar::then)
            .unwrap_or(Grammar::Empty)
    }

    /// The first of `items` that matches.
    ///
    /// An empty list never matches.
    pub fn choice(items: impl IntoIterator<Item = Grammar>) -> Self {
        items
            .into_iter()
            .reduce(Grammar::or)
            .unwrap_or_else(|| Grammar::Not(Box::new(Grammar::Empty)))
    }

    // =========================================================================
    // RUNNING
    // =========================================================================

    /// Parses a prefix of `text` with default options.
    pub fn parse_str(&self, text: &str) -> Result<ParseOutcome, GrammarError> {
        let mut source = TextSource::new(text);
        parse(self, &mut source, ParseOptions::default())
    }

    /// Returns true if the grammar matches a prefix of `text`.
    pub fn matches_str(&self, text: &str) -> Result<bool, GrammarError> {
        Ok(self.parse_str(text)?.matched)
    }

    // =========================================================================
    // COPYING
    // =========================================================================

    /// Deep copy with every sink replaced by a discarding one.
    ///
    /// Productions supply their own detached copy. Rule references stay
    /// shared, since a rule body may refer back to itself.
    pub fn detached(&self) -> Grammar {
        match self {
            Grammar::Char {
                matcher,
                case,
                substitute,
                ..
            } => Grammar::Char {
                matcher: matcher.clone(),
                case: *case,
                substitute: *substitute,
                sink: Sink::discard(),
            },
            Grammar::Literal { text, case, .. } => Grammar::Literal {
                text: Rc::clone(text),
                case: *case,
                sink: Sink::discard(),
            },
            Grammar::EndOfInput => Grammar::EndOfInput,
            Grammar::EndOfLine => Grammar::EndOfLine,
            Grammar::Space => Grammar::Space,
            Grammar::Empty => Grammar::Empty,
            Grammar::Not(child) => Grammar::Not(Box::new(child.detached())),
            Grammar::Optional(child) => Grammar::Optional(Box::new(child.detached())),
            Grammar::Repeat {
                child,
                min,
                skip_whitespace,
            } => Grammar::Repeat {
                child: Box::new(child.detached()),
                min: *min,
                skip_whitespace: *skip_whitespace,
            },
            Grammar::Sequence {
                lhs,
                rhs,
                skip_whitespace,
            } => Grammar::Sequence {
                lhs: Box::new(lhs.detached()),
                rhs: Box::new(rhs.detached()),
                skip_whitespace: *skip_whitespace,
            },
            Grammar::Alternation { lhs, rhs } => Grammar::Alternation {
                lhs: Box::new(lhs.detached()),
                rhs: Box::new(rhs.detached()),
            },
            Grammar::Capture { child, .. } => child.detached(),
            Grammar::Production(production) => Grammar::Production(production.detached()),
            Grammar::Rule(rule) => Grammar::Rule(rule.clone()),
        }
    }
}

impl From<char> for Grammar {
    fn from(ch: char) -> Self {
        Grammar::char(ch)
    }
}

impl From<&str> for Grammar {
    fn from(text: &str) -> Self {
        Grammar::literal(text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
