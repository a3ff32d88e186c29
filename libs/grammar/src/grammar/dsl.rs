//! Composition DSL: builder methods and operator overloads.
//!
//! | Operator | Method | Meaning |
//! |----------|--------|---------|
//! | `a + b` | [`Grammar::then`] | `a` then `b` |
//! | `a >> b` | [`Grammar::then_ws`] | `a`, optional whitespace, then `b` |
//! | `a \| b` | [`Grammar::or`] | `a`, or else `b` |
//! | `!a` | | only where `a` does not match |

use super::{Case, Grammar};
use crate::sink::{Flag, Sink};
use std::ops::{Add, BitOr, Not, Shr};

impl Grammar {
    /// `self` followed by `next`.
    pub fn then(self, next: impl Into<Grammar>) -> Grammar {
        Grammar::Sequence {
            lhs: Box::new(self),
            rhs: Box::new(next.into()),
            skip_whitespace: false,
        }
    }

    /// `self` followed by `next`, with whitespace allowed between them.
    pub fn then_ws(self, next: impl Into<Grammar>) -> Grammar {
        Grammar::Sequence {
            lhs: Box::new(self),
            rhs: Box::new(next.into()),
            skip_whitespace: true,
        }
    }

    /// `self`, or `other` if `self` does not match.
    pub fn or(self, other: impl Into<Grammar>) -> Grammar {
        Grammar::Alternation {
            lhs: Box::new(self),
            rhs: Box::new(other.into()),
        }
    }

    /// Zero or one `self`.
    pub fn optional(self) -> Grammar {
        Grammar::Optional(Box::new(self))
    }

    /// `self` as many times as it matches, at least `min` times.
    ///
    /// ## Parameters
    ///
    /// - `min`: Matches required for success
    /// - `skip_whitespace`: Allow whitespace between matches
    pub fn repeat(self, min: usize, skip_whitespace: bool) -> Grammar {
        Grammar::Repeat {
            child: Box::new(self),
            min,
            skip_whitespace,
        }
    }

    /// Any number of `self`.
    pub fn zero_or_more(self) -> Grammar {
        self.repeat(0, false)
    }

    /// At least one `self`.
    pub fn one_or_more(self) -> Grammar {
        self.repeat(1, false)
    }

    /// Any number of `self`, separated by optional whitespace.
    pub fn zero_or_more_ws(self) -> Grammar {
        self.repeat(0, true)
    }

    /// At least one `self`, separated by optional whitespace.
    pub fn one_or_more_ws(self) -> Grammar {
        self.repeat(1, true)
    }

    /// Compares characters case-insensitively in every character and
    /// literal node of this tree.
    ///
    /// Productions and rules keep their own settings.
    pub fn case_insensitive(self) -> Grammar {
        self.map_terminals(&mut |node| match node {
            Grammar::Char {
                matcher,
                substitute,
                sink,
                ..
            } => Grammar::Char {
                matcher,
                case: Case::Insensitive,
                substitute,
                sink,
            },
            Grammar::Literal { text, sink, .. } => Grammar::Literal {
                text,
                case: Case::Insensitive,
                sink,
            },
            other => other,
        })
    }

    /// Saves `ch` instead of the matched character.
    ///
    /// Applies to character nodes, looking through alternations and
    /// optionals; other nodes are returned unchanged.
    pub fn yielding(self, ch: char) -> Grammar {
        self.map_char_nodes(&mut |matcher, case, _, sink| Grammar::Char {
            matcher,
            case,
            substitute: Some(ch),
            sink,
        })
    }

    /// Saves each matched character to `sink`.
    ///
    /// Applies to character nodes, looking through alternations and
    /// optionals; other nodes are returned unchanged. Use
    /// [`Grammar::save_text`] for multi-character matches.
    pub fn save_char(self, sink: Sink<char>) -> Grammar {
        self.map_char_nodes(&mut |matcher, case, substitute, _| Grammar::Char {
            matcher,
            case,
            substitute,
            sink: sink.clone(),
        })
    }

    /// Saves the text matched by this node to `sink`.
    ///
    /// A literal saves through its own sink; any other node is wrapped in a
    /// [`Grammar::Capture`].
    pub fn save_text(self, sink: Sink<String>) -> Grammar {
        match self {
            Grammar::Literal { text, case, .. } => Grammar::Literal { text, case, sink },
            other => Grammar::Capture {
                child: Box::new(other),
                sink,
            },
        }
    }

    /// Raises `flag` when this node matches.
    pub fn flag(self, flag: Flag) -> Grammar {
        self.save_text(Sink::flag(flag))
    }

    fn map_char_nodes(
        self,
        f: &mut dyn FnMut(super::CharMatcher, Case, Option<char>, Sink<char>) -> Grammar,
    ) -> Grammar {
        match self {
            Grammar::Char {
                matcher,
                case,
                substitute,
                sink,
            } => f(matcher, case, substitute, sink),
            Grammar::Alternation { lhs, rhs } => Grammar::Alternation {
                lhs: Box::new(lhs.map_char_nodes(f)),
                rhs: Box::new(rhs.map_char_nodes(f)),
            },
            Grammar::Optional(child) => Grammar::Optional(Box::new(child.map_char_nodes(f))),
            other => other,
        }
    }

    fn map_terminals(self, f: &mut dyn FnMut(Grammar) -> Grammar) -> Grammar {
        match self {
            Grammar::Not(child) => Grammar::Not(boxed(child, f)),
            Grammar::Optional(child) => Grammar::Optional(boxed(child, f)),
            Grammar::Repeat {
                child,
                min,
                skip_whitespace,
            } => Grammar::Repeat {
                child: boxed(child, f),
                min,
                skip_whitespace,
            },
            Grammar::Sequence {
                lhs,
                rhs,
                skip_whitespace,
            } => Grammar::Sequence {
                lhs: boxed(lhs, f),
                rhs: boxed(rhs, f),
                skip_whitespace,
            },
            Grammar::Alternation { lhs, rhs } => Grammar::Alternation {
                lhs: boxed(lhs, f),
                rhs: boxed(rhs, f),
            },
            Grammar::Capture { child, sink } => Grammar::Capture {
                child: boxed(child, f),
                sink,
            },
            other => f(other),
        }
    }
}

fn boxed(child: Box<Grammar>, f: &mut dyn FnMut(Grammar) -> Grammar) -> Box<Grammar> {
    Box::new(child.map_terminals(f))
}

// =============================================================================
// OPERATORS
// =============================================================================

impl<T: Into<Grammar>> Add<T> for Grammar {
    type Output = Grammar;

    fn add(self, rhs: T) -> Grammar {
        self.then(rhs)
    }
}

impl<T: Into<Grammar>> Shr<T> for Grammar {
    type Output = Grammar;

    fn shr(self, rhs: T) -> Grammar {
        self.then_ws(rhs)
    }
}

impl<T: Into<Grammar>> BitOr<T> for Grammar {
    type Output = Grammar;

    fn bitor(self, rhs: T) -> Grammar {
        self.or(rhs)
    }
}

impl Not for Grammar {
    type Output = Grammar;

    fn not(self) -> Grammar {
        Grammar::Not(Box::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Slot, TextBuffer};

    #[test]
    fn test_operators_build_nodes() {
        let grammar = Grammar::char('a') + 'b';
        assert!(matches!(grammar, Grammar::Sequence { skip_whitespace: false, .. }));
        let grammar = Grammar::char('a') >> "bc";
        assert!(matches!(grammar, Grammar::Sequence { skip_whitespace: true, .. }));
        let grammar = Grammar::char('a') | 'b';
        assert!(matches!(grammar, Grammar::Alternation { .. }));
        assert!(matches!(!Grammar::any(), Grammar::Not(_)));
    }

    #[test]
    fn test_case_insensitive_reaches_nested_nodes() {
        let grammar = (Grammar::literal("select") >> Grammar::char('x').optional()).case_insensitive();
        assert!(grammar.matches_str("SeLeCt X").unwrap());
    }

    #[test]
    fn test_save_char_through_alternation() {
        let buffer = TextBuffer::new();
        let grammar = (Grammar::char('a') | Grammar::char('b').yielding('B'))
            .save_char(Sink::text(buffer.clone()))
            .one_or_more();
        assert!(grammar.matches_str("abba").unwrap());
        assert_eq!(buffer.get(), "aBBa");
    }

    #[test]
    fn test_save_text_on_literal_keeps_literal() {
        let slot = Slot::new();
        let grammar = Grammar::literal("0x").case_insensitive().save_text(Sink::slot(slot.clone()));
        assert!(matches!(grammar, Grammar::Literal { .. }));
        assert!(grammar.matches_str("0X").unwrap());
        assert_eq!(slot.get().as_deref(), Some("0X"));
    }

    #[test]
    fn test_flag_raised_on_match_only() {
        let flag = Flag::new();
        let grammar = Grammar::char('-').flag(flag.clone());
        assert!(!grammar.matches_str("+").unwrap());
        assert!(!flag.get());
        assert!(grammar.matches_str("-").unwrap());
        assert!(flag.get());
    }
}
