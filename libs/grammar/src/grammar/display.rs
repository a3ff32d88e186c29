//! PEG-style rendering of grammar trees, used for trace labels and logs.
//!
//! `'a'` char, `"ab"` literal, `[a-z]` range, `[abc]` set, `[^abc]` negated
//! set, `.` any, `EOI`, `EOL`, `_` space, `ε` empty, `!x`, `x?`, `x*`, `x+`,
//! `x{n,}`, `~` marks whitespace skipping, `(a b)` sequence, `(a | b)`
//! alternation, `{x}` capture, `<name>` production or rule. A trailing `i`
//! marks case-insensitive terminals.

use super::{Case, CharMatcher, Grammar};
use crate::trace::truncate_label;
use std::fmt;

impl Grammar {
    /// Rendering cut to a trace-friendly width.
    pub fn label(&self) -> String {
        truncate_label(self.to_string())
    }
}

impl fmt::Display for CharMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharMatcher::Exact(ch) => write!(f, "'{}'", ch.escape_default()),
            CharMatcher::OneOf(set) => write!(f, "[{}]", set.escape_default()),
            CharMatcher::NoneOf(set) => write!(f, "[^{}]", set.escape_default()),
            CharMatcher::Range(low, high) => {
                write!(f, "[{}-{}]", low.escape_default(), high.escape_default())
            }
            CharMatcher::Any => f.write_str("."),
        }
    }
}

fn case_suffix(case: Case) -> &'static str {
    match case {
        Case::Sensitive => "",
        Case::Insensitive => "i",
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grammar::Char { matcher, case, .. } => write!(f, "{matcher}{}", case_suffix(*case)),
            Grammar::Literal { text, case, .. } => {
                write!(f, "\"{}\"{}", text.escape_default(), case_suffix(*case))
            }
            Grammar::EndOfInput => f.write_str("EOI"),
            Grammar::EndOfLine => f.write_str("EOL"),
            Grammar::Space => f.write_str("_"),
            Grammar::Empty => f.write_str("ε"),
            Grammar::Not(child) => write!(f, "!{child}"),
            Grammar::Optional(child) => write!(f, "{child}?"),
            Grammar::Repeat {
                child,
                min,
                skip_whitespace,
            } => {
                let ws = if *skip_whitespace { "~" } else { "" };
                match min {
                    0 => write!(f, "{child}*{ws}"),
                    1 => write!(f, "{child}+{ws}"),
                    n => write!(f, "{child}{{{n},}}{ws}"),
                }
            }
            Grammar::Sequence { skip_whitespace, .. } => {
                let mut items = Vec::new();
                flatten_sequence(self, *skip_whitespace, &mut items);
                let separator = if *skip_whitespace { " ~ " } else { " " };
                write_joined(f, &items, separator)
            }
            Grammar::Alternation { .. } => {
                let mut items = Vec::new();
                flatten_alternation(self, &mut items);
                write_joined(f, &items, " | ")
            }
            Grammar::Capture { child, .. } => write!(f, "{{{child}}}"),
            Grammar::Production(production) => write!(f, "<{}>", production.name()),
            Grammar::Rule(rule) => write!(f, "<{}>", rule.name()),
        }
    }
}

fn flatten_sequence<'g>(grammar: &'g Grammar, skip_whitespace: bool, items: &mut Vec<&'g Grammar>) {
    match grammar {
        Grammar::Sequence {
            lhs,
            rhs,
            skip_whitespace: ws,
        } if *ws == skip_whitespace => {
            flatten_sequence(lhs, skip_whitespace, items);
            flatten_sequence(rhs, skip_whitespace, items);
        }
        other => items.push(other),
    }
}

fn flatten_alternation<'g>(grammar: &'g Grammar, items: &mut Vec<&'g Grammar>) {
    match grammar {
        Grammar::Alternation { lhs, rhs } => {
            flatten_alternation(lhs, items);
            flatten_alternation(rhs, items);
        }
        other => items.push(other),
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[&Grammar], separator: &str) -> fmt::Result {
    f.write_str("(")?;
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(")")
}
