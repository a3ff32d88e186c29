//! Node-specific matching.
//!
//! [`Grammar::match_in`] is only ever called through
//! [`ParseContext::attempt`], so a node returning `Ok(false)` may leave the
//! cursor and captures anywhere: the protocol restores them.

use super::{Case, Grammar};
use crate::context::ParseContext;
use crate::error::GrammarError;

impl Grammar {
    pub(crate) fn match_in(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError> {
        match self {
            Grammar::Char {
                matcher,
                case,
                substitute,
                sink,
            } => {
                let Some(ch) = ctx.peek() else {
                    return Ok(false);
                };
                if !matcher.accepts(ch, *case) {
                    return Ok(false);
                }
                ctx.advance();
                ctx.save(sink, substitute.unwrap_or(ch));
                Ok(true)
            }

            Grammar::Literal { text, case, sink } => {
                let mut matched = String::with_capacity(text.len());
                for expected in text.chars() {
                    match ctx.peek() {
                        Some(ch) if same_char(expected, ch, *case) => {
                            matched.push(ch);
                            ctx.advance();
                        }
                        _ => return Ok(false),
                    }
                }
                ctx.save(sink, matched);
                Ok(true)
            }

            Grammar::EndOfInput => Ok(ctx.is_at_end()),

            Grammar::EndOfLine => match ctx.peek() {
                None => Ok(true),
                Some('\n') => {
                    ctx.advance();
                    Ok(true)
                }
                Some(_) => Ok(false),
            },

            Grammar::Space => {
                ctx.skip_whitespace();
                Ok(true)
            }

            Grammar::Empty => Ok(true),

            Grammar::Not(child) => {
                let furthest = ctx.furthest();
                ctx.mute_trace();
                let matched = ctx.attempt(child);
                ctx.unmute_trace();
                ctx.set_furthest(furthest);
                // A matched child is rolled back when this node fails.
                Ok(!matched?)
            }

            Grammar::Optional(child) => {
                ctx.attempt(child)?;
                Ok(true)
            }

            Grammar::Repeat {
                child,
                min,
                skip_whitespace,
            } => {
                let mut count = 0;
                loop {
                    let before = ctx.cursor();
                    if *skip_whitespace && count > 0 {
                        ctx.skip_whitespace();
                    }
                    let start = ctx.cursor();
                    if !ctx.attempt(child)? {
                        ctx.restore(before);
                        break;
                    }
                    if ctx.cursor().offset() == start.offset() {
                        return Err(GrammarError::ambiguous(child.label(), start));
                    }
                    count += 1;
                }
                Ok(count >= *min)
            }

            Grammar::Sequence {
                lhs,
                rhs,
                skip_whitespace,
            } => {
                if !ctx.attempt(lhs)? {
                    return Ok(false);
                }
                if *skip_whitespace {
                    ctx.skip_whitespace();
                }
                ctx.attempt(rhs)
            }

            Grammar::Alternation { lhs, rhs } => {
                if ctx.attempt(lhs)? {
                    return Ok(true);
                }
                ctx.attempt(rhs)
            }

            Grammar::Capture { child, sink } => {
                let from = ctx.cursor();
                if !ctx.attempt(child)? {
                    return Ok(false);
                }
                let text = ctx.slice(from, ctx.cursor()).to_string();
                ctx.save(sink, text);
                Ok(true)
            }

            Grammar::Production(production) => production.matches(ctx),

            Grammar::Rule(rule) => rule.run(ctx),
        }
    }
}

fn same_char(expected: char, ch: char, case: Case) -> bool {
    super::CharMatcher::Exact(expected).accepts(ch, case)
}

// =============================================================================
// TESTS
// =============================================================================
