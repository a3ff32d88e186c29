//! Quoted or bare string terminal.

use crate::context::ParseContext;
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::production::Production;
use crate::sink::{Sink, TextBuffer};
use config::constants::WHITESPACE;
use std::rc::Rc;

/// A double- or single-quoted string with backslash escapes, or an
/// unquoted run of non-whitespace characters.
///
/// Escapes `\r`, `\n` and `\t` decode to control characters; any other
/// escaped character (including `\"`, `\'` and `\\`) stands for itself. The
/// saved value is the decoded text without quotes.
///
/// ## Example
///
/// ```rust
/// use grammar::{QuotedString, Sink, Slot};
///
/// let text = Slot::new();
/// let string = QuotedString::new(Sink::slot(text.clone())).grammar();
/// assert!(string.matches_str(r#""say \"hi\"\n""#).unwrap());
/// assert_eq!(text.get().as_deref(), Some("say \"hi\"\n"));
/// ```
#[derive(Debug)]
pub struct QuotedString {
    shape: Grammar,
    text: TextBuffer,
    sink: Sink<String>,
}

impl QuotedString {
    /// String grammar saving the decoded text to `sink`.
    pub fn new(sink: Sink<String>) -> Self {
        let text = TextBuffer::new();
        let decoded = || Sink::text(text.clone());

        let escape = Grammar::char('\\')
            + Grammar::choice([
                Grammar::char('r').yielding('\r'),
                Grammar::char('n').yielding('\n'),
                Grammar::char('t').yielding('\t'),
                Grammar::any(),
            ])
            .save_char(decoded());
        let quoted = |quote: char| {
            let plain = Grammar::none_of(&format!("{quote}\\")).save_char(decoded());
            Grammar::char(quote) + (escape.clone() | plain).zero_or_more() + quote
        };
        let blanks: String = WHITESPACE.iter().collect();
        let bare = Grammar::none_of(&blanks).save_char(decoded()).one_or_more();
        let shape = Grammar::choice([quoted('"'), quoted('\''), bare]);

        Self {
            shape,
            text,
            sink,
        }
    }

    /// Grammar node running this production.
    pub fn grammar(self) -> Grammar {
        Grammar::production(self)
    }
}

impl Production for QuotedString {
    fn name(&self) -> &str {
        "string"
    }

    fn matches(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError> {
        if !ctx.attempt(&self.shape)? {
            return Ok(false);
        }
        let value = self.text.take();
        ctx.save(&self.sink, value);
        Ok(true)
    }

    fn detached(&self) -> Rc<dyn Production> {
        Rc::new(Self::new(Sink::discard()))
    }
}
