//! Integer terminals: unsigned digits in any base, and C-style literals.

use super::number::{fold_digits, Integer};
use crate::context::ParseContext;
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::production::Production;
use crate::sink::{Sink, Slot};
use config::constants::{DIGIT_ALPHABET, MAX_RADIX, MIN_RADIX};
use std::rc::Rc;

/// Case-insensitive class of the first `radix` digit symbols.
pub(crate) fn digit_class(radix: u32) -> Grammar {
    let symbols = DIGIT_ALPHABET.get(..radix as usize).unwrap_or(DIGIT_ALPHABET);
    Grammar::one_of(symbols).case_insensitive()
}

fn check_radix(radix: u32) -> Result<(), GrammarError> {
    if (MIN_RADIX..=MAX_RADIX).contains(&radix) {
        Ok(())
    } else {
        Err(GrammarError::InvalidRadix { radix })
    }
}

// =============================================================================
// UNSIGNED INTEGER
// =============================================================================

/// One or more digits in base `radix`, folded as `value * radix + digit`.
///
/// ## Example
///
/// ```rust
/// use grammar::{Sink, Slot, UnsignedInteger};
///
/// let value = Slot::new();
/// let hex = UnsignedInteger::<u32>::new(16, Sink::slot(value.clone())).unwrap();
/// assert!(hex.grammar().matches_str("fF").unwrap());
/// assert_eq!(value.get(), Some(255));
/// ```
#[derive(Debug)]
pub struct UnsignedInteger<T: Integer> {
    name: String,
    radix: u32,
    digits: Grammar,
    text: Slot<String>,
    sink: Sink<T>,
}

impl<T: Integer> UnsignedInteger<T> {
    /// Integer grammar in base `radix` (2 to 36) saving to `sink`.
    pub fn new(radix: u32, sink: Sink<T>) -> Result<Self, GrammarError> {
        check_radix(radix)?;
        Ok(Self::build(radix, sink))
    }

    fn build(radix: u32, sink: Sink<T>) -> Self {
        let text = Slot::new();
        Self {
            name: format!("base-{radix} integer"),
            radix,
            digits: digit_class(radix)
                .one_or_more()
                .save_text(Sink::slot(text.clone())),
            text,
            sink,
        }
    }

    /// Grammar node running this production.
    pub fn grammar(self) -> Grammar {
        Grammar::production(self)
    }
}

impl<T: Integer> Production for UnsignedInteger<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError> {
        if !ctx.attempt(&self.digits)? {
            return Ok(false);
        }
        let digits = self.text.take().unwrap_or_default();
        ctx.save(&self.sink, fold_digits::<T>(&digits, self.radix));
        Ok(true)
    }

    fn detached(&self) -> Rc<dyn Production> {
        Rc::new(Self::build(self.radix, Sink::discard()))
    }
}

// =============================================================================
// INTEGER LITERAL
// =============================================================================

/// C-style integer literal with an optional sign.
///
/// Forms, tried in order (first match wins):
///
/// | Form | Shape | Example |
/// |------|-------|---------|
/// | hex | `0x` prefix, any case | `0x1A` |
/// | octal | leading `0`, not followed by `x` or `b` | `032` |
/// | binary | `b` suffix | `11010b` |
/// | decimal | no leading `0`, not followed by `b` | `26` |
///
/// ## Example
///
/// ```rust
/// use grammar::{IntegerLiteral, Sink, Slot};
///
/// let value = Slot::new();
/// let literal = IntegerLiteral::<i32>::new(Sink::slot(value.clone())).grammar();
/// for text in ["0x1A", "032", "11010b", "26"] {
///     assert!(literal.matches_str(text).unwrap());
///     assert_eq!(value.take(), Some(26));
/// }
/// ```
#[derive(Debug)]
pub struct IntegerLiteral<T: Integer> {
    forms: Vec<(u32, Grammar)>,
    sign: Slot<char>,
    digits: Slot<String>,
    sink: Sink<T>,
}

impl<T: Integer> IntegerLiteral<T> {
    /// Literal grammar saving to `sink`.
    pub fn new(sink: Sink<T>) -> Self {
        let sign = Slot::new();
        let digits = Slot::new();
        let signed = |body: Grammar| {
            Grammar::one_of("+-")
                .save_char(Sink::slot(sign.clone()))
                .optional()
                + body
        };
        let capture = |grammar: Grammar| grammar.save_text(Sink::slot(digits.clone()));

        let hex = signed(Grammar::literal("0x").case_insensitive() + capture(digit_class(16).one_or_more()));
        let octal = signed(
            capture(Grammar::char('0') + digit_class(8).zero_or_more()) + !Grammar::one_of("xXbB"),
        );
        let binary = signed(capture(digit_class(2).one_or_more()) + Grammar::char('b').case_insensitive());
        let decimal = signed(
            capture(Grammar::range('1', '9') + digit_class(10).zero_or_more())
                + !Grammar::char('b').case_insensitive(),
        );

        Self {
            forms: vec![(16, hex), (8, octal), (2, binary), (10, decimal)],
            sign,
            digits,
            sink,
        }
    }

    /// Grammar node running this production.
    pub fn grammar(self) -> Grammar {
        Grammar::production(self)
    }
}

impl<T: Integer> Production for IntegerLiteral<T> {
    fn name(&self) -> &str {
        "integer literal"
    }

    fn matches(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError> {
        for (radix, form) in &self.forms {
            if !ctx.attempt(form)? {
                continue;
            }
            let negative = self.sign.take() == Some('-');
            let digits = self.digits.take().unwrap_or_default();
            let value = fold_digits::<T>(&digits, *radix);
            ctx.save(&self.sink, if negative { value.negate() } else { value });
            return Ok(true);
        }
        Ok(false)
    }

    fn detached(&self) -> Rc<dyn Production> {
        Rc::new(Self::new(Sink::discard()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn literal_value(text: &str) -> Option<i64> {
        let value = Slot::new();
        let grammar = IntegerLiteral::<i64>::new(Sink::slot(value.clone())).grammar();
        grammar.matches_str(text).unwrap().then(|| value.get()).flatten()
    }

    #[test]
    fn test_radix_bounds() {
        assert!(UnsignedInteger::<u8>::new(1, Sink::discard()).is_err());
        assert!(UnsignedInteger::<u8>::new(37, Sink::discard()).is_err());
        assert!(UnsignedInteger::<u8>::new(36, Sink::discard()).is_ok());
    }

    #[test]
    fn test_unsigned_rejects_foreign_digits() {
        let grammar = UnsignedInteger::<u32>::new(8, Sink::discard()).unwrap().grammar();
        assert!(!grammar.matches_str("9").unwrap());
        let outcome = grammar.parse_str("778").unwrap();
        assert_eq!(outcome.cursor.offset(), 2);
    }

    #[test]
    fn test_literal_forms_yield_26() {
        assert_eq!(literal_value("0x1A"), Some(26));
        assert_eq!(literal_value("0X1a"), Some(26));
        assert_eq!(literal_value("032"), Some(26));
        assert_eq!(literal_value("11010b"), Some(26));
        assert_eq!(literal_value("11010B"), Some(26));
        assert_eq!(literal_value("26"), Some(26));
    }

    #[test]
    fn test_binary_suffix_small() {
        assert_eq!(literal_value("11b"), Some(3));
    }

    #[test]
    fn test_signs() {
        assert_eq!(literal_value("-0x10"), Some(-16));
        assert_eq!(literal_value("+7"), Some(7));
        assert_eq!(literal_value("-101b"), Some(-5));
    }

    #[test]
    fn test_zero_is_octal() {
        assert_eq!(literal_value("0"), Some(0));
    }

    #[test]
    fn test_no_digits_fails() {
        assert_eq!(literal_value("x"), None);
        assert_eq!(literal_value("-"), None);
        assert_eq!(literal_value("0x"), None);
    }

    #[test]
    fn test_sign_does_not_leak_between_forms() {
        let value = Slot::new();
        let grammar = IntegerLiteral::<i32>::new(Sink::slot(value.clone())).grammar();
        assert!(grammar.matches_str("-5").unwrap());
        assert_eq!(value.take(), Some(-5));
        assert!(grammar.matches_str("5").unwrap());
        assert_eq!(value.take(), Some(5));
    }

    #[test]
    fn test_detached_saves_nothing() {
        let value = Slot::new();
        let grammar = IntegerLiteral::<i32>::new(Sink::slot(value.clone())).grammar();
        assert!(grammar.detached().matches_str("12").unwrap());
        assert!(!value.is_set());
    }
}
