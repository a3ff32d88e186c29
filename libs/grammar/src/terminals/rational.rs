//! Rational literal terminal: `[sign] digits* ['.' digits*] ['e' [sign] digits+]`.

use super::integer::digit_class;
use super::number::Real;
use crate::context::ParseContext;
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::production::Production;
use crate::sink::{Sink, Slot};
use config::constants::{DEFAULT_RATIONAL_BASE, MAX_RADIX, MIN_RADIX};
use std::rc::Rc;

/// Rational number in a configurable base.
///
/// The mantissa needs at least one digit before or after the point, so `.`
/// and `e5` are rejected. The value is `integer + fraction`, scaled by
/// `base^exponent`. In bases above 14 the exponent marker `e` is itself a
/// digit, so an exponent is never recognised.
///
/// ## Example
///
/// ```rust
/// use grammar::{RationalLiteral, Sink, Slot};
///
/// let value = Slot::new();
/// let rational = RationalLiteral::<f64>::new(Sink::slot(value.clone())).grammar();
/// assert!(rational.matches_str("1.25e2").unwrap());
/// assert_eq!(value.get(), Some(125.0));
/// ```
#[derive(Debug)]
pub struct RationalLiteral<T: Real> {
    base: u32,
    shape: Grammar,
    parts: Parts,
    sink: Sink<T>,
}

#[derive(Debug, Clone, Default)]
struct Parts {
    sign: Slot<char>,
    integer: Slot<String>,
    fraction: Slot<String>,
    exponent_sign: Slot<char>,
    exponent: Slot<String>,
}

impl<T: Real> RationalLiteral<T> {
    /// Decimal rational literal saving to `sink`.
    pub fn new(sink: Sink<T>) -> Self {
        Self::build(DEFAULT_RATIONAL_BASE, sink)
    }

    /// Rational literal in base `base` (2 to 36) saving to `sink`.
    pub fn with_base(base: u32, sink: Sink<T>) -> Result<Self, GrammarError> {
        if !(MIN_RADIX..=MAX_RADIX).contains(&base) {
            return Err(GrammarError::InvalidRadix { radix: base });
        }
        Ok(Self::build(base, sink))
    }

    fn build(base: u32, sink: Sink<T>) -> Self {
        let parts = Parts::default();
        let sign = |slot: &Slot<char>| {
            Grammar::one_of("+-")
                .save_char(Sink::slot(slot.clone()))
                .optional()
        };
        let digits = |slot: &Slot<String>, min: usize| {
            digit_class(base)
                .repeat(min, false)
                .save_text(Sink::slot(slot.clone()))
        };

        let fraction = (Grammar::char('.') + digits(&parts.fraction, 0)).optional();
        let exponent = (Grammar::char('e').case_insensitive()
            + sign(&parts.exponent_sign)
            + digits(&parts.exponent, 1))
        .optional();
        let shape = sign(&parts.sign) + digits(&parts.integer, 0) + fraction + exponent;

        Self {
            base,
            shape,
            parts,
            sink,
        }
    }

    /// Grammar node running this production.
    pub fn grammar(self) -> Grammar {
        Grammar::production(self)
    }

    fn assemble(&self, integer: &str, fraction: &str, exponent: &str, negative_exponent: bool) -> T {
        let base = T::from_u32(self.base);
        let zero = T::from_u32(0);
        let digits = |text: &str| -> Vec<u32> {
            text.chars().filter_map(|ch| ch.to_digit(self.base)).collect()
        };

        let whole = digits(integer)
            .into_iter()
            .fold(zero, |value, digit| value * base + T::from_u32(digit));
        let part = digits(fraction)
            .into_iter()
            .rev()
            .fold(zero, |value, digit| (value + T::from_u32(digit)) / base);
        let mantissa = whole + part;
        if mantissa == zero {
            return mantissa;
        }

        let power = digits(exponent).into_iter().fold(0u64, |value, digit| {
            value
                .saturating_mul(u64::from(self.base))
                .saturating_add(u64::from(digit))
        });
        let mut scale = T::from_u32(1);
        for _ in 0..power {
            scale = scale * base;
            if scale.is_infinite() {
                break;
            }
        }
        if negative_exponent {
            mantissa / scale
        } else {
            mantissa * scale
        }
    }
}

impl<T: Real> Production for RationalLiteral<T> {
    fn name(&self) -> &str {
        "rational literal"
    }

    fn matches(&self, ctx: &mut ParseContext<'_>) -> Result<bool, GrammarError> {
        if !ctx.attempt(&self.shape)? {
            return Ok(false);
        }
        let negative = self.parts.sign.take() == Some('-');
        let integer = self.parts.integer.take().unwrap_or_default();
        let fraction = self.parts.fraction.take().unwrap_or_default();
        let negative_exponent = self.parts.exponent_sign.take() == Some('-');
        let exponent = self.parts.exponent.take().unwrap_or_default();

        if integer.is_empty() && fraction.is_empty() {
            return Ok(false);
        }

        let value = self.assemble(&integer, &fraction, &exponent, negative_exponent);
        ctx.save(&self.sink, if negative { -value } else { value });
        Ok(true)
    }

    fn detached(&self) -> Rc<dyn Production> {
        Rc::new(Self::build(self.base, Sink::discard()))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rational(text: &str) -> Option<f64> {
        let value = Slot::new();
        let grammar = RationalLiteral::<f64>::new(Sink::slot(value.clone())).grammar();
        grammar.matches_str(text).unwrap().then(|| value.get()).flatten()
    }

    #[test]
    fn test_exponent_forms() {
        assert_relative_eq!(rational("1.25e2").unwrap(), 125.0);
        assert_relative_eq!(rational("1e-2").unwrap(), 0.01);
        assert_relative_eq!(rational("2E+3").unwrap(), 2000.0);
    }

    #[test]
    fn test_partial_forms() {
        assert_relative_eq!(rational("42").unwrap(), 42.0);
        assert_relative_eq!(rational(".5").unwrap(), 0.5);
        assert_relative_eq!(rational("3.").unwrap(), 3.0);
        assert_relative_eq!(rational("-0.75").unwrap(), -0.75);
    }

    #[test]
    fn test_missing_mantissa_fails() {
        assert_eq!(rational("."), None);
        assert_eq!(rational("e5"), None);
        assert_eq!(rational("-"), None);
        assert_eq!(rational(""), None);
    }

    #[test]
    fn test_dangling_exponent_left_unconsumed() {
        let grammar = RationalLiteral::<f64>::new(Sink::discard()).grammar();
        let outcome = grammar.parse_str("7e").unwrap();
        assert!(outcome.matched);
        assert_eq!(outcome.cursor.offset(), 1);
    }

    #[test]
    fn test_other_base() {
        let value = Slot::new();
        let grammar = RationalLiteral::<f64>::with_base(2, Sink::slot(value.clone()))
            .unwrap()
            .grammar();
        assert!(grammar.matches_str("10.1e11").unwrap());
        assert_relative_eq!(value.get().unwrap(), 20.0);
        assert!(RationalLiteral::<f64>::with_base(40, Sink::discard()).is_err());
    }

    #[test]
    fn test_huge_exponent_saturates() {
        assert!(rational("1e99999").unwrap().is_infinite());
        assert_eq!(rational("1e-99999").unwrap(), 0.0);
        assert_eq!(rational("0e99999").unwrap(), 0.0);
    }

    #[test]
    fn test_f32_target() {
        let value = Slot::new();
        let grammar = RationalLiteral::<f32>::new(Sink::slot(value.clone())).grammar();
        assert!(grammar.matches_str("0.5").unwrap());
        assert_relative_eq!(value.get().unwrap(), 0.5f32);
    }
}
