//! Numeric traits for the integer and rational terminals.
//!
//! Arithmetic follows the target type with no overflow checks: integers wrap,
//! floats saturate to infinity.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg};

/// Primitive integer a digit string can be folded into.
pub trait Integer: Copy + Default + fmt::Debug + fmt::Display + 'static {
    /// `self * radix + digit`, wrapping on overflow.
    fn accumulate(self, radix: u32, digit: u32) -> Self;

    /// Two's-complement negation, wrapping on overflow.
    fn negate(self) -> Self;
}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Integer for $ty {
                fn accumulate(self, radix: u32, digit: u32) -> Self {
                    self.wrapping_mul(radix as $ty).wrapping_add(digit as $ty)
                }

                fn negate(self) -> Self {
                    self.wrapping_neg()
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Floating-point type a rational literal can be assembled into.
pub trait Real:
    Copy
    + PartialEq
    + fmt::Debug
    + fmt::Display
    + Add<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    /// Exact conversion of a small digit or base.
    fn from_u32(value: u32) -> Self;

    /// Returns true for positive or negative infinity.
    fn is_infinite(self) -> bool;
}

macro_rules! impl_real {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Real for $ty {
                fn from_u32(value: u32) -> Self {
                    value as $ty
                }

                fn is_infinite(self) -> bool {
                    <$ty>::is_infinite(self)
                }
            }
        )*
    };
}

impl_real!(f32, f64);

/// Folds `digits` (already validated for `radix`) into an integer.
pub(crate) fn fold_digits<T: Integer>(digits: &str, radix: u32) -> T {
    digits
        .chars()
        .filter_map(|ch| ch.to_digit(radix))
        .fold(T::default(), |value, digit| value.accumulate(radix, digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_digits_in_bases() {
        assert_eq!(fold_digits::<u32>("11010", 2), 26);
        assert_eq!(fold_digits::<u32>("032", 8), 26);
        assert_eq!(fold_digits::<u32>("1A", 16), 26);
        assert_eq!(fold_digits::<u32>("1a", 16), 26);
        assert_eq!(fold_digits::<i64>("zz", 36), 1295);
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(fold_digits::<u8>("256", 10), 0);
        assert_eq!(fold_digits::<i8>("128", 10), i8::MIN);
        assert_eq!(i8::MIN.negate(), i8::MIN);
    }

    #[test]
    fn test_real_from_u32() {
        assert_eq!(f64::from_u32(16), 16.0);
        assert!(Real::is_infinite(f32::MAX * 2.0));
    }
}
