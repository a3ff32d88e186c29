//! # Terminal Grammars
//!
//! Ready-made productions for common tokens.
//!
//! | Production | Accepts | Saves |
//! |------------|---------|-------|
//! | [`UnsignedInteger`] | digits in base 2 to 36 | any primitive integer |
//! | [`IntegerLiteral`] | C-style hex, octal, binary or decimal | any primitive integer |
//! | [`RationalLiteral`] | `[sign] int ['.' frac] ['e' [sign] exp]` | `f32` or `f64` |
//! | [`QuotedString`] | quoted string with escapes, or a bare word | `String` |

mod integer;
mod number;
mod rational;
mod string;

pub use integer::{IntegerLiteral, UnsignedInteger};
pub use number::{Integer, Real};
pub use rational::RationalLiteral;
pub use string::QuotedString;
