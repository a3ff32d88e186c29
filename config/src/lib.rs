//! # Config Crate
//!
//! Centralized configuration constants for the combinator engine and the
//! arithmetic expression front end built on it. Character sets, comment
//! delimiters, diagnostic widths and safety limits are defined here so the
//! engine crates never scatter literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{is_whitespace, DIGIT_ALPHABET, MAX_RADIX};
//!
//! assert!(is_whitespace('\t'));
//! assert_eq!(DIGIT_ALPHABET.len(), MAX_RADIX as usize);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Usable from every crate in the workspace
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
