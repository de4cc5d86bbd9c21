//! Utility functions and helpers.
//!
//! Common functionality used across multiple confdoc crates.

pub mod number;
pub mod path;

// Re-export commonly used utilities
pub use number::{format_number, integral_value, leading_number, parse_decimal, parse_finite_number, parse_number};
pub use path::{get_extension, with_extension};
