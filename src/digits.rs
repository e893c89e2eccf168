//! # Digits — Decimal Digits of π via MPFR
//!
//! Produces the first `n` significant decimal digits of π ("3" counted as
//! digit 1) as an immutable [`DigitString`].
//!
//! ## Algorithm
//!
//! 1. Evaluate π with MPFR (`rug::Float`, `Constant::Pi`) at a working
//!    precision of `(n + GUARD_DIGITS)·log₂10 + GUARD_BITS` bits.
//! 2. Scale by `10^(n − 1 + GUARD_DIGITS)` and take the floor, giving an
//!    integer whose decimal expansion is the first `n + GUARD_DIGITS` digits.
//! 3. Keep the first `n` characters.
//!
//! Every step truncates. Rounding to `n` digits would let a carry walk back
//! into earlier digits (3.14159 → "31416" instead of "31415").
//!
//! ## Complexity
//!
//! MPFR's π is O(M(p)·log p) for p bits, and the decimal conversion is
//! subquadratic in GMP. Each call starts from scratch; nothing is cached
//! between calls.

use rug::float::{self, Constant};
use rug::ops::Pow;
use rug::{Float, Integer};
use std::fmt;
use tracing::debug;

use crate::error::PiError;

/// Extra decimal digits computed beyond the requested count.
pub const GUARD_DIGITS: u64 = 10;

/// Extra binary precision on top of the decimal guard digits.
const GUARD_BITS: u64 = 64;

/// An ordered, immutable run of decimal digits of π, starting with "3".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitString(String);

impl DigitString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wrap a string that is already known to be all decimal digits.
    /// Returns `None` if any character is not `0-9` or the string is empty.
    pub fn from_digits(s: impl Into<String>) -> Option<Self> {
        let s = s.into();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(DigitString(s))
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of digit strings for the search driver.
///
/// [`PiDigits`] is the real one; tests substitute synthetic sources to drive
/// the loop through specific shapes.
pub trait DigitSource {
    fn digits(&self, n: u64) -> Result<DigitString, PiError>;
}

/// MPFR-backed π digit source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PiDigits;

impl DigitSource for PiDigits {
    fn digits(&self, n: u64) -> Result<DigitString, PiError> {
        generate(n)
    }
}

/// Working precision in bits for `n` decimal digits plus guard digits.
pub fn precision_bits(n: u64) -> u64 {
    let decimal = n.saturating_add(GUARD_DIGITS);
    ((decimal as f64) * std::f64::consts::LOG2_10).ceil() as u64 + GUARD_BITS
}

/// Compute the first `n` significant decimal digits of π.
pub fn generate(n: u64) -> Result<DigitString, PiError> {
    if n == 0 {
        return Err(PiError::InvalidDigitCount(n));
    }

    let precision_failure = |reason: String| PiError::Precision { digits: n, reason };

    let bits = precision_bits(n);
    let prec = u32::try_from(bits)
        .ok()
        .filter(|&p| p <= float::prec_max())
        .ok_or_else(|| {
            precision_failure(format!(
                "{} bits exceeds MPFR maximum of {}",
                bits,
                float::prec_max()
            ))
        })?;
    let exponent = u32::try_from(n - 1 + GUARD_DIGITS)
        .map_err(|_| precision_failure("scale exponent does not fit in u32".into()))?;

    debug!(digits = n, precision_bits = prec, "computing pi");

    let pi = Float::with_val(prec, Constant::Pi);
    let scale = Integer::from(10u32).pow(exponent);
    let scaled = pi * &scale;
    if !scaled.is_finite() {
        return Err(precision_failure("scaled value is not finite".into()));
    }
    let truncated = scaled
        .floor()
        .to_integer()
        .ok_or_else(|| precision_failure("floor did not yield an integer".into()))?;

    let mut text = truncated.to_string_radix(10);
    let wanted = n as usize;
    if text.len() < wanted || !text.starts_with('3') {
        return Err(precision_failure(format!(
            "expected at least {} digits starting with 3, got {} digits",
            wanted,
            text.len()
        )));
    }
    text.truncate(wanted);
    Ok(DigitString(text))
}
