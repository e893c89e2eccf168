//! # Error — Library Error Taxonomy
//!
//! Every failure the pipeline can hit is fatal: nothing is retried and no
//! artifact is written once one of these is returned. "Run not found within
//! the digit ceiling" is an [`Outcome`](crate::search::Outcome), not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PiError {
    /// A digit count of zero was requested.
    #[error("invalid digit count {0}: at least one digit is required")]
    InvalidDigitCount(u64),

    /// MPFR could not provide the precision needed for `digits` digits.
    #[error("cannot compute {digits} digits of pi: {reason}")]
    Precision { digits: u64, reason: String },

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}
