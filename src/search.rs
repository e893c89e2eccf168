//! # Search — Incremental Run Search over Growing Prefixes of π
//!
//! Drives the digit source with n = chunk, 2·chunk, 3·chunk, … and scans
//! each prefix for `target_run` consecutive blanks.
//!
//! ## States
//!
//! SEARCHING → DONE, where DONE is either [`Outcome::Found`] (a prefix
//! contained the run) or [`Outcome::Exhausted`] (the next multiple of the
//! chunk size would exceed `max_digits`).
//!
//! ## Truncation
//!
//! The bound is checked before each attempt, so the last attempt is
//! `chunk · ⌊max_digits / chunk⌋`. Digits between that and `max_digits` are
//! never tried.
//!
//! ## Recompute per Attempt
//!
//! Every attempt asks the source for a fresh prefix and rescans it from the
//! first digit. `max_run` therefore belongs to one attempt, not to the whole
//! search. On exhaustion the last attempt's strings are reported as they are;
//! nothing is regenerated.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::digits::{DigitSource, DigitString};
use crate::error::PiError;
use crate::scan::{self, SubstitutedString};

/// Run length that ends the search.
pub const DEFAULT_TARGET_RUN: u64 = 10;
/// Digit-count increment between attempts.
pub const DEFAULT_CHUNK_SIZE: u64 = 5_000;
/// Ceiling on the digit count of any attempt.
pub const DEFAULT_MAX_DIGITS: u64 = 10_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub target_run: u64,
    pub chunk_size: u64,
    pub max_digits: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            target_run: DEFAULT_TARGET_RUN,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_digits: DEFAULT_MAX_DIGITS,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), PiError> {
        if self.target_run == 0 {
            return Err(PiError::InvalidConfig("target_run must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(PiError::InvalidConfig("chunk_size must be at least 1".into()));
        }
        if self.chunk_size > self.max_digits {
            return Err(PiError::InvalidConfig(format!(
                "chunk_size {} exceeds max_digits {}: no attempt could run",
                self.chunk_size, self.max_digits
            )));
        }
        Ok(())
    }

    /// Digit count of the final attempt if the run is never found.
    pub fn last_attempt_size(&self) -> u64 {
        if self.chunk_size == 0 {
            return 0;
        }
        self.chunk_size * (self.max_digits / self.chunk_size)
    }

    /// Number of attempts made if the run is never found.
    pub fn max_attempts(&self) -> u64 {
        if self.chunk_size == 0 {
            return 0;
        }
        self.max_digits / self.chunk_size
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Found,
    Exhausted,
}

/// One finished attempt, handed to the observer before the next begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attempt {
    /// 1-based attempt counter.
    pub index: u64,
    pub digits: u64,
    pub max_run: usize,
    pub position: Option<usize>,
}

/// Final value of a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub outcome: Outcome,
    pub digits_processed: u64,
    pub digits: DigitString,
    pub substituted: SubstitutedString,
    /// 1-indexed start of the run; `None` when exhausted.
    pub position: Option<usize>,
    pub max_run: usize,
    pub attempts: u64,
    pub target_run: u64,
}

impl SearchResult {
    pub fn found(&self) -> bool {
        self.outcome == Outcome::Found
    }
}

/// Hooks for reporting search progress. All methods default to no-ops.
pub trait SearchObserver {
    fn on_start(&mut self, _config: &SearchConfig) {}
    fn on_attempt(&mut self, _attempt: &Attempt) {}
    fn on_finish(&mut self, _result: &SearchResult) {}
}

impl SearchObserver for () {}

/// Search growing prefixes from `source` until `config.target_run`
/// consecutive blanks appear or `config.max_digits` is reached.
pub fn search(
    config: &SearchConfig,
    source: &dyn DigitSource,
    observer: &mut dyn SearchObserver,
) -> Result<SearchResult, PiError> {
    config.validate()?;
    let target = usize::try_from(config.target_run)
        .map_err(|_| PiError::InvalidConfig("target_run does not fit in usize".into()))?;

    observer.on_start(config);

    let mut n = config.chunk_size;
    let mut attempts = 0u64;
    let mut last = None;

    while n <= config.max_digits {
        let digits = source.digits(n)?;
        if digits.len() as u64 != n {
            return Err(PiError::Precision {
                digits: n,
                reason: format!("source returned {} digits", digits.len()),
            });
        }
        let substituted = scan::substitute(&digits);
        let scanned = scan::scan_for_run(substituted.as_str(), target);
        attempts += 1;

        observer.on_attempt(&Attempt {
            index: attempts,
            digits: n,
            max_run: scanned.max_run,
            position: scanned.position,
        });

        if scanned.found() {
            let result = SearchResult {
                outcome: Outcome::Found,
                digits_processed: n,
                digits,
                substituted,
                position: scanned.position,
                max_run: scanned.max_run,
                attempts,
                target_run: config.target_run,
            };
            info!(
                digits = n,
                position = ?scanned.position,
                attempts,
                "target run found"
            );
            observer.on_finish(&result);
            return Ok(result);
        }

        last = Some((n, digits, substituted, scanned.max_run));
        n = match n.checked_add(config.chunk_size) {
            Some(next) => next,
            None => break,
        };
    }

    // validate() guarantees chunk_size <= max_digits, so one attempt ran.
    let (digits_processed, digits, substituted, max_run) = last.ok_or_else(|| {
        PiError::InvalidConfig("search finished without any attempt".into())
    })?;

    let result = SearchResult {
        outcome: Outcome::Exhausted,
        digits_processed,
        digits,
        substituted,
        position: None,
        max_run,
        attempts,
        target_run: config.target_run,
    };
    info!(
        digits = digits_processed,
        max_run, attempts, "digit ceiling reached without target run"
    );
    observer.on_finish(&result);
    Ok(result)
}
