//! # Scan — Blank Substitution and Run Detection
//!
//! Replaces every '9' and '0' in a digit string with a blank and looks for
//! the first run of `target` consecutive blanks.
//!
//! ## Run Bookkeeping
//!
//! A single left-to-right pass keeps the length of the current blank run.
//! The best run seen so far is updated whenever a run ends, and once more
//! after the last character so a run touching the end of the string counts.
//! The pass stops as soon as the current run reaches `target`; the rest of
//! the string is never looked at.

use std::fmt;

use crate::digits::DigitString;

/// Character that replaces blanked digits.
pub const BLANK: char = ' ';

/// Whether a digit is replaced by [`BLANK`].
pub fn is_blanked(c: char) -> bool {
    c == '9' || c == '0'
}

/// A [`DigitString`] with '9' and '0' replaced by [`BLANK`]; same length and
/// positions as its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutedString(String);

impl SubstitutedString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SubstitutedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Character-wise substitution over arbitrary text.
pub fn substitute_str(text: &str) -> String {
    text.chars()
        .map(|c| if is_blanked(c) { BLANK } else { c })
        .collect()
}

pub fn substitute(digits: &DigitString) -> SubstitutedString {
    SubstitutedString(substitute_str(digits.as_str()))
}

/// Result of one [`scan_for_run`] pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOutcome {
    /// 1-indexed start of the first qualifying run.
    pub position: Option<usize>,
    /// Longest blank run seen by the pass. When a match is found this covers
    /// only the characters scanned up to the match.
    pub max_run: usize,
}

impl ScanOutcome {
    pub fn found(&self) -> bool {
        self.position.is_some()
    }
}

/// Find the first run of at least `target` blanks in `text`.
///
/// `target == 0` matches nothing and degenerates to a full longest-run scan.
pub fn scan_for_run(text: &str, target: usize) -> ScanOutcome {
    let mut current = 0usize;
    let mut best = 0usize;

    for (i, c) in text.chars().enumerate() {
        if c == BLANK {
            current += 1;
            if target > 0 && current == target {
                // Run occupies 0-indexed [i + 1 - target, i].
                return ScanOutcome {
                    position: Some(i + 2 - target),
                    max_run: best.max(current),
                };
            }
        } else {
            best = best.max(current);
            current = 0;
        }
    }

    ScanOutcome {
        position: None,
        max_run: best.max(current),
    }
}

/// Longest blank run in `text`, computed by an independent full scan.
pub fn longest_run(text: &str) -> usize {
    text.split(|c: char| c != BLANK)
        .map(|run| run.chars().count())
        .max()
        .unwrap_or(0)
}
