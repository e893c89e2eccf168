//! Property-based tests for the digit pipeline.
//!
//! These use `proptest` to check invariants of substitution, run scanning,
//! and the search driver over randomly generated inputs. No network or
//! filesystem access is needed.
//!
//! ```bash
//! cargo test --test property_tests
//! PROPTEST_CASES=10000 cargo test --test property_tests
//! ```
//!
//! Each property is named `prop_<function>_<invariant>`.

use proptest::prelude::*;

use pispan::digits::{DigitSource, DigitString};
use pispan::scan::{self, longest_run, scan_for_run, substitute_str, BLANK};
use pispan::search::{search, Outcome, SearchConfig};
use pispan::PiError;

/// Digit strings biased toward 9 and 0 so long runs actually occur.
fn digit_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            3 => Just('9'),
            3 => Just('0'),
            4 => prop::char::range('1', '8'),
        ],
        0..max_len,
    )
    .prop_map(|chars| chars.into_iter().collect())
}

/// Cycles a fixed digit pattern to any length.
struct Cycle(String);

impl DigitSource for Cycle {
    fn digits(&self, n: u64) -> Result<DigitString, PiError> {
        let text: String = self.0.chars().cycle().take(n as usize).collect();
        Ok(DigitString::from_digits(text).expect("digits only"))
    }
}

// == Substitution ==============================================================

proptest! {
    /// Blank exactly where the source digit is 9 or 0; length preserved.
    #[test]
    fn prop_substitute_positionwise(text in digit_text(200)) {
        let s = substitute_str(&text);
        prop_assert_eq!(s.chars().count(), text.chars().count());
        for (d, c) in text.chars().zip(s.chars()) {
            prop_assert_eq!(c == BLANK, scan::is_blanked(d));
            if c != BLANK {
                prop_assert_eq!(c, d);
            }
        }
    }

    /// Substituting substituted text changes nothing.
    #[test]
    fn prop_substitute_idempotent(text in digit_text(200)) {
        let once = substitute_str(&text);
        prop_assert_eq!(substitute_str(&once), once);
    }
}

// == Run Scanning ==============================================================

proptest! {
    /// A reported position starts a run of at least `target` blanks and no
    /// earlier position does.
    #[test]
    fn prop_scan_reports_earliest_match(text in digit_text(300), target in 1usize..8) {
        let s = substitute_str(&text);
        let chars: Vec<char> = s.chars().collect();
        let starts_run = |start: usize| {
            start + target <= chars.len() && chars[start..start + target].iter().all(|&c| c == BLANK)
        };
        let expected = (0..chars.len()).find(|&i| starts_run(i)).map(|i| i + 1);

        let out = scan_for_run(&s, target);
        prop_assert_eq!(out.position, expected);
        if let Some(p) = out.position {
            prop_assert!(starts_run(p - 1));
        }
    }

    /// When nothing is found, `max_run` is the true longest run.
    #[test]
    fn prop_scan_not_found_max_matches_brute_force(text in digit_text(300), target in 1usize..12) {
        let s = substitute_str(&text);
        let out = scan_for_run(&s, target);
        if !out.found() {
            let brute = {
                let (mut best, mut cur) = (0, 0);
                for c in s.chars() {
                    cur = if c == BLANK { cur + 1 } else { 0 };
                    best = best.max(cur);
                }
                best
            };
            prop_assert_eq!(out.max_run, brute);
            prop_assert_eq!(out.max_run, longest_run(&s));
            prop_assert!(out.max_run < target);
        } else {
            prop_assert!(out.max_run >= target);
        }
    }
}

// == Search Driver =============================================================

proptest! {
    /// Exhausted searches stop at chunk * floor(max / chunk), never above max.
    #[test]
    fn prop_search_truncates_to_chunk_multiple(chunk in 1u64..50, extra in 0u64..500) {
        let max_digits = chunk + extra;
        let config = SearchConfig { target_run: 1, chunk_size: chunk, max_digits };
        let result = search(&config, &Cycle("12345678".into()), &mut ()).unwrap();
        prop_assert_eq!(result.outcome, Outcome::Exhausted);
        prop_assert_eq!(result.digits_processed, chunk * (max_digits / chunk));
        prop_assert_eq!(result.digits_processed, config.last_attempt_size());
        prop_assert!(result.digits_processed <= max_digits);
        prop_assert_eq!(result.digits.len() as u64, result.digits_processed);
    }

    /// A found result's digit count is a chunk multiple and its strings agree.
    #[test]
    fn prop_search_found_is_consistent(pattern in "[0-9]{1,12}", chunk in 1u64..40, target in 1u64..4) {
        let config = SearchConfig { target_run: target, chunk_size: chunk, max_digits: chunk * 20 };
        let result = search(&config, &Cycle(pattern), &mut ()).unwrap();
        prop_assert_eq!(result.digits_processed % chunk, 0);
        let resubstituted = scan::substitute(&result.digits);
        prop_assert_eq!(resubstituted.as_str(), result.substituted.as_str());
        if let Some(p) = result.position {
            let run = &result.substituted.as_str()[p - 1..p - 1 + target as usize];
            prop_assert!(run.chars().all(|c| c == BLANK));
        }
    }
}
