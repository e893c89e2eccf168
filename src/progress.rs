//! # Progress — Per-Attempt Search Reporting
//!
//! [`Progress`] is the [`SearchObserver`] the binary hands to the search
//! driver. It keeps running totals (attempts, digits generated, best run
//! seen in any attempt) and logs one structured `tracing` event per attempt
//! with the elapsed time and digit throughput. With [`Progress::with_console`]
//! it also prints a plain line per attempt to stdout, next to the banners, so
//! the console report does not depend on the log filter.
//!
//! The search is single-threaded and the observer is borrowed mutably for
//! the whole run, so plain fields are enough; no atomics or reporter thread.

use std::time::{Duration, Instant};
use tracing::info;

use crate::search::{Attempt, Outcome, SearchConfig, SearchObserver, SearchResult};

pub struct Progress {
    pub attempts: u64,
    /// Sum of all digit counts requested so far (each attempt recomputes).
    pub digits_generated: u64,
    /// Digit count of the most recent attempt.
    pub current_digits: u64,
    /// Longest run in the most recent attempt.
    pub current_max_run: usize,
    /// Longest run over all attempts.
    pub best_run: usize,
    planned_attempts: u64,
    console: bool,
    start: Instant,
}

impl Progress {
    pub fn new() -> Self {
        Progress {
            attempts: 0,
            digits_generated: 0,
            current_digits: 0,
            current_max_run: 0,
            best_run: 0,
            planned_attempts: 0,
            console: false,
            start: Instant::now(),
        }
    }

    /// Also print each attempt to stdout.
    pub fn with_console() -> Self {
        Progress {
            console: true,
            ..Progress::new()
        }
    }

    /// Console line for the most recent attempt.
    pub fn status_line(&self) -> String {
        format!(
            "  Processed {} digits... max consecutive spaces so far: {}",
            self.current_digits, self.current_max_run
        )
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Generated digits per second, 0.0 before the first full second.
    pub fn rate(&self) -> f64 {
        let elapsed = self.start.elapsed();
        if elapsed.as_secs() > 0 {
            self.digits_generated as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        }
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let h = elapsed.as_secs() / 3600;
        let m = (elapsed.as_secs() % 3600) / 60;
        let s = elapsed.as_secs() % 60;
        info!(
            attempt = self.attempts,
            of = self.planned_attempts,
            digits = self.current_digits,
            max_run = self.current_max_run,
            best_run = self.best_run,
            rate = format_args!("{:.2}", self.rate()),
            elapsed = format_args!("{:02}:{:02}:{:02}", h, m, s),
            "search progress"
        );
    }
}

impl Default for Progress {
    fn default() -> Self {
        Progress::new()
    }
}

impl SearchObserver for Progress {
    fn on_start(&mut self, config: &SearchConfig) {
        self.planned_attempts = config.max_attempts();
        self.start = Instant::now();
        info!(
            target_run = config.target_run,
            chunk_size = config.chunk_size,
            max_digits = config.max_digits,
            "searching for consecutive 9s and 0s"
        );
    }

    fn on_attempt(&mut self, attempt: &Attempt) {
        self.attempts = attempt.index;
        self.digits_generated += attempt.digits;
        self.current_digits = attempt.digits;
        self.current_max_run = attempt.max_run;
        self.best_run = self.best_run.max(attempt.max_run);
        if self.console {
            println!("{}", self.status_line());
        }
        self.print_status();
    }

    fn on_finish(&mut self, result: &SearchResult) {
        let outcome = match result.outcome {
            Outcome::Found => "found",
            Outcome::Exhausted => "exhausted",
        };
        info!(
            outcome,
            attempts = self.attempts,
            digits_generated = self.digits_generated,
            elapsed_secs = format_args!("{:.3}", self.elapsed().as_secs_f64()),
            "search finished"
        );
    }
}
