pub mod config;
pub mod digits;
pub mod error;
pub mod export;
pub mod progress;
pub mod render;
pub mod scan;
pub mod search;

pub use digits::{generate, DigitSource, DigitString, PiDigits};
pub use error::PiError;
pub use scan::{scan_for_run, substitute, ScanOutcome, SubstitutedString, BLANK};
pub use search::{search, Outcome, SearchConfig, SearchObserver, SearchResult};
