//! TOML run configuration.
//!
//! A run file has two optional tables:
//!
//! ```toml
//! [search]
//! target_run = 10
//! chunk_size = 5000
//! max_digits = 10000000
//!
//! [output]
//! dir = "out"
//! preview_chars = 500
//! ```
//!
//! Missing keys fall back to the built-in defaults. Command-line flags and
//! environment variables override anything set here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::render::PREVIEW_CHARS;
use crate::search::{SearchConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_DIGITS, DEFAULT_TARGET_RUN};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSection {
    pub target_run: Option<u64>,
    pub chunk_size: Option<u64>,
    pub max_digits: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
    pub preview_chars: Option<usize>,
}

/// Values supplied on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target_run: Option<u64>,
    pub chunk_size: Option<u64>,
    pub max_digits: Option<u64>,
    pub output_dir: Option<PathBuf>,
    pub preview_chars: Option<usize>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub search: SearchConfig,
    pub output_dir: PathBuf,
    pub preview_chars: usize,
}

impl RunConfig {
    pub fn parse(text: &str) -> Result<Self> {
        let config: RunConfig = toml::from_str(text).context("invalid run configuration")?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Layer `overrides` on top of this file, then the built-in defaults.
    pub fn resolve(&self, overrides: &Overrides) -> Settings {
        Settings {
            search: SearchConfig {
                target_run: overrides
                    .target_run
                    .or(self.search.target_run)
                    .unwrap_or(DEFAULT_TARGET_RUN),
                chunk_size: overrides
                    .chunk_size
                    .or(self.search.chunk_size)
                    .unwrap_or(DEFAULT_CHUNK_SIZE),
                max_digits: overrides
                    .max_digits
                    .or(self.search.max_digits)
                    .unwrap_or(DEFAULT_MAX_DIGITS),
            },
            output_dir: overrides
                .output_dir
                .clone()
                .or_else(|| self.output.dir.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            preview_chars: overrides
                .preview_chars
                .or(self.output.preview_chars)
                .unwrap_or(PREVIEW_CHARS),
        }
    }
}
