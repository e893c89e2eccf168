//! # Export — Output Artifacts and Run Summary
//!
//! Persists a [`SearchResult`] as three plain-text files with no header or
//! trailing newline:
//!
//! | file              | content                                   |
//! |-------------------|-------------------------------------------|
//! | `pi_digits.txt`   | the raw digits                            |
//! | `pi_replaced.txt` | the digits with '9' and '0' blanked       |
//! | `pi_colored.txt`  | same as `pi_replaced.txt` (color is never written) |
//!
//! ## All-or-Nothing Writes
//!
//! Each file is first written to a `.tmp` sibling. Only when all three
//! writes succeed are they renamed into place. If a rename fails, the files
//! already renamed are removed again along with the remaining staged ones,
//! so a failed run leaves no partial set behind.
//!
//! ## Summary
//!
//! An optional JSON summary records the outcome, configuration, timestamp and
//! a SHA-256 digest of each artifact so downstream tools can check them.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::search::{Outcome, SearchConfig, SearchResult};

pub const DIGITS_FILE: &str = "pi_digits.txt";
pub const REPLACED_FILE: &str = "pi_replaced.txt";
pub const COLORED_FILE: &str = "pi_colored.txt";

/// Paths of the three output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub digits: PathBuf,
    pub replaced: PathBuf,
    pub colored: PathBuf,
}

impl Artifacts {
    pub fn in_dir(dir: &Path) -> Self {
        Artifacts {
            digits: dir.join(DIGITS_FILE),
            replaced: dir.join(REPLACED_FILE),
            colored: dir.join(COLORED_FILE),
        }
    }

    pub fn paths(&self) -> [&Path; 3] {
        [&self.digits, &self.replaced, &self.colored]
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut p = path.as_os_str().to_os_string();
    p.push(".tmp");
    PathBuf::from(p)
}

/// Write all three artifacts for `result`, or none of them.
pub fn write_all(artifacts: &Artifacts, result: &SearchResult) -> Result<()> {
    let contents = [
        result.digits.as_str(),
        result.substituted.as_str(),
        result.substituted.as_str(),
    ];

    for path in artifacts.paths() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }

    let mut staged = Vec::with_capacity(3);
    for (path, content) in artifacts.paths().into_iter().zip(contents) {
        let tmp = tmp_path(path);
        if let Err(e) = fs::write(&tmp, content) {
            discard(&staged);
            let _ = fs::remove_file(&tmp);
            return Err(e).with_context(|| format!("writing {}", tmp.display()));
        }
        staged.push((tmp, path));
    }

    for (i, (tmp, path)) in staged.iter().enumerate() {
        if let Err(e) = fs::rename(tmp, path) {
            unpublish(&staged[..i]);
            discard(&staged[i..]);
            return Err(e)
                .with_context(|| format!("renaming {} to {}", tmp.display(), path.display()));
        }
    }

    info!(
        digits = result.digits_processed,
        dir = %artifacts.digits.parent().unwrap_or(Path::new(".")).display(),
        "artifacts written"
    );
    Ok(())
}

/// Remove artifacts already renamed into place by a write that later failed.
fn unpublish(published: &[(PathBuf, &Path)]) {
    for (_, path) in published {
        if let Err(e) = fs::remove_file(path) {
            warn!(path = %path.display(), error = %e, "could not roll back artifact");
        }
    }
}

fn discard(staged: &[(PathBuf, &Path)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp) {
            warn!(path = %tmp.display(), error = %e, "could not remove staged artifact");
        }
    }
}

/// SHA-256 hex digest of a string.
pub fn sha256_hex(data: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDigest {
    pub file: String,
    pub bytes: u64,
    pub sha256: String,
}

/// Machine-readable record of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub outcome: Outcome,
    pub config: SearchConfig,
    pub digits_processed: u64,
    pub position: Option<usize>,
    pub max_run: usize,
    pub attempts: u64,
    pub generated_at: DateTime<Utc>,
    pub artifacts: Vec<ArtifactDigest>,
}

impl Summary {
    pub fn new(config: &SearchConfig, result: &SearchResult, artifacts: &Artifacts) -> Self {
        let contents = [
            result.digits.as_str(),
            result.substituted.as_str(),
            result.substituted.as_str(),
        ];
        let digests = artifacts
            .paths()
            .into_iter()
            .zip(contents)
            .map(|(path, content)| ArtifactDigest {
                file: path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
                bytes: content.len() as u64,
                sha256: sha256_hex(content),
            })
            .collect();

        Summary {
            outcome: result.outcome,
            config: *config,
            digits_processed: result.digits_processed,
            position: result.position,
            max_run: result.max_run,
            attempts: result.attempts,
            generated_at: Utc::now(),
            artifacts: digests,
        }
    }
}

/// Write `summary` as pretty JSON, atomically via a `.tmp` file.
pub fn write_summary(path: &Path, summary: &Summary) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, &json).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("renaming to {}", path.display()))?;
    Ok(())
}

pub fn load_summary(path: &Path) -> Result<Summary> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let summary = serde_json::from_str(&json)
        .with_context(|| format!("parsing summary {}", path.display()))?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digits::DigitString;
    use crate::scan;

    fn sample_result() -> SearchResult {
        let digits = DigitString::from_digits("31415900009265").unwrap();
        let substituted = scan::substitute(&digits);
        SearchResult {
            outcome: Outcome::Found,
            digits_processed: 14,
            digits,
            substituted,
            position: Some(6),
            max_run: 4,
            attempts: 1,
            target_run: 4,
        }
    }

    #[test]
    fn writes_three_artifacts_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = Artifacts::in_dir(dir.path());
        write_all(&artifacts, &sample_result()).unwrap();

        assert_eq!(fs::read_to_string(&artifacts.digits).unwrap(), "31415900009265");
        assert_eq!(fs::read_to_string(&artifacts.replaced).unwrap(), "31415      265");
        assert_eq!(
            fs::read_to_string(&artifacts.colored).unwrap(),
            fs::read_to_string(&artifacts.replaced).unwrap()
        );
        for path in artifacts.paths() {
            assert!(!tmp_path(path).exists(), "staging file left behind");
        }
    }

    #[test]
    fn creates_missing_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let artifacts = Artifacts::in_dir(&nested);
        write_all(&artifacts, &sample_result()).unwrap();
        assert!(artifacts.digits.exists());
    }

    #[test]
    fn failed_write_leaves_no_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut artifacts = Artifacts::in_dir(dir.path());
        // A directory in place of the third staging file makes its write fail.
        artifacts.colored = dir.path().join("blocked");
        fs::create_dir(tmp_path(&artifacts.colored)).unwrap();

        assert!(write_all(&artifacts, &sample_result()).is_err());
        assert!(!artifacts.digits.exists());
        assert!(!artifacts.replaced.exists());
        assert!(!tmp_path(&artifacts.digits).exists());
        assert!(!tmp_path(&artifacts.replaced).exists());
    }

    #[test]
    fn failed_rename_rolls_back_published_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let mut artifacts = Artifacts::in_dir(dir.path());
        // Renaming a file over a non-empty directory fails.
        artifacts.replaced = dir.path().join("occupied");
        fs::create_dir(&artifacts.replaced).unwrap();
        fs::write(artifacts.replaced.join("keep"), "x").unwrap();

        assert!(write_all(&artifacts, &sample_result()).is_err());
        assert!(!artifacts.digits.exists(), "first artifact left published");
        assert!(!artifacts.colored.exists());
        for path in artifacts.paths() {
            assert!(!tmp_path(path).exists(), "staging file left behind");
        }
        assert!(artifacts.replaced.join("keep").exists());
    }

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn summary_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = Artifacts::in_dir(dir.path());
        let result = sample_result();
        let config = SearchConfig {
            target_run: 4,
            chunk_size: 14,
            max_digits: 14,
        };
        let summary = Summary::new(&config, &result, &artifacts);
        assert_eq!(summary.artifacts.len(), 3);
        assert_eq!(summary.artifacts[0].file, DIGITS_FILE);
        assert_eq!(summary.artifacts[0].bytes, 14);
        assert_eq!(summary.artifacts[1].sha256, summary.artifacts[2].sha256);

        let path = dir.path().join("summary.json");
        write_summary(&path, &summary).unwrap();
        let loaded = load_summary(&path).unwrap();
        assert_eq!(loaded, summary);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"outcome\": \"found\""));
    }
}
