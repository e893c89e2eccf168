//! # Main — CLI Entry Point
//!
//! Parses flags, sets up logging, and hands off to [`cli::run`], which runs
//! the search over growing prefixes of π and writes the output files.
//!
//! ## Options
//!
//! - `--target-run` / `PISPAN_TARGET_RUN`: consecutive 9s/0s to look for (default 10).
//! - `--chunk-size` / `PISPAN_CHUNK_SIZE`: digits added per attempt (default 5000).
//! - `--max-digits` / `PISPAN_MAX_DIGITS`: ceiling on any attempt (default 10,000,000).
//! - `--output-dir`: where `pi_digits.txt`, `pi_replaced.txt` and `pi_colored.txt` go.
//! - `--config`: TOML run file; flags override it.
//! - `--summary`: also write a JSON summary with artifact checksums.
//! - `LOG_FORMAT=json`: JSON log lines instead of human-readable ones.

mod cli;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "pispan",
    version,
    about = "Search the digits of pi for runs of 9s and 0s"
)]
struct Cli {
    /// Number of consecutive 9s/0s that ends the search
    #[arg(long, env = "PISPAN_TARGET_RUN")]
    target_run: Option<u64>,

    /// Digits added to the prefix on each attempt
    #[arg(long, env = "PISPAN_CHUNK_SIZE")]
    chunk_size: Option<u64>,

    /// Largest prefix ever computed; the last attempt is the largest multiple of chunk-size below it
    #[arg(long, env = "PISPAN_MAX_DIGITS")]
    max_digits: Option<u64>,

    /// Directory for the three output files (default: current directory)
    #[arg(long, env = "PISPAN_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Characters shown in the colorized console preview (default 500)
    #[arg(long)]
    preview_chars: Option<usize>,

    /// TOML run configuration ([search] and [output] tables)
    #[arg(long, env = "PISPAN_CONFIG")]
    config: Option<PathBuf>,

    /// Also write a JSON summary (outcome, settings, artifact SHA-256) to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Print the preview without ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for log shippers, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::run(&cli)
}
