//! # CLI Execution
//!
//! Kept out of `main.rs` so the entry point stays slim. Resolves settings,
//! runs the search, writes the artifacts, and prints the console report.
//! Every fatal error returns before any artifact is written.

use anyhow::{Context, Result};
use pispan::config::{Overrides, RunConfig, Settings};
use pispan::export::{self, Artifacts, Summary};
use pispan::progress::Progress;
use pispan::render;
use pispan::search::{self, SearchResult};
use pispan::PiDigits;
use tracing::info;

use super::Cli;

const RULE: &str = "============================================================";

fn settings_for(cli: &Cli) -> Result<Settings> {
    let file = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    let settings = file.resolve(&Overrides {
        target_run: cli.target_run,
        chunk_size: cli.chunk_size,
        max_digits: cli.max_digits,
        output_dir: cli.output_dir.clone(),
        preview_chars: cli.preview_chars,
    });
    settings.search.validate()?;
    Ok(settings)
}

pub fn run(cli: &Cli) -> Result<()> {
    let settings = settings_for(cli)?;
    let config = settings.search;

    println!("{}", RULE);
    println!(
        "PI DIGITS PROCESSOR - SEARCH FOR {} CONSECUTIVE SPACES",
        config.target_run
    );
    println!("{}\n", RULE);
    println!(
        "Searching for {} consecutive spaces (9s or 0s) in chunks of {} digits, up to {} digits",
        config.target_run, config.chunk_size, config.max_digits
    );

    let mut progress = Progress::with_console();
    let result = search::search(&config, &PiDigits, &mut progress)
        .context("pi digit search failed")?;

    print_outcome(&result, config.max_digits);

    let artifacts = Artifacts::in_dir(&settings.output_dir);
    export::write_all(&artifacts, &result)?;
    println!(
        "\nStep 1: Saved {} digits of PI to {}",
        result.digits_processed,
        artifacts.digits.display()
    );
    println!("Step 2: Saved replaced text to {}", artifacts.replaced.display());
    println!("\nStep 3: Colorizing and saving...");
    println!(
        "\nColorized display (first {} characters):",
        settings.preview_chars
    );
    println!(
        "{}",
        render::colored_preview(
            result.substituted.as_str(),
            settings.preview_chars,
            !cli.no_color
        )
    );
    println!(
        "\nSaved colored digits (with spaces) to {}",
        artifacts.colored.display()
    );

    if let Some(path) = &cli.summary {
        let summary = Summary::new(&config, &result, &artifacts);
        export::write_summary(path, &summary)?;
        info!(path = %path.display(), "summary written");
    }

    println!("\n{}", RULE);
    println!("Processing complete!");
    println!("{}", RULE);
    println!("\nFiles created:");
    println!(
        "- {} (original {} PI digits)",
        artifacts.digits.display(),
        result.digits_processed
    );
    println!(
        "- {} (with 9 and 0 replaced by spaces)",
        artifacts.replaced.display()
    );
    println!(
        "- {} (colored digits with spaces)",
        artifacts.colored.display()
    );
    if let Some(position) = result.position {
        println!(
            "\n* {} consecutive spaces found at position {}!",
            result.target_run, position
        );
    }
    Ok(())
}

fn print_outcome(result: &SearchResult, max_digits: u64) {
    match result.position {
        Some(position) => {
            println!(
                "\nFound {}+ consecutive spaces at position {}!",
                result.target_run, position
            );
            println!("  Total digits processed: {}", result.digits_processed);
        }
        None => {
            println!(
                "\nDid not find {} consecutive spaces in first {} digits",
                result.target_run, max_digits
            );
            println!("  Last attempt: {} digits", result.digits_processed);
        }
    }
    println!("  Maximum consecutive spaces found: {}", result.max_run);
}
