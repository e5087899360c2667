//! CLI command implementation
//!
//! Discovers `.eso` files from the input path and runs each through
//! the parser, printing a per-environment summary.

use std::path::{Path, PathBuf};

use colored::Colorize;
use walkdir::WalkDir;

use crate::app::services::progress::{NoOpSink, ProgressReporter};
use crate::cli::args::Args;
use crate::{EsoParser, Interval, ParseResult, Result};

/// Run the processor over every file the input path resolves to
pub fn run(args: &Args) -> Result<usize> {
    args.validate()?;

    let files = discover_files(&args.input_path)?;
    let parser = EsoParser::new(args.to_config());

    for file in &files {
        if !args.quiet {
            println!("{} {}", "Processing:".bright_yellow(), file.display());
        }

        let result = if args.show_progress() {
            parser.parse_file(file, ProgressReporter::new())?
        } else {
            parser.parse_file(file, NoOpSink)?
        };

        if !args.quiet {
            print_summary(&result);
        }
    }

    Ok(files.len())
}

/// Resolve the input path to a list of `.eso` files
///
/// A file path is taken as-is; a directory is scanned recursively.
fn discover_files(input_path: &Path) -> Result<Vec<PathBuf>> {
    if input_path.is_file() {
        return Ok(vec![input_path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(input_path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "eso"))
        .collect();
    files.sort();

    if files.is_empty() {
        return Err(crate::Error::configuration(format!(
            "No .eso files found under {}",
            input_path.display()
        )));
    }
    Ok(files)
}

/// Print a per-environment summary of a parse result
fn print_summary(result: &ParseResult) {
    println!(
        "{} EnergyPlus {} generated {}",
        "Parsed:".bright_green(),
        result.version.version,
        result.version.generated_at
    );

    if result.environments.is_empty() {
        println!("  (file declares no environments)");
        return;
    }

    for environment in &result.environments {
        let raw = &environment.raw;
        let kind = if raw.is_sizing_environment() {
            "sizing"
        } else {
            "run period"
        };
        println!("  {} ({})", raw.name.bright_white().bold(), kind);

        for interval in Interval::ALL {
            let Some(series) = raw.outputs.get(&interval) else {
                continue;
            };
            println!(
                "    {:<10} {:>8} steps, {:>5} variables",
                interval.tag(),
                raw.step_count(interval),
                series.len()
            );
        }
    }

    let stats = &result.stats;
    println!(
        "  {} {} results stored, {} unknown ids dropped, {} duplicates pruned",
        "Stats:".bright_cyan(),
        stats.result_records,
        stats.unknown_result_ids,
        stats.duplicate_variables
    );
}
