//! Command-line argument definitions for the ESO processor
//!
//! This module defines the CLI interface using the clap derive API.

use std::path::PathBuf;

use clap::Parser;

use crate::constants::DEFAULT_CHUNK_SIZE;
use crate::{Error, ParseConfig, Result};

/// CLI arguments for the ESO result file processor
///
/// Reads EnergyPlus `.eso` simulation output files and reports their
/// environments, reporting intervals, and variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "eso-processor",
    version,
    about = "Read EnergyPlus .eso result files into per-environment result sets",
    long_about = "Streams EnergyPlus .eso simulation output files through a single-pass \
                  parser, producing per-environment result sets: interval timestamps, \
                  dense per-variable series, optional peak coordinate records, and a \
                  searchable variable index."
)]
pub struct Args {
    /// Input `.eso` file, or a directory scanned for `.eso` files
    #[arg(value_name = "PATH", help = "Path to an .eso file or a directory")]
    pub input_path: PathBuf,

    /// Collect peak coordinate records from Daily+ result lines
    ///
    /// Peaks are discarded by default; enabling them roughly doubles
    /// the memory held per Daily+ variable.
    #[arg(long = "peaks", help = "Collect peak coordinate records")]
    pub peaks: bool,

    /// Calendar base year forwarded to downstream date processing
    #[arg(
        short = 'y',
        long = "year",
        value_name = "YEAR",
        help = "Calendar base year for downstream date conversion"
    )]
    pub year: Option<i32>,

    /// Number of lines between progress ticks
    #[arg(
        long = "chunk-size",
        value_name = "LINES",
        default_value_t = DEFAULT_CHUNK_SIZE,
        help = "Number of lines between progress updates"
    )]
    pub chunk_size: u64,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings and disables the
    /// progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

impl Args {
    /// Validate the command line arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "Input path does not exist: {}",
                self.input_path.display()
            )));
        }

        if self.chunk_size == 0 {
            return Err(Error::configuration(
                "Chunk size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the parser configuration from the arguments
    pub fn to_config(&self) -> ParseConfig {
        let mut config = ParseConfig::new().with_chunk_size(self.chunk_size);
        if self.peaks {
            config = config.with_peaks();
        }
        if let Some(year) = self.year {
            config = config.with_year(year);
        }
        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}
