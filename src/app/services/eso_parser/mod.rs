//! Streaming parser for EnergyPlus `.eso` result files
//!
//! This module converts a raw `.eso` text stream into a structured,
//! per-environment result set. The file format interleaves interval
//! markers with result records and never tags a result with its
//! interval, so parsing is a strictly forward, single-pass state
//! machine keyed on each line's leading integer id.
//!
//! ## Architecture
//!
//! The parser is organized into logical components:
//! - [`parser`] - File driver composing the full parsing pipeline
//! - [`statement`] - Version and generation timestamp extraction
//! - [`header`] - Data dictionary parsing into a [`crate::HeaderTable`]
//! - [`body`] - Body state machine producing raw environments
//! - [`stats`] - Parsing statistics
//!
//! ## Usage
//!
//! ```no_run
//! use eso_processor::{EsoParser, ParseConfig, VariableFilter};
//! use eso_processor::app::services::progress::NoOpSink;
//!
//! # fn example() -> eso_processor::Result<()> {
//! let parser = EsoParser::new(ParseConfig::default());
//! let result = parser.parse_file(std::path::Path::new("results.eso"), NoOpSink)?;
//!
//! for environment in &result.environments {
//!     let ids = environment.find_ids(
//!         &VariableFilter::new().with_type_name("Site Outdoor Air*"),
//!     );
//!     println!("{}: {} matching series", environment.raw.name, ids.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod header;
pub mod parser;
pub mod statement;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::{EsoParser, ParseResult, ParsedEnvironment};
pub use stats::ParseStats;
