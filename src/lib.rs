//! ESO Processor Library
//!
//! A Rust library for reading EnergyPlus `.eso` simulation result files
//! into structured, per-environment result sets.
//!
//! This library provides tools for:
//! - Streaming `.eso` files line by line with progress reporting
//! - Parsing the data dictionary into a per-interval variable header
//! - Driving the body state machine that interleaves interval markers
//!   and result records across one or more environments
//! - Materialising dense per-variable series with explicit missing values
//! - Collecting optional peak coordinate records for Daily+ intervals
//! - Building a search index for variable lookups with wildcard support
//! - Comprehensive error handling for malformed or truncated files

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod eso_parser;
        pub mod line_source;
        pub mod progress;
        pub mod search_index;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{HeaderTable, Interval, IntervalStamp, RawEnvironment, Variable, VersionInfo};
pub use app::services::eso_parser::{EsoParser, ParseResult};
pub use app::services::search_index::{SearchIndex, VariableFilter};
pub use config::ParseConfig;

/// Result type alias for the ESO processor
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error types for ESO processing operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A syntactically malformed line in the header or body
    #[error("Invalid line syntax: '{line}'")]
    InvalidLineSyntax { line: String },

    /// A blank line inside the data dictionary or body
    #[error("Blank line at line {line_number}")]
    BlankLine { line_number: u64 },

    /// Stream exhausted before the expected sentinel
    #[error("Incomplete file: stream ended while reading {section}")]
    IncompleteFile { section: String },

    /// Processing cancelled through the progress sink
    #[error("Processing cancelled at line {line_number}")]
    Cancelled { line_number: u64 },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an invalid line syntax error carrying the offending raw line
    pub fn invalid_line_syntax(line: impl Into<String>) -> Self {
        Self::InvalidLineSyntax { line: line.into() }
    }

    /// Create a blank line error
    pub fn blank_line(line_number: u64) -> Self {
        Self::BlankLine { line_number }
    }

    /// Create an incomplete file error naming the section being read
    pub fn incomplete_file(section: impl Into<String>) -> Self {
        Self::IncompleteFile {
            section: section.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled(line_number: u64) -> Self {
        Self::Cancelled { line_number }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}
