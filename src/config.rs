//! Parser configuration.
//!
//! Provides the configuration structure controlling peak collection,
//! the calendar base year forwarded to downstream date processing,
//! and progress reporting granularity.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CHUNK_SIZE;

/// Configuration for a single `.eso` file parse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    /// Discard peak coordinate records from Daily+ result lines
    ///
    /// When true (the default), result records keep only their leading
    /// value and no peak series are allocated.
    pub ignore_peaks: bool,

    /// Calendar base year forwarded to the downstream date pass
    ///
    /// The parser itself keeps timestamps un-yearified; this value is
    /// carried on the parse result for callers that convert raw
    /// interval stamps into absolute dates.
    pub year: Option<i32>,

    /// Number of lines between progress ticks
    pub chunk_size: u64,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            ignore_peaks: true,
            year: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ParseConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable collection of peak coordinate records
    pub fn with_peaks(mut self) -> Self {
        self.ignore_peaks = false;
        self
    }

    /// Set the calendar base year forwarded to downstream processing
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Set the number of lines between progress ticks
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParseConfig::default();
        assert!(config.ignore_peaks);
        assert_eq!(config.year, None);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_builder_methods() {
        let config = ParseConfig::new().with_peaks().with_year(2020).with_chunk_size(500);
        assert!(!config.ignore_peaks);
        assert_eq!(config.year, Some(2020));
        assert_eq!(config.chunk_size, 500);
    }

    #[test]
    fn test_chunk_size_floor() {
        // A zero chunk size would tick on every line counter value
        let config = ParseConfig::new().with_chunk_size(0);
        assert_eq!(config.chunk_size, 1);
    }
}
