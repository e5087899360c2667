//! Parsing statistics for ESO processing
//!
//! This module provides counters for tracking what a parse run
//! encountered, useful for logging and for callers deciding whether a
//! file looked healthy.

use serde::{Deserialize, Serialize};

/// Counters collected across a single file parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of lines in the file (from the pre-scan)
    pub total_lines: u64,

    /// Number of environments found in the body
    pub environment_count: usize,

    /// Number of interval marker lines processed
    pub interval_records: usize,

    /// Number of result records stored into series
    pub result_records: usize,

    /// Result records dropped because their id was not declared for
    /// the current interval
    pub unknown_result_ids: usize,

    /// Duplicate variables pruned across all environments
    pub duplicate_variables: usize,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether any records had to be dropped or pruned
    pub fn is_clean(&self) -> bool {
        self.unknown_result_ids == 0 && self.duplicate_variables == 0
    }
}
