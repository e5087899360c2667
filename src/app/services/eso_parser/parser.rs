//! File driver composing the parsing pipeline
//!
//! This module wires the components together: pre-scan the file to
//! size the progress bar, consume the preamble, run the header and
//! body parsers, then build a search index and prune duplicate
//! variables for every environment.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use super::body::BodyParser;
use super::header::read_header;
use super::statement::process_statement;
use super::stats::ParseStats;
use crate::app::models::{RawEnvironment, VersionInfo};
use crate::app::services::line_source::LineSource;
use crate::app::services::progress::ProgressSink;
use crate::app::services::search_index::{SearchIndex, VariableFilter};
use crate::config::ParseConfig;
use crate::{Error, Result};

/// Streaming parser for EnergyPlus `.eso` result files
#[derive(Debug, Clone, Default)]
pub struct EsoParser {
    config: ParseConfig,
}

/// One environment with its variable search index
#[derive(Debug, Clone)]
pub struct ParsedEnvironment {
    /// The environment's timestamps, series, and header
    pub raw: RawEnvironment,

    /// Index over the (pruned) header for variable lookups
    pub index: SearchIndex,
}

impl ParsedEnvironment {
    /// Find variable ids matching a filter, wildcards included
    pub fn find_ids(&self, filter: &VariableFilter) -> Vec<u32> {
        self.index.find_ids(filter)
    }
}

/// The complete result of parsing one file
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Version and generation timestamp from the statement line
    pub version: VersionInfo,

    /// Calendar base year forwarded for downstream date processing
    pub year: Option<i32>,

    /// Environments in file order
    pub environments: Vec<ParsedEnvironment>,

    /// Counters collected during the parse
    pub stats: ParseStats,
}

impl EsoParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParseConfig) -> Self {
        Self { config }
    }

    /// Parse an `.eso` file from disk
    ///
    /// The file is scanned once up front to count lines (sizing the
    /// progress maximum and the series pre-allocation), then streamed
    /// through the parsing pipeline. The handle is released on every
    /// exit path; no partial results survive a fatal error.
    pub fn parse_file<S: ProgressSink>(&self, path: &Path, sink: S) -> Result<ParseResult> {
        let line_count = count_lines(path)?;
        debug!("{}: {} lines", path.display(), line_count);

        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        self.parse_reader(BufReader::new(file), line_count, sink)
    }

    /// Parse an `.eso` stream with a known total line count
    pub fn parse_reader<R: BufRead, S: ProgressSink>(
        &self,
        reader: R,
        line_count: u64,
        mut sink: S,
    ) -> Result<ParseResult> {
        sink.set_maximum(line_count.div_ceil(self.config.chunk_size));
        let mut source = LineSource::new(reader, sink, self.config.chunk_size);
        let mut stats = ParseStats {
            total_lines: line_count,
            ..ParseStats::default()
        };

        source.sink_mut().log_section("processing statement");
        let version = self.process_preamble(&mut source)?;

        source.sink_mut().log_section("reading data dictionary");
        let header = read_header(&mut source)?;

        source.sink_mut().log_section("reading file body");
        let series_capacity =
            (line_count as usize).div_ceil(header.variable_count().max(1));
        let body_parser = BodyParser::new(
            &header,
            version.highest_interval_id(),
            self.config.ignore_peaks,
            series_capacity,
        );
        let raw_environments = body_parser.read_body(&mut source, &mut stats)?;
        source.finish();

        source.sink_mut().log_section("generating search index");
        let environments = index_environments(raw_environments, &mut stats);

        info!(
            "parsed {} environments, {} results ({} unknown ids dropped, {} duplicates pruned)",
            stats.environment_count,
            stats.result_records,
            stats.unknown_result_ids,
            stats.duplicate_variables
        );

        Ok(ParseResult {
            version,
            year: self.config.year,
            environments,
            stats,
        })
    }

    /// Parse the statement line and skip the reserved preamble lines
    fn process_preamble<R: BufRead, S: ProgressSink>(
        &self,
        source: &mut LineSource<R, S>,
    ) -> Result<VersionInfo> {
        let Some(statement) = source.next_line()? else {
            return Err(Error::incomplete_file("statement"));
        };
        let version = process_statement(statement)?;

        // One reserved line per standard reporting item (5, or 6 from
        // E+ 8.9 when the Annual item exists)
        for _ in 0..version.highest_interval_id() {
            if source.next_line()?.is_none() {
                return Err(Error::incomplete_file("preamble"));
            }
        }
        Ok(version)
    }
}

/// Build a search index for every environment and prune duplicates
///
/// Each environment indexes its own header clone: the first id of a
/// duplicated `(interval, key, type, units)` tuple stays in the index,
/// the rest are deleted from the header and every series.
fn index_environments(
    raw_environments: Vec<RawEnvironment>,
    stats: &mut ParseStats,
) -> Vec<ParsedEnvironment> {
    let mut environments = Vec::with_capacity(raw_environments.len());
    for mut raw in raw_environments {
        let (index, duplicates) = SearchIndex::from_header(&raw.header);
        if !duplicates.is_empty() {
            info!(
                "environment '{}': pruning {} duplicate variables",
                raw.name,
                duplicates.len()
            );
            stats.duplicate_variables += raw.remove_duplicates(&duplicates);
        }
        environments.push(ParsedEnvironment { raw, index });
    }
    environments
}

/// Count the lines of a file without retaining its contents
fn count_lines(path: &Path) -> Result<u64> {
    let file = File::open(path)
        .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
    let mut reader = BufReader::new(file);
    let mut count: u64 = 0;
    let mut ends_with_newline = true;
    loop {
        let buffer = reader.fill_buf()?;
        if buffer.is_empty() {
            break;
        }
        count += buffer.iter().filter(|&&byte| byte == b'\n').count() as u64;
        ends_with_newline = buffer.last() == Some(&b'\n');
        let consumed = buffer.len();
        reader.consume(consumed);
    }
    // A trailing line without a terminator still counts
    if !ends_with_newline {
        count += 1;
    }
    Ok(count)
}
