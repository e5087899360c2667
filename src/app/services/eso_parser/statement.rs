//! File statement parsing
//!
//! The first line of an `.eso` file names the program, a build
//! description, and the generation timestamp, e.g.:
//!
//! ```text
//! Program Version,EnergyPlus, Version 8.9.0-40101eaafd, YMD=2020.05.14 14:22
//! ```
//!
//! The version code gates how many reserved preamble lines follow and
//! whether the Annual interval marker exists, so it must be extracted
//! before anything else is read.

use chrono::NaiveDateTime;

use crate::app::models::VersionInfo;
use crate::constants::{GENERATED_AT_FORMAT, VERSION_LITERAL_LEN};
use crate::{Error, Result};

/// Parse the statement line into version and generation timestamp
pub fn process_statement(line: &str) -> Result<VersionInfo> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 4 {
        return Err(Error::invalid_line_syntax(line));
    }

    let version = parse_version(fields[2]).ok_or_else(|| Error::invalid_line_syntax(line))?;
    let generated_at = parse_generated_at(fields[3])
        .ok_or_else(|| Error::invalid_line_syntax(line))?;

    Ok(VersionInfo {
        version,
        generated_at,
    })
}

/// Collapse a dotted version literal into an integer code
///
/// The field reads like `Version 8.9.0-40101eaafd`; the five
/// characters after the first space hold the dotted version, which
/// collapses to e.g. 890 by dropping the dots.
fn parse_version(raw_version: &str) -> Option<i32> {
    let version = raw_version.trim();
    let start = version.find(' ')? + 1;
    let end = (start + VERSION_LITERAL_LEN).min(version.len());
    let literal = version.get(start..end)?;
    literal.replace('.', "").parse::<i32>().ok()
}

/// Parse the `YMD=YYYY.MM.DD HH:MM` generation timestamp
fn parse_generated_at(raw_timestamp: &str) -> Option<NaiveDateTime> {
    let timestamp = raw_timestamp.split('=').nth(1)?.trim();
    NaiveDateTime::parse_from_str(timestamp, GENERATED_AT_FORMAT).ok()
}
