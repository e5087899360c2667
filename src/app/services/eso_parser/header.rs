//! Data dictionary parsing
//!
//! The dictionary declares every reported variable as a single line:
//!
//! ```text
//! 7,1,Environment,Site Outdoor Air Drybulb Temperature [C] !TimeStep
//! ```
//!
//! Meter variables omit the key field and carry one fewer
//! comma-separated component; "Each Call" variables report inline with
//! the TimeStep interval and are folded into its bin with a type
//! prefix so duplicate detection can tell them apart.

use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::app::models::{HeaderTable, Interval, Variable};
use crate::app::services::line_source::LineSource;
use crate::app::services::progress::ProgressSink;
use crate::constants::{
    interval_tags, CUMULATIVE_METER_KEY, END_OF_DATA_DICTIONARY, METER_KEY, SYSTEM_TYPE_PREFIX,
};
use crate::{Error, Result};

/// Dictionary line grammar
///
/// Captures: id, report count (unused), key, optional type, units,
/// interval tag. The type branch hinges on whether a comma precedes
/// the opening bracket; meter lines have none.
static DICTIONARY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+),(\d+),(.*?)(?:,(.*?) ?\[| ?\[)(.*?)\] !(\w*(?: \w+)?).*$")
        .expect("dictionary line pattern is valid")
});

/// Read the data dictionary section into a header table
///
/// Consumes lines until the `End of Data Dictionary` sentinel. Stream
/// exhaustion before the sentinel is an incomplete file; a blank line
/// or a line failing the grammar is fatal.
pub fn read_header<R: BufRead, S: ProgressSink>(
    source: &mut LineSource<R, S>,
) -> Result<HeaderTable> {
    let mut header = HeaderTable::new();

    loop {
        let line_number = source.line_counter() + 1;
        let Some(line) = source.next_line()? else {
            return Err(Error::incomplete_file("data dictionary"));
        };

        match process_header_line(line) {
            Some((id, variable)) => {
                header.insert(id, variable);
            }
            None => {
                if line.contains(END_OF_DATA_DICTIONARY) {
                    break;
                }
                if line.is_empty() {
                    return Err(Error::blank_line(line_number));
                }
                return Err(Error::invalid_line_syntax(line));
            }
        }
    }

    debug!(
        "data dictionary read: {} variables across {} intervals",
        header.variable_count(),
        header.intervals().count()
    );
    Ok(header)
}

/// Parse a single dictionary line into an id and variable
///
/// Returns `None` when the line does not match the grammar; the caller
/// inspects it for the section sentinel before failing.
fn process_header_line(line: &str) -> Option<(u32, Variable)> {
    let captures = DICTIONARY_LINE.captures(line)?;

    let id = captures.get(1)?.as_str().parse::<u32>().ok()?;
    let raw_key = captures.get(3)?.as_str();
    let units = captures.get(5)?.as_str().to_string();
    let tag = captures.get(6)?.as_str();

    // Meter lines have no type component; the key slides into the type
    // position and the key is rewritten to the meter marker
    let (key, mut type_name) = match captures.get(4) {
        Some(type_name) => (raw_key.to_string(), type_name.as_str().to_string()),
        None => {
            let key = if raw_key.contains("Cumulative") {
                CUMULATIVE_METER_KEY
            } else {
                METER_KEY
            };
            (key.to_string(), raw_key.to_string())
        }
    };

    let interval = if tag.eq_ignore_ascii_case(interval_tags::EACH_CALL) {
        // "Each Call" reports inline with TimeStep; the prefix keeps it
        // distinguishable from the plain TimeStep variable
        type_name = format!("{}{}", SYSTEM_TYPE_PREFIX, type_name);
        Interval::TimeStep
    } else {
        Interval::from_tag(tag)?
    };

    Some((id, Variable::new(interval, key, type_name, units)))
}
