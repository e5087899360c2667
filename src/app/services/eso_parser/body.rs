//! Body state machine
//!
//! The data section interleaves three kinds of comma-separated
//! records, distinguished only by their leading integer id: id 1 opens
//! a new environment, ids 2 through the version-dependent highest
//! interval id are interval markers, and larger ids are result records
//! bound to whichever interval marker appeared last. Result lines are
//! split on commas directly; the dictionary regex never runs here.

use std::io::BufRead;

use tracing::{debug, warn};

use super::stats::ParseStats;
use crate::app::models::{HeaderTable, Interval, IntervalStamp, PeakRecord, RawEnvironment};
use crate::app::services::line_source::LineSource;
use crate::app::services::progress::ProgressSink;
use crate::constants::{line_ids, END_OF_DATA};
use crate::{Error, Result};

/// Parser for the data section of an `.eso` file
///
/// Holds the file header and the dispatch parameters; each call to
/// [`read_body`](Self::read_body) consumes the stream from the end of
/// the dictionary to the `End of Data` sentinel and returns the
/// environments in file order.
#[derive(Debug)]
pub struct BodyParser<'a> {
    header: &'a HeaderTable,
    highest_interval_id: u32,
    ignore_peaks: bool,
    series_capacity: usize,
}

/// An interval marker resolved from its line id and fields
struct IntervalMarker {
    interval: Interval,
    stamp: IntervalStamp,
    extra: MarkerExtra,
}

/// The non-stamp payload of an interval marker
enum MarkerExtra {
    /// Day type of a TimeStep/Hourly/Daily marker
    DayOfWeek(String),

    /// Cumulative day count of a Monthly/RunPeriod marker; Annual
    /// markers carry none
    CumulativeDays(Option<u32>),
}

impl<'a> BodyParser<'a> {
    /// Create a body parser for a parsed header
    ///
    /// `series_capacity` is the pre-size estimate for every dense
    /// series, typically `line_count / variable_count`.
    pub fn new(
        header: &'a HeaderTable,
        highest_interval_id: u32,
        ignore_peaks: bool,
        series_capacity: usize,
    ) -> Self {
        Self {
            header,
            highest_interval_id,
            ignore_peaks,
            series_capacity,
        }
    }

    /// Read the data section into a list of raw environments
    pub fn read_body<R: BufRead, S: ProgressSink>(
        &self,
        source: &mut LineSource<R, S>,
        stats: &mut ParseStats,
    ) -> Result<Vec<RawEnvironment>> {
        let mut environments: Vec<RawEnvironment> = Vec::new();
        let mut current_interval: Option<Interval> = None;

        loop {
            let line_number = source.line_counter() + 1;
            let Some(line) = source.next_line()? else {
                return Err(Error::incomplete_file("file body"));
            };

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let line_id = match fields[0].parse::<u32>() {
                Ok(id) => id,
                Err(_) => {
                    if line.contains(END_OF_DATA) {
                        break;
                    }
                    if line.is_empty() {
                        return Err(Error::blank_line(line_number));
                    }
                    return Err(Error::invalid_line_syntax(line));
                }
            };
            let rest = &fields[1..];

            if line_id == line_ids::ENVIRONMENT {
                let Some(name) = rest.first() else {
                    return Err(Error::invalid_line_syntax(line));
                };
                debug!("environment '{}' opened at line {}", name, line_number);
                environments.push(RawEnvironment::new(
                    *name,
                    self.header.clone(),
                    self.ignore_peaks,
                    self.series_capacity,
                ));
                current_interval = None;
                stats.environment_count += 1;
            } else if line_id <= self.highest_interval_id {
                let Some(environment) = environments.last_mut() else {
                    return Err(Error::invalid_line_syntax(line));
                };
                let marker = process_interval_line(line_id, rest)
                    .ok_or_else(|| Error::invalid_line_syntax(line))?;
                current_interval = Some(marker.interval);
                stats.interval_records += 1;

                // Markers for intervals with no declared variables are
                // skipped; the current-interval pointer still advances
                if environment.has_interval(marker.interval) {
                    environment.begin_step(marker.interval, marker.stamp);
                    match marker.extra {
                        MarkerExtra::DayOfWeek(day) => {
                            environment.push_day_of_week(marker.interval, day);
                        }
                        MarkerExtra::CumulativeDays(days) => {
                            environment.push_cumulative_days(marker.interval, days);
                        }
                    }
                }
            } else {
                let Some(interval) = current_interval else {
                    return Err(Error::invalid_line_syntax(line));
                };
                let Some(environment) = environments.last_mut() else {
                    return Err(Error::invalid_line_syntax(line));
                };
                let Some(raw_value) = rest.first() else {
                    return Err(Error::invalid_line_syntax(line));
                };
                let value: f64 = raw_value
                    .parse()
                    .map_err(|_| Error::invalid_line_syntax(line))?;

                if environment.store_result(interval, line_id, value) {
                    stats.result_records += 1;
                    if !self.ignore_peaks && interval.has_peaks() && rest.len() > 1 {
                        let peak = PeakRecord::from_fields(interval, &rest[1..])
                            .ok_or_else(|| Error::invalid_line_syntax(line))?;
                        environment.store_peak(interval, line_id, peak);
                    }
                } else {
                    stats.unknown_result_ids += 1;
                    warn!(
                        "ignoring result for id {} not declared at the {} interval",
                        line_id, interval
                    );
                }
            }
        }

        debug!(
            "file body read: {} environments, {} interval markers, {} results",
            environments.len(),
            stats.interval_records,
            stats.result_records
        );
        Ok(environments)
    }
}

/// Resolve an interval marker from its line id and trimmed fields
///
/// Returns `None` when a required numeric field fails to parse or a
/// field is missing; the caller reports the raw line.
fn process_interval_line(line_id: u32, rest: &[&str]) -> Option<IntervalMarker> {
    fn num(field: &str) -> Option<f64> {
        field.parse::<f64>().ok()
    }
    fn int(field: &str) -> Option<u32> {
        num(field).map(|value| value as u32)
    }
    // End minutes may carry spurious fractional parts (e.g. 59.999999)
    fn round_half_up(value: f64) -> u32 {
        (value + 0.5).floor() as u32
    }

    match line_id {
        line_ids::TIMESTEP_OR_HOURLY => {
            // [day of sim, month, day of month, DST, hour, start minute,
            //  end minute, day type]
            let month = int(rest.get(1)?)?;
            let day = int(rest.get(2)?)?;
            let hour = int(rest.get(4)?)?;
            let start_minute = int(rest.get(5)?)?;
            let end_minute = round_half_up(num(rest.get(6)?)?);
            let day_type = (*rest.last()?).to_string();

            let interval = if start_minute == 0 && end_minute == 60 {
                Interval::Hourly
            } else {
                Interval::TimeStep
            };
            Some(IntervalMarker {
                interval,
                stamp: IntervalStamp::new(month, day, hour, end_minute),
                extra: MarkerExtra::DayOfWeek(day_type),
            })
        }
        line_ids::DAILY => {
            // [cumulative day, month, day of month, DST, day type]
            let month = int(rest.get(1)?)?;
            let day = int(rest.get(2)?)?;
            let day_type = (*rest.last()?).to_string();
            Some(IntervalMarker {
                interval: Interval::Daily,
                stamp: IntervalStamp::new(month, day, 0, 0),
                extra: MarkerExtra::DayOfWeek(day_type),
            })
        }
        line_ids::MONTHLY => {
            // [cumulative day, month]
            let cumulative = int(rest.first()?)?;
            let month = int(rest.get(1)?)?;
            Some(IntervalMarker {
                interval: Interval::Monthly,
                stamp: IntervalStamp::new(month, 1, 0, 0),
                extra: MarkerExtra::CumulativeDays(Some(cumulative)),
            })
        }
        line_ids::RUN_PERIOD => {
            // [cumulative day]
            let cumulative = int(rest.first()?)?;
            Some(IntervalMarker {
                interval: Interval::RunPeriod,
                stamp: IntervalStamp::new(1, 1, 0, 0),
                extra: MarkerExtra::CumulativeDays(Some(cumulative)),
            })
        }
        line_ids::ANNUAL => {
            // [year]; the cumulative count is unknown for annual periods
            Some(IntervalMarker {
                interval: Interval::Annual,
                stamp: IntervalStamp::new(1, 1, 0, 0),
                extra: MarkerExtra::CumulativeDays(None),
            })
        }
        _ => None,
    }
}
