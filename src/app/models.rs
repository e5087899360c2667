//! Data models for ESO processing
//!
//! This module contains the core data structures for representing an
//! EnergyPlus result file: the reporting intervals, the data dictionary
//! (header), raw interval timestamps, peak coordinate records, and the
//! per-environment result bins populated while reading the file body.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{interval_tags, line_ids, ANNUAL_MARKER_VERSION};

// =============================================================================
// Reporting Intervals
// =============================================================================

/// Reporting cadence of an EnergyPlus output variable
///
/// A single environment reports at up to six cadences. TimeStep and
/// Hourly share a marker line id in the file and are discriminated by
/// their minute fields; the remaining intervals each have a dedicated
/// marker id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Interval {
    TimeStep,
    Hourly,
    Daily,
    Monthly,
    RunPeriod,
    Annual,
}

impl Interval {
    /// All intervals in canonical order
    pub const ALL: [Interval; 6] = [
        Interval::TimeStep,
        Interval::Hourly,
        Interval::Daily,
        Interval::Monthly,
        Interval::RunPeriod,
        Interval::Annual,
    ];

    /// Canonical lower-cased tag as stored in the header
    pub fn tag(self) -> &'static str {
        match self {
            Interval::TimeStep => interval_tags::TIMESTEP,
            Interval::Hourly => interval_tags::HOURLY,
            Interval::Daily => interval_tags::DAILY,
            Interval::Monthly => interval_tags::MONTHLY,
            Interval::RunPeriod => interval_tags::RUN_PERIOD,
            Interval::Annual => interval_tags::ANNUAL,
        }
    }

    /// Resolve a dictionary interval tag (case-insensitive)
    ///
    /// Only the six canonical tags resolve here; the "Each Call" tag is
    /// rewritten by the header parser before lookup.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_lowercase().as_str() {
            interval_tags::TIMESTEP => Some(Interval::TimeStep),
            interval_tags::HOURLY => Some(Interval::Hourly),
            interval_tags::DAILY => Some(Interval::Daily),
            interval_tags::MONTHLY => Some(Interval::Monthly),
            interval_tags::RUN_PERIOD => Some(Interval::RunPeriod),
            interval_tags::ANNUAL => Some(Interval::Annual),
            _ => None,
        }
    }

    /// Resolve an unambiguous body marker line id
    ///
    /// Id 2 is not resolved here: it means TimeStep or Hourly depending
    /// on the minute fields of the marker itself.
    pub fn from_marker_id(line_id: u32) -> Option<Self> {
        match line_id {
            line_ids::DAILY => Some(Interval::Daily),
            line_ids::MONTHLY => Some(Interval::Monthly),
            line_ids::RUN_PERIOD => Some(Interval::RunPeriod),
            line_ids::ANNUAL => Some(Interval::Annual),
            _ => None,
        }
    }

    /// Intervals whose markers carry a day-of-week field
    pub fn has_day_of_week(self) -> bool {
        matches!(self, Interval::TimeStep | Interval::Hourly | Interval::Daily)
    }

    /// Intervals whose markers carry a cumulative day count
    pub fn has_cumulative_days(self) -> bool {
        matches!(self, Interval::Monthly | Interval::Annual | Interval::RunPeriod)
    }

    /// Intervals whose result records may carry peak coordinates
    pub fn has_peaks(self) -> bool {
        matches!(
            self,
            Interval::Daily | Interval::Monthly | Interval::Annual | Interval::RunPeriod
        )
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

// =============================================================================
// File Preamble
// =============================================================================

/// Version and generation timestamp from the file statement line
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Version code collapsed to an integer (e.g. 860, 890)
    pub version: i32,

    /// Date and minute at which EnergyPlus generated the file
    pub generated_at: NaiveDateTime,
}

impl VersionInfo {
    /// Highest body line id that marks an interval
    ///
    /// E+ 8.9 introduced the Annual marker as a sixth standard item;
    /// older files top out at the RunPeriod marker.
    pub fn highest_interval_id(&self) -> u32 {
        if self.version >= ANNUAL_MARKER_VERSION {
            line_ids::ANNUAL
        } else {
            line_ids::RUN_PERIOD
        }
    }
}

// =============================================================================
// Data Dictionary
// =============================================================================

/// One reported output variable from the data dictionary
///
/// The `(interval, key, type_name, units)` tuple identifies a variable
/// for duplicate detection and search purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Variable {
    /// Reporting interval the variable belongs to
    pub interval: Interval,

    /// Key name, typically a zone, surface, or environment identifier
    pub key: String,

    /// Variable type name (e.g. "Site Outdoor Air Drybulb Temperature")
    pub type_name: String,

    /// Units string as declared in the dictionary (e.g. "C", "J")
    pub units: String,
}

impl Variable {
    pub fn new(
        interval: Interval,
        key: impl Into<String>,
        type_name: impl Into<String>,
        units: impl Into<String>,
    ) -> Self {
        Self {
            interval,
            key: key.into(),
            type_name: type_name.into(),
            units: units.into(),
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} [{}]",
            self.interval, self.key, self.type_name, self.units
        )
    }
}

/// The data dictionary of an ESO file, indexed by interval then id
///
/// Variable ids are unique across the whole file; each id belongs to
/// exactly one interval. Within an interval, variables iterate in
/// ascending id order, which matches the order they were declared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderTable {
    variables: BTreeMap<Interval, BTreeMap<u32, Variable>>,
}

impl HeaderTable {
    /// Create an empty header table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a variable under its interval
    pub fn insert(&mut self, id: u32, variable: Variable) {
        self.variables
            .entry(variable.interval)
            .or_default()
            .insert(id, variable);
    }

    /// Intervals present in the header, in canonical order
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.variables.keys().copied()
    }

    /// Check whether any variable reports at the given interval
    pub fn has_interval(&self, interval: Interval) -> bool {
        self.variables.contains_key(&interval)
    }

    /// All variables declared for an interval
    pub fn variables(&self, interval: Interval) -> Option<&BTreeMap<u32, Variable>> {
        self.variables.get(&interval)
    }

    /// Look up a single variable
    pub fn get(&self, interval: Interval, id: u32) -> Option<&Variable> {
        self.variables.get(&interval).and_then(|m| m.get(&id))
    }

    /// Remove a variable, returning it if present
    pub fn remove(&mut self, interval: Interval, id: u32) -> Option<Variable> {
        let variables = self.variables.get_mut(&interval)?;
        let removed = variables.remove(&id);
        if variables.is_empty() {
            self.variables.remove(&interval);
        }
        removed
    }

    /// Total number of declared variables across all intervals
    pub fn variable_count(&self) -> usize {
        self.variables.values().map(|m| m.len()).sum()
    }

    /// Check whether the dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Iterate over every `(id, variable)` pair, interval by interval
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Variable)> + '_ {
        self.variables
            .values()
            .flat_map(|m| m.iter().map(|(id, var)| (*id, var)))
    }
}

// =============================================================================
// Interval Timestamps
// =============================================================================

/// Raw, un-yearified timestamp extracted from an interval marker line
///
/// Day 0 means "not applicable" (monthly and coarser markers); hour 24
/// and end-minute 60 are valid end-of-period values in the EnergyPlus
/// convention. Conversion to absolute dates for a base year happens
/// downstream of the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalStamp {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub end_minute: u32,
}

impl IntervalStamp {
    pub fn new(month: u32, day: u32, hour: u32, end_minute: u32) -> Self {
        Self {
            month,
            day,
            hour,
            end_minute,
        }
    }
}

// =============================================================================
// Peak Coordinate Records
// =============================================================================

/// Peak coordinates attached to a Daily+ result record
///
/// Each interval writes a fixed coordinate schema after the result
/// value: Daily records locate the minimum and maximum within the day,
/// Monthly records add the day of month, RunPeriod and Annual records
/// add the month as well.
#[derive(Debug, Clone, PartialEq)]
pub enum PeakRecord {
    Daily {
        min: f64,
        min_hour: u32,
        min_minute: u32,
        max: f64,
        max_hour: u32,
        max_minute: u32,
    },
    Monthly {
        min: f64,
        min_day: u32,
        min_hour: u32,
        min_minute: u32,
        max: f64,
        max_day: u32,
        max_hour: u32,
        max_minute: u32,
    },
    RunPeriod {
        min: f64,
        min_month: u32,
        min_day: u32,
        min_hour: u32,
        min_minute: u32,
        max: f64,
        max_month: u32,
        max_day: u32,
        max_hour: u32,
        max_minute: u32,
    },
}

impl PeakRecord {
    /// Parse the coordinate fields following a result value
    ///
    /// Returns `None` when the field count does not match the schema of
    /// the interval or a field fails numeric parsing. Annual records
    /// share the RunPeriod schema.
    pub fn from_fields(interval: Interval, fields: &[&str]) -> Option<Self> {
        fn num(field: &str) -> Option<f64> {
            field.trim().parse::<f64>().ok()
        }
        // Coordinates may carry spurious fractional parts; truncate them
        fn coord(field: &str) -> Option<u32> {
            num(field).map(|value| value as u32)
        }

        match interval {
            Interval::Daily => match fields {
                [min, min_hour, min_minute, max, max_hour, max_minute] => {
                    Some(PeakRecord::Daily {
                        min: num(min)?,
                        min_hour: coord(min_hour)?,
                        min_minute: coord(min_minute)?,
                        max: num(max)?,
                        max_hour: coord(max_hour)?,
                        max_minute: coord(max_minute)?,
                    })
                }
                _ => None,
            },
            Interval::Monthly => match fields {
                [min, min_day, min_hour, min_minute, max, max_day, max_hour, max_minute] => {
                    Some(PeakRecord::Monthly {
                        min: num(min)?,
                        min_day: coord(min_day)?,
                        min_hour: coord(min_hour)?,
                        min_minute: coord(min_minute)?,
                        max: num(max)?,
                        max_day: coord(max_day)?,
                        max_hour: coord(max_hour)?,
                        max_minute: coord(max_minute)?,
                    })
                }
                _ => None,
            },
            Interval::RunPeriod | Interval::Annual => match fields {
                [min, min_month, min_day, min_hour, min_minute, max, max_month, max_day, max_hour, max_minute] => {
                    Some(PeakRecord::RunPeriod {
                        min: num(min)?,
                        min_month: coord(min_month)?,
                        min_day: coord(min_day)?,
                        min_hour: coord(min_hour)?,
                        min_minute: coord(min_minute)?,
                        max: num(max)?,
                        max_month: coord(max_month)?,
                        max_day: coord(max_day)?,
                        max_hour: coord(max_hour)?,
                        max_minute: coord(max_minute)?,
                    })
                }
                _ => None,
            },
            Interval::TimeStep | Interval::Hourly => None,
        }
    }

    /// The minimum value of the peak record
    pub fn minimum(&self) -> f64 {
        match self {
            PeakRecord::Daily { min, .. }
            | PeakRecord::Monthly { min, .. }
            | PeakRecord::RunPeriod { min, .. } => *min,
        }
    }

    /// The maximum value of the peak record
    pub fn maximum(&self) -> f64 {
        match self {
            PeakRecord::Daily { max, .. }
            | PeakRecord::Monthly { max, .. }
            | PeakRecord::RunPeriod { max, .. } => *max,
        }
    }
}

/// Dense per-variable value series: one slot per interval step
pub type OutputSeries = BTreeMap<Interval, BTreeMap<u32, Vec<Option<f64>>>>;

/// Dense per-variable peak series, parallel to [`OutputSeries`]
pub type PeakSeries = BTreeMap<Interval, BTreeMap<u32, Vec<Option<PeakRecord>>>>;

// =============================================================================
// Raw Environment
// =============================================================================

/// All data collected for one simulation environment
///
/// An environment owns a clone of the file header so duplicate pruning
/// stays local to it. Series are appended to only while the body is
/// being read; every interval marker extends each series by one missing
/// slot, and result records overwrite the last slot, which keeps every
/// series exactly as long as its interval's timestamp sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnvironment {
    /// Environment name from the marker line (e.g. a design day title)
    pub name: String,

    /// Header clone owned by this environment
    pub header: HeaderTable,

    /// Interval timestamps in order of appearance
    pub dates: BTreeMap<Interval, Vec<IntervalStamp>>,

    /// Day-of-week strings, parallel to `dates` (TimeStep/Hourly/Daily)
    pub days_of_week: BTreeMap<Interval, Vec<String>>,

    /// Cumulative day counts, parallel to `dates` (Monthly/Annual/RunPeriod)
    ///
    /// Annual markers carry no cumulative count and record `None`.
    pub cumulative_days: BTreeMap<Interval, Vec<Option<u32>>>,

    /// Dense result series per interval and variable id
    pub outputs: OutputSeries,

    /// Peak coordinate series; absent when peaks are ignored
    pub peak_outputs: Option<PeakSeries>,
}

impl RawEnvironment {
    /// Create an environment with empty bins for every header interval
    ///
    /// `series_capacity` pre-sizes each value series so the append-only
    /// growth during body reading does not reallocate repeatedly.
    pub fn new(
        name: impl Into<String>,
        header: HeaderTable,
        ignore_peaks: bool,
        series_capacity: usize,
    ) -> Self {
        let mut dates = BTreeMap::new();
        let mut days_of_week = BTreeMap::new();
        let mut cumulative_days = BTreeMap::new();
        let mut outputs: OutputSeries = BTreeMap::new();
        let mut peak_outputs: PeakSeries = BTreeMap::new();

        for interval in header.intervals() {
            dates.insert(interval, Vec::new());
            if interval.has_day_of_week() {
                days_of_week.insert(interval, Vec::new());
            }
            if interval.has_cumulative_days() {
                cumulative_days.insert(interval, Vec::new());
            }

            let Some(variables) = header.variables(interval) else {
                continue;
            };
            let series = outputs.entry(interval).or_default();
            for id in variables.keys() {
                series.insert(*id, Vec::with_capacity(series_capacity));
            }
            if !ignore_peaks && interval.has_peaks() {
                let peaks = peak_outputs.entry(interval).or_default();
                for id in variables.keys() {
                    peaks.insert(*id, Vec::with_capacity(series_capacity));
                }
            }
        }

        Self {
            name: name.into(),
            header,
            dates,
            days_of_week,
            cumulative_days,
            outputs,
            peak_outputs: if ignore_peaks { None } else { Some(peak_outputs) },
        }
    }

    /// Check whether the environment collects data for an interval
    pub fn has_interval(&self, interval: Interval) -> bool {
        self.dates.contains_key(&interval)
    }

    /// Number of interval steps recorded so far
    pub fn step_count(&self, interval: Interval) -> usize {
        self.dates.get(&interval).map_or(0, Vec::len)
    }

    /// Record an interval marker: store its stamp and open a new step
    ///
    /// Every value series of the interval is extended with a missing
    /// slot, so variables that do not report at this step stay aligned
    /// with the timestamp sequence.
    pub fn begin_step(&mut self, interval: Interval, stamp: IntervalStamp) {
        if let Some(dates) = self.dates.get_mut(&interval) {
            dates.push(stamp);
        }
        if let Some(series) = self.outputs.get_mut(&interval) {
            for values in series.values_mut() {
                values.push(None);
            }
        }
        if let Some(peaks) = self.peak_outputs.as_mut() {
            if let Some(series) = peaks.get_mut(&interval) {
                for values in series.values_mut() {
                    values.push(None);
                }
            }
        }
    }

    /// Record the day-of-week field of a TimeStep/Hourly/Daily marker
    pub fn push_day_of_week(&mut self, interval: Interval, day: impl Into<String>) {
        if let Some(days) = self.days_of_week.get_mut(&interval) {
            days.push(day.into());
        }
    }

    /// Record the cumulative day count of a Monthly/Annual/RunPeriod marker
    pub fn push_cumulative_days(&mut self, interval: Interval, days: Option<u32>) {
        if let Some(counts) = self.cumulative_days.get_mut(&interval) {
            counts.push(days);
        }
    }

    /// Overwrite the current step of a variable with a reported value
    ///
    /// Returns false when the id is not declared for the interval; the
    /// caller decides how to report the stray record.
    pub fn store_result(&mut self, interval: Interval, id: u32, value: f64) -> bool {
        match self.outputs.get_mut(&interval).and_then(|m| m.get_mut(&id)) {
            Some(series) => {
                if let Some(slot) = series.last_mut() {
                    *slot = Some(value);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Overwrite the current step of a variable's peak series
    pub fn store_peak(&mut self, interval: Interval, id: u32, peak: PeakRecord) -> bool {
        let Some(peaks) = self.peak_outputs.as_mut() else {
            return false;
        };
        match peaks.get_mut(&interval).and_then(|m| m.get_mut(&id)) {
            Some(series) => {
                if let Some(slot) = series.last_mut() {
                    *slot = Some(peak);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }

    /// Delete duplicated variable ids from the header and all series
    ///
    /// Removal is keyed by each duplicate's interval so the parallel
    /// length invariants of the surviving series are untouched. Running
    /// this twice with the same duplicates map is a no-op.
    pub fn remove_duplicates(
        &mut self,
        duplicates: &BTreeMap<u32, Variable>,
    ) -> usize {
        let mut removed = 0;
        for (id, variable) in duplicates {
            let interval = variable.interval;
            if self.header.remove(interval, *id).is_some() {
                removed += 1;
                info!(
                    "Removing duplicate variable {} ({}) from environment '{}'",
                    id, variable, self.name
                );
            }
            if let Some(series) = self.outputs.get_mut(&interval) {
                series.remove(id);
            }
            if let Some(peaks) = self.peak_outputs.as_mut() {
                if let Some(series) = peaks.get_mut(&interval) {
                    series.remove(id);
                }
            }
        }
        removed
    }

    /// Check whether this environment is a sizing (design-day) run
    ///
    /// Design-day environments report `WinterDesignDay` or
    /// `SummerDesignDay` as their day type; older files identify them
    /// only through the environment name.
    pub fn is_sizing_environment(&self) -> bool {
        if let Some(first_day) = self
            .days_of_week
            .values()
            .find_map(|days| days.first())
        {
            return first_day == "WinterDesignDay" || first_day == "SummerDesignDay";
        }
        let name = self.name.to_lowercase();
        name.contains("summer design day") || name.contains("winter design day")
    }
}
