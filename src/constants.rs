//! Application constants for the ESO processor
//!
//! This module contains the format constants, sentinel strings, and
//! default values used throughout the ESO processor.

// =============================================================================
// File Section Sentinels
// =============================================================================

/// Sentinel terminating the data dictionary section
pub const END_OF_DATA_DICTIONARY: &str = "End of Data Dictionary";

/// Sentinel terminating the data section
pub const END_OF_DATA: &str = "End of Data";

// =============================================================================
// Body Line Identifiers
// =============================================================================

/// Line identifiers for the body state machine
///
/// Body lines lead with an integer id. Id 1 opens a new environment,
/// ids 2..=highest mark interval steps, anything above the highest
/// interval id is a result record bound to the most recent interval.
pub mod line_ids {
    /// New environment marker
    pub const ENVIRONMENT: u32 = 1;

    /// TimeStep or Hourly interval marker (discriminated by minute fields)
    pub const TIMESTEP_OR_HOURLY: u32 = 2;

    /// Daily interval marker
    pub const DAILY: u32 = 3;

    /// Monthly interval marker
    pub const MONTHLY: u32 = 4;

    /// RunPeriod interval marker
    pub const RUN_PERIOD: u32 = 5;

    /// Annual interval marker (E+ 8.9 and later)
    pub const ANNUAL: u32 = 6;
}

/// EnergyPlus version from which the Annual marker (id 6) is emitted
pub const ANNUAL_MARKER_VERSION: i32 = 890;

// =============================================================================
// Data Dictionary Constants
// =============================================================================

/// Canonical lower-cased interval tags as stored in the header
pub mod interval_tags {
    pub const TIMESTEP: &str = "timestep";
    pub const HOURLY: &str = "hourly";
    pub const DAILY: &str = "daily";
    pub const MONTHLY: &str = "monthly";
    pub const RUN_PERIOD: &str = "runperiod";
    pub const ANNUAL: &str = "annual";

    /// System reporting tag, folded into the TimeStep interval
    pub const EACH_CALL: &str = "each call";
}

/// Key substituted for meter variables (dictionary lines with no key field)
pub const METER_KEY: &str = "Meter";

/// Key substituted for cumulative meter variables
pub const CUMULATIVE_METER_KEY: &str = "Cumulative Meter";

/// Type prefix applied to "Each Call" variables folded into TimeStep
pub const SYSTEM_TYPE_PREFIX: &str = "System - ";

// =============================================================================
// Statement Line Constants
// =============================================================================

/// Number of characters of the dotted version retained (e.g. "8.9.0" -> 890)
pub const VERSION_LITERAL_LEN: usize = 5;

/// Format of the generation timestamp in the statement line
pub const GENERATED_AT_FORMAT: &str = "%Y.%m.%d %H:%M";

// =============================================================================
// Progress Reporting Defaults
// =============================================================================

/// Number of lines between progress ticks
pub const DEFAULT_CHUNK_SIZE: u64 = 10_000;
