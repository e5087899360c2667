//! Test utilities for search index testing

use crate::app::models::{HeaderTable, Interval, Variable};

// Test modules
mod index_tests;
mod query_tests;

/// A header with variables spread over three intervals
pub fn sample_header() -> HeaderTable {
    let mut header = HeaderTable::new();
    header.insert(
        7,
        Variable::new(
            Interval::Hourly,
            "Environment",
            "Site Outdoor Air Drybulb Temperature",
            "C",
        ),
    );
    header.insert(
        8,
        Variable::new(
            Interval::Hourly,
            "BLOCK1:ZONE1",
            "Zone Mean Air Temperature",
            "C",
        ),
    );
    header.insert(
        9,
        Variable::new(
            Interval::Hourly,
            "BLOCK1:ZONE2",
            "Zone Mean Air Temperature",
            "C",
        ),
    );
    header.insert(
        13,
        Variable::new(
            Interval::Daily,
            "BLOCK1:ZONE1",
            "Zone Mean Air Temperature",
            "C",
        ),
    );
    header.insert(
        53,
        Variable::new(Interval::Hourly, "Meter", "Electricity:Facility", "J"),
    );
    header
}
