//! Test utilities and fixtures for ESO parser testing
//!
//! This module provides shared fixture builders and a recording
//! progress sink used across the parser test modules.

use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

use crate::app::models::{HeaderTable, RawEnvironment};
use crate::app::services::eso_parser::body::BodyParser;
use crate::app::services::eso_parser::header::read_header;
use crate::app::services::eso_parser::stats::ParseStats;
use crate::app::services::line_source::LineSource;
use crate::app::services::progress::{NoOpSink, ProgressSink};
use crate::constants::DEFAULT_CHUNK_SIZE;
use crate::Result;

mod header_tests;

/// A line source over in-memory content with a silent sink
pub fn line_source(content: &str) -> LineSource<Cursor<Vec<u8>>, NoOpSink> {
    LineSource::new(
        Cursor::new(content.as_bytes().to_vec()),
        NoOpSink,
        DEFAULT_CHUNK_SIZE,
    )
}

/// Read a dictionary-plus-body fixture through header and body parsers
pub fn parse_sections(
    content: &str,
    ignore_peaks: bool,
    highest_interval_id: u32,
) -> Result<(HeaderTable, Vec<RawEnvironment>, ParseStats)> {
    let mut source = line_source(content);
    let header = read_header(&mut source)?;
    let mut stats = ParseStats::new();
    let body_parser = BodyParser::new(&header, highest_interval_id, ignore_peaks, 8);
    let environments = body_parser.read_body(&mut source, &mut stats)?;
    Ok((header, environments, stats))
}

/// Progress events captured by [`RecordingSink`]
#[derive(Debug, Default)]
pub struct RecordedProgress {
    pub maximum: Option<u64>,
    pub ticks: u64,
    pub sections: Vec<String>,
}

/// Sink recording every event for later inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub progress: Rc<RefCell<RecordedProgress>>,
    pub cancelled: Rc<RefCell<bool>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that requests cancellation from the first tick
    pub fn cancelled() -> Self {
        let sink = Self::default();
        *sink.cancelled.borrow_mut() = true;
        sink
    }
}

impl ProgressSink for RecordingSink {
    fn set_maximum(&mut self, max_ticks: u64) {
        self.progress.borrow_mut().maximum = Some(max_ticks);
    }

    fn tick(&mut self) {
        self.progress.borrow_mut().ticks += 1;
    }

    fn log_section(&mut self, section: &str) {
        self.progress.borrow_mut().sections.push(section.to_string());
    }

    fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }
}

/// A complete small `.eso` file: statement, six reserved preamble
/// lines, a dictionary spanning five intervals plus a meter, and one
/// environment reporting two hourly steps and one step of each coarser
/// interval
pub fn sample_eso_content() -> String {
    r#"Program Version,EnergyPlus, Version 8.9.0-40101eaafd, YMD=2020.05.14 14:22
1,5,Environment Title[],Latitude[deg],Longitude[deg],Time Zone[],Elevation[m]
2,8,Day of Simulation[],Month[],Day of Month[],DST Indicator[1=yes 0=no],Hour[],StartMinute[],EndMinute[],DayType
3,5,Cumulative Day of Simulation[],Month[],Day of Month[],DST Indicator[1=yes 0=no],DayType
4,2,Cumulative Days of Simulation[],Month[]
5,1,Cumulative Days of Simulation[]
6,1,Calendar Year of Simulation[]
7,1,Environment,Site Outdoor Air Drybulb Temperature [C] !Hourly
8,1,BLOCK1:ZONE1,Zone Mean Air Temperature [C] !Hourly
13,1,BLOCK1:ZONE1,Zone Mean Air Temperature [C] !Daily [Value,Min,Hour,Minute,Max,Hour,Minute]
21,1,BLOCK1:ZONE1,Zone Mean Air Temperature [C] !Monthly [Value,Min,Day,Hour,Minute,Max,Day,Hour,Minute]
29,1,BLOCK1:ZONE1,Zone Mean Air Temperature [C] !RunPeriod [Value,Min,Month,Day,Hour,Minute,Max,Month,Day,Hour,Minute]
53,1,Electricity:Facility [J] !Hourly
End of Data Dictionary
1,TEST ENVIRONMENT,  51.15,  -0.18,   0.00, 62.00
2,1,1,1,0,1,0.00,60.00,Monday
7,15.5
8,20.25
53,1200.5
2,1,1,1,0,2,0.00,60.00,Monday
7,16.0
8,20.5
53,1250.0
3,1,1,1,0,Monday
13,20.375,20.25,1,60,20.5,2,60
4,1,1
21,20.375,20.25,1,1,60,20.5,1,2,60
5,1
29,20.375,20.25,1,1,1,60,20.5,1,1,2,60
6,2020
End of Data
"#
    .to_string()
}

/// Count the lines of an in-memory fixture
pub fn fixture_line_count(content: &str) -> u64 {
    content.lines().count() as u64
}
