//! Tests for data dictionary parsing

use super::line_source;
use crate::app::models::{Interval, Variable};
use crate::app::services::eso_parser::header::read_header;
use crate::Error;

#[test]
fn test_variable_dictionary_line() {
    let content = "7,1,Environment,Site Outdoor Air Drybulb Temperature [C] !TimeStep\n\
                   End of Data Dictionary\n";
    let header = read_header(&mut line_source(content)).unwrap();

    assert_eq!(header.variable_count(), 1);
    assert_eq!(
        header.get(Interval::TimeStep, 7),
        Some(&Variable::new(
            Interval::TimeStep,
            "Environment",
            "Site Outdoor Air Drybulb Temperature",
            "C",
        ))
    );
}

#[test]
fn test_meter_dictionary_line() {
    let content = "53,1,Electricity:Facility [J] !TimeStep\n\
                   54,1,Cumulative Electricity:Facility [J] !TimeStep\n\
                   End of Data Dictionary\n";
    let header = read_header(&mut line_source(content)).unwrap();

    // Meter lines carry one fewer component; the key slides into the
    // type position
    let meter = header.get(Interval::TimeStep, 53).unwrap();
    assert_eq!(meter.key, "Meter");
    assert_eq!(meter.type_name, "Electricity:Facility");
    assert_eq!(meter.units, "J");

    let cumulative = header.get(Interval::TimeStep, 54).unwrap();
    assert_eq!(cumulative.key, "Cumulative Meter");
    assert_eq!(cumulative.type_name, "Cumulative Electricity:Facility");
}

#[test]
fn test_each_call_folds_into_timestep() {
    let content = "101,1,NODE 1,System Node Temperature [C] !Each Call\n\
                   End of Data Dictionary\n";
    let header = read_header(&mut line_source(content)).unwrap();

    let variable = header.get(Interval::TimeStep, 101).unwrap();
    assert_eq!(variable.interval, Interval::TimeStep);
    assert_eq!(variable.key, "NODE 1");
    assert_eq!(variable.type_name, "System - System Node Temperature");
}

#[test]
fn test_interval_tags_are_canonicalised() {
    let content = "7,1,Env,Temp [C] !TimeStep\n\
                   8,1,Env,Temp [C] !Hourly\n\
                   9,1,Env,Temp [C] !Daily [Value,Min,Hour,Minute,Max,Hour,Minute]\n\
                   10,1,Env,Temp [C] !Monthly [Value,Min,Day,Hour,Minute,Max,Day,Hour,Minute]\n\
                   11,1,Env,Temp [C] !RunPeriod [Value,Min,Month,Day,Hour,Minute,Max,Month,Day,Hour,Minute]\n\
                   12,1,Env,Temp [C] !Annual\n\
                   End of Data Dictionary\n";
    let header = read_header(&mut line_source(content)).unwrap();

    assert_eq!(header.variable_count(), 6);
    let intervals: Vec<Interval> = header.intervals().collect();
    assert_eq!(intervals, Interval::ALL.to_vec());
}

#[test]
fn test_empty_units() {
    let content = "9,1,BLOCK1:ZONE1,Zone Thermostat Control Type [] !Hourly\n\
                   End of Data Dictionary\n";
    let header = read_header(&mut line_source(content)).unwrap();

    let variable = header.get(Interval::Hourly, 9).unwrap();
    assert_eq!(variable.units, "");
}

#[test]
fn test_blank_line_is_fatal() {
    let content = "7,1,Env,Temp [C] !Hourly\n\
                   \n\
                   End of Data Dictionary\n";
    let result = read_header(&mut line_source(content));
    assert!(matches!(result, Err(Error::BlankLine { line_number: 2 })));
}

#[test]
fn test_invalid_line_is_fatal() {
    let content = "this is not a dictionary line\n\
                   End of Data Dictionary\n";
    let result = read_header(&mut line_source(content));
    assert!(matches!(result, Err(Error::InvalidLineSyntax { .. })));
}

#[test]
fn test_missing_sentinel_is_incomplete() {
    let content = "7,1,Env,Temp [C] !Hourly\n";
    let result = read_header(&mut line_source(content));
    assert!(matches!(result, Err(Error::IncompleteFile { .. })));
}

#[test]
fn test_unknown_interval_tag_is_fatal() {
    let content = "7,1,Env,Temp [C] !Fortnightly\n\
                   End of Data Dictionary\n";
    let result = read_header(&mut line_source(content));
    assert!(matches!(result, Err(Error::InvalidLineSyntax { .. })));
}
