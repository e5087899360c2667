//! Tests for variable lookup queries

use super::sample_header;
use crate::app::models::Interval;
use crate::app::services::search_index::{SearchIndex, VariableFilter};

fn sample_index() -> SearchIndex {
    let (index, duplicates) = SearchIndex::from_header(&sample_header());
    assert!(duplicates.is_empty());
    index
}

#[test]
fn test_empty_filter_matches_everything() {
    let index = sample_index();
    assert_eq!(index.find_ids(&VariableFilter::new()), vec![7, 8, 9, 13, 53]);
}

#[test]
fn test_exact_lookup() {
    let index = sample_index();
    let filter = VariableFilter::new()
        .with_interval(Interval::Hourly)
        .with_key("BLOCK1:ZONE1")
        .with_type_name("Zone Mean Air Temperature")
        .with_units("C");
    assert_eq!(index.find_ids(&filter), vec![8]);
}

#[test]
fn test_lookup_is_case_insensitive() {
    let index = sample_index();
    let filter = VariableFilter::new()
        .with_key("block1:zone1")
        .with_type_name("ZONE MEAN AIR TEMPERATURE");
    assert_eq!(index.find_ids(&filter), vec![8, 13]);
}

#[test]
fn test_interval_filter() {
    let index = sample_index();
    let filter = VariableFilter::new().with_interval(Interval::Daily);
    assert_eq!(index.find_ids(&filter), vec![13]);
}

#[test]
fn test_key_wildcard() {
    let index = sample_index();
    let filter = VariableFilter::new().with_key("BLOCK1:*");
    assert_eq!(index.find_ids(&filter), vec![8, 9, 13]);
}

#[test]
fn test_type_wildcard() {
    let index = sample_index();
    let filter = VariableFilter::new().with_type_name("*Temperature");
    assert_eq!(index.find_ids(&filter), vec![7, 8, 9, 13]);
}

#[test]
fn test_bare_star_matches_everything() {
    let index = sample_index();
    let filter = VariableFilter::new().with_key("*").with_units("*");
    assert_eq!(index.find_ids(&filter), vec![7, 8, 9, 13, 53]);
}

#[test]
fn test_units_filter() {
    let index = sample_index();
    let filter = VariableFilter::new().with_units("J");
    assert_eq!(index.find_ids(&filter), vec![53]);
}

#[test]
fn test_no_match_returns_empty() {
    let index = sample_index();
    let filter = VariableFilter::new().with_key("BLOCK2:*");
    assert!(index.find_ids(&filter).is_empty());
    assert!(!index.any_match(&filter));
}

#[test]
fn test_wildcard_escapes_regex_metacharacters() {
    // Keys contain ':' and the index must treat other regex
    // metacharacters literally
    let index = sample_index();
    let filter = VariableFilter::new().with_key("BLOCK1:ZONE1");
    assert_eq!(index.find_ids(&filter), vec![8, 13]);

    // A dot is a literal, not an any-character class
    let filter = VariableFilter::new().with_key("BLOCK1.*");
    assert!(index.find_ids(&filter).is_empty());
}
