//! Tests for index construction and duplicate handling

use super::sample_header;
use crate::app::models::{HeaderTable, Interval, RawEnvironment, Variable};
use crate::app::services::search_index::SearchIndex;

fn duplicated_header() -> HeaderTable {
    let mut header = HeaderTable::new();
    header.insert(
        10,
        Variable::new(Interval::Daily, "Env", "Temp", "C"),
    );
    header.insert(
        11,
        Variable::new(Interval::Daily, "Env", "Temp", "C"),
    );
    header
}

#[test]
fn test_index_construction_without_duplicates() {
    let header = sample_header();
    let (index, duplicates) = SearchIndex::from_header(&header);

    assert!(duplicates.is_empty());
    assert_eq!(index.variable_count(), header.variable_count());
    for (_, variable) in header.iter() {
        assert!(index.contains(variable));
    }
}

#[test]
fn test_first_id_wins_on_duplicate() {
    let (index, duplicates) = SearchIndex::from_header(&duplicated_header());

    assert_eq!(index.variable_count(), 1);
    assert_eq!(duplicates.len(), 1);
    assert!(duplicates.contains_key(&11));

    let ids = index.find_ids(&Default::default());
    assert_eq!(ids, vec![10]);
}

#[test]
fn test_same_tuple_in_other_interval_is_not_duplicate() {
    let mut header = duplicated_header();
    header.insert(
        12,
        Variable::new(Interval::Monthly, "Env", "Temp", "C"),
    );

    let (index, duplicates) = SearchIndex::from_header(&header);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(index.variable_count(), 2);
}

#[test]
fn test_prune_removes_header_and_series() {
    let header = duplicated_header();
    let mut env = RawEnvironment::new("TEST", header, false, 4);
    env.begin_step(
        Interval::Daily,
        crate::app::models::IntervalStamp::new(1, 1, 0, 0),
    );

    let (_, duplicates) = SearchIndex::from_header(&env.header);
    let removed = env.remove_duplicates(&duplicates);

    assert_eq!(removed, 1);
    assert!(env.header.get(Interval::Daily, 10).is_some());
    assert!(env.header.get(Interval::Daily, 11).is_none());
    assert!(!env.outputs[&Interval::Daily].contains_key(&11));
    assert!(!env.peak_outputs.as_ref().unwrap()[&Interval::Daily].contains_key(&11));

    // Surviving series keep their length
    assert_eq!(env.outputs[&Interval::Daily][&10].len(), 1);

    // Pruning again is a no-op
    assert_eq!(env.remove_duplicates(&duplicates), 0);
}
