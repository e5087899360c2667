//! Variable search index for parsed environments
//!
//! This module builds a tree-shaped lookup structure over a header
//! table so variables can be found by any combination of interval,
//! key, type, and units. Insertion doubles as duplicate detection: a
//! variable whose identifying tuple already sits in the tree keeps its
//! first id, and later ids are collected for pruning.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::app::models::{HeaderTable, Interval, Variable};

pub mod query;

#[cfg(test)]
pub mod tests;

// Re-export key types for convenience
pub use query::VariableFilter;

/// Units level: lower-cased units string to variable id
type UnitsMap = BTreeMap<String, u32>;

/// Type level: lower-cased type name to its units branch
type TypeMap = BTreeMap<String, UnitsMap>;

/// Key level: lower-cased key to its type branch
type KeyMap = BTreeMap<String, TypeMap>;

/// Tree index over a header: interval -> key -> type -> units -> id
///
/// All string levels are stored lower-cased so lookups are
/// case-insensitive. The index owns nothing beyond its own strings and
/// stays valid for as long as the environment it was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    pub(crate) tree: BTreeMap<Interval, KeyMap>,
}

impl SearchIndex {
    /// Build an index from a header, collecting duplicate variables
    ///
    /// Within an interval the header iterates in ascending id order,
    /// so on a collision the lowest (first declared) id wins and every
    /// later id lands in the returned duplicates map.
    pub fn from_header(header: &HeaderTable) -> (Self, BTreeMap<u32, Variable>) {
        let mut index = SearchIndex::default();
        let mut duplicates = BTreeMap::new();

        for (id, variable) in header.iter() {
            if index.insert(id, variable).is_some() {
                duplicates.insert(id, variable.clone());
            }
        }
        (index, duplicates)
    }

    /// Insert a variable, returning the previous id on collision
    fn insert(&mut self, id: u32, variable: &Variable) -> Option<u32> {
        let units_map = self
            .tree
            .entry(variable.interval)
            .or_default()
            .entry(variable.key.to_lowercase())
            .or_default()
            .entry(variable.type_name.to_lowercase())
            .or_default();

        match units_map.entry(variable.units.to_lowercase()) {
            Entry::Occupied(entry) => Some(*entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(id);
                None
            }
        }
    }

    /// Check whether a variable's identifying tuple exists in the index
    pub fn contains(&self, variable: &Variable) -> bool {
        self.tree
            .get(&variable.interval)
            .and_then(|keys| keys.get(&variable.key.to_lowercase()))
            .and_then(|types| types.get(&variable.type_name.to_lowercase()))
            .map(|units| units.contains_key(&variable.units.to_lowercase()))
            .unwrap_or(false)
    }

    /// Number of indexed variables
    pub fn variable_count(&self) -> usize {
        self.tree
            .values()
            .flat_map(|keys| keys.values())
            .flat_map(|types| types.values())
            .map(|units| units.len())
            .sum()
    }

    /// Check whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Intervals present in the index
    pub fn intervals(&self) -> impl Iterator<Item = Interval> + '_ {
        self.tree.keys().copied()
    }
}
