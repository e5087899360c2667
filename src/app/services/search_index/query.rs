//! Variable lookup queries
//!
//! This module provides the filter type and matching logic for finding
//! variable ids in a [`SearchIndex`]. Absent filter components match
//! anything; string components compare case-insensitively and accept
//! `*` as an any-substring wildcard.

use regex::Regex;

use super::SearchIndex;
use crate::app::models::Interval;

/// Lookup filter over the index's four levels
///
/// # Examples
///
/// ```
/// use eso_processor::{Interval, VariableFilter};
///
/// // Every hourly variable
/// let hourly = VariableFilter::new().with_interval(Interval::Hourly);
///
/// // All zone air temperatures, whatever the zone key
/// let temps = VariableFilter::new().with_type_name("Zone Mean Air Temperature");
///
/// // Wildcard over keys
/// let block_a = VariableFilter::new().with_key("BLOCK1:*");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableFilter {
    /// Reporting interval to match, or any
    pub interval: Option<Interval>,

    /// Key pattern to match, or any
    pub key: Option<String>,

    /// Type name pattern to match, or any
    pub type_name: Option<String>,

    /// Units pattern to match, or any
    pub units: Option<String>,
}

impl VariableFilter {
    /// Create a filter matching every variable
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a reporting interval
    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Restrict to a key pattern
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Restrict to a type name pattern
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Restrict to a units pattern
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }
}

/// Compiled matcher for one filter component
enum FieldMatcher {
    /// Match anything (component absent or bare `*`)
    Any,

    /// Case-insensitive literal comparison
    Exact(String),

    /// Wildcard pattern compiled to an anchored regex
    Pattern(Regex),
}

impl FieldMatcher {
    fn new(pattern: Option<&str>) -> Self {
        match pattern {
            None => FieldMatcher::Any,
            Some("*") => FieldMatcher::Any,
            Some(pattern) if pattern.contains('*') => {
                FieldMatcher::Pattern(wildcard_regex(pattern))
            }
            Some(pattern) => FieldMatcher::Exact(pattern.to_lowercase()),
        }
    }

    /// Test a candidate that is already stored lower-cased
    fn matches(&self, candidate: &str) -> bool {
        match self {
            FieldMatcher::Any => true,
            FieldMatcher::Exact(literal) => literal == candidate,
            FieldMatcher::Pattern(regex) => regex.is_match(candidate),
        }
    }
}

/// Translate a `*` wildcard pattern into an anchored regex
fn wildcard_regex(pattern: &str) -> Regex {
    let mut expression = String::from("(?i)^");
    for (i, literal) in pattern.split('*').enumerate() {
        if i > 0 {
            expression.push_str(".*");
        }
        expression.push_str(&regex::escape(literal));
    }
    expression.push('$');
    // Escaped literals joined by ".*" always form a valid expression
    Regex::new(&expression).expect("wildcard pattern compiles")
}

impl SearchIndex {
    /// Find all variable ids satisfying a filter, in ascending order
    pub fn find_ids(&self, filter: &VariableFilter) -> Vec<u32> {
        let key_matcher = FieldMatcher::new(filter.key.as_deref());
        let type_matcher = FieldMatcher::new(filter.type_name.as_deref());
        let units_matcher = FieldMatcher::new(filter.units.as_deref());

        let mut ids = Vec::new();
        for (interval, keys) in &self.tree {
            if filter.interval.is_some_and(|wanted| wanted != *interval) {
                continue;
            }
            for (key, types) in keys {
                if !key_matcher.matches(key) {
                    continue;
                }
                for (type_name, units) in types {
                    if !type_matcher.matches(type_name) {
                        continue;
                    }
                    for (unit, id) in units {
                        if units_matcher.matches(unit) {
                            ids.push(*id);
                        }
                    }
                }
            }
        }
        ids.sort_unstable();
        ids
    }

    /// Check whether any variable satisfies a filter
    pub fn any_match(&self, filter: &VariableFilter) -> bool {
        !self.find_ids(filter).is_empty()
    }
}
