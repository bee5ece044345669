//! Free-text search and category filtering of top-level rows.
//!
//! Only top-level nodes are tested. A matching node brings its whole subtree
//! along; a non-matching node hides it, whatever its descendants contain.

use crate::column::{find_column, Column};
use crate::node::{value_to_string, FilterValue, Node};
use std::collections::{HashMap, HashSet};

/// The single column + accepted-value combination narrowing the top-level set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub column: String,
    pub accepted: HashSet<FilterValue>,
}

impl ActiveFilter {
    pub fn new(column: impl Into<String>, accepted: impl IntoIterator<Item = FilterValue>) -> Self {
        Self {
            column: column.into(),
            accepted: accepted.into_iter().collect(),
        }
    }

    /// An empty accepted set disables the filter.
    pub fn is_pass_through(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// One distinct value offered by a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: FilterValue,
    pub label: String,
    pub count: usize,
}

/// A filterable column with the number of distinct values it offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCategory {
    pub key: String,
    pub title: String,
    pub count: usize,
}

/// Inputs of one filtering pass.
pub struct FilterCriteria<'q> {
    pub query: &'q str,
    pub searchable_keys: &'q [String],
    pub active: Option<&'q ActiveFilter>,
}

/// Returns the top-level nodes that satisfy both the search and the category
/// predicate, in their original order.
pub fn filter_top_level<'a>(
    roots: &'a [Node],
    columns: &[Column],
    criteria: &FilterCriteria<'_>,
) -> Vec<&'a Node> {
    let needle = criteria.query.to_lowercase();
    let search_keys = resolve_search_keys(columns, criteria.searchable_keys);

    roots
        .iter()
        .filter(|node| needle.is_empty() || matches_search(node, &search_keys, &needle))
        .filter(|node| match criteria.active {
            Some(active) if !active.is_pass_through() => matches_filter(node, columns, active),
            _ => true,
        })
        .collect()
}

/// Keys that take part in search: the configured ones that are declared as
/// columns, or every declared column when none are configured.
fn resolve_search_keys<'c>(columns: &'c [Column], searchable: &'c [String]) -> Vec<&'c str> {
    if searchable.is_empty() {
        columns.iter().map(|column| column.key.as_str()).collect()
    } else {
        searchable
            .iter()
            .filter(|key| find_column(columns, key).is_some())
            .map(|key| key.as_str())
            .collect()
    }
}

/// `needle` must already be lowercased.
fn matches_search(node: &Node, keys: &[&str], needle: &str) -> bool {
    keys.iter().any(|key| {
        node.field(key)
            .map(|value| value_to_string(value).to_lowercase().contains(needle))
            .unwrap_or(false)
    })
}

fn matches_filter(node: &Node, columns: &[Column], active: &ActiveFilter) -> bool {
    if find_column(columns, &active.column).is_none() {
        return false;
    }
    node.field(&active.column)
        .and_then(FilterValue::from_value)
        .map(|value| active.accepted.contains(&value))
        .unwrap_or(false)
}

/// Distinct filter values of `key` over the top-level rows, in first-seen
/// order, with occurrence counts.
pub fn filter_options(roots: &[Node], key: &str) -> Vec<FilterOption> {
    let mut options: Vec<FilterOption> = Vec::new();
    let mut positions: HashMap<FilterValue, usize> = HashMap::new();

    for value in roots.iter().filter_map(|node| node.field(key).and_then(FilterValue::from_value)) {
        match positions.get(&value) {
            Some(&i) => options[i].count += 1,
            None => {
                positions.insert(value.clone(), options.len());
                options.push(FilterOption {
                    label: value.label(),
                    value,
                    count: 1,
                });
            }
        }
    }
    options
}

/// Filterable columns with their distinct-value counts.
pub fn filter_categories(roots: &[Node], columns: &[Column]) -> Vec<FilterCategory> {
    columns
        .iter()
        .filter(|column| column.filterable)
        .map(|column| FilterCategory {
            key: column.key.clone(),
            title: column.title.clone(),
            count: filter_options(roots, &column.key).len(),
        })
        .collect()
}
