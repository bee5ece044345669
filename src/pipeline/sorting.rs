//! Sorting of the filtered top-level sequence.
//!
//! Only top-level rows are reordered. Children always keep document order.

use crate::column::{find_column, Column};
use crate::node::{value_to_string, Node};
use serde_json::Value;
use std::cmp::Ordering;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDir {
    Asc,
    Desc,
}

/// Complete sorting specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: String,
    pub dir: SortDir,
}

impl SortSpec {
    pub fn new(key: impl Into<String>, dir: SortDir) -> Self {
        Self { key: key.into(), dir }
    }
}

/// Next sort state after a header click on `key`.
///
/// A different column starts ascending. The same column goes ascending,
/// descending, then back to unsorted when `allow_clear` is set, otherwise
/// back to ascending.
pub fn next_sort_on_click(current: Option<&SortSpec>, key: &str, allow_clear: bool) -> Option<SortSpec> {
    match current {
        Some(spec) if spec.key == key => match spec.dir {
            SortDir::Asc => Some(SortSpec::new(key, SortDir::Desc)),
            SortDir::Desc if allow_clear => None,
            SortDir::Desc => Some(SortSpec::new(key, SortDir::Asc)),
        },
        _ => Some(SortSpec::new(key, SortDir::Asc)),
    }
}

/// Ascending comparison of two raw field values.
///
/// Two numbers compare numerically; anything else compares the string forms
/// case-sensitively. A missing field compares as the empty string.
pub fn default_compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => x.to_string().cmp(&y.to_string()),
        },
        _ => {
            let x = a.map(value_to_string).unwrap_or_default();
            let y = b.map(value_to_string).unwrap_or_default();
            x.cmp(&y)
        }
    }
}

/// Compares two nodes on `column` in direction `dir`.
pub fn compare_nodes(a: &Node, b: &Node, column: &Column, dir: SortDir) -> Ordering {
    let ordering = match &column.custom_sort {
        Some(compare) => compare(a, b, &column.key),
        None => default_compare(a.field(&column.key), b.field(&column.key)),
    };
    match dir {
        SortDir::Asc => ordering,
        SortDir::Desc => ordering.reverse(),
    }
}

/// Stable-sorts `rows` in place by `spec`.
///
/// A spec naming an undeclared column leaves the order untouched.
pub fn sort_top_level(rows: &mut [&Node], columns: &[Column], spec: Option<&SortSpec>) {
    let Some(spec) = spec else {
        return;
    };
    let Some(column) = find_column(columns, &spec.key) else {
        log::debug!("sort column '{}' is not declared, order unchanged", spec.key);
        return;
    };
    rows.sort_by(|a, b| compare_nodes(a, b, column, spec.dir));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ids(rows: &[&Node]) -> Vec<String> {
        rows.iter().map(|n| n.id.to_string()).collect()
    }

    #[test]
    fn test_click_cycle_with_clear() {
        let first = next_sort_on_click(None, "name", true);
        assert_eq!(first, Some(SortSpec::new("name", SortDir::Asc)));
        let second = next_sort_on_click(first.as_ref(), "name", true);
        assert_eq!(second, Some(SortSpec::new("name", SortDir::Desc)));
        assert_eq!(next_sort_on_click(second.as_ref(), "name", true), None);
    }

    #[test]
    fn test_click_cycle_without_clear_toggles() {
        let desc = SortSpec::new("name", SortDir::Desc);
        assert_eq!(
            next_sort_on_click(Some(&desc), "name", false),
            Some(SortSpec::new("name", SortDir::Asc))
        );
    }

    #[test]
    fn test_click_other_column_resets_to_ascending() {
        let desc = SortSpec::new("name", SortDir::Desc);
        assert_eq!(
            next_sort_on_click(Some(&desc), "status", true),
            Some(SortSpec::new("status", SortDir::Asc))
        );
    }

    #[test]
    fn test_default_compare_numbers_and_strings() {
        assert_eq!(default_compare(Some(&json!(9)), Some(&json!(10))), Ordering::Less);
        assert_eq!(default_compare(Some(&json!(2.5)), Some(&json!(2))), Ordering::Greater);
        // Mixed types fall back to string comparison: "10" < "9".
        assert_eq!(default_compare(Some(&json!(10)), Some(&json!("9"))), Ordering::Less);
        // Case-sensitive: uppercase sorts first.
        assert_eq!(default_compare(Some(&json!("Z")), Some(&json!("a"))), Ordering::Less);
        assert_eq!(default_compare(None, Some(&json!("a"))), Ordering::Less);
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let nodes = vec![
            Node::new(1).with_field("name", "B"),
            Node::new(2).with_field("name", "A"),
        ];
        let columns = vec![Column::new("name", "Name")];

        let mut rows: Vec<&Node> = nodes.iter().collect();
        sort_top_level(&mut rows, &columns, Some(&SortSpec::new("name", SortDir::Asc)));
        assert_eq!(ids(&rows), vec!["2", "1"]);

        let mut rows: Vec<&Node> = nodes.iter().collect();
        sort_top_level(&mut rows, &columns, Some(&SortSpec::new("name", SortDir::Desc)));
        assert_eq!(ids(&rows), vec!["1", "2"]);
    }

    #[test]
    fn test_sort_is_stable_in_both_directions() {
        let nodes: Vec<Node> = (1..=4).map(|i| Node::new(i).with_field("group", "same")).collect();
        let columns = vec![Column::new("group", "Group")];

        for dir in [SortDir::Asc, SortDir::Desc] {
            let mut rows: Vec<&Node> = nodes.iter().collect();
            sort_top_level(&mut rows, &columns, Some(&SortSpec::new("group", dir)));
            assert_eq!(ids(&rows), vec!["1", "2", "3", "4"]);
        }
    }

    #[test]
    fn test_custom_comparator_inverted_for_descending() {
        let nodes = vec![
            Node::new(1).with_field("size", "medium"),
            Node::new(2).with_field("size", "small"),
            Node::new(3).with_field("size", "large"),
        ];
        let rank = |n: &Node| match n.field("size").and_then(|v| v.as_str()) {
            Some("small") => 0,
            Some("medium") => 1,
            _ => 2,
        };
        let columns = vec![Column::new("size", "Size")
            .with_custom_sort(move |a, b, key| {
                assert_eq!(key, "size");
                rank(a).cmp(&rank(b))
            })];

        let mut rows: Vec<&Node> = nodes.iter().collect();
        sort_top_level(&mut rows, &columns, Some(&SortSpec::new("size", SortDir::Asc)));
        assert_eq!(ids(&rows), vec!["2", "1", "3"]);

        sort_top_level(&mut rows, &columns, Some(&SortSpec::new("size", SortDir::Desc)));
        assert_eq!(ids(&rows), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_undeclared_column_keeps_order() {
        let nodes = vec![Node::new(2).with_field("x", 1), Node::new(1).with_field("x", 0)];
        let mut rows: Vec<&Node> = nodes.iter().collect();
        sort_top_level(&mut rows, &[], Some(&SortSpec::new("x", SortDir::Asc)));
        assert_eq!(ids(&rows), vec!["2", "1"]);
    }
}
