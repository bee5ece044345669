//! Column declarations and the cell rendering contract.

use crate::node::{field_to_string, value_to_string, Node};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Custom cell renderer: `(value, node) -> displayable`.
///
/// Must be pure. A panic inside it is not caught by the table.
pub type CellRenderFn = Arc<dyn Fn(&Value, &Node) -> String + Send + Sync>;

/// Custom comparator: `(a, b, column_key) -> ordering` for ascending order.
pub type CustomSortFn = Arc<dyn Fn(&Node, &Node, &str) -> Ordering + Send + Sync>;

/// Display and behaviour declaration for one column.
#[derive(Clone)]
pub struct Column {
    pub key: String,
    pub title: String,
    pub render: Option<CellRenderFn>,
    /// `None` follows the table-level `sortable` flag.
    pub sortable: Option<bool>,
    pub custom_sort: Option<CustomSortFn>,
    pub filterable: bool,
    /// Hosts offer the field for editing in their row editor.
    pub editable: bool,
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("editable", &self.editable)
            .field("render", &self.render.is_some())
            .field("custom_sort", &self.custom_sort.is_some())
            .finish()
    }
}

impl Column {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            render: None,
            sortable: None,
            custom_sort: None,
            filterable: false,
            editable: false,
        }
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = Some(sortable);
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Value, &Node) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    pub fn with_custom_sort<F>(mut self, compare: F) -> Self
    where
        F: Fn(&Node, &Node, &str) -> Ordering + Send + Sync + 'static,
    {
        self.custom_sort = Some(Arc::new(compare));
        self
    }

    /// Whether clicking this column's header sorts, given the table default.
    pub fn is_sortable(&self, table_default: bool) -> bool {
        self.sortable.unwrap_or(table_default)
    }

    /// Resolves the displayable text of this column for `node`.
    ///
    /// With a custom renderer the raw value (null when the field is missing)
    /// is passed through it; otherwise the value's string form is used.
    pub fn display(&self, node: &Node) -> String {
        match &self.render {
            Some(render) => {
                let value = node.field(&self.key).unwrap_or(&Value::Null);
                render(value, node)
            }
            None => field_to_string(node.field(&self.key)),
        }
    }

    /// Raw string form of this column's value, ignoring any custom renderer.
    pub fn raw_text(&self, node: &Node) -> String {
        node.field(&self.key).map(value_to_string).unwrap_or_default()
    }
}

/// Serializable column declaration used by dataset documents.
///
/// `render` names a host-side renderer; the core does not interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sortable: Option<bool>,
    #[serde(default)]
    pub filterable: bool,
    #[serde(default)]
    pub render: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub editable: bool,
}

impl ColumnSpec {
    /// Converts into a [`Column`] without a renderer. The title defaults to
    /// the key.
    pub fn into_column(self) -> Column {
        let title = self.title.unwrap_or_else(|| self.key.clone());
        Column {
            key: self.key,
            title,
            render: None,
            sortable: self.sortable,
            custom_sort: None,
            filterable: self.filterable,
            editable: self.editable,
        }
    }
}

/// Infers column specs from the union of top-level field keys, in
/// first-seen order.
pub fn infer_column_specs(roots: &[Node]) -> Vec<ColumnSpec> {
    let mut specs: Vec<ColumnSpec> = Vec::new();
    for node in roots {
        for key in node.fields.keys() {
            if !specs.iter().any(|spec| &spec.key == key) {
                specs.push(ColumnSpec {
                    key: key.clone(),
                    title: None,
                    sortable: None,
                    filterable: false,
                    render: None,
                    editable: false,
                });
            }
        }
    }
    specs
}

/// Looks up a column by key.
pub fn find_column<'c>(columns: &'c [Column], key: &str) -> Option<&'c Column> {
    columns.iter().find(|column| column.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_without_renderer_stringifies() {
        let node = Node::new(1).with_field("value", 12).with_field("empty", Value::Null);
        assert_eq!(Column::new("value", "Value").display(&node), "12");
        assert_eq!(Column::new("empty", "Empty").display(&node), "");
        assert_eq!(Column::new("missing", "Missing").display(&node), "");
    }

    #[test]
    fn test_display_with_renderer_receives_raw_value_and_node() {
        let node = Node::new(7).with_field("status", "Active");
        let column = Column::new("status", "Status")
            .with_render(|value, node| format!("{}#{}", value_to_string(value), node.id));
        assert_eq!(column.display(&node), "Active#7");
        assert_eq!(column.raw_text(&node), "Active");
    }

    #[test]
    fn test_renderer_gets_null_for_missing_field() {
        let node = Node::new(1);
        let column = Column::new("x", "X").with_render(|value, _| {
            if value.is_null() { "n/a".to_string() } else { "set".to_string() }
        });
        assert_eq!(column.display(&node), "n/a");
    }

    #[test]
    fn test_sortable_follows_table_default() {
        assert!(Column::new("a", "A").is_sortable(true));
        assert!(!Column::new("a", "A").is_sortable(false));
        assert!(!Column::new("a", "A").sortable(false).is_sortable(true));
    }

    #[test]
    fn test_column_spec_defaults() {
        let spec: ColumnSpec = serde_json::from_value(json!({"key": "name"})).unwrap();
        let column = spec.into_column();
        assert_eq!(column.title, "name");
        assert!(!column.filterable);
        assert_eq!(column.sortable, None);
    }

    #[test]
    fn test_infer_column_specs_first_seen_order() {
        let roots = vec![
            Node::new(1).with_field("name", "a").with_field("status", "x"),
            Node::new(2).with_field("value", 1).with_field("name", "b"),
        ];
        let keys: Vec<String> = infer_column_specs(&roots).into_iter().map(|s| s.key).collect();
        assert_eq!(keys, vec!["name", "status", "value"]);
    }
}
