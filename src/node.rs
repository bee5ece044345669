//! Tree records and scalar value helpers.
//!
//! A [`Node`] is one record of the hierarchical dataset. Its `fields` keep
//! insertion order (serde_json is built with `preserve_order`) so column
//! inference and detail views are stable between renders.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a node, unique within one dataset.
///
/// The integer `1` and the string `"1"` are different ids. Numbers that do
/// not fit an `i64` (large unsigned values, fractions) keep their canonical
/// JSON text in `Number`, so no two distinct numeric ids collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Int(i64),
    Number(String),
    Text(String),
}

impl NodeId {
    fn from_f64(n: f64) -> Option<Self> {
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            return Some(NodeId::Int(n as i64));
        }
        serde_json::Number::from_f64(n).map(|n| NodeId::Number(n.to_string()))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Number(s) | NodeId::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            NodeId::Int(n) => serializer.serialize_i64(*n),
            NodeId::Number(s) => match s.parse::<serde_json::Number>() {
                Ok(n) => n.serialize(serializer),
                Err(_) => serializer.serialize_str(s),
            },
            NodeId::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(NodeIdVisitor)
    }
}

struct NodeIdVisitor;

impl Visitor<'_> for NodeIdVisitor {
    type Value = NodeId;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> std::result::Result<NodeId, E> {
        Ok(NodeId::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> std::result::Result<NodeId, E> {
        Ok(NodeId::from(n))
    }

    fn visit_f64<E: de::Error>(self, n: f64) -> std::result::Result<NodeId, E> {
        NodeId::from_f64(n).ok_or_else(|| E::custom(format!("id {} is not a finite number", n)))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> std::result::Result<NodeId, E> {
        Ok(NodeId::Text(s.to_string()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> std::result::Result<NodeId, E> {
        Ok(NodeId::Text(s))
    }
}

impl From<i32> for NodeId {
    fn from(n: i32) -> Self {
        NodeId::Int(n as i64)
    }
}

impl From<i64> for NodeId {
    fn from(n: i64) -> Self {
        NodeId::Int(n)
    }
}

impl From<u64> for NodeId {
    fn from(n: u64) -> Self {
        match i64::try_from(n) {
            Ok(n) => NodeId::Int(n),
            Err(_) => NodeId::Number(n.to_string()),
        }
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId::Text(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId::Text(s)
    }
}

/// Boolean field that hides a row's edit and delete actions when false.
pub const ACTIONS_FIELD: &str = "showActionButtons";

/// A single record of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    /// Creates a leaf node with no fields.
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Builder-style children setter.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Returns the raw value stored under `key`, if any.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Whether hosts should offer edit and delete actions for this row.
    /// Anything but an explicit `false` in [`ACTIONS_FIELD`] enables them.
    pub fn shows_actions(&self) -> bool {
        !matches!(self.fields.get(ACTIONS_FIELD), Some(Value::Bool(false)))
    }

    /// Display name used by delete confirmations: the `name` field when it is
    /// a string, otherwise `Item <id>`.
    pub fn display_name(&self) -> String {
        match self.fields.get("name") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => format!("Item {}", self.id),
        }
    }
}

/// Stringifies a raw field value the way cells display it by default.
///
/// Null becomes the empty string; strings are returned without quotes;
/// composite values fall back to compact JSON.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Stringifies an optional field value; a missing field is the empty string.
pub fn field_to_string(value: Option<&Value>) -> String {
    value.map(value_to_string).unwrap_or_default()
}

/// Scalar key used by category filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterValue {
    Bool(bool),
    /// Canonical textual form of a JSON number.
    Number(String),
    Text(String),
}

impl FilterValue {
    /// Converts a raw value into a filter key. Null and composite values have
    /// no filter key.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(FilterValue::Text(s.clone())),
            Value::Number(n) => Some(FilterValue::Number(n.to_string())),
            Value::Bool(b) => Some(FilterValue::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Label shown in filter dropdowns.
    pub fn label(&self) -> String {
        match self {
            FilterValue::Bool(b) => b.to_string(),
            FilterValue::Number(n) | FilterValue::Text(n) => n.clone(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::Text(s.to_string())
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        FilterValue::Number(n.to_string())
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        FilterValue::Number(n.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

/// Returns a copy of `roots` with every node whose id is in `ids` removed,
/// together with its subtree.
pub fn prune_ids(roots: &[Node], ids: &HashSet<NodeId>) -> Vec<Node> {
    roots
        .iter()
        .filter(|node| !ids.contains(&node.id))
        .map(|node| Node {
            id: node.id.clone(),
            fields: node.fields.clone(),
            children: prune_ids(&node.children, ids),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_deserializes_flattened_fields_in_order() {
        let node: Node = serde_json::from_value(json!({
            "id": 1,
            "zeta": "z",
            "alpha": 2,
            "children": [{"id": "child", "name": "C"}]
        }))
        .unwrap();

        assert_eq!(node.id, NodeId::Int(1));
        let keys: Vec<&str> = node.fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.children[0].id, NodeId::Text("child".to_string()));
        assert!(!node.children[0].has_children());
    }

    #[test]
    fn test_int_and_text_ids_are_distinct() {
        assert_ne!(NodeId::from(1), NodeId::from("1"));
    }

    #[test]
    fn test_large_unsigned_id_does_not_wrap() {
        let big = NodeId::from(u64::MAX);
        assert_ne!(big, NodeId::from(-1i64));
        assert_eq!(big.to_string(), "18446744073709551615");
        assert_eq!(NodeId::from(7u64), NodeId::from(7));
    }

    #[test]
    fn test_numeric_ids_outside_i64_parse_and_round_trip() {
        let nodes: Vec<Node> =
            serde_json::from_str(r#"[{"id": 18446744073709551615}, {"id": 1.5}, {"id": 2.0}, {"id": -1}]"#)
                .unwrap();
        let ids: Vec<NodeId> = nodes.iter().map(|node| node.id.clone()).collect();

        assert_eq!(ids[0], NodeId::Number("18446744073709551615".to_string()));
        assert_eq!(ids[1], NodeId::Number("1.5".to_string()));
        assert_eq!(ids[2], NodeId::Int(2));
        assert_eq!(ids[3], NodeId::Int(-1));

        let json = serde_json::to_string(&nodes).unwrap();
        assert_eq!(json, r#"[{"id":18446744073709551615},{"id":1.5},{"id":2},{"id":-1}]"#);
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&Value::Null), "");
        assert_eq!(value_to_string(&json!("abc")), "abc");
        assert_eq!(value_to_string(&json!(42)), "42");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(field_to_string(None), "");
    }

    #[test]
    fn test_filter_value_rejects_composites() {
        assert_eq!(FilterValue::from_value(&json!("x")), Some(FilterValue::from("x")));
        assert_eq!(FilterValue::from_value(&json!(7)), Some(FilterValue::from(7)));
        assert_eq!(FilterValue::from_value(&Value::Null), None);
        assert_eq!(FilterValue::from_value(&json!([1, 2])), None);
        assert_eq!(FilterValue::from_value(&json!({"a": 1})), None);
    }

    #[test]
    fn test_actions_hidden_only_by_explicit_false() {
        assert!(Node::new(1).shows_actions());
        assert!(Node::new(1).with_field(ACTIONS_FIELD, true).shows_actions());
        assert!(Node::new(1).with_field(ACTIONS_FIELD, "no").shows_actions());
        assert!(!Node::new(1).with_field(ACTIONS_FIELD, false).shows_actions());
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(Node::new(3).with_field("name", "db").display_name(), "db");
        assert_eq!(Node::new(3).display_name(), "Item 3");
    }

    #[test]
    fn test_prune_ids_removes_subtrees() {
        let roots = vec![
            Node::new(1).with_children(vec![
                Node::new(10),
                Node::new(11).with_children(vec![Node::new(110)]),
            ]),
            Node::new(2),
        ];
        let ids: HashSet<NodeId> = [NodeId::from(11), NodeId::from(2)].into_iter().collect();

        let pruned = prune_ids(&roots, &ids);

        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].children.len(), 1);
        assert_eq!(pruned[0].children[0].id, NodeId::from(10));
    }
}
