//! Row editor buffers.
//!
//! One text buffer per editable column, seeded from the node when the
//! editor opens. Saving turns the changed buffers back into JSON values.

use mltable::{value_to_string, Column, Node, NodeId};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct EditField {
    pub key: String,
    pub title: String,
    pub text: String,
    original: Option<Value>,
}

impl EditField {
    fn is_changed(&self) -> bool {
        let before = self.original.as_ref().map(value_to_string).unwrap_or_default();
        self.text != before
    }

    /// Strings stay strings; other values are re-read as JSON when the text
    /// still parses, so a numeric field keeps its type.
    fn to_value(&self) -> Value {
        match &self.original {
            Some(Value::String(_)) | None => Value::String(self.text.clone()),
            Some(_) => serde_json::from_str::<Value>(&self.text)
                .ok()
                .filter(|value| !value.is_string())
                .unwrap_or_else(|| Value::String(self.text.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    id: NodeId,
    fields: Vec<EditField>,
}

impl EditForm {
    /// Seeds a form for `node` with one field per editable column.
    pub fn for_node(node: &Node, columns: &[Column]) -> Self {
        let fields = columns
            .iter()
            .filter(|column| column.editable)
            .map(|column| {
                let original = node.field(&column.key).cloned();
                EditField {
                    key: column.key.clone(),
                    title: column.title.clone(),
                    text: original.as_ref().map(value_to_string).unwrap_or_default(),
                    original,
                }
            })
            .collect();
        Self {
            id: node.id.clone(),
            fields,
        }
    }

    // ===== Queries =====

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn has_changes(&self) -> bool {
        self.fields.iter().any(EditField::is_changed)
    }

    /// Changed fields only, ready for `MultiLevelTable::update_node`.
    pub fn changed_fields(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .filter(|field| field.is_changed())
            .map(|field| (field.key.clone(), field.to_value()))
            .collect()
    }

    // ===== Mutations =====

    pub fn fields_mut(&mut self) -> &mut [EditField] {
        &mut self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> EditForm {
        let node = Node::new(7)
            .with_field("name", "api")
            .with_field("value", 12)
            .with_field("status", "Active");
        let columns = vec![
            Column::new("name", "Name").editable(true),
            Column::new("value", "Value").editable(true),
            Column::new("status", "Status"),
            Column::new("owner", "Owner").editable(true),
        ];
        EditForm::for_node(&node, &columns)
    }

    #[test]
    fn test_only_editable_columns_are_offered() {
        let form = form();
        let keys: Vec<&str> = form.fields.iter().map(|field| field.key.as_str()).collect();
        assert_eq!(keys, vec!["name", "value", "owner"]);
        assert_eq!(form.id(), &NodeId::from(7));
        assert!(!form.has_changes());
    }

    #[test]
    fn test_changed_fields_keep_value_types() {
        let mut form = form();
        form.fields_mut()[0].text = "gateway".to_string();
        form.fields_mut()[1].text = "40".to_string();
        form.fields_mut()[2].text = "ops".to_string();

        let changed = form.changed_fields();
        assert!(form.has_changes());
        assert_eq!(changed.get("name"), Some(&Value::from("gateway")));
        assert_eq!(changed.get("value"), Some(&Value::from(40)));
        assert_eq!(changed.get("owner"), Some(&Value::from("ops")));
    }

    #[test]
    fn test_unparsable_number_falls_back_to_text() {
        let mut form = form();
        form.fields_mut()[1].text = "about 40".to_string();
        assert_eq!(form.changed_fields().get("value"), Some(&Value::from("about 40")));
        assert_eq!(form.changed_fields().len(), 1);
    }
}
