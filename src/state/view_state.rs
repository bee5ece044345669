//! Transient UI state: text buffers, menus and the details target.

use crate::state::EditForm;
use mltable::{ExportScope, NodeId};

#[derive(Debug, Default)]
pub struct ViewState {
    search_text: String,
    /// Column currently picked in the filter dropdown
    filter_column: Option<String>,
    export_scope: ExportScope,
    details_node: Option<NodeId>,
    /// Open row editor; always targets `details_node`
    editor: Option<EditForm>,
    status_message: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn filter_column(&self) -> Option<&str> {
        self.filter_column.as_deref()
    }

    pub fn export_scope(&self) -> ExportScope {
        self.export_scope
    }

    pub fn details_node(&self) -> Option<&NodeId> {
        self.details_node.as_ref()
    }

    pub fn editor(&self) -> Option<&EditForm> {
        self.editor.as_ref()
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    // ===== Mutations =====

    pub fn search_text_mut(&mut self) -> &mut String {
        &mut self.search_text
    }

    pub fn set_filter_column(&mut self, key: Option<String>) {
        self.filter_column = key;
    }

    pub fn set_export_scope(&mut self, scope: ExportScope) {
        self.export_scope = scope;
    }

    /// Shows the details of `id`. An editor for another row is dropped.
    pub fn show_details(&mut self, id: NodeId) {
        if self.editor.as_ref().is_some_and(|form| form.id() != &id) {
            self.editor = None;
        }
        self.details_node = Some(id);
    }

    /// Opens the editor in the details panel.
    pub fn open_editor(&mut self, form: EditForm) {
        self.details_node = Some(form.id().clone());
        self.editor = Some(form);
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditForm> {
        self.editor.as_mut()
    }

    pub fn close_editor(&mut self) -> Option<EditForm> {
        self.editor.take()
    }

    pub fn clear_details(&mut self) {
        self.details_node = None;
        self.editor = None;
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Resets everything tied to the previous dataset.
    pub fn reset(&mut self) {
        self.search_text.clear();
        self.filter_column = None;
        self.details_node = None;
        self.editor = None;
    }
}
