//! Loaded dataset bookkeeping.
//!
//! The rows themselves live in the table; this keeps what the host needs
//! around them: where they came from and the column render hints.

use mltable::ColumnSpec;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct DatasetState {
    /// Source file (None for generated sample data)
    file_path: Option<PathBuf>,
    column_specs: Vec<ColumnSpec>,
    loaded: bool,
    /// Set after a delete until the dataset is saved
    dirty: bool,
}

impl DatasetState {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Queries =====

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Host renderer name declared for a column, if any.
    pub fn render_hint(&self, key: &str) -> Option<&str> {
        self.column_specs
            .iter()
            .find(|spec| spec.key == key)
            .and_then(|spec| spec.render.as_deref())
    }

    pub fn source_label(&self) -> String {
        match &self.file_path {
            Some(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            None if self.loaded => "Sample data".to_string(),
            None => "No dataset".to_string(),
        }
    }

    // ===== Mutations =====

    pub fn load(&mut self, column_specs: Vec<ColumnSpec>, path: Option<PathBuf>) {
        self.column_specs = column_specs;
        self.file_path = path;
        self.loaded = true;
        self.dirty = false;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_saved(&mut self, path: PathBuf) {
        self.file_path = Some(path);
        self.dirty = false;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
