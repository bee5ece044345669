//! UI layout state management.
//!
//! Column widths are keyed by column key so they survive dataset reloads
//! and column reordering.

use std::collections::HashMap;

pub const DEFAULT_COLUMN_WIDTH: f32 = 150.0;
pub const DEFAULT_EXPAND_WIDTH: f32 = 110.0;
pub const MIN_COLUMN_WIDTH: f32 = 50.0;

/// State related to UI layout and sizing.
#[derive(Debug, Clone)]
pub struct LayoutState {
    /// Width of the leading column holding the checkbox, indentation and expander
    expand_width: f32,
    column_widths: HashMap<String, f32>,
}

impl Default for LayoutState {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutState {
    pub fn new() -> Self {
        Self::with_widths(HashMap::new(), DEFAULT_EXPAND_WIDTH)
    }

    /// Creates a layout from persisted widths.
    pub fn with_widths(column_widths: HashMap<String, f32>, expand_width: f32) -> Self {
        Self {
            expand_width: expand_width.max(MIN_COLUMN_WIDTH),
            column_widths,
        }
    }

    // ===== Layout Queries =====

    pub fn expand_width(&self) -> f32 {
        self.expand_width
    }

    pub fn column_width(&self, key: &str) -> f32 {
        self.column_widths.get(key).copied().unwrap_or(DEFAULT_COLUMN_WIDTH)
    }

    pub fn column_widths(&self) -> &HashMap<String, f32> {
        &self.column_widths
    }

    // ===== Layout Mutations =====

    /// Grows or shrinks a column by `delta`, never below the minimum width.
    pub fn resize_column(&mut self, key: &str, delta: f32) {
        let width = (self.column_width(key) + delta).max(MIN_COLUMN_WIDTH);
        self.column_widths.insert(key.to_string(), width);
    }

    pub fn resize_expand_column(&mut self, delta: f32) {
        self.expand_width = (self.expand_width + delta).max(MIN_COLUMN_WIDTH);
    }
}
