//! Table configuration.
//!
//! Optional capabilities are gated here instead of through separate table
//! variants. The struct is serde-friendly so hosts can keep it in JSON next
//! to the dataset.

use serde::{Deserialize, Serialize};

/// Page sizes offered when the configuration does not list its own.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 20, 50, 100];

pub const DEFAULT_PAGE_SIZE: usize = 10;

pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What to do when a node id repeats on its own ancestor path while rows are
/// being emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// Skip the offending branch and log a warning.
    #[default]
    Truncate,
    /// Abort the render pass with an error.
    Error,
}

/// Which top-level ids "select all" covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectAllScope {
    /// Every top-level node that passes search and filter.
    #[default]
    Filtered,
    /// Only the top-level nodes on the current page.
    Page,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub sortable: bool,
    pub selectable: bool,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Keys searched by free-text search. Empty means every declared column.
    pub searchable_columns: Vec<String>,
    /// Whether the header click cycle passes through "no sort".
    pub allow_clear_sort: bool,
    pub max_depth: usize,
    pub cycle_policy: CyclePolicy,
    pub select_all_scope: SelectAllScope,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            sortable: true,
            selectable: true,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            searchable_columns: Vec::new(),
            allow_clear_sort: true,
            max_depth: DEFAULT_MAX_DEPTH,
            cycle_policy: CyclePolicy::Truncate,
            select_all_scope: SelectAllScope::Filtered,
        }
    }
}

impl TableConfig {
    /// Parses a configuration from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sorted, deduplicated, non-zero page size options. Falls back to the
    /// defaults when the configured list has no usable entry.
    pub fn normalized_page_size_options(&self) -> Vec<usize> {
        let mut options: Vec<usize> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|&size| size > 0)
            .collect();
        options.sort_unstable();
        options.dedup();
        if options.is_empty() {
            DEFAULT_PAGE_SIZE_OPTIONS.to_vec()
        } else {
            options
        }
    }
}
