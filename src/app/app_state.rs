//! Centralized application state for the table viewer.
//!
//! Composes focused state components; the table itself owns every piece of
//! view state that belongs to the data (sort, filter, pages, selection).

use crate::app::TableEvents;
use crate::state::{DatasetState, LayoutState, ThemeState, ViewState};
use mltable::{MultiLevelTable, TableConfig};

pub struct AppState {
    // ===== Focused State Components =====
    pub table: MultiLevelTable,
    pub dataset: DatasetState,
    pub view: ViewState,
    pub theme: ThemeState,
    pub layout: LayoutState,

    // ===== Top-Level State =====
    /// Base configuration applied to every loaded dataset
    pub table_config: TableConfig,
    pub events: TableEvents,
    pub error_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(ThemeState::new(), LayoutState::new(), TableConfig::default())
    }

    /// Creates a state from persisted settings.
    pub fn with_settings(theme: ThemeState, layout: LayoutState, table_config: TableConfig) -> Self {
        let events = TableEvents::new();
        let table = MultiLevelTable::new(Vec::new(), table_config.clone())
            .with_callbacks(events.callbacks());
        Self {
            table,
            dataset: DatasetState::new(),
            view: ViewState::new(),
            theme,
            layout,
            table_config,
            events,
            error_message: None,
        }
    }

    // ===== High-Level Coordination Methods =====

    /// Drops the current dataset, e.g. while a new one loads.
    pub fn reset_dataset_state(&mut self) {
        self.table = MultiLevelTable::new(Vec::new(), self.table_config.clone())
            .with_callbacks(self.events.callbacks());
        self.dataset.clear();
        self.view.reset();
        self.error_message = None;
        // Stale events refer to the old rows.
        self.events.drain();
    }
}
