//! Application-level coordination and workflow management.
//!
//! Turns panel interactions into table operations, runs dataset loading,
//! saving and export, and reports failures through the app state.

use crate::app::{AppState, TableEvent};
use crate::io::{AsyncLoader, LoadResult};
use crate::state::EditForm;
use crate::ui::details_panel::DetailsInteraction;
use crate::ui::dialogs::DialogInteraction;
use crate::ui::header::HeaderInteraction;
use crate::ui::pagination_bar::PaginationInteraction;
use crate::ui::panel_manager::PanelInteraction;
use crate::ui::table_panel::TablePanelInteraction;
use mltable::{DatasetDocument, MultiLevelTable, SampleConfig, TableConfig};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

pub struct TableCoordinator;

impl TableCoordinator {
    // ===== Dataset Workflows =====

    /// Starts loading `path` in the background. The previous dataset is
    /// dropped right away so the loading indicator shows.
    pub fn open_file(state: &mut AppState, loader: &mut AsyncLoader, path: PathBuf, ctx: &egui::Context) {
        log::info!("opening {}", path.display());
        state.reset_dataset_state();
        loader.start_file_load(path, ctx);
    }

    pub fn open_sample(state: &mut AppState, loader: &mut AsyncLoader) {
        state.reset_dataset_state();
        let document = loader.load_sample(&SampleConfig::default());
        Self::install_document(state, document, None);
    }

    /// Applies a finished background load. Returns true when a load completed.
    pub fn check_loading_completion(state: &mut AppState, loader: &mut AsyncLoader) -> bool {
        match loader.check_completion() {
            LoadResult::Success { document, path } => {
                Self::install_document(state, document, path);
                true
            }
            LoadResult::Error(error_msg) => {
                state.error_message = Some(format!("Error loading dataset: {}", error_msg));
                true
            }
            LoadResult::None => false,
        }
    }

    /// Builds a fresh table for `document` on top of the base configuration.
    pub fn install_document(state: &mut AppState, document: DatasetDocument, path: Option<PathBuf>) {
        let specs = document.column_specs();
        let columns = document.columns();
        let config = TableConfig {
            searchable_columns: document.searchable_columns.clone(),
            ..state.table_config.clone()
        };

        log::info!(
            "installing dataset: {} top-level rows, {} columns",
            document.data.len(),
            columns.len()
        );
        state.table = MultiLevelTable::new(columns, config)
            .with_dataset(document.data)
            .with_callbacks(state.events.callbacks());
        state.dataset.load(specs, path);
        state.view.reset();
        state.error_message = None;
    }

    fn save_document(state: &mut AppState, path: PathBuf) {
        let mut document = DatasetDocument::new(
            state.table.columns().iter().map(|column| column_spec_of(state, column)).collect(),
            state.table.roots().to_vec(),
        );
        document.searchable_columns = state.table.config().searchable_columns.clone();

        match document.save(&path) {
            Ok(()) => {
                state.view.set_status_message(format!("Saved {}", path.display()));
                state.dataset.mark_saved(path);
            }
            Err(e) => state.error_message = Some(format!("Error saving dataset: {}", e)),
        }
    }

    fn export(state: &mut AppState, path: PathBuf) {
        let scope = state.view.export_scope();
        let result = File::create(&path)
            .map_err(mltable::TableError::from)
            .and_then(|file| state.table.export_csv(BufWriter::new(file), scope));
        match result {
            Ok(count) => {
                log::info!("exported {} rows ({}) to {}", count, scope.label(), path.display());
                state
                    .view
                    .set_status_message(format!("Exported {} rows to {}", count, path.display()));
            }
            Err(e) => state.error_message = Some(format!("Error exporting CSV: {}", e)),
        }
    }

    // ===== Interaction Routing =====

    pub fn handle_interaction(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        interaction: PanelInteraction,
        ctx: &egui::Context,
    ) {
        match interaction {
            PanelInteraction::Header(header) => Self::handle_header(state, loader, header, ctx),
            PanelInteraction::Table(table) => Self::handle_table(state, table),
            PanelInteraction::Pagination(pagination) => Self::handle_pagination(state, pagination),
            PanelInteraction::Dialog(dialog) => Self::handle_dialog(state, dialog),
            PanelInteraction::Details(details) => Self::handle_details(state, details),
        }
    }

    fn handle_header(
        state: &mut AppState,
        loader: &mut AsyncLoader,
        interaction: HeaderInteraction,
        ctx: &egui::Context,
    ) {
        match interaction {
            HeaderInteraction::OpenFileRequested(path) => Self::open_file(state, loader, path, ctx),
            HeaderInteraction::OpenSampleRequested => Self::open_sample(state, loader),
            HeaderInteraction::SaveRequested(path) => Self::save_document(state, path),
            HeaderInteraction::ExportRequested(path) => Self::export(state, path),
            HeaderInteraction::SearchChanged(query) => state.table.set_search_query(query),
            HeaderInteraction::FilterChanged { key, accepted } => {
                if let Err(e) = state.table.set_active_filter(&key, accepted) {
                    state.error_message = Some(e.to_string());
                }
            }
            HeaderInteraction::FilterCleared => state.table.clear_active_filter(),
            HeaderInteraction::ExpandAllToggled => {
                if state.table.is_all_expanded() {
                    state.table.collapse_all();
                } else {
                    state.table.expand_all();
                }
            }
            HeaderInteraction::BulkDeleteRequested => {
                state.table.request_bulk_delete();
            }
        }
    }

    fn handle_table(state: &mut AppState, interaction: TablePanelInteraction) {
        match interaction {
            TablePanelInteraction::SortRequested(key) => {
                if let Err(e) = state.table.toggle_sort(&key) {
                    log::warn!("sort request ignored: {}", e);
                }
            }
            TablePanelInteraction::SelectAllToggled => {
                state.table.toggle_select_all();
            }
            TablePanelInteraction::RowClicked(id) => {
                state.table.row_click(&id);
            }
            TablePanelInteraction::ExpandToggled(id) => {
                state.table.toggle_expansion(&id);
            }
            TablePanelInteraction::SelectionToggled(id) => {
                state.table.toggle_selection(&id);
            }
            TablePanelInteraction::EditRequested(id) => {
                state.table.request_edit(&id);
            }
            TablePanelInteraction::DeleteRequested(id) => {
                state.table.request_delete(&id);
            }
        }
    }

    fn handle_details(state: &mut AppState, interaction: DetailsInteraction) {
        match interaction {
            DetailsInteraction::Closed => state.view.clear_details(),
            DetailsInteraction::EditSaved => Self::save_edit(state),
            DetailsInteraction::EditCancelled => {
                state.view.close_editor();
            }
        }
    }

    /// Writes the open editor's changes back into the dataset.
    fn save_edit(state: &mut AppState) {
        let Some(form) = state.view.close_editor() else {
            return;
        };
        let fields = form.changed_fields();
        let count = fields.len();
        if fields.is_empty() {
            return;
        }
        if state.table.update_node(form.id(), fields) {
            state.dataset.mark_dirty();
            state
                .view
                .set_status_message(format!("Saved {} fields of row {}", count, form.id()));
        } else {
            state.error_message = Some(format!("Row {} no longer exists", form.id()));
        }
    }

    fn handle_pagination(state: &mut AppState, interaction: PaginationInteraction) {
        match interaction {
            PaginationInteraction::PageRequested(index) => state.table.goto_page(index),
            PaginationInteraction::PreviousPage => state.table.previous_page(),
            PaginationInteraction::NextPage => state.table.next_page(),
            PaginationInteraction::PageSizeChanged(size) => {
                state.table.set_page_size(size);
                state.table_config.page_size = state.table.page_size();
            }
        }
    }

    fn handle_dialog(state: &mut AppState, interaction: DialogInteraction) {
        match interaction {
            DialogInteraction::DeleteConfirmed => {
                if let Some(request) = state.table.confirm_delete() {
                    let before = state.table.index().node_count();
                    state.table.apply_delete(&request);
                    let removed = before - state.table.index().node_count();

                    if let Some(id) = state.view.details_node() {
                        if !state.table.index().contains(id) {
                            state.view.clear_details();
                        }
                    }
                    state.dataset.mark_dirty();
                    state.view.set_status_message(format!("Deleted {} rows", removed));
                }
            }
            DialogInteraction::DeleteCancelled => state.table.cancel_delete(),
        }
    }

    // ===== Table Events =====

    /// Applies events queued by table callbacks during this frame.
    pub fn drain_table_events(state: &mut AppState) {
        for event in state.events.drain() {
            match event {
                TableEvent::RowClicked(id) => state.view.show_details(id),
                TableEvent::EditRequested(id) => {
                    if let Some(node) = state.table.find_node(&id) {
                        let form = EditForm::for_node(node, state.table.columns());
                        state.view.open_editor(form);
                    }
                }
                TableEvent::DeleteRequested(request) => {
                    log::debug!("delete requested for {} rows", request.ids().len());
                }
                TableEvent::SelectionChanged { count, all_selected } => {
                    log::debug!("selection changed: {} rows, all selected: {}", count, all_selected);
                }
            }
        }
    }
}

/// Column spec to write back, keeping the render hint the dataset came with.
fn column_spec_of(state: &AppState, column: &mltable::Column) -> mltable::ColumnSpec {
    mltable::ColumnSpec {
        key: column.key.clone(),
        title: Some(column.title.clone()),
        sortable: column.sortable,
        filterable: column.filterable,
        render: state.dataset.render_hint(&column.key).map(str::to_string),
        editable: column.editable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mltable::{Node, NodeId};

    fn sample_state() -> AppState {
        let mut state = AppState::new();
        let document = mltable::generate_document(&SampleConfig {
            roots: 12,
            depth: 1,
            fanout_min: 1,
            fanout_max: 1,
            seed: 3,
        });
        TableCoordinator::install_document(&mut state, document, None);
        state
    }

    #[test]
    fn test_install_document_uses_searchable_columns() {
        let state = sample_state();
        assert!(state.dataset.is_loaded());
        assert_eq!(state.table.total_items(), 12);
        assert_eq!(
            state.table.config().searchable_columns,
            vec!["resourceType", "name", "dateTime", "orchestration"]
        );
        assert_eq!(state.dataset.render_hint("status"), Some("status_badge"));
    }

    #[test]
    fn test_row_click_opens_details() {
        let mut state = sample_state();
        TableCoordinator::handle_table(&mut state, TablePanelInteraction::RowClicked(NodeId::from(1)));
        TableCoordinator::drain_table_events(&mut state);
        assert_eq!(state.view.details_node(), Some(&NodeId::from(1)));
    }

    #[test]
    fn test_confirmed_delete_prunes_and_closes_details() {
        let mut state = AppState::new();
        let document = DatasetDocument::new(
            Vec::new(),
            vec![
                Node::new(1).with_field("name", "a").with_children(vec![Node::new(2).with_field("name", "b")]),
                Node::new(3).with_field("name", "c"),
            ],
        );
        TableCoordinator::install_document(&mut state, document, None);
        state.view.show_details(NodeId::from(2));

        TableCoordinator::handle_table(&mut state, TablePanelInteraction::DeleteRequested(NodeId::from(1)));
        assert!(state.table.pending_delete().is_some());
        TableCoordinator::handle_dialog(&mut state, DialogInteraction::DeleteConfirmed);

        assert_eq!(state.table.index().node_count(), 1);
        assert!(state.view.details_node().is_none());
        assert!(state.dataset.is_dirty());
        assert_eq!(state.view.status_message(), Some("Deleted 2 rows"));
    }

    #[test]
    fn test_edit_and_save_updates_row() {
        let mut state = sample_state();
        TableCoordinator::handle_table(&mut state, TablePanelInteraction::EditRequested(NodeId::from(1)));
        TableCoordinator::drain_table_events(&mut state);

        let form = state.view.editor_mut().expect("editor open");
        assert_eq!(form.id(), &NodeId::from(1));
        let keys: Vec<String> = form.fields_mut().iter().map(|field| field.key.clone()).collect();
        assert_eq!(keys, vec!["name", "dateTime", "orchestration"]);
        form.fields_mut()[0].text = "renamed".to_string();

        TableCoordinator::handle_details(&mut state, DetailsInteraction::EditSaved);

        let node = state.table.find_node(&NodeId::from(1)).expect("row kept");
        assert_eq!(node.field("name"), Some(&serde_json::Value::from("renamed")));
        assert!(state.view.editor().is_none());
        assert_eq!(state.view.details_node(), Some(&NodeId::from(1)));
        assert!(state.dataset.is_dirty());
    }

    #[test]
    fn test_cancelled_edit_leaves_row_untouched() {
        let mut state = sample_state();
        let before = state.table.find_node(&NodeId::from(1)).cloned();
        TableCoordinator::handle_table(&mut state, TablePanelInteraction::EditRequested(NodeId::from(1)));
        TableCoordinator::drain_table_events(&mut state);
        if let Some(form) = state.view.editor_mut() {
            form.fields_mut()[0].text = "discarded".to_string();
        }

        TableCoordinator::handle_details(&mut state, DetailsInteraction::EditCancelled);

        assert_eq!(state.table.find_node(&NodeId::from(1)).cloned(), before);
        assert!(!state.dataset.is_dirty());
    }

    #[test]
    fn test_page_size_change_updates_base_config() {
        let mut state = sample_state();
        TableCoordinator::handle_pagination(&mut state, PaginationInteraction::PageSizeChanged(20));
        assert_eq!(state.table.page_size(), 20);
        assert_eq!(state.table_config.page_size, 20);
        assert_eq!(state.table.page_count(), 1);
    }

    #[test]
    fn test_filter_on_unfilterable_column_reports_error() {
        let mut state = sample_state();
        TableCoordinator::handle_header(
            &mut state,
            &mut AsyncLoader::new(),
            HeaderInteraction::FilterChanged {
                key: "name".to_string(),
                accepted: vec!["x".into()],
            },
            &egui::Context::default(),
        );
        assert!(state.error_message.is_some());
        assert!(state.table.active_filter().is_none());
    }
}
