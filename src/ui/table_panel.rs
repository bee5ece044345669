//! Table panel UI rendering
//!
//! Header plus the rows of the current page, children of expanded rows
//! included.

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::rendering::row_renderer::{self, RowContext, RowInteraction};
use crate::ui::table_header::{self, TableHeaderInteraction};
use egui::{RichText, ScrollArea};
use mltable::NodeId;

pub enum TablePanelInteraction {
    SortRequested(String),
    SelectAllToggled,
    RowClicked(NodeId),
    ExpandToggled(NodeId),
    SelectionToggled(NodeId),
    EditRequested(NodeId),
    DeleteRequested(NodeId),
}

impl From<RowInteraction> for TablePanelInteraction {
    fn from(interaction: RowInteraction) -> Self {
        match interaction {
            RowInteraction::Clicked(id) => TablePanelInteraction::RowClicked(id),
            RowInteraction::ExpandToggled(id) => TablePanelInteraction::ExpandToggled(id),
            RowInteraction::SelectionToggled(id) => TablePanelInteraction::SelectionToggled(id),
            RowInteraction::EditRequested(id) => TablePanelInteraction::EditRequested(id),
            RowInteraction::DeleteRequested(id) => TablePanelInteraction::DeleteRequested(id),
        }
    }
}

pub fn render_table_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    loader: &AsyncLoader,
) -> Option<TablePanelInteraction> {
    if loader.is_loading() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading dataset...");
        });
        return None;
    }
    if !state.dataset.is_loaded() {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new("Open a dataset or generate sample data to get started").weak());
        });
        return None;
    }

    let mut interaction = None;
    let colors = state.theme.colors().clone();

    ScrollArea::horizontal()
        .id_salt("table_horizontal_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if let Some(header) =
                table_header::render_table_header(ui, &state.table, &mut state.layout, &colors)
            {
                interaction = Some(match header {
                    TableHeaderInteraction::SortRequested(key) => TablePanelInteraction::SortRequested(key),
                    TableHeaderInteraction::SelectAllToggled => TablePanelInteraction::SelectAllToggled,
                });
            }

            let rows = match state.table.visible_rows() {
                Ok(rows) => rows,
                Err(e) => {
                    ui.colored_label(colors.danger, format!("Cannot display rows: {}", e));
                    return;
                }
            };
            if rows.is_empty() {
                ui.add_space(12.0);
                ui.label(RichText::new("No matching rows").weak());
                return;
            }

            let ctx = RowContext {
                columns: state.table.columns(),
                layout: &state.layout,
                dataset: &state.dataset,
                colors: &colors,
                selectable: state.table.config().selectable,
            };

            ScrollArea::vertical()
                .id_salt("table_rows_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.spacing_mut().item_spacing.y = 0.0;

                    // open_guides[level]: the last row seen at that level has
                    // siblings below it.
                    let mut open_guides: Vec<bool> = Vec::new();
                    for row in &rows {
                        let context: Vec<bool> = (1..row.level)
                            .map(|level| open_guides.get(level).copied().unwrap_or(false))
                            .collect();
                        open_guides.truncate(row.level);
                        open_guides.resize(row.level, false);
                        open_guides.push(!row.is_last_child);

                        if let Some(row_interaction) = row_renderer::render_row(ui, row, &context, &ctx) {
                            interaction = Some(row_interaction.into());
                        }
                    }
                });
        });

    interaction
}
