//! Status bar UI rendering

use crate::app::AppState;
use crate::utils::{format_count, format_memory_mb, get_current_memory_mb};
use egui::RichText;

pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format_memory_mb(get_current_memory_mb())).strong());
        ui.label(RichText::new("|").strong());

        let mut source = state.dataset.source_label();
        if state.dataset.is_dirty() {
            source.push_str(" (modified)");
        }
        ui.label(RichText::new(source).strong());

        if state.dataset.is_loaded() {
            let table = &state.table;
            let index = table.index();
            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(format!(
                "Rows: {} of {} top-level | Nodes: {} | Depth: {}",
                format_count(table.total_items()),
                format_count(table.roots().len()),
                format_count(index.node_count()),
                index.max_depth()
            ))
            .strong());

            ui.label(RichText::new("|").strong());
            ui.label(RichText::new(format!(
                "Page {} of {}",
                table.page_index() + 1,
                table.page_count().max(1)
            ))
            .strong());

            let selected = table.selection().selected_count();
            if selected > 0 {
                ui.label(RichText::new("|").strong());
                ui.label(
                    RichText::new(format!("Selected: {}", format_count(selected)))
                        .strong()
                        .color(state.theme.colors().primary),
                );
            }
        }

        if let Some(message) = state.view.status_message() {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(message).weak());
            });
        }
    });
}
