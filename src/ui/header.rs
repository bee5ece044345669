//! Header panel UI rendering
//!
//! File controls, search, the category filter, bulk actions and the theme
//! selector.

use crate::app::AppState;
use eframe::egui;
use egui::RichText;
use mltable::{ExportScope, FilterValue};
use std::collections::HashSet;
use std::path::PathBuf;

pub enum HeaderInteraction {
    OpenFileRequested(PathBuf),
    OpenSampleRequested,
    SaveRequested(PathBuf),
    ExportRequested(PathBuf),
    SearchChanged(String),
    FilterChanged { key: String, accepted: Vec<FilterValue> },
    FilterCleared,
    ExpandAllToggled,
    BulkDeleteRequested,
}

fn start_directory() -> Option<PathBuf> {
    std::env::current_dir().ok().or_else(dirs::home_dir)
}

pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Datasets", &["json", "br"])
                .add_filter("All files", &["*"]);
            if let Some(dir) = start_directory() {
                dialog = dialog.set_directory(dir);
            }
            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🎲 Sample data").clicked() {
            interaction = Some(HeaderInteraction::OpenSampleRequested);
        }

        let loaded = state.dataset.is_loaded();
        if ui.add_enabled(loaded, egui::Button::new("💾 Save")).clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("JSON", &["json"])
                .add_filter("Compressed JSON", &["br"])
                .set_file_name(state.dataset.source_label());
            if let Some(dir) = start_directory() {
                dialog = dialog.set_directory(dir);
            }
            if let Some(path) = dialog.save_file() {
                interaction = Some(HeaderInteraction::SaveRequested(path));
            }
        }

        ui.add_enabled_ui(loaded, |ui| {
            ui.menu_button("⬇ Export CSV", |ui| {
                for scope in ExportScope::ALL {
                    let mut current = state.view.export_scope();
                    if ui.radio_value(&mut current, scope, scope.label()).changed() {
                        state.view.set_export_scope(current);
                    }
                }
                ui.separator();
                if ui.button("Export...").clicked() {
                    let mut dialog = rfd::FileDialog::new()
                        .add_filter("CSV", &["csv"])
                        .set_file_name("table.csv");
                    if let Some(dir) = dirs::download_dir().or_else(dirs::home_dir) {
                        dialog = dialog.set_directory(dir);
                    }
                    if let Some(path) = dialog.save_file() {
                        interaction = Some(HeaderInteraction::ExportRequested(path));
                    }
                    ui.close();
                }
            });
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let old_theme = state.theme.current_theme_name().to_string();
            let mut current_theme = old_theme.clone();
            egui::ComboBox::from_id_salt("theme_selector")
                .selected_text(&current_theme)
                .show_ui(ui, |ui| {
                    for theme_name in state.theme.theme_manager().list_themes() {
                        ui.selectable_value(&mut current_theme, theme_name.to_string(), theme_name);
                    }
                });
            if old_theme != current_theme {
                log::debug!("theme changed to {}", current_theme);
                state.theme.set_theme(current_theme);
                ui.ctx().request_repaint();
            }
            ui.label("Theme:");
        });
    });

    if state.dataset.is_loaded() {
        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(state.view.search_text_mut())
                    .hint_text("🔍 Search...")
                    .desired_width(220.0),
            );
            if response.changed() {
                interaction = Some(HeaderInteraction::SearchChanged(state.view.search_text().to_string()));
            }

            ui.separator();
            if let Some(filter) = render_filter_controls(ui, state) {
                interaction = Some(filter);
            }

            ui.separator();
            let expand_label = if state.table.is_all_expanded() { "⊟ Collapse all" } else { "⊞ Expand all" };
            if ui.button(expand_label).clicked() {
                interaction = Some(HeaderInteraction::ExpandAllToggled);
            }

            let selected = state.table.selection().selected_count();
            if selected > 0 {
                let label = RichText::new(format!("🗑 Delete selected ({})", selected))
                    .color(state.theme.colors().danger);
                if ui.button(label).clicked() {
                    interaction = Some(HeaderInteraction::BulkDeleteRequested);
                }
            }
        });
    }

    if let Some(err) = &state.error_message {
        ui.colored_label(state.theme.colors().danger, err);
    }

    interaction
}

/// Column picker followed by a checklist of that column's values.
fn render_filter_controls(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let categories = state.table.filter_categories();
    if categories.is_empty() {
        return None;
    }

    let mut interaction = None;
    let active = state.table.active_filter().cloned();

    let mut picked = state
        .view
        .filter_column()
        .map(str::to_string)
        .or_else(|| active.as_ref().map(|filter| filter.column.clone()));
    let initial = picked.clone();
    let selected_text = picked
        .as_ref()
        .and_then(|key| categories.iter().find(|category| &category.key == key))
        .map(|category| category.title.clone())
        .unwrap_or_else(|| "Filter by...".to_string());

    egui::ComboBox::from_id_salt("filter_column")
        .selected_text(selected_text)
        .show_ui(ui, |ui| {
            for category in &categories {
                let label = format!("{} ({})", category.title, category.count);
                ui.selectable_value(&mut picked, Some(category.key.clone()), label);
            }
        });

    if picked != initial {
        if active.as_ref().is_some_and(|filter| Some(&filter.column) != picked.as_ref()) {
            interaction = Some(HeaderInteraction::FilterCleared);
        }
        state.view.set_filter_column(picked.clone());
    }

    let Some(key) = picked else {
        return interaction;
    };

    let mut accepted: HashSet<FilterValue> = active
        .as_ref()
        .filter(|filter| filter.column == key)
        .map(|filter| filter.accepted.clone())
        .unwrap_or_default();
    let button_text = if accepted.is_empty() {
        "All values".to_string()
    } else {
        format!("{} selected", accepted.len())
    };

    let mut changed = false;
    ui.menu_button(button_text, |ui| {
        for option in state.table.filter_options(&key) {
            let mut checked = accepted.contains(&option.value);
            let label = format!("{} ({})", option.label, option.count);
            if ui.checkbox(&mut checked, label).changed() {
                changed = true;
                if checked {
                    accepted.insert(option.value.clone());
                } else {
                    accepted.remove(&option.value);
                }
            }
        }
    });

    if changed {
        let mut accepted: Vec<FilterValue> = accepted.into_iter().collect();
        accepted.sort();
        interaction = Some(HeaderInteraction::FilterChanged { key, accepted });
    } else if active.is_some() && ui.button("✖ Clear filter").clicked() {
        state.view.set_filter_column(None);
        interaction = Some(HeaderInteraction::FilterCleared);
    }

    interaction
}
