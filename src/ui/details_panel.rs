//! Details panel UI rendering
//!
//! Shows every field of the last clicked row, or the row editor when one is
//! open.

use crate::app::AppState;
use crate::presentation::theme::ThemeColors;
use crate::state::EditForm;
use egui::{RichText, ScrollArea};
use mltable::value_to_string;

pub enum DetailsInteraction {
    Closed,
    EditSaved,
    EditCancelled,
}

pub fn render_details_panel(
    ui: &mut egui::Ui,
    state: &mut AppState,
    theme_colors: &ThemeColors,
) -> Option<DetailsInteraction> {
    let mut interaction = None;
    let id = &state.view.details_node().cloned()?;
    let title = if state.view.editor().is_some() { "Edit row" } else { "Details for row" };

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{}: {}", title, id)).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("✖").clicked() {
                interaction = Some(DetailsInteraction::Closed);
            }
        });
    });
    ui.separator();

    let Some(node) = state.table.find_node(id) else {
        ui.colored_label(theme_colors.text_dim, "(row no longer exists)");
        return interaction;
    };

    if let Some(form) = state.view.editor_mut() {
        return render_editor(ui, form, theme_colors).or(interaction);
    }

    ScrollArea::vertical()
        .id_salt("details_scroll_area")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("details_grid")
                .num_columns(2)
                .striped(true)
                .show(ui, |ui| {
                    ui.label(RichText::new("id").color(theme_colors.text_dim));
                    ui.label(RichText::new(id.to_string()).color(theme_colors.primary));
                    ui.end_row();

                    if let Some(level) = state.table.index().level_of(id) {
                        ui.label(RichText::new("level").color(theme_colors.text_dim));
                        ui.label(level.to_string());
                        ui.end_row();
                    }

                    for (key, value) in &node.fields {
                        ui.label(RichText::new(key).color(theme_colors.text_dim));
                        ui.label(value_to_string(value));
                        ui.end_row();
                    }

                    ui.label(RichText::new("children").color(theme_colors.text_dim));
                    ui.label(node.children.len().to_string());
                    ui.end_row();
                });

            if node.has_children() {
                ui.add_space(8.0);
                ui.label(RichText::new("Children:").strong());
                for child in &node.children {
                    ui.colored_label(
                        theme_colors.text,
                        format!("{}  {}", child.id, child.display_name()),
                    );
                }
            }
        });

    interaction
}

fn render_editor(
    ui: &mut egui::Ui,
    form: &mut EditForm,
    theme_colors: &ThemeColors,
) -> Option<DetailsInteraction> {
    let mut interaction = None;

    if form.is_empty() {
        ui.colored_label(theme_colors.text_dim, "No editable fields");
    } else {
        egui::Grid::new("edit_grid").num_columns(2).show(ui, |ui| {
            for field in form.fields_mut() {
                ui.label(RichText::new(&field.title).color(theme_colors.text_dim));
                ui.add(egui::TextEdit::singleline(&mut field.text).desired_width(f32::INFINITY));
                ui.end_row();
            }
        });
    }

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        let save = ui.add_enabled(form.has_changes(), egui::Button::new("Save changes"));
        if save.clicked() {
            interaction = Some(DetailsInteraction::EditSaved);
        }
        if ui.button("Cancel").clicked() {
            interaction = Some(DetailsInteraction::EditCancelled);
        }
    });

    interaction
}
