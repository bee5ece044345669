//! Modal confirmation windows.

use crate::presentation::theme::ThemeColors;
use egui::RichText;
use mltable::DeleteRequest;

pub enum DialogInteraction {
    DeleteConfirmed,
    DeleteCancelled,
}

/// Shows the delete confirmation for `request`.
pub fn render_delete_dialog(
    ctx: &egui::Context,
    request: &DeleteRequest,
    colors: &ThemeColors,
) -> Option<DialogInteraction> {
    let mut interaction = None;
    let title = match request {
        DeleteRequest::Single { .. } => "Delete item",
        DeleteRequest::Bulk { .. } => "Delete selected items",
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .show(ctx, |ui| {
            ui.label(request.prompt());
            ui.label(RichText::new("Nested rows are removed with their parent.").weak());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    interaction = Some(DialogInteraction::DeleteCancelled);
                }
                let delete = egui::Button::new(RichText::new("Delete").color(egui::Color32::WHITE))
                    .fill(colors.danger);
                if ui.add(delete).clicked() {
                    interaction = Some(DialogInteraction::DeleteConfirmed);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        interaction = Some(DialogInteraction::DeleteCancelled);
    }

    interaction
}
