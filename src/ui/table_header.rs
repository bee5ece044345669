//! Table header rendering
//!
//! Sortable, resizable column headers plus the select-all checkbox.

use crate::presentation::theme::ThemeColors;
use crate::rendering::row_renderer::ACTIONS_WIDTH;
use crate::rendering::text_utils::truncate_text_to_fit;
use crate::state::LayoutState;
use eframe::egui;
use mltable::{MultiLevelTable, SortDir};

pub const HEADER_HEIGHT: f32 = 30.0;
const HANDLE_WIDTH: f32 = 8.0;

pub enum TableHeaderInteraction {
    SortRequested(String),
    SelectAllToggled,
}

/// Renders the header row. Column widths are resized in place.
pub fn render_table_header(
    ui: &mut egui::Ui,
    table: &MultiLevelTable,
    layout: &mut LayoutState,
    colors: &ThemeColors,
) -> Option<TableHeaderInteraction> {
    let mut interaction = None;

    let total_width = layout.expand_width()
        + table
            .columns()
            .iter()
            .map(|column| layout.column_width(&column.key))
            .sum::<f32>()
        + ACTIONS_WIDTH;
    let (header_rect, _) = ui.allocate_exact_size(
        egui::vec2(total_width.max(ui.available_width()), HEADER_HEIGHT),
        egui::Sense::hover(),
    );
    let start = header_rect.min;
    let painter = ui.painter().clone();
    painter.rect_filled(header_rect, 0.0, colors.header_background);
    painter.line_segment(
        [header_rect.left_bottom(), header_rect.right_bottom()],
        egui::Stroke::new(1.0, colors.border),
    );

    let font_id = egui::FontId::proportional(14.0);

    // Select-all checkbox in the tree column
    if table.config().selectable {
        let all_selected = table.is_all_selected();
        let box_rect = egui::Rect::from_center_size(
            egui::pos2(start.x + 12.0, header_rect.center().y),
            egui::vec2(14.0, 14.0),
        );
        let response = ui
            .interact(box_rect, ui.id().with("header_select_all"), egui::Sense::click())
            .on_hover_text(if all_selected { "Clear selection" } else { "Select all" });
        if response.clicked() {
            interaction = Some(TableHeaderInteraction::SelectAllToggled);
        }
        let fill = if all_selected { colors.primary } else { colors.extreme_background };
        painter.rect_filled(box_rect, 2.0, fill);
        painter.rect_stroke(
            box_rect,
            2.0,
            egui::Stroke::new(1.0, if response.hovered() { colors.primary } else { colors.border }),
            egui::StrokeKind::Inside,
        );
        if all_selected {
            painter.text(
                box_rect.center(),
                egui::Align2::CENTER_CENTER,
                "✔",
                egui::FontId::proportional(11.0),
                egui::Color32::WHITE,
            );
        }
    }

    let mut x = start.x + layout.expand_width();
    if let Some(delta) = resize_handle(ui, x, start.y, "header_resize_expand", colors) {
        layout.resize_expand_column(delta);
    }

    let active_sort = table.active_sort();
    for column in table.columns() {
        let width = layout.column_width(&column.key);
        let label_rect = egui::Rect::from_min_size(egui::pos2(x, start.y), egui::vec2(width, HEADER_HEIGHT));

        let sortable = column.is_sortable(table.config().sortable);
        let indicator = match active_sort {
            Some(sort) if sort.key == column.key => match sort.dir {
                SortDir::Asc => " ↑",
                SortDir::Desc => " ↓",
            },
            _ => "",
        };

        let response = if sortable {
            ui.interact(
                label_rect.shrink2(egui::vec2(HANDLE_WIDTH / 2.0, 0.0)),
                ui.id().with(("header_sort", &column.key)),
                egui::Sense::click(),
            )
            .on_hover_text("Click to sort")
        } else {
            ui.interact(label_rect, ui.id().with(("header", &column.key)), egui::Sense::hover())
        };
        if sortable && response.clicked() {
            interaction = Some(TableHeaderInteraction::SortRequested(column.key.clone()));
        }

        let text_color = if sortable && response.hovered() {
            colors.primary
        } else {
            colors.header_text
        };
        let title = format!("{}{}", column.title, indicator);
        let truncated = truncate_text_to_fit(&title, width, &font_id, &painter);
        painter.text(
            label_rect.left_center() + egui::vec2(4.0, 0.0),
            egui::Align2::LEFT_CENTER,
            truncated,
            font_id.clone(),
            text_color,
        );

        x += width;
        if let Some(delta) = resize_handle(ui, x, start.y, &format!("header_resize_{}", column.key), colors) {
            layout.resize_column(&column.key, delta);
        }
    }

    painter.text(
        egui::pos2(x + 4.0, header_rect.center().y),
        egui::Align2::LEFT_CENTER,
        "Actions",
        font_id,
        colors.header_text,
    );

    interaction
}

/// Draggable divider centred on `x`. Returns the horizontal drag delta.
fn resize_handle(ui: &mut egui::Ui, x: f32, top: f32, id_salt: &str, colors: &ThemeColors) -> Option<f32> {
    let rect = egui::Rect::from_center_size(
        egui::pos2(x, top + HEADER_HEIGHT / 2.0),
        egui::vec2(HANDLE_WIDTH, HEADER_HEIGHT),
    );
    let response = ui.interact(rect, ui.id().with(id_salt), egui::Sense::drag());

    let color = if response.hovered() || response.dragged() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
        colors.primary
    } else {
        colors.border
    };
    ui.painter().rect_filled(rect.shrink2(egui::vec2(3.0, 6.0)), 0.0, color);

    response.dragged().then(|| response.drag_delta().x)
}
