//! Table row painting.
//!
//! A row is: a leading tree column (checkbox, indentation guides, expander),
//! one cell per column, then a trailing actions cell. Everything is painted
//! directly; only the checkbox, expander and the edit and delete buttons are
//! interactive on top of the row-wide click area. Rows with `showActionButtons`
//! set to false get an empty actions cell.

use crate::presentation::status_badge::{badge_colors, STATUS_BADGE_RENDER};
use crate::presentation::theme::ThemeColors;
use crate::rendering::text_utils::{paint_cell_text, truncate_text_to_fit, CELL_PADDING};
use crate::state::{DatasetState, LayoutState};
use eframe::egui;
use mltable::{Column, NodeId, VisibleRow};

pub const ROW_HEIGHT: f32 = 28.0;
pub const INDENT_WIDTH: f32 = 20.0;
pub const ACTIONS_WIDTH: f32 = 60.0;
const CHECKBOX_SIZE: f32 = 14.0;
const CHECKBOX_AREA: f32 = 24.0;

/// Everything about the table that is the same for every row of a frame.
pub struct RowContext<'a> {
    pub columns: &'a [Column],
    pub layout: &'a LayoutState,
    pub dataset: &'a DatasetState,
    pub colors: &'a ThemeColors,
    pub selectable: bool,
}

impl RowContext<'_> {
    /// Full row width across every column.
    pub fn row_width(&self) -> f32 {
        self.layout.expand_width()
            + self
                .columns
                .iter()
                .map(|column| self.layout.column_width(&column.key))
                .sum::<f32>()
            + ACTIONS_WIDTH
    }
}

pub enum RowInteraction {
    Clicked(NodeId),
    ExpandToggled(NodeId),
    SelectionToggled(NodeId),
    EditRequested(NodeId),
    DeleteRequested(NodeId),
}

/// Paints one row.
///
/// `branch_context[c]` tells whether the guide line in indentation column
/// `c` continues past this row.
pub fn render_row(
    ui: &mut egui::Ui,
    row: &VisibleRow<'_>,
    branch_context: &[bool],
    ctx: &RowContext<'_>,
) -> Option<RowInteraction> {
    let id = row.id();
    let colors = ctx.colors;

    let (row_rect, row_response) = ui.allocate_exact_size(
        egui::vec2(ctx.row_width().max(ui.available_width()), ROW_HEIGHT),
        egui::Sense::click(),
    );
    if !ui.is_rect_visible(row_rect) {
        return None;
    }

    let mut interaction = None;
    if row_response.clicked() {
        interaction = Some(RowInteraction::Clicked(id.clone()));
    }

    let background = if row.is_selected {
        colors.selection
    } else if row_response.hovered() {
        colors.hover
    } else if row.is_expanded {
        colors.row_expanded
    } else if row.level > 0 {
        colors.row_nested
    } else {
        colors.row_main
    };
    let painter = ui.painter().clone();
    painter.rect_filled(row_rect, 0.0, background);
    painter.line_segment(
        [row_rect.left_bottom(), row_rect.right_bottom()],
        egui::Stroke::new(1.0, colors.border),
    );

    let start = row_rect.min;

    // Checkbox
    let mut tree_x = start.x;
    if ctx.selectable {
        let box_rect = egui::Rect::from_center_size(
            egui::pos2(start.x + CHECKBOX_AREA / 2.0, row_rect.center().y),
            egui::vec2(CHECKBOX_SIZE, CHECKBOX_SIZE),
        );
        let response = ui.interact(box_rect, ui.id().with(("select", id)), egui::Sense::click());
        if response.clicked() {
            interaction = Some(RowInteraction::SelectionToggled(id.clone()));
        }
        paint_checkbox(&painter, box_rect, row.is_selected, response.hovered(), colors);
        tree_x += CHECKBOX_AREA;
    }

    // Indentation guides
    let guide = egui::Stroke::new(1.0, colors.text_dim.gamma_multiply(0.6));
    for (column, &continues) in branch_context.iter().enumerate() {
        if continues {
            let x = tree_x + column as f32 * INDENT_WIDTH + INDENT_WIDTH / 2.0;
            painter.line_segment([egui::pos2(x, start.y), egui::pos2(x, start.y + ROW_HEIGHT)], guide);
        }
    }
    if row.level > 0 {
        let x = tree_x + (row.level - 1) as f32 * INDENT_WIDTH + INDENT_WIDTH / 2.0;
        let mid = start.y + ROW_HEIGHT / 2.0;
        let bottom = if row.is_last_child { mid } else { start.y + ROW_HEIGHT };
        painter.line_segment([egui::pos2(x, start.y), egui::pos2(x, bottom)], guide);
        painter.line_segment([egui::pos2(x, mid), egui::pos2(x + INDENT_WIDTH / 2.0, mid)], guide);
    }

    // Expander
    if row.has_children {
        let expander_rect = egui::Rect::from_center_size(
            egui::pos2(
                tree_x + row.level as f32 * INDENT_WIDTH + INDENT_WIDTH / 2.0,
                row_rect.center().y,
            ),
            egui::vec2(16.0, 16.0),
        );
        let response = ui.interact(expander_rect, ui.id().with(("expand", id)), egui::Sense::click());
        if response.clicked() {
            interaction = Some(RowInteraction::ExpandToggled(id.clone()));
        }
        let symbol = if row.is_expanded { "▼" } else { "▶" };
        let color = if response.hovered() { colors.primary } else { colors.text };
        painter.text(
            expander_rect.center(),
            egui::Align2::CENTER_CENTER,
            symbol,
            egui::FontId::proportional(12.0),
            color,
        );
    }

    // Cells
    let font_id = egui::FontId::proportional(13.0);
    let mut x = start.x + ctx.layout.expand_width();
    for column in ctx.columns {
        let width = ctx.layout.column_width(&column.key);
        let cell_rect = egui::Rect::from_min_size(egui::pos2(x, start.y), egui::vec2(width, ROW_HEIGHT));
        let text = column.display(row.node);

        if ctx.dataset.render_hint(&column.key) == Some(STATUS_BADGE_RENDER) && !text.is_empty() {
            paint_badge(&painter, cell_rect, &text, colors);
        } else {
            paint_cell_text(&painter, cell_rect, &text, &font_id, colors.text);
        }
        x += width;
    }

    // Actions
    if row.node.shows_actions() {
        let center_y = row_rect.center().y;
        let edit_rect = egui::Rect::from_center_size(
            egui::pos2(x + ACTIONS_WIDTH * 0.3, center_y),
            egui::vec2(22.0, 22.0),
        );
        let delete_rect = egui::Rect::from_center_size(
            egui::pos2(x + ACTIONS_WIDTH * 0.7, center_y),
            egui::vec2(22.0, 22.0),
        );

        if action_button(ui, &painter, edit_rect, ("edit", id), "✏", "Edit", [colors.text_dim, colors.primary]) {
            interaction = Some(RowInteraction::EditRequested(id.clone()));
        }
        if action_button(ui, &painter, delete_rect, ("delete", id), "🗑", "Delete", [colors.text_dim, colors.danger]) {
            interaction = Some(RowInteraction::DeleteRequested(id.clone()));
        }
    }

    interaction
}

/// Paints one icon button of the actions cell. Returns true when clicked.
fn action_button(
    ui: &egui::Ui,
    painter: &egui::Painter,
    rect: egui::Rect,
    salt: (&str, &NodeId),
    icon: &str,
    tooltip: &str,
    [idle_color, hover_color]: [egui::Color32; 2],
) -> bool {
    let response = ui
        .interact(rect, ui.id().with(salt), egui::Sense::click())
        .on_hover_text(tooltip);
    let color = if response.hovered() { hover_color } else { idle_color };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(14.0),
        color,
    );
    response.clicked()
}

fn paint_checkbox(
    painter: &egui::Painter,
    rect: egui::Rect,
    checked: bool,
    hovered: bool,
    colors: &ThemeColors,
) {
    let stroke_color = if hovered || checked { colors.primary } else { colors.border };
    if checked {
        painter.rect_filled(rect, 2.0, colors.primary);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "✔",
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );
    } else {
        painter.rect_filled(rect, 2.0, colors.extreme_background);
    }
    painter.rect_stroke(rect, 2.0, egui::Stroke::new(1.0, stroke_color), egui::StrokeKind::Inside);
}

/// Paints a rounded status pill.
fn paint_badge(painter: &egui::Painter, cell: egui::Rect, status: &str, colors: &ThemeColors) {
    let (background, text_color) = badge_colors(status, colors);
    let font_id = egui::FontId::proportional(12.0);
    let label = truncate_text_to_fit(status, cell.width() - 12.0, &font_id, painter);
    if label.is_empty() {
        return;
    }

    let galley = painter.layout_no_wrap(label, font_id, text_color);
    let size = galley.size() + egui::vec2(12.0, 4.0);
    let badge = egui::Rect::from_min_size(
        egui::pos2(cell.left() + CELL_PADDING, cell.center().y - size.y / 2.0),
        size,
    );
    painter.rect_filled(badge, size.y / 2.0, background);
    painter.galley(badge.min + egui::vec2(6.0, 2.0), galley, text_color);
}
