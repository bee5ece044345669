//! Text measurement and truncation.

use eframe::egui;

/// Horizontal padding inside a cell, per side.
pub const CELL_PADDING: f32 = 4.0;

const ELLIPSIS: &str = "..";

fn text_width(text: &str, font_id: &egui::FontId, painter: &egui::Painter) -> f32 {
    painter
        .layout_no_wrap(text.to_string(), font_id.clone(), egui::Color32::WHITE)
        .size()
        .x
}

/// Truncates `text` to fit `available_width`, appending ".." when cut.
pub fn truncate_text_to_fit(
    text: &str,
    available_width: f32,
    font_id: &egui::FontId,
    painter: &egui::Painter,
) -> String {
    let max_width = available_width - 2.0 * CELL_PADDING;
    if max_width <= 0.0 {
        return String::new();
    }
    if text_width(text, font_id, painter) <= max_width {
        return text.to_string();
    }

    let available_for_text = max_width - text_width(ELLIPSIS, font_id, painter);
    if available_for_text <= 0.0 {
        return String::new();
    }

    // Binary search on the character count.
    let chars: Vec<char> = text.chars().collect();
    let (mut low, mut high) = (0usize, chars.len());
    while low < high {
        let mid = (low + high + 1) / 2;
        let candidate: String = chars[..mid].iter().collect();
        if text_width(&candidate, font_id, painter) <= available_for_text {
            low = mid;
        } else {
            high = mid - 1;
        }
    }

    let mut result: String = chars[..low].iter().collect();
    result.push_str(ELLIPSIS);
    result
}

/// Paints left-aligned, vertically centred text clipped to `rect`.
pub fn paint_cell_text(
    painter: &egui::Painter,
    rect: egui::Rect,
    text: &str,
    font_id: &egui::FontId,
    color: egui::Color32,
) {
    let truncated = truncate_text_to_fit(text, rect.width(), font_id, painter);
    if truncated.is_empty() {
        return;
    }
    painter.text(
        rect.left_center() + egui::vec2(CELL_PADDING, 0.0),
        egui::Align2::LEFT_CENTER,
        truncated,
        font_id.clone(),
        color,
    );
}
