//! Pagination bar rendering
//!
//! Range summary, page links with ellipses, and the page size picker.

use egui::RichText;
use mltable::{MultiLevelTable, PageLink};

pub enum PaginationInteraction {
    PageRequested(usize),
    PreviousPage,
    NextPage,
    PageSizeChanged(usize),
}

/// "Showing a-b of n" for the current page, 1-based and inclusive.
pub fn range_summary(page_index: usize, page_size: usize, total: usize) -> String {
    if total == 0 {
        return "No results".to_string();
    }
    let first = page_index * page_size + 1;
    let last = ((page_index + 1) * page_size).min(total);
    format!("Showing {}-{} of {}", first, last, total)
}

pub fn render_pagination_bar(ui: &mut egui::Ui, table: &MultiLevelTable) -> Option<PaginationInteraction> {
    let mut interaction = None;
    let total = table.total_items();
    let page_index = table.page_index();

    ui.horizontal(|ui| {
        ui.label(range_summary(page_index, table.page_size(), total));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mut page_size = table.page_size();
            egui::ComboBox::from_id_salt("page_size_selector")
                .selected_text(page_size.to_string())
                .width(60.0)
                .show_ui(ui, |ui| {
                    for &option in table.page_size_options() {
                        ui.selectable_value(&mut page_size, option, option.to_string());
                    }
                });
            if page_size != table.page_size() {
                interaction = Some(PaginationInteraction::PageSizeChanged(page_size));
            }
            ui.label("Rows per page:");
            ui.separator();

            // Right-to-left: add in reverse visual order.
            if ui
                .add_enabled(table.can_next_page(), egui::Button::new("Next ›"))
                .clicked()
            {
                interaction = Some(PaginationInteraction::NextPage);
            }
            for link in table.page_links().into_iter().rev() {
                match link {
                    PageLink::Page(index) => {
                        let label = RichText::new((index + 1).to_string());
                        if ui.selectable_label(index == page_index, label).clicked() && index != page_index {
                            interaction = Some(PaginationInteraction::PageRequested(index));
                        }
                    }
                    PageLink::Ellipsis => {
                        ui.label("…");
                    }
                }
            }
            if ui
                .add_enabled(table.can_previous_page(), egui::Button::new("‹ Previous"))
                .clicked()
            {
                interaction = Some(PaginationInteraction::PreviousPage);
            }
        });
    });

    interaction
}
