//! Panel orchestration and layout management.
//!
//! Lays out the header, table, pagination, details and status panels and
//! funnels their interactions into a single [`PanelInteraction`].

use crate::app::AppState;
use crate::io::AsyncLoader;
use crate::ui::dialogs::{self, DialogInteraction};
use crate::ui::header::{self, HeaderInteraction};
use crate::ui::pagination_bar::{self, PaginationInteraction};
use crate::ui::table_panel::{self, TablePanelInteraction};
use crate::ui::details_panel::{self, DetailsInteraction};
use crate::ui::status_bar;

pub enum PanelInteraction {
    Header(HeaderInteraction),
    Table(TablePanelInteraction),
    Pagination(PaginationInteraction),
    Dialog(DialogInteraction),
    Details(DetailsInteraction),
}

pub struct PanelManager;

impl PanelManager {
    /// Renders every panel. Called from `eframe::App::update()`.
    pub fn render_all_panels(
        ctx: &egui::Context,
        state: &mut AppState,
        loader: &AsyncLoader,
    ) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;
        let theme_colors = state.theme.colors().clone();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(PanelInteraction::Header(header_interaction));
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        if state.dataset.is_loaded() {
            egui::TopBottomPanel::bottom("pagination_panel").show(ctx, |ui| {
                if let Some(pagination) = pagination_bar::render_pagination_bar(ui, &state.table) {
                    interaction = Some(PanelInteraction::Pagination(pagination));
                }
            });
        }

        if state.view.details_node().is_some() {
            egui::SidePanel::right("details_panel")
                .default_width(ctx.content_rect().width() * 0.25)
                .resizable(true)
                .show(ctx, |ui| {
                    if let Some(details) = details_panel::render_details_panel(ui, state, &theme_colors) {
                        interaction = Some(PanelInteraction::Details(details));
                    }
                });
        }

        let table_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(4))
            .fill(theme_colors.background);
        egui::CentralPanel::default().frame(table_frame).show(ctx, |ui| {
            if let Some(table_interaction) = table_panel::render_table_panel(ui, state, loader) {
                interaction = Some(PanelInteraction::Table(table_interaction));
            }
        });

        if let Some(request) = state.table.pending_delete() {
            if let Some(dialog) = dialogs::render_delete_dialog(ctx, request, &theme_colors) {
                interaction = Some(PanelInteraction::Dialog(dialog));
            }
        }

        interaction
    }
}
