//! Multi-level table viewer.
//!
//! An egui host for the `mltable` core: loads JSON datasets (optionally
//! Brotli-compressed), then searches, filters, sorts, pages, expands,
//! selects, deletes and exports their rows.
//!
//! - `app/` - Centralized state and coordinators
//! - `state/` - Focused host state components
//! - `ui/` - Panels and interaction routing
//! - `rendering/` - Row and cell painting
//! - `presentation/` - Themes and status badges
//! - `io/` - Background dataset loading
//! - `utils/` - Formatting helpers

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use mltable::TableConfig;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::collections::HashMap;
use std::path::PathBuf;

mod app;
mod io;
mod presentation;
mod rendering;
mod state;
mod ui;
mod utils;

use app::{AppState, SettingsCoordinator, TableCoordinator, ThemeCoordinator};
use io::AsyncLoader;
use state::{LayoutState, ThemeState, DEFAULT_EXPAND_WIDTH};
use ui::panel_manager::PanelManager;

const COLUMN_WIDTHS_KEY: &str = "column_widths";
const EXPAND_WIDTH_KEY: &str = "expand_width";
const TABLE_CONFIG_KEY: &str = "table_config";
const LOG_ENV: &str = "MLTABLE_LOG";

fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    // Fails only when a logger is already installed.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

fn main() -> eframe::Result {
    init_logging();

    let initial_file = std::env::args().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Multi-Level Table"),
        ..Default::default()
    };

    eframe::run_native(
        "Multi-Level Table",
        options,
        Box::new(move |cc| Ok(Box::new(TableViewerApp::new(cc, initial_file)))),
    )
}

struct TableViewerApp {
    state: AppState,
    loader: AsyncLoader,
    /// File given on the command line, loaded on the first frame
    pending_file_load: Option<PathBuf>,
}

impl TableViewerApp {
    /// Restores theme, layout and table settings from persistent storage.
    fn new(cc: &eframe::CreationContext, initial_file: Option<PathBuf>) -> Self {
        let theme = ThemeState::with_theme(ThemeCoordinator::load_theme_from_storage(cc.storage));

        let column_widths: HashMap<String, f32> = SettingsCoordinator::load_setting(cc.storage, COLUMN_WIDTHS_KEY);
        let expand_width = SettingsCoordinator::load_setting_or(cc.storage, EXPAND_WIDTH_KEY, DEFAULT_EXPAND_WIDTH);
        let table_config: TableConfig = SettingsCoordinator::load_setting(cc.storage, TABLE_CONFIG_KEY);

        Self {
            state: AppState::with_settings(theme, LayoutState::with_widths(column_widths, expand_width), table_config),
            loader: AsyncLoader::new(),
            pending_file_load: initial_file,
        }
    }

    fn persist(&self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, self.state.theme.current_theme_name());
        SettingsCoordinator::save_setting(storage, COLUMN_WIDTHS_KEY, self.state.layout.column_widths());
        SettingsCoordinator::save_setting(storage, EXPAND_WIDTH_KEY, &self.state.layout.expand_width());
        SettingsCoordinator::save_setting(storage, TABLE_CONFIG_KEY, &self.state.table_config);
    }
}

impl eframe::App for TableViewerApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.persist(storage);
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        TableCoordinator::check_loading_completion(&mut self.state, &mut self.loader);

        ThemeCoordinator::apply_current_theme(ctx, &self.state);

        if let Some(path) = self.pending_file_load.take() {
            TableCoordinator::open_file(&mut self.state, &mut self.loader, path, ctx);
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state, &self.loader) {
            TableCoordinator::handle_interaction(&mut self.state, &mut self.loader, interaction, ctx);
        }
        TableCoordinator::drain_table_events(&mut self.state);

        if let Some(storage) = frame.storage_mut() {
            self.persist(storage);
        }
    }
}
