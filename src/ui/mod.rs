//! UI panel rendering subsystem
//!
//! - Header panel (file controls, search, filter, bulk actions, theme)
//! - Table panel with its sortable, resizable header
//! - Pagination bar
//! - Details panel for the last clicked row
//! - Status bar
//! - Confirmation dialogs
//! - Panel manager (layout and interaction routing)

pub mod details_panel;
pub mod dialogs;
pub mod header;
pub mod pagination_bar;
pub mod panel_manager;
pub mod status_bar;
pub mod table_header;
pub mod table_panel;
