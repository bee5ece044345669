//! Application-level modules: centralized state and the coordinators that
//! act on it.

mod app_state;
mod settings_coordinator;
mod table_coordinator;
mod table_events;
mod theme_coordinator;

pub use app_state::AppState;
pub use settings_coordinator::SettingsCoordinator;
pub use table_coordinator::TableCoordinator;
pub use table_events::{TableEvent, TableEvents};
pub use theme_coordinator::ThemeCoordinator;
