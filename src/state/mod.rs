//! State management modules for the table viewer.
//!
//! State-only logic, no UI concerns:
//! - Dataset state (source file, column render hints)
//! - View state (search buffer, filter dropdown, details target)
//! - Edit form (row editor buffers)
//! - Theme state (theme manager, current theme)
//! - Layout state (column widths)

mod dataset_state;
mod edit_form;
mod layout_state;
mod theme_state;
mod view_state;

pub use dataset_state::DatasetState;
pub use edit_form::{EditField, EditForm};
pub use layout_state::{LayoutState, DEFAULT_EXPAND_WIDTH};
pub use theme_state::ThemeState;
pub use view_state::ViewState;
