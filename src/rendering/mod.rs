//! Low-level painting for table rows and cells.

pub mod row_renderer;
pub mod text_utils;
