//! Presentation layer: themes and cell styling.

pub mod status_badge;
pub mod theme;
