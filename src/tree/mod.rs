//! Tree structure helpers.
//!
//! - Index: id -> node location lookup, rebuilt once per dataset
//! - Flatten: depth-first emission of the visible rows of a page

pub mod index;
pub mod flatten;

pub use index::TreeIndex;
pub use flatten::{flatten_visible, FlattenLimits, VisibleRow};
