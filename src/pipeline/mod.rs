//! View pipeline: filter, then sort, then paginate the top-level rows.

pub mod filter;
pub mod pagination;
pub mod sorting;

pub use filter::{
    filter_categories, filter_options, filter_top_level, ActiveFilter, FilterCategory,
    FilterCriteria, FilterOption,
};
pub use pagination::{PageLink, Paginator};
pub use sorting::{compare_nodes, default_compare, next_sort_on_click, sort_top_level, SortDir, SortSpec};
