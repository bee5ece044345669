pub mod column;
pub mod config;
pub mod document;
pub mod error;
pub mod export;
pub mod node;
pub mod pipeline;
pub mod sample;
pub mod table;
pub mod tree;

// Export data model
pub use column::{infer_column_specs, CellRenderFn, Column, ColumnSpec, CustomSortFn};
pub use node::{
    field_to_string, prune_ids, value_to_string, FilterValue, Node, NodeId, ACTIONS_FIELD,
};

// Export configuration and errors
pub use config::{CyclePolicy, SelectAllScope, TableConfig};
pub use error::{Result, TableError};

// Export the view pipeline
pub use pipeline::{
    ActiveFilter, FilterCategory, FilterOption, PageLink, Paginator, SortDir, SortSpec,
};

// Export tree support
pub use tree::{flatten_visible, FlattenLimits, TreeIndex, VisibleRow};

// Export the table core
pub use table::{
    DeleteConfirmation, DeleteRequest, ExpansionState, MultiLevelTable, SelectionSnapshot,
    SelectionState, TableCallbacks,
};

// Export documents and CSV
pub use document::DatasetDocument;
pub use export::{export_csv, ExportScope};
pub use sample::{generate_document, sample_columns, SampleConfig};
