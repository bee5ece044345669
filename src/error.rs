//! Error types for the table core.

use crate::node::NodeId;
use thiserror::Error;

/// Errors surfaced by fallible table operations.
///
/// Most pipeline inconsistencies (unknown column keys, out-of-range pages)
/// self-heal instead of erroring; these variants cover the remaining cases.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("node id {id} appears on its own ancestor path")]
    CycleDetected { id: NodeId },

    #[error("node {id} exceeds the maximum render depth of {limit}")]
    DepthLimitExceeded { id: NodeId, limit: usize },

    #[error("unknown column '{key}'")]
    UnknownColumn { key: String },

    #[error("column '{key}' is not filterable")]
    ColumnNotFilterable { key: String },

    #[error("column '{key}' is not sortable")]
    ColumnNotSortable { key: String },

    #[error("CSV export failed: {0}")]
    Export(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid dataset document: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TableError>;
