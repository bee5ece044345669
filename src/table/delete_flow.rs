//! Delete confirmation flow.
//!
//! The table only tracks which confirmation is pending. Performing the
//! delete, and deciding whether to replace the dataset afterwards, is left
//! to the host.

use crate::node::NodeId;

/// A delete the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRequest {
    Single { id: NodeId, name: String },
    Bulk { ids: Vec<NodeId> },
}

impl DeleteRequest {
    pub fn ids(&self) -> Vec<NodeId> {
        match self {
            DeleteRequest::Single { id, .. } => vec![id.clone()],
            DeleteRequest::Bulk { ids } => ids.clone(),
        }
    }

    /// Confirmation prompt text.
    pub fn prompt(&self) -> String {
        match self {
            DeleteRequest::Single { id, name } => {
                format!("Are you sure you want to delete \"{}\" (ID: {})?", name, id)
            }
            DeleteRequest::Bulk { ids } => {
                format!("Are you sure you want to delete {} selected items?", ids.len())
            }
        }
    }
}

/// Pending confirmation state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteConfirmation {
    #[default]
    Idle,
    Pending(DeleteRequest),
}

impl DeleteConfirmation {
    pub fn new() -> Self {
        Self::Idle
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DeleteConfirmation::Pending(_))
    }

    pub fn pending(&self) -> Option<&DeleteRequest> {
        match self {
            DeleteConfirmation::Idle => None,
            DeleteConfirmation::Pending(request) => Some(request),
        }
    }

    /// Opens a confirmation, replacing any pending one.
    pub fn open(&mut self, request: DeleteRequest) {
        *self = DeleteConfirmation::Pending(request);
    }

    /// Closes the confirmation and hands the request to the caller.
    pub fn confirm(&mut self) -> Option<DeleteRequest> {
        match std::mem::take(self) {
            DeleteConfirmation::Idle => None,
            DeleteConfirmation::Pending(request) => Some(request),
        }
    }

    pub fn cancel(&mut self) {
        *self = DeleteConfirmation::Idle;
    }
}
