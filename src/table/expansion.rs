//! Expansion state management.
//!
//! Tracks which node ids are expanded. Every id starts collapsed.

use crate::node::NodeId;
use crate::tree::TreeIndex;
use std::collections::HashSet;

/// Set of expanded node ids.
///
/// Responsibilities:
/// - Flipping a single id without cascading to ancestors or descendants
/// - Bulk expand/collapse
/// - Providing intent-revealing expansion queries
#[derive(Debug, Clone, Default)]
pub struct ExpansionState {
    expanded_nodes: HashSet<NodeId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self {
            expanded_nodes: HashSet::new(),
        }
    }

    // ===== Expansion Queries =====

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded_nodes.contains(id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded_nodes.is_empty()
    }

    /// Returns a reference to the set of expanded node ids.
    pub fn expanded_nodes_set(&self) -> &HashSet<NodeId> {
        &self.expanded_nodes
    }

    /// True when every node with children is expanded and there is at least
    /// one such node.
    pub fn is_all_expanded(&self, index: &TreeIndex) -> bool {
        let parents = index.parent_ids();
        !parents.is_empty() && parents.iter().all(|id| self.expanded_nodes.contains(id))
    }

    // ===== Expansion Mutations =====

    /// Flips the state of `id`.
    ///
    /// Ids without children in `index` are left alone. Returns the new
    /// expanded state, or `None` when nothing changed.
    pub fn toggle(&mut self, id: &NodeId, index: &TreeIndex) -> Option<bool> {
        if !index.has_children(id) {
            log::trace!("toggle on childless node {} ignored", id);
            return None;
        }

        if self.expanded_nodes.remove(id) {
            log::trace!("collapsed {}", id);
            Some(false)
        } else {
            self.expanded_nodes.insert(id.clone());
            log::trace!("expanded {}", id);
            Some(true)
        }
    }

    /// Expands every node with children.
    pub fn expand_all(&mut self, index: &TreeIndex) {
        self.expanded_nodes = index.parent_ids().iter().cloned().collect();
    }

    /// Keeps only the ids for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&NodeId) -> bool) {
        self.expanded_nodes.retain(|id| keep(id));
    }

    /// Clears all expansion state (collapses all nodes).
    pub fn clear(&mut self) {
        self.expanded_nodes.clear();
    }
}
