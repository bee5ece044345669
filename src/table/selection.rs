//! Row selection state management.
//!
//! Selection is keyed by node id and independent of expansion and
//! pagination. Selecting a parent never touches its children and vice versa.

use crate::node::NodeId;
use std::collections::HashSet;

/// State related to row selection.
///
/// `is_all_selected` is always derived from the current eligible id set and
/// never stored.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_rows: HashSet<NodeId>,
}

/// Copy of the selection handed to callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub selected: Vec<NodeId>,
    pub is_all_selected: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            selected_rows: HashSet::new(),
        }
    }

    // ===== Selection Queries =====

    pub fn is_selected(&self, id: &NodeId) -> bool {
        self.selected_rows.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_rows.is_empty()
    }

    pub fn selected_rows_set(&self) -> &HashSet<NodeId> {
        &self.selected_rows
    }

    /// Selected ids in a stable (sorted) order.
    pub fn selected_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.selected_rows.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// True when the eligible set is not empty, every eligible id is
    /// selected and nothing else is.
    pub fn is_all_selected(&self, eligible: &[NodeId]) -> bool {
        !eligible.is_empty()
            && eligible.iter().filter(|id| self.selected_rows.contains(*id)).count() == eligible.len()
            && self.selected_rows.len() == eligible.len()
    }

    // ===== Selection Mutations =====

    /// Flips membership of a single id. Returns the new selected state.
    pub fn toggle_one(&mut self, id: &NodeId) -> bool {
        if self.selected_rows.remove(id) {
            false
        } else {
            self.selected_rows.insert(id.clone());
            true
        }
    }

    /// Selects every eligible id, or clears the selection if they are all
    /// already selected. Returns the resulting `is_all_selected` flag.
    pub fn toggle_all(&mut self, eligible: &[NodeId]) -> bool {
        if self.is_all_selected(eligible) {
            self.selected_rows.clear();
            false
        } else {
            self.selected_rows = eligible.iter().cloned().collect();
            !eligible.is_empty()
        }
    }

    /// Drops ids that are no longer part of the dataset.
    pub fn retain(&mut self, mut keep: impl FnMut(&NodeId) -> bool) {
        self.selected_rows.retain(|id| keep(id));
    }

    pub fn clear(&mut self) {
        self.selected_rows.clear();
    }

    pub fn snapshot(&self, eligible: &[NodeId]) -> SelectionSnapshot {
        SelectionSnapshot {
            selected: self.selected_ids(),
            is_all_selected: self.is_all_selected(eligible),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<NodeId> {
        raw.iter().map(|&n| NodeId::from(n)).collect()
    }

    #[test]
    fn test_toggle_one() {
        let mut state = SelectionState::new();
        assert!(state.toggle_one(&NodeId::from(1)));
        assert!(state.is_selected(&NodeId::from(1)));
        assert!(!state.toggle_one(&NodeId::from(1)));
        assert!(state.is_empty());
    }

    #[test]
    fn test_toggle_all_fills_then_clears() {
        let eligible = ids(&[1, 2, 3]);
        let mut state = SelectionState::new();

        assert!(state.toggle_all(&eligible));
        assert_eq!(state.selected_count(), 3);
        assert!(state.is_all_selected(&eligible));

        assert!(!state.toggle_all(&eligible));
        assert!(state.is_empty());
    }

    #[test]
    fn test_toggle_all_from_partial_selects_everything() {
        let eligible = ids(&[1, 2, 3]);
        let mut state = SelectionState::new();
        state.toggle_one(&NodeId::from(2));

        state.toggle_all(&eligible);
        assert_eq!(state.selected_ids(), eligible);
    }

    #[test]
    fn test_selected_child_does_not_make_all_selected() {
        let eligible = ids(&[1, 2]);
        let mut state = SelectionState::new();
        state.toggle_one(&NodeId::from(1));
        state.toggle_one(&NodeId::from(10));
        assert_eq!(state.selected_count(), 2);
        assert!(!state.is_all_selected(&eligible));
    }

    #[test]
    fn test_empty_eligible_is_never_all_selected() {
        let mut state = SelectionState::new();
        assert!(!state.is_all_selected(&[]));
        assert!(!state.toggle_all(&[]));
    }

    #[test]
    fn test_retain_drops_stale_ids() {
        let mut state = SelectionState::new();
        state.toggle_one(&NodeId::from(1));
        state.toggle_one(&NodeId::from(2));
        state.retain(|id| *id == NodeId::from(2));
        assert_eq!(state.selected_ids(), ids(&[2]));
    }
}
