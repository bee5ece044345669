//! Depth-first emission of visible rows.
//!
//! Each top-level node on the current page is emitted, then the children of
//! every expanded node directly after it, in data order. Collapsed subtrees
//! are skipped entirely.

use crate::config::{CyclePolicy, TableConfig};
use crate::error::{Result, TableError};
use crate::node::{Node, NodeId};
use crate::table::expansion::ExpansionState;
use crate::table::selection::SelectionState;
use crate::tree::TreeIndex;

/// One row ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow<'a> {
    pub node: &'a Node,
    /// Depth from the top level (0-based).
    pub level: usize,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
    pub parent_id: Option<&'a NodeId>,
    /// Last sibling under its parent. Always true for top-level rows.
    pub is_last_child: bool,
}

impl<'a> VisibleRow<'a> {
    pub fn id(&self) -> &'a NodeId {
        &self.node.id
    }
}

/// Guards against pathological trees during emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenLimits {
    pub max_depth: usize,
    pub cycle_policy: CyclePolicy,
}

impl FlattenLimits {
    pub fn from_config(config: &TableConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            cycle_policy: config.cycle_policy,
        }
    }
}

impl Default for FlattenLimits {
    fn default() -> Self {
        Self::from_config(&TableConfig::default())
    }
}

struct Frame<'a> {
    node: &'a Node,
    level: usize,
    parent_id: Option<&'a NodeId>,
    is_last_child: bool,
}

/// Emits the visible rows for `page` in display order.
///
/// Children are resolved through `index`, so `roots` must be the dataset the
/// index was built from.
pub fn flatten_visible<'a>(
    page: &[&'a Node],
    roots: &'a [Node],
    index: &TreeIndex,
    expansion: &ExpansionState,
    selection: &SelectionState,
    limits: FlattenLimits,
) -> Result<Vec<VisibleRow<'a>>> {
    let mut rows = Vec::with_capacity(page.len());
    let mut stack: Vec<Frame<'a>> = Vec::new();
    // Ids of the ancestors of the frame being processed.
    let mut path: Vec<&'a NodeId> = Vec::new();

    for &top in page {
        stack.push(Frame {
            node: top,
            level: 0,
            parent_id: None,
            is_last_child: true,
        });
        path.clear();

        while let Some(frame) = stack.pop() {
            path.truncate(frame.level);
            let node: &'a Node = frame.node;
            let id = &node.id;
            let has_children = index.has_children(id);
            let is_expanded = has_children && expansion.is_expanded(id);

            rows.push(VisibleRow {
                node,
                level: frame.level,
                has_children,
                is_expanded,
                is_selected: selection.is_selected(id),
                parent_id: frame.parent_id,
                is_last_child: frame.is_last_child,
            });

            if !is_expanded {
                continue;
            }

            if path.contains(&id) {
                match limits.cycle_policy {
                    CyclePolicy::Truncate => {
                        log::warn!("id {} repeats on its own ancestor path, branch skipped", id);
                        continue;
                    }
                    CyclePolicy::Error => return Err(TableError::CycleDetected { id: id.clone() }),
                }
            }

            if frame.level + 1 > limits.max_depth {
                match limits.cycle_policy {
                    CyclePolicy::Truncate => {
                        log::warn!("children of {} exceed depth limit {}", id, limits.max_depth);
                        continue;
                    }
                    CyclePolicy::Error => {
                        return Err(TableError::DepthLimitExceeded {
                            id: id.clone(),
                            limit: limits.max_depth,
                        })
                    }
                }
            }

            let Some(children) = index.children(roots, id) else {
                continue;
            };
            path.push(id);
            let last = children.len().saturating_sub(1);
            for (i, child) in children.iter().enumerate().rev() {
                stack.push(Frame {
                    node: child,
                    level: frame.level + 1,
                    parent_id: Some(id),
                    is_last_child: i == last,
                });
            }
        }
    }

    Ok(rows)
}
