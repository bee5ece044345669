//! Id-based lookup into a hierarchical dataset.

use crate::node::{Node, NodeId};
use std::collections::HashMap;

/// Location of a node: index into the root sequence, then child indices.
pub type NodePath = Vec<usize>;

/// Lookup from node ids to tree positions.
///
/// The index stores paths instead of references so it can live next to the
/// dataset it describes. It is rebuilt whenever the dataset is replaced and
/// never updated incrementally.
///
/// Ids are expected to be unique across the whole tree. With duplicates the
/// last node visited in pre-order wins.
#[derive(Debug, Clone, Default)]
pub struct TreeIndex {
    /// Maps id -> path of the node, only for nodes with at least one child.
    /// A missing entry means "childless".
    parents: HashMap<NodeId, NodePath>,

    /// Maps id -> path for every node at every depth.
    locations: HashMap<NodeId, NodePath>,

    /// Ids with children, in pre-order.
    parent_order: Vec<NodeId>,

    /// Total node count across all depths.
    node_count: usize,

    /// Deepest level present in the dataset (0 for a flat list).
    max_depth: usize,
}

impl TreeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the index with one depth-first pass over `roots`.
    ///
    /// Uses an explicit stack, so arbitrarily deep trees do not grow the
    /// call stack.
    pub fn build(roots: &[Node]) -> Self {
        let mut index = Self::new();
        let mut stack: Vec<(&Node, NodePath)> = roots
            .iter()
            .enumerate()
            .rev()
            .map(|(i, node)| (node, vec![i]))
            .collect();

        while let Some((node, path)) = stack.pop() {
            index.node_count += 1;
            index.max_depth = index.max_depth.max(path.len() - 1);

            if node.has_children() {
                if index.parents.insert(node.id.clone(), path.clone()).is_none() {
                    index.parent_order.push(node.id.clone());
                }
                for (i, child) in node.children.iter().enumerate().rev() {
                    let mut child_path = path.clone();
                    child_path.push(i);
                    stack.push((child, child_path));
                }
            }

            index.locations.insert(node.id.clone(), path);
        }

        log::debug!(
            "tree index built: {} nodes, {} parents, depth {}",
            index.node_count,
            index.parents.len(),
            index.max_depth
        );
        index
    }

    /// Returns true if the node with `id` has at least one child.
    pub fn has_children(&self, id: &NodeId) -> bool {
        self.parents.contains_key(id)
    }

    /// Direct children of the node with `id`, resolved against `roots`.
    ///
    /// Returns `None` for childless or unknown ids.
    pub fn children<'a>(&self, roots: &'a [Node], id: &NodeId) -> Option<&'a [Node]> {
        let path = self.parents.get(id)?;
        resolve_path(roots, path).map(|node| node.children.as_slice())
    }

    /// Finds any node by id, at any depth.
    pub fn node<'a>(&self, roots: &'a [Node], id: &NodeId) -> Option<&'a Node> {
        let path = self.locations.get(id)?;
        resolve_path(roots, path)
    }

    /// Mutable access to any node by id. The caller must not change ids or
    /// children through it without rebuilding the index.
    pub fn node_mut<'a>(&self, roots: &'a mut [Node], id: &NodeId) -> Option<&'a mut Node> {
        let path = self.locations.get(id)?;
        let (first, rest) = path.split_first()?;
        let mut node = roots.get_mut(*first)?;
        for &i in rest {
            node = node.children.get_mut(i)?;
        }
        Some(node)
    }

    /// Depth of the node with `id` (0 for top-level nodes).
    pub fn level_of(&self, id: &NodeId) -> Option<usize> {
        self.locations.get(id).map(|path| path.len() - 1)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.locations.contains_key(id)
    }

    /// Ids of all nodes with children, in pre-order.
    pub fn parent_ids(&self) -> &[NodeId] {
        &self.parent_order
    }

    pub fn parent_count(&self) -> usize {
        self.parents.len()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

fn resolve_path<'a>(roots: &'a [Node], path: &[usize]) -> Option<&'a Node> {
    let (first, rest) = path.split_first()?;
    let mut node = roots.get(*first)?;
    for &i in rest {
        node = node.children.get(i)?;
    }
    Some(node)
}
