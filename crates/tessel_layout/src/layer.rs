//! Same-z-index sibling groups

use smallvec::SmallVec;

use crate::node::NodeId;

/// Ordered siblings sharing one z-index.
///
/// Nodes are owned by the tree; a layer only records order. Iterate forward
/// for layout, update and render, backward for hit-testing so the last-added
/// (topmost drawn) node is hit first.
#[derive(Clone, Debug, Default)]
pub struct RenderLayer {
    nodes: SmallVec<[NodeId; 8]>,
}

impl RenderLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: NodeId) {
        self.nodes.push(id);
    }

    /// Remove `id`, keeping the order of the rest. Returns whether it was present.
    pub fn remove(&mut self, id: NodeId) -> bool {
        match self.nodes.iter().position(|node| *node == id) {
            Some(index) => {
                self.nodes.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bottom to top
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Top to bottom, for hit-testing
    pub fn iter_hit_order(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().rev().copied()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.nodes
    }
}
