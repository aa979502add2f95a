use crate::error::Result;
use crate::topology::{NodeAnchor, NodeId, TopologyStore};

/// Anchors a blending node to a vertex of the planar graph.
pub struct AnchorNode {
    node: NodeId,
    anchor: NodeAnchor,
}

impl AnchorNode {
    /// Creates a new `AnchorNode` operation.
    #[must_use]
    pub fn new(node: NodeId, anchor: NodeAnchor) -> Self {
        Self { node, anchor }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or anchor vertex is not in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        if let NodeAnchor::Vertex(vertex) = self.anchor {
            store.vertex(vertex)?;
        }
        store.node_mut(self.node)?.anchor = Some(self.anchor);
        Ok(())
    }
}
