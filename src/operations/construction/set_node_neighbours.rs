use crate::error::Result;
use crate::topology::{Compass, NodeId, TopologyStore};

/// Sets the four neighbours of a blending node.
///
/// Empty slots are left for the preparation passes to fill, or mark the
/// boundary.
pub struct SetNodeNeighbours {
    node: NodeId,
    neighbours: Compass<Option<NodeId>>,
}

impl SetNodeNeighbours {
    /// Creates a new `SetNodeNeighbours` operation.
    #[must_use]
    pub fn new(node: NodeId, neighbours: Compass<Option<NodeId>>) -> Self {
        Self { node, neighbours }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or any neighbour is not in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        for neighbour in self.neighbours.iter().filter_map(|(_, n)| *n) {
            store.node(neighbour)?;
        }
        store.node_mut(self.node)?.neighbours = self.neighbours;
        Ok(())
    }
}
