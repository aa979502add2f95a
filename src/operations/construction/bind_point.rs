use crate::error::{Result, TopologyError};
use crate::topology::{NodeId, PointId, TopologyStore};

/// Pairs a blending node with its control point, in both directions.
pub struct BindPoint {
    node: NodeId,
    point: PointId,
}

impl BindPoint {
    /// Creates a new `BindPoint` operation.
    #[must_use]
    pub fn new(node: NodeId, point: PointId) -> Self {
        Self { node, point }
    }

    /// Executes the operation. Re-binding the same pair is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is already paired with someone else.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        let bound_point = store.node(self.node)?.point;
        let bound_node = store.point(self.point)?.node;
        if bound_point.is_some_and(|p| p != self.point) || bound_node.is_some_and(|n| n != self.node)
        {
            return Err(TopologyError::PointConflict {
                node: self.node,
                point: self.point,
            }
            .into());
        }
        store.node_mut(self.node)?.point = Some(self.point);
        store.point_mut(self.point)?.node = Some(self.node);
        Ok(())
    }
}
