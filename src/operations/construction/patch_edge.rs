use tracing::trace;

use crate::error::{Result, TopologyError};
use crate::topology::{EdgeId, FaceId, TopologyStore, VertexId};

/// Assigns the endpoints and adjoining faces of an edge.
pub struct PatchEdge {
    edge: EdgeId,
    start: VertexId,
    end: VertexId,
    left: Option<FaceId>,
    right: Option<FaceId>,
}

impl PatchEdge {
    /// Creates a new `PatchEdge` operation with no adjoining faces.
    #[must_use]
    pub fn new(edge: EdgeId, start: VertexId, end: VertexId) -> Self {
        Self {
            edge,
            start,
            end,
            left: None,
            right: None,
        }
    }

    /// Sets the face on the left of `start → end`.
    #[must_use]
    pub fn left(mut self, face: FaceId) -> Self {
        self.left = Some(face);
        self
    }

    /// Sets the face on the right of `start → end`.
    #[must_use]
    pub fn right(mut self, face: FaceId) -> Self {
        self.right = Some(face);
        self
    }

    /// Executes the operation.
    ///
    /// Re-patching with the same endpoints updates the faces.
    ///
    /// # Errors
    ///
    /// Returns an error if an entity is missing, the endpoints coincide, or
    /// the edge was already patched with different endpoints.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        store.vertex(self.start)?;
        store.vertex(self.end)?;
        for face in self.left.iter().chain(&self.right) {
            store.face(*face)?;
        }
        if self.start == self.end {
            return Err(TopologyError::DegenerateEdge(self.edge).into());
        }

        let edge = store.edge_mut(self.edge)?;
        if edge.endpoints.is_some_and(|e| e != (self.start, self.end)) {
            return Err(TopologyError::EdgeRepatched(self.edge).into());
        }
        edge.endpoints = Some((self.start, self.end));
        edge.left = self.left;
        edge.right = self.right;
        trace!(edge = ?self.edge, "patched edge");
        Ok(())
    }
}
