use crate::error::{Result, TopologyError};
use crate::topology::{Compass, Direction, LinkId, TopologyStore, VertexId};

/// Records which vertex lies in each compass direction of a vertex.
///
/// Every named neighbour must be joined to the vertex by a patched edge,
/// whose link leaving the vertex is bound, and must lie in that direction
/// in the `(s, t)` plane. Empty slots mark the boundary.
pub struct SetVertexNeighbours {
    vertex: VertexId,
    neighbours: Compass<Option<VertexId>>,
}

impl SetVertexNeighbours {
    /// Creates a new `SetVertexNeighbours` operation.
    #[must_use]
    pub fn new(vertex: VertexId, neighbours: Compass<Option<VertexId>>) -> Self {
        Self { vertex, neighbours }
    }

    /// Executes the operation. The vertex is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::InconsistentNeighbour`] if a neighbour is
    /// not connected as described above.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        let origin = store.vertex(self.vertex)?.parameter;
        let mut links = Compass::default();

        for (direction, neighbour) in self.neighbours.iter() {
            let Some(neighbour) = *neighbour else {
                continue;
            };
            let inconsistent = |reason: &str| TopologyError::InconsistentNeighbour {
                vertex: self.vertex,
                direction,
                reason: reason.into(),
            };

            let target = store.vertex(neighbour)?.parameter;
            if Direction::of_segment(&origin, &target) != Some(direction) {
                return Err(inconsistent("neighbour does not lie in that direction").into());
            }
            let link = outgoing_link(store, self.vertex, neighbour)?
                .ok_or_else(|| inconsistent("no patched edge with a bound link joins them"))?;
            links.set(direction, Some(link));
        }

        store.vertex_mut(self.vertex)?.links = links;
        Ok(())
    }
}

/// Finds the bound link traversing `from → to`.
fn outgoing_link(
    store: &TopologyStore,
    from: VertexId,
    to: VertexId,
) -> Result<Option<LinkId>> {
    for (_, edge) in store.edges() {
        match edge.endpoints {
            Some(pair) if pair == (from, to) => return Ok(edge.forward_link),
            Some(pair) if pair == (to, from) => return Ok(edge.reverse_link),
            _ => {}
        }
    }
    Ok(None)
}
