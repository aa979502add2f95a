use crate::error::{Result, TopologyError};
use crate::spline::Image;
use crate::topology::TopologyStore;

use super::FaceWinding;

/// Checks that a planar graph is complete and consistent.
///
/// Every edge must be patched, non-degenerate, adjoin a face and carry one
/// link per orientation that resolves back to it. Every vertex link must
/// leave its vertex. Every face loop must pass [`FaceWinding`].
pub struct ValidateImage<'a> {
    image: &'a Image,
}

impl<'a> ValidateImage<'a> {
    /// Creates a new `ValidateImage` query.
    #[must_use]
    pub fn new(image: &'a Image) -> Self {
        Self { image }
    }

    /// Executes the validation.
    ///
    /// # Errors
    ///
    /// Returns the first [`TopologyError`] found.
    pub fn execute(&self, store: &TopologyStore) -> Result<()> {
        for &edge_id in &self.image.edges {
            let edge = store.edge(edge_id)?;
            let (start, end) = edge
                .endpoints
                .ok_or(TopologyError::UnpatchedEdge(edge_id))?;
            if start == end {
                return Err(TopologyError::DegenerateEdge(edge_id).into());
            }
            if edge.left.is_none() && edge.right.is_none() {
                return Err(TopologyError::NoAdjoiningFace(edge_id).into());
            }
            for forward in [true, false] {
                let link_id = edge
                    .link(forward)
                    .ok_or(TopologyError::MissingLinkPair(edge_id))?;
                let link = store.link(link_id)?;
                if link.edge != Some(edge_id) || link.forward != forward {
                    return Err(TopologyError::MissingLinkPair(edge_id).into());
                }
            }
        }

        for &vertex in &self.image.vertices {
            for (direction, link) in store.vertex(vertex)?.links.iter() {
                let Some(link) = *link else { continue };
                if store.link_endpoints(link)?.0 != vertex {
                    return Err(TopologyError::InconsistentNeighbour {
                        vertex,
                        direction,
                        reason: "link does not leave the vertex".into(),
                    }
                    .into());
                }
            }
        }

        for &face in &self.image.faces {
            FaceWinding::new(face).execute(store)?;
        }
        Ok(())
    }
}
