use super::edge_condition::EdgeConditionId;
use super::face::FaceId;
use super::link::LinkId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for an edge in the topology store.
    pub struct EdgeId;
}

/// A parametric segment between two vertices.
///
/// Edges are created empty and filled in by the construction operations.
/// "Left" and "right" are taken looking from `start` towards `end` in the
/// `(s, t)` plane.
#[derive(Debug, Clone, Default)]
pub struct EdgeData {
    /// `(start, end)` once the edge has been patched.
    pub endpoints: Option<(VertexId, VertexId)>,
    /// Face on the left of `start → end`.
    pub left: Option<FaceId>,
    /// Face on the right of `start → end`.
    pub right: Option<FaceId>,
    /// Link traversing `start → end`.
    pub forward_link: Option<LinkId>,
    /// Link traversing `end → start`.
    pub reverse_link: Option<LinkId>,
    pub condition: Option<EdgeConditionId>,
}

impl EdgeData {
    /// Creates an unpatched edge.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn start(&self) -> Option<VertexId> {
        self.endpoints.map(|(start, _)| start)
    }

    #[must_use]
    pub fn end(&self) -> Option<VertexId> {
        self.endpoints.map(|(_, end)| end)
    }

    /// The link bound to the given orientation, if any.
    #[must_use]
    pub fn link(&self, forward: bool) -> Option<LinkId> {
        if forward {
            self.forward_link
        } else {
            self.reverse_link
        }
    }

    pub(crate) fn link_slot(&mut self, forward: bool) -> &mut Option<LinkId> {
        if forward {
            &mut self.forward_link
        } else {
            &mut self.reverse_link
        }
    }
}
