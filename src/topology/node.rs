use crate::math::Parameter;

use super::direction::Compass;
use super::point::PointId;
use super::vertex::VertexId;

slotmap::new_key_type! {
    /// Unique identifier for a blending node in the topology store.
    pub struct NodeId;
}

/// What a node is anchored to in the parametric domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeAnchor {
    /// A vertex of the planar graph.
    Vertex(VertexId),
    /// A location synthesised while extending a T-junction.
    Virtual(Parameter),
}

/// A valence-4 node of the blending graph.
///
/// Walking the neighbours of a node yields the knot intervals of the
/// blending function attached to its point.
#[derive(Debug, Clone, Default)]
pub struct NodeData {
    pub neighbours: Compass<Option<NodeId>>,
    pub anchor: Option<NodeAnchor>,
    pub point: Option<PointId>,
}

impl NodeData {
    /// Creates an unlinked, unanchored node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_virtual(&self) -> bool {
        matches!(self.anchor, Some(NodeAnchor::Virtual(_)))
    }

    /// The vertex this node is anchored to, if any.
    #[must_use]
    pub fn vertex(&self) -> Option<VertexId> {
        match self.anchor {
            Some(NodeAnchor::Vertex(vertex)) => Some(vertex),
            _ => None,
        }
    }
}
