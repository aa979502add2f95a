use crate::math::Parameter;

use super::direction::Direction;
use super::node::NodeId;
use super::vertex::VertexId;

/// How far the preparation passes have progressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum PreparationStage {
    #[default]
    Unprepared,
    HalfLinked,
    JunctionsResolved,
    Connected,
}

/// The blending extent synthesised for one T-junction.
#[derive(Debug, Clone, PartialEq)]
pub struct JunctionExtent {
    pub vertex: VertexId,
    /// The direction the vertex has no edge in.
    pub direction: Direction,
    /// Extent nodes, nearest first. Virtual nodes precede at most one real
    /// node, which ends the extent.
    pub nodes: Vec<NodeId>,
    /// Parametric location of each extent node.
    pub parameters: Vec<Parameter>,
}
