use thiserror::Error;

use crate::topology::{Direction, EdgeId, FaceId, LinkId, NodeId, PointId, VertexId};

/// Top-level error type for the T-spline kernel.
#[derive(Debug, Error)]
pub enum TsplineError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Preparation(#[from] PreparationError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),

    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

/// Malformed adjacency detected while building or validating the planar graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("edge {0:?} starts and ends at the same vertex")]
    DegenerateEdge(EdgeId),

    #[error("edge {0:?} is already patched with different endpoints")]
    EdgeRepatched(EdgeId),

    #[error("edge {0:?} has no endpoints")]
    UnpatchedEdge(EdgeId),

    #[error("edge {0:?} has neither a left nor a right face")]
    NoAdjoiningFace(EdgeId),

    #[error("edge {edge:?} already has a link with forward = {forward}")]
    LinkConflict { edge: EdgeId, forward: bool },

    #[error("link {0:?} is already bound to another traversal")]
    LinkRebound(LinkId),

    #[error("link {0:?} is not bound to an edge")]
    UnboundLink(LinkId),

    #[error("edge {0:?} does not have one link per orientation")]
    MissingLinkPair(EdgeId),

    #[error("edge {0:?} already carries a different edge condition")]
    ConditionConflict(EdgeId),

    #[error("point {point:?} and node {node:?} are bound elsewhere")]
    PointConflict { node: NodeId, point: PointId },

    #[error("vertex {vertex:?} has an inconsistent {direction:?} neighbour: {reason}")]
    InconsistentNeighbour {
        vertex: VertexId,
        direction: Direction,
        reason: String,
    },

    #[error("face {face:?} has {count} links, at least 3 are required")]
    TooFewLinks { face: FaceId, count: usize },

    #[error("face {face:?} loop is open after link {position}")]
    OpenLoop { face: FaceId, position: usize },

    #[error("face {0:?} encloses no parametric area")]
    DegenerateFace(FaceId),

    #[error("face {0:?} does not lie on the same side of all its links")]
    InconsistentWinding(FaceId),
}

/// Failures of the preparation passes. A failed pass leaves the store unprepared.
#[derive(Debug, Error)]
pub enum PreparationError {
    #[error("T-junction at vertex {vertex:?} cannot be extended {direction:?}: {reason}")]
    UnresolvedJunction {
        vertex: VertexId,
        direction: Direction,
        reason: String,
    },

    #[error("incomplete preparation: {0}")]
    IncompletePreparation(String),

    #[error("nodes at vertex {vertex:?} name different {direction:?} neighbours")]
    ConflictingNeighbours {
        vertex: VertexId,
        direction: Direction,
    },

    #[error("no unique {direction:?} node to link from vertex {vertex:?}")]
    AmbiguousNeighbour {
        vertex: VertexId,
        direction: Direction,
    },

    #[error("{pass} did not reach a fixed point after {sweeps} sweeps")]
    NotConverged { pass: &'static str, sweeps: usize },
}

/// Errors raised while evaluating and subdividing faces.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("spline has not been prepared")]
    NotPrepared,

    #[error("face {face:?} still deviates by {deviation:e} at depth {depth}")]
    ToleranceUnattainable {
        face: FaceId,
        depth: u32,
        deviation: f64,
    },

    #[error("face {face:?} exceeded the budget of {limit} points")]
    PointBudgetExhausted { face: FaceId, limit: usize },

    #[error("face {face:?} has vanishing weight at ({s}, {t})")]
    DegenerateWeight { face: FaceId, s: f64, t: f64 },
}

/// Convenience type alias for results using [`TsplineError`].
pub type Result<T> = std::result::Result<T, TsplineError>;
