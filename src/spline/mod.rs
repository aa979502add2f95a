//! The surface aggregate: planar graph, node graph, control points and
//! degrees of one T-spline.

pub mod blending;

pub use blending::{BlendingFunction, BlendingTable, FaceBlending};

use crate::error::{Result, TsplineError};
use crate::math::basis::MAX_DEGREE;
use crate::topology::{EdgeConditionId, EdgeId, FaceId, LinkId, NodeId, PointId, VertexId};

/// The planar graph of a surface: every vertex, edge, link and face.
#[derive(Debug, Clone, Default)]
pub struct Image {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
    pub links: Vec<LinkId>,
    pub conditions: Vec<EdgeConditionId>,
    pub faces: Vec<FaceId>,
}

/// The blending-node graph of a surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Connect {
    pub nodes: Vec<NodeId>,
}

/// The control points of a surface, one per node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pointset {
    pub points: Vec<PointId>,
}

/// A complete T-spline surface.
///
/// Entity data lives in a [`TopologyStore`](crate::topology::TopologyStore);
/// the spline only lists handles. Connect, Pointset and the blending
/// table are recorded by
/// [`PrepareImageConnect`](crate::operations::preparation::PrepareImageConnect).
#[derive(Debug, Clone)]
pub struct Spline {
    image: Image,
    connect: Connect,
    pointset: Pointset,
    s_degree: usize,
    t_degree: usize,
    blending: Option<BlendingTable>,
}

impl Spline {
    /// Creates an empty spline of the given degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if a degree is zero or larger than the supported maximum.
    pub fn new(s_degree: usize, t_degree: usize) -> Result<Self> {
        check_degree("s_degree", s_degree)?;
        check_degree("t_degree", t_degree)?;
        Ok(Self {
            image: Image::default(),
            connect: Connect::default(),
            pointset: Pointset::default(),
            s_degree,
            t_degree,
            blending: None,
        })
    }

    #[must_use]
    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Mutable access to the planar graph. Discards any prepared state.
    pub fn image_mut(&mut self) -> &mut Image {
        self.blending = None;
        &mut self.image
    }

    #[must_use]
    pub fn connect(&self) -> &Connect {
        &self.connect
    }

    #[must_use]
    pub fn pointset(&self) -> &Pointset {
        &self.pointset
    }

    #[must_use]
    pub fn s_degree(&self) -> usize {
        self.s_degree
    }

    #[must_use]
    pub fn t_degree(&self) -> usize {
        self.t_degree
    }

    /// The per-face blending functions, once prepared.
    #[must_use]
    pub fn blending(&self) -> Option<&BlendingTable> {
        self.blending.as_ref()
    }

    #[must_use]
    pub fn is_prepared(&self) -> bool {
        self.blending.is_some()
    }

    pub(crate) fn record_preparation(
        &mut self,
        connect: Connect,
        pointset: Pointset,
        blending: BlendingTable,
    ) {
        self.connect = connect;
        self.pointset = pointset;
        self.blending = Some(blending);
    }

    pub(crate) fn discard_preparation(&mut self) {
        self.blending = None;
    }
}

fn check_degree(name: &'static str, degree: usize) -> Result<()> {
    if degree == 0 || degree > MAX_DEGREE {
        return Err(TsplineError::InvalidArgument {
            name,
            reason: format!("degree must be between 1 and {MAX_DEGREE}, got {degree}"),
        });
    }
    Ok(())
}
