use crate::error::{Result, TessellationError, TopologyError};
use crate::math::basis::local_basis;
use crate::math::{Parameter, ParameterRect, Point3, Vector4, Winding, TOLERANCE};
use crate::topology::{Direction, FaceId, NodeId, TopologyStore};

/// The rational blending function attached to one node.
#[derive(Debug, Clone, PartialEq)]
pub struct BlendingFunction {
    pub node: NodeId,
    /// Local knot vector in `s`, `degree + 2` values.
    pub s_knots: Vec<f64>,
    /// Local knot vector in `t`, `degree + 2` values.
    pub t_knots: Vec<f64>,
    /// Homogeneous control point `(x·w, y·w, z·w, w)`.
    pub point: Vector4,
}

impl BlendingFunction {
    /// Builds the blending function of `node` by walking its neighbours.
    ///
    /// # Errors
    ///
    /// Returns an error if the node, its anchor or its point cannot be resolved.
    pub fn from_node(
        store: &TopologyStore,
        node: NodeId,
        s_degree: usize,
        t_degree: usize,
    ) -> Result<Self> {
        let point_id = store
            .node(node)?
            .point
            .ok_or_else(|| TopologyError::EntityNotFound("node point".into()))?;
        Ok(Self {
            node,
            s_knots: knot_vector(store, node, s_degree, Direction::West, |p| p.x)?,
            t_knots: knot_vector(store, node, t_degree, Direction::South, |p| p.y)?,
            point: store.point(point_id)?.homogeneous(),
        })
    }

    /// The region of the domain where the function is non-zero.
    #[must_use]
    pub fn support(&self) -> ParameterRect {
        ParameterRect::new(
            self.s_knots.first().copied().unwrap_or_default(),
            self.s_knots.last().copied().unwrap_or_default(),
            self.t_knots.first().copied().unwrap_or_default(),
            self.t_knots.last().copied().unwrap_or_default(),
        )
    }

    /// The (non-rational) basis value at `(s, t)`.
    #[must_use]
    pub fn value(&self, s: f64, t: f64) -> f64 {
        local_basis(&self.s_knots, s) * local_basis(&self.t_knots, t)
    }

    /// Returns `true` if both knot vectors are non-decreasing.
    #[must_use]
    pub fn is_monotone(&self) -> bool {
        let sorted = |k: &[f64]| k.windows(2).all(|w| w[0] <= w[1]);
        sorted(&self.s_knots) && sorted(&self.t_knots)
    }
}

/// Collects `degree + 2` knots through the node graph.
///
/// Walks `(degree + 1) / 2` steps towards `backward` and the rest the other
/// way. Where a neighbour is absent the last node is repeated, which
/// clamps the function at the domain boundary.
fn knot_vector(
    store: &TopologyStore,
    node: NodeId,
    degree: usize,
    backward: Direction,
    coordinate: fn(&Parameter) -> f64,
) -> Result<Vec<f64>> {
    let before = (degree + 1) / 2;
    let after = degree + 1 - before;

    let mut nodes = walk(store, node, backward, before)?;
    nodes.reverse();
    nodes.push(node);
    nodes.extend(walk(store, node, backward.opposite(), after)?);

    nodes
        .into_iter()
        .map(|id| -> Result<f64> { Ok(coordinate(&store.node_parameter(id)?)) })
        .collect()
}

fn walk(
    store: &TopologyStore,
    from: NodeId,
    direction: Direction,
    steps: usize,
) -> Result<Vec<NodeId>> {
    let mut visited = Vec::with_capacity(steps);
    let mut current = from;
    for _ in 0..steps {
        if let Some(next) = store.node(current)?.neighbours.at(direction) {
            current = next;
        }
        visited.push(current);
    }
    Ok(visited)
}

/// The blending functions acting on one face.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceBlending {
    pub face: FaceId,
    pub rect: ParameterRect,
    /// Orientation of the face's link loop.
    pub winding: Winding,
    pub functions: Vec<BlendingFunction>,
}

impl FaceBlending {
    /// Evaluates the surface at `(s, t)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the blended weight vanishes at `(s, t)`.
    pub fn evaluate(&self, s: f64, t: f64) -> Result<Point3> {
        let s_values: Vec<f64> = self
            .functions
            .iter()
            .map(|f| local_basis(&f.s_knots, s))
            .collect();
        let t_values: Vec<f64> = self
            .functions
            .iter()
            .map(|f| local_basis(&f.t_knots, t))
            .collect();
        self.combine(&s_values, &t_values)
            .ok_or_else(|| {
                TessellationError::DegenerateWeight {
                    face: self.face,
                    s,
                    t,
                }
                .into()
            })
    }

    /// Blends the control points given each function's univariate values.
    ///
    /// Returns `None` when the total weight vanishes.
    #[must_use]
    pub fn combine(&self, s_values: &[f64], t_values: &[f64]) -> Option<Point3> {
        let sum = self
            .functions
            .iter()
            .zip(s_values.iter().zip(t_values))
            .fold(Vector4::zeros(), |acc, (f, (bs, bt))| acc + f.point * (bs * bt));
        if sum.w.abs() <= TOLERANCE {
            return None;
        }
        Some(Point3::new(sum.x / sum.w, sum.y / sum.w, sum.z / sum.w))
    }

    /// Sorted, distinct knot lines crossing the face in `s` and `t`,
    /// including the face bounds.
    ///
    /// Between consecutive lines the surface is polynomial, which lets a
    /// face with more than four links be sampled as a grid of patches.
    #[must_use]
    pub fn knot_lines(&self) -> (Vec<f64>, Vec<f64>) {
        let s = cuts(
            self.rect.s_min,
            self.rect.s_max,
            self.functions.iter().flat_map(|f| f.s_knots.iter().copied()),
        );
        let t = cuts(
            self.rect.t_min,
            self.rect.t_max,
            self.functions.iter().flat_map(|f| f.t_knots.iter().copied()),
        );
        (s, t)
    }
}

fn cuts(min: f64, max: f64, knots: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut lines = vec![min, max];
    lines.extend(knots.filter(|&k| k > min + TOLERANCE && k < max - TOLERANCE));
    lines.sort_by(f64::total_cmp);
    lines.dedup_by(|a, b| (*a - *b).abs() <= TOLERANCE);
    lines
}

/// Blending functions of every face of a prepared spline, in image order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlendingTable {
    faces: Vec<FaceBlending>,
}

impl BlendingTable {
    #[must_use]
    pub fn new(faces: Vec<FaceBlending>) -> Self {
        Self { faces }
    }

    /// The blending of one face, if it belongs to the spline.
    #[must_use]
    pub fn face(&self, face: FaceId) -> Option<&FaceBlending> {
        self.faces.iter().find(|f| f.face == face)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FaceBlending> {
        self.faces.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
