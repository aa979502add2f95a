//! Adaptive quadtree sampling of one face.
//!
//! The face is first cut along its knot lines into polynomial patches.
//! Each patch is then bisected in `s` and `t` while the surface strays by
//! more than the resolution from the bilinear cell through its corners,
//! measured at the cell centre and at the midpoint of each edge.
//!
//! Sample locations live on an integer lattice: every patch spans `scale`
//! lattice steps in each direction, so cells at any depth share corner keys
//! exactly and the neighbour of a finer cell can pick up its hanging points.
//!
//! Sampling runs in two passes. [`FaceSampler::subdivide`] settles the leaf
//! cells of every face first, so that [`FaceSampler::emit`] can close each
//! leaf edge on a face border over the points its neighbour placed there.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, TessellationError};
use crate::math::basis::local_basis;
use crate::math::{Parameter, Point3, Vector3, Winding};
use crate::spline::FaceBlending;

use super::point_pool::{BorderIndex, PointPool};
use super::{PolygonMesh, TessellationParams};

type Key = (u64, u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cell {
    x: u64,
    y: u64,
    depth: u32,
}

/// Leaf cells of one face and the parameters of their corners on its border.
#[derive(Debug, Default)]
pub(crate) struct FacePlan {
    leaves: Vec<Cell>,
    pub border: Vec<Parameter>,
}

/// A point of a leaf outline.
enum Corner {
    Lattice(Key),
    Border(Parameter),
}

pub(crate) struct FaceSampler<'a> {
    blending: &'a FaceBlending,
    params: &'a TessellationParams,
    s_lines: Vec<f64>,
    t_lines: Vec<f64>,
    scale: u64,
    samples: HashMap<Key, Point3>,
    indices: HashMap<Key, u32>,
    s_basis: HashMap<u64, Vec<f64>>,
    t_basis: HashMap<u64, Vec<f64>>,
}

impl<'a> FaceSampler<'a> {
    pub fn new(blending: &'a FaceBlending, params: &'a TessellationParams) -> Self {
        let (s_lines, t_lines) = blending.knot_lines();
        Self {
            blending,
            params,
            s_lines,
            t_lines,
            scale: 1 << (params.max_depth + 1),
            samples: HashMap::new(),
            indices: HashMap::new(),
            s_basis: HashMap::new(),
            t_basis: HashMap::new(),
        }
    }

    /// Runs the quadtree. The plan holds the leaf cells in traversal order.
    pub fn subdivide(mut self) -> Result<FacePlan> {
        let columns = self.s_lines.len() as u64 - 1;
        let rows = self.t_lines.len() as u64 - 1;

        let mut stack = Vec::new();
        for row in (0..rows).rev() {
            for column in (0..columns).rev() {
                stack.push(Cell {
                    x: column * self.scale,
                    y: row * self.scale,
                    depth: 0,
                });
            }
        }

        let mut leaves = Vec::new();
        while let Some(cell) = stack.pop() {
            let deviation = self.deviation(cell)?;
            if deviation <= self.params.resolution {
                leaves.push(cell);
                continue;
            }
            if cell.depth >= self.params.max_depth {
                return Err(TessellationError::ToleranceUnattainable {
                    face: self.blending.face,
                    depth: cell.depth,
                    deviation,
                }
                .into());
            }

            let (x, y) = (cell.x, cell.y);
            let half = (self.scale >> cell.depth) / 2;
            let depth = cell.depth + 1;
            stack.push(Cell { x: x + half, y: y + half, depth });
            stack.push(Cell { x, y: y + half, depth });
            stack.push(Cell { x: x + half, y, depth });
            stack.push(Cell { x, y, depth });
        }

        let mut keys: Vec<Key> = corner_keys(&leaves, self.scale)
            .into_iter()
            .filter(|&key| self.on_border(key))
            .collect();
        keys.sort_unstable();
        let border = keys.into_iter().map(|key| self.parameter(key)).collect();
        Ok(FacePlan { leaves, border })
    }

    /// Largest distance between the surface and the bilinear cell through
    /// its corners, over the centre and the four edge midpoints.
    fn deviation(&mut self, cell: Cell) -> Result<f64> {
        let span = self.scale >> cell.depth;
        let half = span / 2;
        let (x, y) = (cell.x, cell.y);
        let keys = [(x, y), (x + span, y), (x + span, y + span), (x, y + span)];

        let mut corners = [Point3::origin(); 4];
        for (corner, &key) in corners.iter_mut().zip(&keys) {
            *corner = self.sample(key)?;
        }

        let mean = corners.iter().fold(Vector3::zeros(), |acc, p| acc + p.coords) / 4.0;
        let centre = self.evaluate((x + half, y + half))?;
        let mut deviation = (centre.coords - mean).norm();

        for i in 0..4 {
            let (a, b) = (keys[i], keys[(i + 1) % 4]);
            let chord = (corners[i].coords + corners[(i + 1) % 4].coords) / 2.0;
            let middle = self.evaluate(((a.0 + b.0) / 2, (a.1 + b.1) / 2))?;
            deviation = deviation.max((middle.coords - chord).norm());
        }
        Ok(deviation)
    }

    /// Appends the polygons of `plan` to `mesh`.
    ///
    /// Leaf edges inside the face pick up the corners of finer neighbours.
    /// Leaf edges on the face border pick up every point in `border` that
    /// lies strictly between their ends, whichever face put it there.
    pub fn emit(
        mut self,
        plan: &FacePlan,
        border: &BorderIndex,
        mesh: &mut PolygonMesh,
        pool: &mut PointPool,
    ) -> Result<()> {
        let corners = corner_keys(&plan.leaves, self.scale);
        let mut polygon = Vec::new();
        for &cell in &plan.leaves {
            polygon.clear();
            for corner in self.outline(cell, &corners, border) {
                polygon.push(self.index_of(corner, mesh, pool)?);
            }
            if self.blending.winding == Winding::Clockwise {
                polygon.reverse();
            }
            mesh.push_polygon(&polygon);
        }
        Ok(())
    }

    /// The counter-clockwise outline of a leaf, hanging points included.
    fn outline(&self, cell: Cell, lattice: &HashSet<Key>, border: &BorderIndex) -> Vec<Corner> {
        let span = self.scale >> cell.depth;
        let (x, y) = (cell.x, cell.y);
        let corners = [(x, y), (x + span, y), (x + span, y + span), (x, y + span)];

        let mut outline = Vec::with_capacity(4);
        for (i, &a) in corners.iter().enumerate() {
            let b = corners[(i + 1) % 4];
            outline.push(Corner::Lattice(a));
            if self.on_border_edge(a, b) {
                let (from, to) = (self.parameter(a), self.parameter(b));
                outline.extend(border.between(&from, &to).into_iter().map(Corner::Border));
            } else {
                let mut keys = Vec::new();
                hanging(lattice, a, b, &mut keys);
                outline.extend(keys.into_iter().map(Corner::Lattice));
            }
        }
        outline
    }

    fn on_border(&self, key: Key) -> bool {
        let (width, height) = self.extent();
        key.0 == 0 || key.1 == 0 || key.0 == width || key.1 == height
    }

    fn on_border_edge(&self, a: Key, b: Key) -> bool {
        let (width, height) = self.extent();
        if a.1 == b.1 {
            a.1 == 0 || a.1 == height
        } else {
            a.0 == 0 || a.0 == width
        }
    }

    fn extent(&self) -> (u64, u64) {
        (
            (self.s_lines.len() as u64 - 1) * self.scale,
            (self.t_lines.len() as u64 - 1) * self.scale,
        )
    }

    /// Evaluates the surface at a lattice key, caching the result.
    fn sample(&mut self, key: Key) -> Result<Point3> {
        if let Some(&point) = self.samples.get(&key) {
            return Ok(point);
        }
        if self.samples.len() >= self.params.max_points {
            return Err(TessellationError::PointBudgetExhausted {
                face: self.blending.face,
                limit: self.params.max_points,
            }
            .into());
        }
        let point = self.evaluate(key)?;
        self.samples.insert(key, point);
        Ok(point)
    }

    /// Evaluates the surface at a lattice key without keeping the point.
    fn evaluate(&mut self, key: Key) -> Result<Point3> {
        if let Some(&point) = self.samples.get(&key) {
            return Ok(point);
        }
        let parameter = self.parameter(key);
        let functions = &self.blending.functions;
        let s_values = self.s_basis.entry(key.0).or_insert_with(|| {
            functions
                .iter()
                .map(|f| local_basis(&f.s_knots, parameter.x))
                .collect()
        });
        let t_values = self.t_basis.entry(key.1).or_insert_with(|| {
            functions
                .iter()
                .map(|f| local_basis(&f.t_knots, parameter.y))
                .collect()
        });
        self.blending.combine(s_values, t_values).ok_or_else(|| {
            TessellationError::DegenerateWeight {
                face: self.blending.face,
                s: parameter.x,
                t: parameter.y,
            }
            .into()
        })
    }

    fn index_of(&mut self, corner: Corner, mesh: &mut PolygonMesh, pool: &mut PointPool) -> Result<u32> {
        let face = self.blending.face;
        let key = match corner {
            Corner::Border(parameter) => {
                if let Some(index) = pool.get(&parameter) {
                    return Ok(index);
                }
                let point = self.blending.evaluate(parameter.x, parameter.y)?;
                return pool.index(&parameter, point, face, mesh);
            }
            Corner::Lattice(key) => key,
        };
        if let Some(&index) = self.indices.get(&key) {
            return Ok(index);
        }
        let point = self.sample(key)?;
        let index = if self.on_border(key) {
            pool.index(&self.parameter(key), point, face, mesh)?
        } else {
            mesh.push_point(point, face)?
        };
        self.indices.insert(key, index);
        Ok(index)
    }

    fn parameter(&self, key: Key) -> Parameter {
        Parameter::new(
            coordinate(&self.s_lines, self.scale, key.0),
            coordinate(&self.t_lines, self.scale, key.1),
        )
    }
}

/// Every corner of every leaf.
fn corner_keys(leaves: &[Cell], scale: u64) -> HashSet<Key> {
    let mut keys = HashSet::with_capacity(leaves.len() + leaves.len() / 2);
    for cell in leaves {
        let span = scale >> cell.depth;
        let (x, y) = (cell.x, cell.y);
        keys.extend([(x, y), (x + span, y), (x + span, y + span), (x, y + span)]);
    }
    keys
}

/// Pushes the leaf corners strictly between `a` and `b`, in order.
fn hanging(lattice: &HashSet<Key>, a: Key, b: Key, keys: &mut Vec<Key>) {
    if a.0.abs_diff(b.0).max(a.1.abs_diff(b.1)) < 2 {
        return;
    }
    let mid = ((a.0 + b.0) / 2, (a.1 + b.1) / 2);
    if lattice.contains(&mid) {
        hanging(lattice, a, mid, keys);
        keys.push(mid);
        hanging(lattice, mid, b, keys);
    }
}

/// Maps a lattice coordinate to its parametric value. Lattice points on a
/// knot line map to the knot exactly.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn coordinate(lines: &[f64], scale: u64, key: u64) -> f64 {
    let span = (key / scale) as usize;
    let offset = key % scale;
    let Some(&start) = lines.get(span) else {
        return lines.last().copied().unwrap_or_default();
    };
    if offset == 0 {
        return start;
    }
    let end = lines.get(span + 1).copied().unwrap_or(start);
    start + (end - start) * (offset as f64 / scale as f64)
}
