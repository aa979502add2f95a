use tracing::{debug, warn};

use crate::error::{Result, TessellationError, TopologyError};
use crate::spline::{BlendingTable, FaceBlending, Spline};
use crate::topology::{FaceId, PreparationStage, TopologyStore};

use super::face_sampler::FaceSampler;
use super::point_pool::{BorderIndex, PointPool};
use super::{PolygonMesh, TessellationParams};

/// Turns a prepared spline into a polygon mesh.
///
/// Every face is refined first, then emitted in image order. Faces share
/// the points on their common borders, so neighbours refined to different
/// depths still meet edge to edge. Output depends only on the spline and
/// the parameters.
pub struct Tessellator<'a> {
    store: &'a TopologyStore,
    spline: &'a Spline,
    params: TessellationParams,
}

impl<'a> Tessellator<'a> {
    /// Creates a tessellator with default parameters.
    #[must_use]
    pub fn new(store: &'a TopologyStore, spline: &'a Spline) -> Self {
        Self {
            store,
            spline,
            params: TessellationParams::default(),
        }
    }

    /// Replaces all parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters fail [`TessellationParams::validate`].
    pub fn with_params(mut self, params: TessellationParams) -> Result<Self> {
        params.validate()?;
        self.params = params;
        Ok(self)
    }

    /// Sets the maximum allowed deviation ε.
    ///
    /// # Errors
    ///
    /// Returns an error unless ε is finite and positive.
    pub fn set_resolution(&mut self, resolution: f64) -> Result<()> {
        let params = TessellationParams {
            resolution,
            ..self.params
        };
        params.validate()?;
        self.params = params;
        Ok(())
    }

    #[must_use]
    pub fn params(&self) -> &TessellationParams {
        &self.params
    }

    /// Tessellates every face of the spline.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is not prepared, or a face cannot reach
    /// the resolution within the depth and point budgets.
    pub fn interpolate_all(&self) -> Result<PolygonMesh> {
        let table = self.table()?;
        self.run(table.iter())
    }

    /// Tessellates a single face of the spline.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is not prepared, the face is not part
    /// of it, or the face cannot reach the resolution within budget.
    pub fn interpolate_face(&self, face: FaceId) -> Result<PolygonMesh> {
        let blending = self
            .table()?
            .face(face)
            .ok_or_else(|| TopologyError::EntityNotFound("face blending".into()))?;
        self.run(std::iter::once(blending))
    }

    fn table(&self) -> Result<&'a BlendingTable> {
        if self.store.stage() < PreparationStage::Connected {
            return Err(TessellationError::NotPrepared.into());
        }
        self.spline
            .blending()
            .ok_or_else(|| TessellationError::NotPrepared.into())
    }

    fn run<'b>(&self, faces: impl Iterator<Item = &'b FaceBlending>) -> Result<PolygonMesh> {
        let mut plans = Vec::new();
        let mut border = BorderIndex::default();
        for blending in faces {
            let plan = match FaceSampler::new(blending, &self.params).subdivide() {
                Ok(plan) => plan,
                Err(err) => {
                    warn!(face = ?blending.face, error = %err, "face tessellation failed");
                    return Err(err);
                }
            };
            for parameter in &plan.border {
                border.insert(parameter);
            }
            plans.push((blending, plan));
        }
        border.finish();

        let mut mesh = PolygonMesh::default();
        let mut pool = PointPool::default();
        for (blending, plan) in &plans {
            let first = mesh.face_count();
            let sampler = FaceSampler::new(blending, &self.params);
            if let Err(err) = sampler.emit(plan, &border, &mut mesh, &mut pool) {
                warn!(face = ?blending.face, error = %err, "face emission failed");
                return Err(err);
            }
            mesh.push_group(blending.face, first);
        }

        debug!(
            resolution = self.params.resolution,
            points = mesh.points().len(),
            polygons = mesh.face_count(),
            groups = mesh.groups().len(),
            "spline tessellated"
        );
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::error::TsplineError;
    use crate::fixtures::{grid, Grid};
    use crate::math::{Point3, Winding};
    use crate::operations::preparation::prepare;

    fn prepared(degree: usize, winding: Winding, height: impl Fn(f64, f64) -> f64) -> Grid {
        let mut g = grid(2, 2, degree, winding, height);
        prepare(&mut g.store, &mut g.spline).unwrap();
        g
    }

    fn newell_z(mesh: &PolygonMesh, polygon: &[u32]) -> f64 {
        let points = mesh.points();
        let mut z = 0.0;
        for (i, &a) in polygon.iter().enumerate() {
            let p = points[a as usize];
            let q = points[polygon[(i + 1) % polygon.len()] as usize];
            z += (p.x - q.x) * (p.y + q.y);
        }
        z
    }

    #[test]
    fn bilinear_grid_needs_no_refinement() {
        let g = prepared(1, Winding::CounterClockwise, |s, t| s * t);
        let mesh = Tessellator::new(&g.store, &g.spline)
            .interpolate_all()
            .unwrap();

        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.points().len(), 9);
        assert_eq!(mesh.groups().len(), 4);
        for (group, &face) in mesh.groups().iter().zip(&g.faces) {
            assert_eq!(group.face, face);
            assert_eq!(group.polygons.len(), 1);
        }
        for polygon in mesh.faces() {
            assert_eq!(polygon.len(), 4);
            assert!(newell_z(&mesh, polygon) > 0.0);
        }
    }

    /// Directed polygon edges with no polygon running the other way.
    fn open_edges(mesh: &PolygonMesh) -> Vec<(u32, u32)> {
        let mut edges = HashSet::new();
        for polygon in mesh.faces() {
            for (i, &a) in polygon.iter().enumerate() {
                edges.insert((a, polygon[(i + 1) % polygon.len()]));
            }
        }
        edges
            .iter()
            .copied()
            .filter(|&(a, b)| !edges.contains(&(b, a)))
            .collect()
    }

    #[test]
    fn coarse_face_meets_refined_neighbour_edge_to_edge() {
        let mut g = grid(2, 2, 1, Winding::CounterClockwise, |_, _| 0.0);
        let point = g.store.node(g.node(2, 1)).unwrap().point.unwrap();
        let data = g.store.point_mut(point).unwrap();
        data.position.z = 1.0;
        data.weight = 10.0;
        prepare(&mut g.store, &mut g.spline).unwrap();

        let mesh = Tessellator::new(&g.store, &g.spline)
            .interpolate_all()
            .unwrap();
        let coarse = &mesh.groups()[0];
        assert_eq!(coarse.face, g.faces[0]);
        assert_eq!(coarse.polygons.len(), 1);
        assert!(mesh.face(coarse.polygons.start).unwrap().len() > 4);

        let on_outline = |p: &Point3| {
            [p.x, p.y]
                .iter()
                .any(|&c| c.abs() < 1e-9 || (c - 2.0).abs() < 1e-9)
        };
        for (a, b) in open_edges(&mesh) {
            assert!(on_outline(&mesh.points()[a as usize]));
            assert!(on_outline(&mesh.points()[b as usize]));
        }
    }

    #[test]
    fn clockwise_faces_emit_clockwise_polygons() {
        let g = prepared(1, Winding::Clockwise, |_, _| 0.0);
        let mesh = Tessellator::new(&g.store, &g.spline)
            .interpolate_all()
            .unwrap();
        assert_eq!(mesh.face_count(), 4);
        for polygon in mesh.faces() {
            assert!(newell_z(&mesh, polygon) < 0.0);
        }
    }

    #[test]
    fn single_face() {
        let g = prepared(1, Winding::CounterClockwise, |_, _| 0.0);
        let mesh = Tessellator::new(&g.store, &g.spline)
            .interpolate_face(g.faces[3])
            .unwrap();
        assert_eq!(mesh.groups().len(), 1);
        assert_eq!(mesh.groups()[0].face, g.faces[3]);
        assert_eq!(mesh.points().len(), 4);
    }

    #[test]
    fn resolution_must_be_positive() {
        let g = prepared(1, Winding::CounterClockwise, |_, _| 0.0);
        let mut tessellator = Tessellator::new(&g.store, &g.spline);
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                tessellator.set_resolution(bad),
                Err(TsplineError::InvalidArgument { name: "resolution", .. })
            ));
        }
        assert!((tessellator.params().resolution - 0.1).abs() < f64::EPSILON);
        tessellator.set_resolution(1e-3).unwrap();
        assert!((tessellator.params().resolution - 1e-3).abs() < f64::EPSILON);
    }

    #[test]
    fn unprepared_spline_is_rejected() {
        let g = grid(1, 1, 1, Winding::CounterClockwise, |_, _| 0.0);
        let err = Tessellator::new(&g.store, &g.spline)
            .interpolate_all()
            .unwrap_err();
        assert!(matches!(
            err,
            TsplineError::Tessellation(TessellationError::NotPrepared)
        ));
    }

    #[test]
    fn heavy_weight_exceeds_shallow_depth() {
        let mut g = grid(2, 2, 1, Winding::CounterClockwise, |_, _| 0.0);
        let point = g.store.node(g.node(1, 1)).unwrap().point.unwrap();
        let data = g.store.point_mut(point).unwrap();
        data.position.z = 1.0;
        data.weight = 10.0;
        prepare(&mut g.store, &mut g.spline).unwrap();

        let params = TessellationParams {
            max_depth: 0,
            ..TessellationParams::default()
        };
        let err = Tessellator::new(&g.store, &g.spline)
            .with_params(params)
            .unwrap()
            .interpolate_all()
            .unwrap_err();
        assert!(matches!(
            err,
            TsplineError::Tessellation(TessellationError::ToleranceUnattainable { depth: 0, .. })
        ));

        let mesh = Tessellator::new(&g.store, &g.spline)
            .interpolate_all()
            .unwrap();
        assert!(mesh.face_count() > 4);
    }

    #[test]
    fn point_budget() {
        let g = prepared(1, Winding::CounterClockwise, |_, _| 0.0);
        let params = TessellationParams {
            max_points: 3,
            ..TessellationParams::default()
        };
        let err = Tessellator::new(&g.store, &g.spline)
            .with_params(params)
            .unwrap()
            .interpolate_all()
            .unwrap_err();
        assert!(matches!(
            err,
            TsplineError::Tessellation(TessellationError::PointBudgetExhausted { limit: 3, .. })
        ));
    }

    #[test]
    fn vanishing_weights_at_clamped_corner() {
        let mut g = grid(1, 1, 3, Winding::CounterClockwise, |_, _| 0.0);
        prepare(&mut g.store, &mut g.spline).unwrap();
        let err = Tessellator::new(&g.store, &g.spline)
            .interpolate_all()
            .unwrap_err();
        assert!(matches!(
            err,
            TsplineError::Tessellation(TessellationError::DegenerateWeight { s, t, .. })
                if s.abs() < f64::EPSILON && t.abs() < f64::EPSILON
        ));
    }
}
