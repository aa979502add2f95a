mod face_sampler;
mod point_pool;
mod tessellator;

pub use tessellator::Tessellator;

use std::ops::Range;

use crate::error::{Result, TessellationError, TsplineError};
use crate::math::Point3;
use crate::topology::FaceId;

/// Deepest quadtree level accepted for [`TessellationParams::max_depth`].
pub const DEPTH_LIMIT: u32 = 30;

/// Parameters controlling tessellation quality and cost.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum allowed distance between the surface and the bilinear cell
    /// through its corners, checked at the cell centre and edge midpoints.
    pub resolution: f64,
    /// Maximum number of bisections of an initial cell.
    pub max_depth: u32,
    /// Maximum number of surface samples held while refining one face.
    pub max_points: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            resolution: 0.1,
            max_depth: 12,
            max_points: 1 << 23,
        }
    }
}

impl TessellationParams {
    /// Checks that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`TsplineError::InvalidArgument`] naming the first bad value.
    pub fn validate(&self) -> Result<()> {
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(TsplineError::InvalidArgument {
                name: "resolution",
                reason: format!("must be finite and positive, got {}", self.resolution),
            });
        }
        if self.max_depth > DEPTH_LIMIT {
            return Err(TsplineError::InvalidArgument {
                name: "max_depth",
                reason: format!("must not exceed {DEPTH_LIMIT}, got {}", self.max_depth),
            });
        }
        if self.max_points == 0 {
            return Err(TsplineError::InvalidArgument {
                name: "max_points",
                reason: "must be positive".into(),
            });
        }
        Ok(())
    }
}

/// The polygons emitted for one source face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceGroup {
    pub face: FaceId,
    /// Indices into [`PolygonMesh::faces`].
    pub polygons: Range<usize>,
}

/// A polygon mesh sharing one point array between all faces.
///
/// Polygons are stored flat: `indices[offsets[i]..offsets[i + 1]]` is
/// polygon `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonMesh {
    points: Vec<Point3>,
    indices: Vec<u32>,
    offsets: Vec<usize>,
    groups: Vec<FaceGroup>,
}

impl Default for PolygonMesh {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            indices: Vec::new(),
            offsets: vec![0],
            groups: Vec::new(),
        }
    }
}

impl PolygonMesh {
    /// The unique evaluated points, in emission order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Iterates polygons as slices of point indices.
    pub fn faces(&self) -> impl Iterator<Item = &[u32]> {
        self.offsets.windows(2).map(|w| &self.indices[w[0]..w[1]])
    }

    /// Polygon `index`, if it exists.
    #[must_use]
    pub fn face(&self, index: usize) -> Option<&[u32]> {
        let start = *self.offsets.get(index)?;
        let end = *self.offsets.get(index + 1)?;
        self.indices.get(start..end)
    }

    #[must_use]
    pub fn face_count(&self) -> usize {
        self.offsets.len() - 1
    }

    /// One group per source face, in face order.
    #[must_use]
    pub fn groups(&self) -> &[FaceGroup] {
        &self.groups
    }

    pub(crate) fn push_point(&mut self, point: Point3, face: FaceId) -> Result<u32> {
        let index = u32::try_from(self.points.len()).map_err(|_| {
            TessellationError::PointBudgetExhausted {
                face,
                limit: u32::MAX as usize,
            }
        })?;
        self.points.push(point);
        Ok(index)
    }

    pub(crate) fn push_polygon(&mut self, polygon: &[u32]) {
        self.indices.extend_from_slice(polygon);
        self.offsets.push(self.indices.len());
    }

    pub(crate) fn push_group(&mut self, face: FaceId, first_polygon: usize) {
        self.groups.push(FaceGroup {
            face,
            polygons: first_polygon..self.face_count(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flat_polygon_storage() {
        let face = FaceId::default();
        let mut mesh = PolygonMesh::default();
        for x in 0..5 {
            mesh.push_point(Point3::new(f64::from(x), 0.0, 0.0), face)
                .unwrap();
        }
        mesh.push_polygon(&[0, 1, 2]);
        mesh.push_polygon(&[0, 2, 3, 4]);
        mesh.push_group(face, 0);

        let faces: Vec<&[u32]> = mesh.faces().collect();
        assert_eq!(faces, vec![&[0_u32, 1, 2][..], &[0_u32, 2, 3, 4][..]]);
        assert_eq!(mesh.face(1), Some(&[0_u32, 2, 3, 4][..]));
        assert_eq!(mesh.face(2), None);
        assert_eq!(mesh.groups()[0].polygons, 0..2);
    }

    #[test]
    fn default_params_are_valid() {
        assert!(TessellationParams::default().validate().is_ok());
        let bad = TessellationParams {
            resolution: f64::NAN,
            ..TessellationParams::default()
        };
        assert!(bad.validate().is_err());
        let deep = TessellationParams {
            max_depth: DEPTH_LIMIT + 1,
            ..TessellationParams::default()
        };
        assert!(deep.validate().is_err());
    }
}
