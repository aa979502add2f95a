use crate::math::{Point3, Vector4};

use super::node::NodeId;

slotmap::new_key_type! {
    /// Unique identifier for a control point in the topology store.
    pub struct PointId;
}

/// A weighted control point. `z` carries the height of the surface.
#[derive(Debug, Clone)]
pub struct PointData {
    pub position: Point3,
    pub weight: f64,
    pub node: Option<NodeId>,
}

impl PointData {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self {
            position: Point3::new(x, y, z),
            weight: w,
            node: None,
        }
    }

    /// Returns `(x·w, y·w, z·w, w)`.
    #[must_use]
    pub fn homogeneous(&self) -> Vector4 {
        let p = self.position.coords * self.weight;
        Vector4::new(p.x, p.y, p.z, self.weight)
    }
}
