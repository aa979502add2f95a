use std::collections::HashMap;

use crate::error::Result;
use crate::math::{Parameter, Point3};
use crate::topology::FaceId;

use super::PolygonMesh;

/// Snapping resolution for parameters shared between faces.
const SNAP: f64 = 1e9;

/// De-duplicates points on face borders by their snapped `(s, t)`.
#[derive(Debug, Default)]
pub(crate) struct PointPool {
    index: HashMap<(i64, i64), u32>,
}

impl PointPool {
    /// The index already given to the point at `parameter`, if any.
    pub fn get(&self, parameter: &Parameter) -> Option<u32> {
        self.index.get(&snap(parameter)).copied()
    }

    /// Returns the index of the point at `parameter`, adding `point` to the
    /// mesh the first time the parameter is seen.
    pub fn index(
        &mut self,
        parameter: &Parameter,
        point: Point3,
        face: FaceId,
        mesh: &mut PolygonMesh,
    ) -> Result<u32> {
        let key = snap(parameter);
        if let Some(&index) = self.index.get(&key) {
            return Ok(index);
        }
        let index = mesh.push_point(point, face)?;
        self.index.insert(key, index);
        Ok(index)
    }
}

/// Points placed on face borders by any face, by the line they lie on.
///
/// A point is filed under both its `t` row and its `s` column, so that an
/// edge along either axis finds every point on it.
#[derive(Debug, Default)]
pub(crate) struct BorderIndex {
    rows: HashMap<i64, Vec<(i64, f64)>>,
    columns: HashMap<i64, Vec<(i64, f64)>>,
}

impl BorderIndex {
    pub fn insert(&mut self, parameter: &Parameter) {
        let (s, t) = snap(parameter);
        self.rows.entry(t).or_default().push((s, parameter.x));
        self.columns.entry(s).or_default().push((t, parameter.y));
    }

    /// Sorts every line. Must run before [`BorderIndex::between`].
    pub fn finish(&mut self) {
        for line in self.rows.values_mut().chain(self.columns.values_mut()) {
            line.sort_by_key(|&(key, _)| key);
            line.dedup_by_key(|&mut (key, _)| key);
        }
    }

    /// The points strictly between `from` and `to`, ordered from `from`.
    ///
    /// `from` and `to` must share their `s` or their `t`.
    pub fn between(&self, from: &Parameter, to: &Parameter) -> Vec<Parameter> {
        let (a, b) = (snap(from), snap(to));
        let (line, lo, hi) = if a.1 == b.1 {
            (self.rows.get(&a.1), a.0.min(b.0), a.0.max(b.0))
        } else {
            (self.columns.get(&a.0), a.1.min(b.1), a.1.max(b.1))
        };
        let Some(line) = line else {
            return Vec::new();
        };

        let start = line.partition_point(|&(key, _)| key <= lo);
        let end = line.partition_point(|&(key, _)| key < hi);
        let mut points: Vec<Parameter> = line[start..end.max(start)]
            .iter()
            .map(|&(_, value)| {
                if a.1 == b.1 {
                    Parameter::new(value, from.y)
                } else {
                    Parameter::new(from.x, value)
                }
            })
            .collect();
        if (a.1 == b.1 && a.0 > b.0) || (a.1 != b.1 && a.1 > b.1) {
            points.reverse();
        }
        points
    }
}

#[allow(clippy::cast_possible_truncation)]
fn snap(parameter: &Parameter) -> (i64, i64) {
    (
        (parameter.x * SNAP).round() as i64,
        (parameter.y * SNAP).round() as i64,
    )
}
