use crate::error::{Result, TopologyError};
use crate::math::polygon_2d::winding;
use crate::math::Winding;
use crate::topology::{FaceId, TopologyStore};

/// Checks a face loop and reports its orientation.
pub struct FaceWinding {
    face: FaceId,
}

impl FaceWinding {
    /// Creates a new `FaceWinding` query.
    #[must_use]
    pub fn new(face: FaceId) -> Self {
        Self { face }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop has fewer than three links, does not
    /// close, encloses no area, or the face is not on the same side of every
    /// link (left for a counter-clockwise loop, right for a clockwise one).
    pub fn execute(&self, store: &TopologyStore) -> Result<Winding> {
        let links = &store.face(self.face)?.links;
        if links.len() < 3 {
            return Err(TopologyError::TooFewLinks {
                face: self.face,
                count: links.len(),
            }
            .into());
        }

        let mut parameters = Vec::with_capacity(links.len());
        let mut on_left = 0;
        for (i, &link) in links.iter().enumerate() {
            let (start, end) = store.link_endpoints(link)?;
            let (next_start, _) = store.link_endpoints(links[(i + 1) % links.len()])?;
            if end != next_start {
                return Err(TopologyError::OpenLoop {
                    face: self.face,
                    position: i,
                }
                .into());
            }
            match store.link_faces(link)? {
                (Some(left), _) if left == self.face => on_left += 1,
                (_, Some(right)) if right == self.face => {}
                _ => return Err(TopologyError::InconsistentWinding(self.face).into()),
            }
            parameters.push(store.vertex(start)?.parameter);
        }

        let winding = winding(&parameters).ok_or(TopologyError::DegenerateFace(self.face))?;
        let expected_left = match winding {
            Winding::CounterClockwise => links.len(),
            Winding::Clockwise => 0,
        };
        if on_left != expected_left {
            return Err(TopologyError::InconsistentWinding(self.face).into());
        }
        Ok(winding)
    }
}
