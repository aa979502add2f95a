use crate::error::{Result, TessellationError, TopologyError, TsplineError};
use crate::math::{Parameter, Point3};
use crate::spline::Spline;
use crate::topology::FaceId;

/// Evaluates a prepared spline at a parameter inside one face.
pub struct EvaluatePoint {
    face: FaceId,
    parameter: Parameter,
}

impl EvaluatePoint {
    /// Creates a new `EvaluatePoint` query.
    #[must_use]
    pub fn new(face: FaceId, s: f64, t: f64) -> Self {
        Self {
            face,
            parameter: Parameter::new(s, t),
        }
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the spline is not prepared, the face is not part
    /// of it, the parameter lies outside the face bounds, or the weight
    /// vanishes there.
    pub fn execute(&self, spline: &Spline) -> Result<Point3> {
        let blending = spline
            .blending()
            .ok_or(TessellationError::NotPrepared)?
            .face(self.face)
            .ok_or_else(|| TopologyError::EntityNotFound("face blending".into()))?;
        if !blending.rect.contains(&self.parameter) {
            return Err(TsplineError::InvalidArgument {
                name: "parameter",
                reason: format!(
                    "({}, {}) lies outside the face bounds",
                    self.parameter.x, self.parameter.y
                ),
            });
        }
        blending.evaluate(self.parameter.x, self.parameter.y)
    }
}
