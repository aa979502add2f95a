use crate::math::Parameter;

use super::direction::Compass;
use super::link::LinkId;

slotmap::new_key_type! {
    /// Unique identifier for a vertex in the topology store.
    pub struct VertexId;
}

/// A location in the parametric domain where edges meet.
#[derive(Debug, Clone)]
pub struct VertexData {
    /// Parametric position `(s, t)`.
    pub parameter: Parameter,
    /// Outgoing link in each compass direction. Empty slots are boundary.
    pub links: Compass<Option<LinkId>>,
}

impl VertexData {
    /// Creates an unlinked vertex at `(s, t)`.
    #[must_use]
    pub fn new(s: f64, t: f64) -> Self {
        Self {
            parameter: Parameter::new(s, t),
            links: Compass::default(),
        }
    }

    #[must_use]
    pub fn s(&self) -> f64 {
        self.parameter.x
    }

    #[must_use]
    pub fn t(&self) -> f64 {
        self.parameter.y
    }
}
