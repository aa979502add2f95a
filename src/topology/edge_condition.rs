use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for an edge condition in the topology store.
    pub struct EdgeConditionId;
}

/// Continuity flag attached to a boundary edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeConditionData {
    pub edge: Option<EdgeId>,
    /// `true` if the edge lies on the domain boundary, where knot intervals
    /// are extended by repetition.
    pub boundary: bool,
}

impl EdgeConditionData {
    /// Creates an unattached condition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
