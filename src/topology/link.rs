use super::edge::EdgeId;

slotmap::new_key_type! {
    /// Unique identifier for a link (half-edge) in the topology store.
    pub struct LinkId;
}

/// One oriented traversal of an edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkData {
    /// The traversed edge, once bound.
    pub edge: Option<EdgeId>,
    /// If `true`, the edge is traversed in its natural direction (start → end).
    /// If `false`, the edge is traversed in reverse (end → start).
    pub forward: bool,
}

impl LinkData {
    /// Creates an unbound link.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
