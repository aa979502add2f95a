use super::link::LinkId;

slotmap::new_key_type! {
    /// Unique identifier for a face in the topology store.
    pub struct FaceId;
}

/// A patch of the parametric domain bounded by a closed loop of links.
#[derive(Debug, Clone, Default)]
pub struct FaceData {
    /// The boundary loop, in caller order.
    pub links: Vec<LinkId>,
}

impl FaceData {
    /// Creates a face with an empty loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
