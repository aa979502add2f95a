use crate::error::Result;
use crate::topology::{FaceId, LinkId, TopologyStore};

/// Appends a link to a face's boundary loop.
///
/// Links are kept in caller order; closure is checked by
/// [`ValidateImage`](crate::operations::query::ValidateImage).
pub struct AddLinkToFace {
    face: FaceId,
    link: LinkId,
}

impl AddLinkToFace {
    /// Creates a new `AddLinkToFace` operation.
    #[must_use]
    pub fn new(face: FaceId, link: LinkId) -> Self {
        Self { face, link }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns an error if the face or link is not in the store.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        store.link(self.link)?;
        store.face_mut(self.face)?.links.push(self.link);
        Ok(())
    }
}
