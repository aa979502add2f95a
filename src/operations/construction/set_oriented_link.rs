use crate::error::{Result, TopologyError};
use crate::topology::{EdgeId, LinkId, TopologyStore};

/// Binds a link to one traversal direction of an edge.
pub struct SetOrientedLink {
    link: LinkId,
    edge: EdgeId,
    forward: bool,
}

impl SetOrientedLink {
    /// Creates a new `SetOrientedLink` operation.
    #[must_use]
    pub fn new(link: LinkId, edge: EdgeId, forward: bool) -> Self {
        Self {
            link,
            edge,
            forward,
        }
    }

    /// Executes the operation. Binding the same pair twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the orientation already has another link, or the
    /// link already traverses something else.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        let link = *store.link(self.link)?;
        let edge = store.edge(self.edge)?;

        if edge.link(self.forward).is_some_and(|l| l != self.link) {
            return Err(TopologyError::LinkConflict {
                edge: self.edge,
                forward: self.forward,
            }
            .into());
        }
        if link
            .edge
            .is_some_and(|e| e != self.edge || link.forward != self.forward)
        {
            return Err(TopologyError::LinkRebound(self.link).into());
        }

        *store.edge_mut(self.edge)?.link_slot(self.forward) = Some(self.link);
        let link = store.link_mut(self.link)?;
        link.edge = Some(self.edge);
        link.forward = self.forward;
        Ok(())
    }
}
