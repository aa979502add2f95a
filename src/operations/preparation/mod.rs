//! The passes that turn a patched topology into a prepared spline.
//!
//! They run in order: half-linkages, T-junctions, image connection. Each
//! pass is idempotent and writes nothing when it fails.

mod half_linkages;
mod image_connect;
mod junctions;
mod node_cluster;

pub use half_linkages::PrepareHalfLinkages;
pub use image_connect::PrepareImageConnect;
pub use junctions::{junction_reach, PrepareJunctions, DEFAULT_REACH};

use tracing::debug;

use crate::error::Result;
use crate::operations::query::ValidateImage;
use crate::spline::Spline;
use crate::topology::{NodeId, TopologyStore};

/// Validates the image and runs all three passes over the whole spline.
///
/// Every vertex-anchored node in the store takes part.
///
/// # Errors
///
/// Returns the first validation or preparation error.
pub fn prepare(store: &mut TopologyStore, spline: &mut Spline) -> Result<()> {
    ValidateImage::new(spline.image()).execute(store)?;

    let vertices = spline.image().vertices.clone();
    let reach = junction_reach(spline.s_degree().max(spline.t_degree()));
    PrepareHalfLinkages::new(vertices.clone()).execute(store)?;
    PrepareJunctions::new(vertices, spline.image().faces.clone())
        .with_reach(reach)
        .execute(store)?;

    let nodes: Vec<NodeId> = store
        .nodes()
        .filter(|(_, node)| node.vertex().is_some())
        .map(|(id, _)| id)
        .collect();
    PrepareImageConnect::new(nodes).execute(store, spline)?;
    debug!(junctions = store.junctions().len(), "spline prepared");
    Ok(())
}
