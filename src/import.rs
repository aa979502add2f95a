//! The seam between the kernel and surface file readers.

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::operations::preparation::prepare;
use crate::spline::Spline;
use crate::topology::TopologyStore;

/// Reads a serialized surface description into a patched, unprepared spline.
///
/// Implementations only build topology; preparation is left to the kernel.
pub trait SplineImporter {
    /// Reads the surface at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or describes an invalid
    /// topology.
    fn import(&self, path: &Path) -> Result<(TopologyStore, Spline)>;
}

/// Imports a surface and runs validation and all preparation passes.
///
/// # Errors
///
/// Returns the importer's error, or the first validation or preparation error.
pub fn import_prepared(
    importer: &impl SplineImporter,
    path: &Path,
) -> Result<(TopologyStore, Spline)> {
    let (mut store, mut spline) = importer.import(path)?;
    prepare(&mut store, &mut spline)?;
    debug!(path = %path.display(), faces = spline.image().faces.len(), "imported spline");
    Ok((store, spline))
}
