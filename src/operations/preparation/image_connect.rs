use tracing::{debug, warn};

use crate::error::{PreparationError, Result, TsplineError};
use crate::operations::query::{FaceWinding, ValidateImage};
use crate::spline::{BlendingFunction, BlendingTable, Connect, FaceBlending, Pointset, Spline};
use crate::topology::{NodeId, PreparationStage, TopologyStore};

/// Binds every node to its point and records the blending table.
///
/// Each node yields one blending function. A function acts on every face
/// whose parametric rectangle overlaps its support with positive area.
pub struct PrepareImageConnect {
    nodes: Vec<NodeId>,
}

impl PrepareImageConnect {
    /// Creates a new `PrepareImageConnect` pass over `nodes`.
    #[must_use]
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Self { nodes }
    }

    /// Executes the pass, recording Connect, Pointset and the blending
    /// table on `spline`.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is invalid, earlier passes have not
    /// run, or a node lacks an anchor, a mutually bound point or valid
    /// neighbours. The store and spline are then marked unprepared.
    pub fn execute(&self, store: &mut TopologyStore, spline: &mut Spline) -> Result<()> {
        match self.build(store, spline) {
            Ok((connect, pointset, table)) => {
                debug!(
                    nodes = connect.nodes.len(),
                    faces = table.len(),
                    "image connected"
                );
                spline.record_preparation(connect, pointset, table);
                store.complete_stage(PreparationStage::Connected, false);
                Ok(())
            }
            Err(err) => {
                store.set_stage(PreparationStage::Unprepared);
                spline.discard_preparation();
                warn!(error = %err, "image connection failed");
                Err(err)
            }
        }
    }

    fn build(
        &self,
        store: &TopologyStore,
        spline: &Spline,
    ) -> Result<(Connect, Pointset, BlendingTable)> {
        if store.stage() < PreparationStage::JunctionsResolved {
            return Err(incomplete("T-junctions must be resolved before connecting the image"));
        }
        ValidateImage::new(spline.image()).execute(store)?;

        let mut points = Vec::with_capacity(self.nodes.len());
        let mut functions = Vec::with_capacity(self.nodes.len());
        for &node in &self.nodes {
            let data = store.node(node)?;
            let vertex = data
                .vertex()
                .ok_or_else(|| incomplete(format!("node {node:?} is not anchored to a vertex")))?;
            store.vertex(vertex)?;
            let point = data
                .point
                .ok_or_else(|| incomplete(format!("node {node:?} has no control point")))?;
            if store.point(point)?.node != Some(node) {
                return Err(incomplete(format!(
                    "point {point:?} is not bound back to node {node:?}"
                )));
            }
            for (direction, neighbour) in data.neighbours.iter() {
                if neighbour.is_some_and(|n| store.node(n).is_err()) {
                    return Err(incomplete(format!(
                        "node {node:?} has a dangling {direction:?} neighbour"
                    )));
                }
            }

            let function =
                BlendingFunction::from_node(store, node, spline.s_degree(), spline.t_degree())?;
            if !function.is_monotone() {
                return Err(incomplete(format!(
                    "node {node:?} walks to decreasing knots"
                )));
            }
            points.push(point);
            functions.push(function);
        }

        let mut faces = Vec::with_capacity(spline.image().faces.len());
        for &face in &spline.image().faces {
            let winding = FaceWinding::new(face).execute(store)?;
            let rect = store.face_rect(face)?;
            let acting: Vec<BlendingFunction> = functions
                .iter()
                .filter(|f| f.support().overlaps(&rect))
                .cloned()
                .collect();
            if acting.is_empty() {
                return Err(incomplete(format!("face {face:?} has no blending function")));
            }
            faces.push(FaceBlending {
                face,
                rect,
                winding,
                functions: acting,
            });
        }

        Ok((
            Connect {
                nodes: self.nodes.clone(),
            },
            Pointset { points },
            BlendingTable::new(faces),
        ))
    }
}

fn incomplete(reason: impl Into<String>) -> TsplineError {
    PreparationError::IncompletePreparation(reason.into()).into()
}
