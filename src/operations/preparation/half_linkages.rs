use slotmap::SecondaryMap;
use tracing::{debug, trace, warn};

use crate::error::{PreparationError, Result};
use crate::topology::{Direction, NodeId, PreparationStage, TopologyStore, VertexId};

use super::node_cluster::{clusters, snapshot, NodeCluster, NodeLinks};

const MAX_SWEEPS: usize = 16;

/// Derives the neighbours of every node from the planar graph.
///
/// For each vertex and direction, the nodes on that side of the vertex's
/// cluster share one neighbour: the outside node some of them already
/// name, or else the entry node of the cluster at the neighbouring vertex.
/// A direction with no neighbouring vertex, or whose neighbouring vertex
/// carries no nodes, stays empty.
pub struct PrepareHalfLinkages {
    vertices: Vec<VertexId>,
}

impl PrepareHalfLinkages {
    /// Creates a new `PrepareHalfLinkages` pass over `vertices`.
    #[must_use]
    pub fn new(vertices: Vec<VertexId>) -> Self {
        Self { vertices }
    }

    /// Executes the pass. Nothing is written unless it succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if a side names conflicting neighbours, an entry
    /// node is ambiguous, or no fixed point is reached. The store is then
    /// marked unprepared.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        let links = match self.resolve(store) {
            Ok(links) => links,
            Err(err) => {
                store.set_stage(PreparationStage::Unprepared);
                warn!(error = %err, "half-linkage preparation failed");
                return Err(err);
            }
        };

        let mut changed = 0;
        for (id, neighbours) in links {
            let node = store.node_mut(id)?;
            if node.neighbours != neighbours {
                node.neighbours = neighbours;
                changed += 1;
            }
        }
        store.complete_stage(PreparationStage::HalfLinked, changed > 0);
        debug!(vertices = self.vertices.len(), changed, "half-linkages prepared");
        Ok(())
    }

    fn resolve(&self, store: &TopologyStore) -> Result<NodeLinks> {
        let clusters = clusters(store);
        let mut links = snapshot(store);

        for sweep in 1..=MAX_SWEEPS {
            let mut changed = false;
            for &vertex in &self.vertices {
                store.vertex(vertex)?;
                let Some(nodes) = clusters.get(vertex) else {
                    continue;
                };
                let cluster = NodeCluster::new(vertex, nodes);
                for direction in Direction::ALL {
                    let Some(target) = target(store, &clusters, &links, &cluster, direction)?
                    else {
                        continue;
                    };
                    for node in cluster.facing(direction, &links) {
                        if let Some(slot) = links.get_mut(node) {
                            if slot.at(direction) != Some(target) {
                                slot.set(direction, Some(target));
                                changed = true;
                            }
                        }
                    }
                }
            }
            if !changed {
                trace!(sweep, "half-linkages reached a fixed point");
                return Ok(links);
            }
        }

        Err(PreparationError::NotConverged {
            pass: "half-linkage preparation",
            sweeps: MAX_SWEEPS,
        }
        .into())
    }
}

/// The node the `direction` side of `cluster` should link to.
fn target(
    store: &TopologyStore,
    clusters: &SecondaryMap<VertexId, Vec<NodeId>>,
    links: &NodeLinks,
    cluster: &NodeCluster<'_>,
    direction: Direction,
) -> Result<Option<NodeId>> {
    if let Some(external) = cluster.external(direction, links)? {
        return Ok(Some(external));
    }
    let Some(next) = store.vertex_neighbour(cluster.vertex, direction)? else {
        return Ok(None);
    };
    let Some(next_nodes) = clusters.get(next) else {
        return Ok(None);
    };
    NodeCluster::new(next, next_nodes)
        .entry(direction.opposite(), links, Some(cluster))
        .map(Some)
        .ok_or_else(|| {
            PreparationError::AmbiguousNeighbour {
                vertex: cluster.vertex,
                direction,
            }
            .into()
        })
}
