use slotmap::SecondaryMap;

use crate::error::PreparationError;
use crate::topology::{Compass, Direction, NodeId, TopologyStore, VertexId};

/// Working copy of every node's neighbours.
pub(crate) type NodeLinks = SecondaryMap<NodeId, Compass<Option<NodeId>>>;

/// Copies the current neighbours of every node in the store.
pub(crate) fn snapshot(store: &TopologyStore) -> NodeLinks {
    store.nodes().map(|(id, node)| (id, node.neighbours)).collect()
}

/// Groups the vertex-anchored nodes by vertex, in store order.
pub(crate) fn clusters(store: &TopologyStore) -> SecondaryMap<VertexId, Vec<NodeId>> {
    let mut clusters: SecondaryMap<VertexId, Vec<NodeId>> = SecondaryMap::new();
    for (id, node) in store.nodes() {
        if let Some(entry) = node.vertex().and_then(|v| clusters.entry(v)) {
            entry.or_default().push(id);
        }
    }
    clusters
}

fn neighbour(links: &NodeLinks, node: NodeId, direction: Direction) -> Option<NodeId> {
    links.get(node).and_then(|c| c.at(direction))
}

/// The nodes anchored at one vertex, seen as a small grid of their own.
///
/// A vertex can carry several nodes (a 2×2 block at a corner of a clamped
/// bicubic, a column at a T-junction). Each side of the block faces one
/// neighbour outside it.
pub(crate) struct NodeCluster<'a> {
    pub vertex: VertexId,
    nodes: &'a [NodeId],
}

impl<'a> NodeCluster<'a> {
    pub fn new(vertex: VertexId, nodes: &'a [NodeId]) -> Self {
        Self { vertex, nodes }
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Nodes on the `direction` side: their neighbour there is absent or
    /// outside the cluster.
    pub fn facing(&self, direction: Direction, links: &NodeLinks) -> Vec<NodeId> {
        self.nodes
            .iter()
            .copied()
            .filter(|&n| neighbour(links, n, direction).is_none_or(|m| !self.contains(m)))
            .collect()
    }

    /// The neighbour outside the cluster already named by its `direction`
    /// side, if any.
    pub fn external(
        &self,
        direction: Direction,
        links: &NodeLinks,
    ) -> Result<Option<NodeId>, PreparationError> {
        let mut found = None;
        for node in self.facing(direction, links) {
            let Some(other) = neighbour(links, node, direction) else {
                continue;
            };
            match found {
                None => found = Some(other),
                Some(existing) if existing != other => {
                    return Err(PreparationError::ConflictingNeighbours {
                        vertex: self.vertex,
                        direction,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(found)
    }

    /// The single node through which the `side` of this cluster is entered.
    ///
    /// With several candidates, the one already linked to `from` wins.
    /// Returns `None` if that still leaves no unique node.
    pub fn entry(
        &self,
        side: Direction,
        links: &NodeLinks,
        from: Option<&NodeCluster<'_>>,
    ) -> Option<NodeId> {
        let candidates = self.facing(side, links);
        if let [only] = candidates.as_slice() {
            return Some(*only);
        }
        let from = from?;
        let linked: Vec<NodeId> = candidates
            .into_iter()
            .filter(|&n| neighbour(links, n, side).is_some_and(|m| from.contains(m)))
            .collect();
        match linked.as_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }
}
