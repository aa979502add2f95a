use slotmap::SecondaryMap;
use tracing::{debug, trace, warn};

use crate::error::{PreparationError, Result};
use crate::math::{same_coordinate, Parameter, ParameterRect};
use crate::topology::{
    Direction, FaceId, JunctionExtent, NodeAnchor, NodeData, NodeId, PreparationStage,
    TopologyStore, VertexId,
};

use super::node_cluster::{clusters, snapshot, NodeCluster, NodeLinks};

/// Faces crossed by a bicubic T-junction extent.
pub const DEFAULT_REACH: usize = 2;

/// Number of faces a T-junction extent must cross for the given degree.
#[must_use]
pub fn junction_reach(degree: usize) -> usize {
    degree + 1 - (degree + 1) / 2
}

/// Extends every T-junction into the face on its open side.
///
/// A vertex with exactly three links misses one direction. If a face lies
/// on that side, the missing row of knots is continued across it with
/// virtual nodes until an existing vertex is met or `reach` faces have been
/// crossed. If no face lies there the vertex sits on the domain boundary,
/// which both flanking edges must confirm with a boundary condition.
///
/// Only `faces` are crossed, so a store holding several surfaces keeps each
/// extent inside its own.
pub struct PrepareJunctions {
    vertices: Vec<VertexId>,
    faces: Vec<FaceId>,
    reach: usize,
}

enum ExtentStep {
    Virtual(Parameter),
    Existing(NodeId),
}

struct JunctionPlan {
    vertex: VertexId,
    direction: Direction,
    facing: Vec<NodeId>,
    steps: Vec<ExtentStep>,
}

impl PrepareJunctions {
    /// Creates a new `PrepareJunctions` pass over `vertices`, extending
    /// across `faces`.
    #[must_use]
    pub fn new(vertices: Vec<VertexId>, faces: Vec<FaceId>) -> Self {
        Self {
            vertices,
            faces,
            reach: DEFAULT_REACH,
        }
    }

    /// Sets how many faces an extent may cross.
    #[must_use]
    pub fn with_reach(mut self, reach: usize) -> Self {
        self.reach = reach.max(1);
        self
    }

    /// Executes the pass. Junctions resolved by an earlier run are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if half-linkages are not prepared, or a junction
    /// cannot be extended. The store is then marked unprepared.
    pub fn execute(&self, store: &mut TopologyStore) -> Result<()> {
        let plans = match self.plan(store) {
            Ok(plans) => plans,
            Err(err) => {
                store.set_stage(PreparationStage::Unprepared);
                warn!(error = %err, "junction preparation failed");
                return Err(err);
            }
        };

        let created = plans.len();
        for plan in plans {
            apply(store, plan)?;
        }
        store.complete_stage(PreparationStage::JunctionsResolved, created > 0);
        debug!(
            created,
            total = store.junctions().len(),
            "T-junctions resolved"
        );
        Ok(())
    }

    fn plan(&self, store: &TopologyStore) -> Result<Vec<JunctionPlan>> {
        if store.stage() < PreparationStage::HalfLinked {
            return Err(PreparationError::IncompletePreparation(
                "half-linkages must be prepared before T-junctions".into(),
            )
            .into());
        }
        let clusters = clusters(store);
        let links = snapshot(store);

        let mut plans = Vec::new();
        for &vertex in &self.vertices {
            let data = store.vertex(vertex)?;
            if data.links.occupied() != 3 {
                continue;
            }
            let Some(&direction) = data.links.missing().first() else {
                continue;
            };
            if store.junction(vertex, direction).is_some() {
                continue;
            }
            let Some(nodes) = clusters.get(vertex) else {
                continue;
            };
            let (Some(left), Some(right)) = (
                data.links.at(direction.turn_left()),
                data.links.at(direction.turn_right()),
            ) else {
                continue;
            };

            let open_side = store.link_faces(left)?.1;
            let Some(face) = open_side.filter(|f| self.faces.contains(f)) else {
                let flanked = store.edge_is_boundary(store.link_edge(left)?.0)?
                    && store.edge_is_boundary(store.link_edge(right)?.0)?;
                if flanked {
                    trace!(?vertex, ?direction, "T-junction on the boundary");
                    continue;
                }
                return Err(PreparationError::UnresolvedJunction {
                    vertex,
                    direction,
                    reason: "no face on the open side and no boundary condition on the flanking edges"
                        .into(),
                }
                .into());
            };

            let steps = self.extend(store, &clusters, &links, vertex, direction, face)?;
            plans.push(JunctionPlan {
                vertex,
                direction,
                facing: NodeCluster::new(vertex, nodes).facing(direction, &links),
                steps,
            });
        }
        Ok(plans)
    }

    /// Walks across faces from `vertex` in `direction`.
    fn extend(
        &self,
        store: &TopologyStore,
        clusters: &SecondaryMap<VertexId, Vec<NodeId>>,
        links: &NodeLinks,
        vertex: VertexId,
        direction: Direction,
        first_face: FaceId,
    ) -> Result<Vec<ExtentStep>> {
        let origin = store.vertex(vertex)?.parameter;
        let mut steps = Vec::with_capacity(self.reach);
        let mut face = first_face;

        for _ in 0..self.reach {
            let rect = store.face_rect(face)?;
            let target = far_side(&rect, &origin, direction);

            if let Some(existing) = face_vertex_at(store, face, &target)? {
                if let Some(nodes) = clusters.get(existing) {
                    let entry = NodeCluster::new(existing, nodes)
                        .entry(direction.opposite(), links, None)
                        .ok_or(PreparationError::AmbiguousNeighbour { vertex, direction })?;
                    steps.push(ExtentStep::Existing(entry));
                    return Ok(steps);
                }
            }
            steps.push(ExtentStep::Virtual(target));

            match face_beyond(store, &self.faces, face, &target, direction)? {
                Some(next) => face = next,
                None => break,
            }
        }
        Ok(steps)
    }
}

/// Projects `origin` onto the side of `rect` that lies in `direction`.
fn far_side(rect: &ParameterRect, origin: &Parameter, direction: Direction) -> Parameter {
    match direction {
        Direction::North => Parameter::new(origin.x, rect.t_max),
        Direction::South => Parameter::new(origin.x, rect.t_min),
        Direction::West => Parameter::new(rect.s_min, origin.y),
        Direction::East => Parameter::new(rect.s_max, origin.y),
    }
}

fn face_vertex_at(
    store: &TopologyStore,
    face: FaceId,
    target: &Parameter,
) -> Result<Option<VertexId>> {
    for vertex in store.face_vertices(face)? {
        let p = store.vertex(vertex)?.parameter;
        if same_coordinate(p.x, target.x) && same_coordinate(p.y, target.y) {
            return Ok(Some(vertex));
        }
    }
    Ok(None)
}

/// The face entered by crossing `target` in `direction` when leaving `face`.
fn face_beyond(
    store: &TopologyStore,
    faces: &[FaceId],
    face: FaceId,
    target: &Parameter,
    direction: Direction,
) -> Result<Option<FaceId>> {
    for &candidate in faces {
        if candidate == face {
            continue;
        }
        let rect = store.face_rect(candidate)?;
        let entered = match direction {
            Direction::North => same_coordinate(rect.t_min, target.y),
            Direction::South => same_coordinate(rect.t_max, target.y),
            Direction::West => same_coordinate(rect.s_max, target.x),
            Direction::East => same_coordinate(rect.s_min, target.x),
        };
        if entered && rect.contains(target) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

fn apply(store: &mut TopologyStore, plan: JunctionPlan) -> Result<()> {
    let mut nodes = Vec::with_capacity(plan.steps.len());
    let mut parameters = Vec::with_capacity(plan.steps.len());
    for step in plan.steps {
        match step {
            ExtentStep::Virtual(parameter) => {
                nodes.push(store.add_node(NodeData {
                    anchor: Some(NodeAnchor::Virtual(parameter)),
                    ..NodeData::new()
                }));
                parameters.push(parameter);
            }
            ExtentStep::Existing(node) => {
                parameters.push(store.node_parameter(node)?);
                nodes.push(node);
            }
        }
    }

    let back = plan.direction.opposite();
    let origin = match plan.facing.as_slice() {
        [only] => Some(*only),
        _ => None,
    };
    for (i, &node) in nodes.iter().enumerate() {
        let data = store.node_mut(node)?;
        if !data.is_virtual() {
            continue;
        }
        let previous = if i == 0 { origin } else { Some(nodes[i - 1]) };
        data.neighbours.set(back, previous);
        data.neighbours.set(plan.direction, nodes.get(i + 1).copied());
    }
    if let Some(&first) = nodes.first() {
        for &node in &plan.facing {
            store.node_mut(node)?.neighbours.set(plan.direction, Some(first));
        }
    }

    trace!(vertex = ?plan.vertex, direction = ?plan.direction, nodes = nodes.len(), "junction extent");
    store.record_junction(JunctionExtent {
        vertex: plan.vertex,
        direction: plan.direction,
        nodes,
        parameters,
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reach_by_degree() {
        assert_eq!(junction_reach(1), 1);
        assert_eq!(junction_reach(2), 2);
        assert_eq!(junction_reach(3), 2);
        assert_eq!(junction_reach(5), 3);
        assert_eq!(junction_reach(3), DEFAULT_REACH);
    }

    #[test]
    fn far_side_projection() {
        let rect = ParameterRect::new(0.0, 1.0, 0.5, 1.0);
        let origin = Parameter::new(0.5, 0.5);
        assert_eq!(far_side(&rect, &origin, Direction::North), Parameter::new(0.5, 1.0));
        assert_eq!(far_side(&rect, &origin, Direction::West), Parameter::new(0.0, 0.5));
        assert_eq!(far_side(&rect, &origin, Direction::East), Parameter::new(1.0, 0.5));
        assert_eq!(far_side(&rect, &origin, Direction::South), Parameter::new(0.5, 0.5));
    }
}
