pub mod direction;
pub mod edge;
pub mod edge_condition;
pub mod face;
pub mod link;
pub mod node;
pub mod point;
pub mod stage;
pub mod vertex;

pub use direction::{Compass, Direction};
pub use edge::{EdgeData, EdgeId};
pub use edge_condition::{EdgeConditionData, EdgeConditionId};
pub use face::{FaceData, FaceId};
pub use link::{LinkData, LinkId};
pub use node::{NodeAnchor, NodeData, NodeId};
pub use point::{PointData, PointId};
pub use stage::{JunctionExtent, PreparationStage};
pub use vertex::{VertexData, VertexId};

use crate::error::TopologyError;
use crate::math::{Parameter, ParameterRect};
use slotmap::SlotMap;

/// Central arena that owns every entity of one T-spline surface.
///
/// Entities reference each other via typed IDs (generational indices),
/// so the many mutual relations of the mesh are handle lookups rather
/// than ownership. Nothing is removed individually; dropping the store
/// drops the whole surface.
#[derive(Debug, Default)]
pub struct TopologyStore {
    vertices: SlotMap<VertexId, VertexData>,
    edges: SlotMap<EdgeId, EdgeData>,
    links: SlotMap<LinkId, LinkData>,
    conditions: SlotMap<EdgeConditionId, EdgeConditionData>,
    faces: SlotMap<FaceId, FaceData>,
    nodes: SlotMap<NodeId, NodeData>,
    points: SlotMap<PointId, PointData>,
    stage: PreparationStage,
    junctions: Vec<JunctionExtent>,
}

impl TopologyStore {
    /// Creates a new, empty topology store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Vertex operations ---

    /// Inserts a vertex and returns its ID.
    pub fn add_vertex(&mut self, data: VertexData) -> VertexId {
        self.vertices.insert(data)
    }

    /// Returns a reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex(&self, id: VertexId) -> Result<&VertexData, TopologyError> {
        self.vertices
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    /// Returns a mutable reference to the vertex data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn vertex_mut(&mut self, id: VertexId) -> Result<&mut VertexData, TopologyError> {
        self.vertices
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("vertex".into()))
    }

    // --- Edge operations ---

    /// Inserts an edge and returns its ID.
    pub fn add_edge(&mut self, data: EdgeData) -> EdgeId {
        self.edges.insert(data)
    }

    /// Returns a reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge(&self, id: EdgeId) -> Result<&EdgeData, TopologyError> {
        self.edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Returns a mutable reference to the edge data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn edge_mut(&mut self, id: EdgeId) -> Result<&mut EdgeData, TopologyError> {
        self.edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge".into()))
    }

    /// Iterates all edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &EdgeData)> {
        self.edges.iter()
    }

    // --- Link operations ---

    /// Inserts a link and returns its ID.
    pub fn add_link(&mut self, data: LinkData) -> LinkId {
        self.links.insert(data)
    }

    /// Returns a reference to the link data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn link(&self, id: LinkId) -> Result<&LinkData, TopologyError> {
        self.links
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("link".into()))
    }

    /// Returns a mutable reference to the link data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn link_mut(&mut self, id: LinkId) -> Result<&mut LinkData, TopologyError> {
        self.links
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("link".into()))
    }

    // --- Edge condition operations ---

    /// Inserts an edge condition and returns its ID.
    pub fn add_condition(&mut self, data: EdgeConditionData) -> EdgeConditionId {
        self.conditions.insert(data)
    }

    /// Returns a reference to the edge condition, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn condition(&self, id: EdgeConditionId) -> Result<&EdgeConditionData, TopologyError> {
        self.conditions
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge condition".into()))
    }

    /// Returns a mutable reference to the edge condition, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn condition_mut(
        &mut self,
        id: EdgeConditionId,
    ) -> Result<&mut EdgeConditionData, TopologyError> {
        self.conditions
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("edge condition".into()))
    }

    // --- Face operations ---

    /// Inserts a face and returns its ID.
    pub fn add_face(&mut self, data: FaceData) -> FaceId {
        self.faces.insert(data)
    }

    /// Returns a reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face(&self, id: FaceId) -> Result<&FaceData, TopologyError> {
        self.faces
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Returns a mutable reference to the face data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn face_mut(&mut self, id: FaceId) -> Result<&mut FaceData, TopologyError> {
        self.faces
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("face".into()))
    }

    /// Iterates all faces in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = (FaceId, &FaceData)> {
        self.faces.iter()
    }

    // --- Node operations ---

    /// Inserts a blending node and returns its ID.
    pub fn add_node(&mut self, data: NodeData) -> NodeId {
        self.nodes.insert(data)
    }

    /// Returns a reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn node(&self, id: NodeId) -> Result<&NodeData, TopologyError> {
        self.nodes
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("node".into()))
    }

    /// Returns a mutable reference to the node data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut NodeData, TopologyError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("node".into()))
    }

    /// Iterates all nodes in insertion order, virtual ones included.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes.iter()
    }

    // --- Point operations ---

    /// Inserts a control point and returns its ID.
    pub fn add_point(&mut self, data: PointData) -> PointId {
        self.points.insert(data)
    }

    /// Returns a reference to the point data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn point(&self, id: PointId) -> Result<&PointData, TopologyError> {
        self.points
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("point".into()))
    }

    /// Returns a mutable reference to the point data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn point_mut(&mut self, id: PointId) -> Result<&mut PointData, TopologyError> {
        self.points
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("point".into()))
    }

    // --- Preparation state ---

    /// How far preparation has progressed.
    #[must_use]
    pub fn stage(&self) -> PreparationStage {
        self.stage
    }

    pub(crate) fn set_stage(&mut self, stage: PreparationStage) {
        self.stage = stage;
    }

    /// Marks `stage` as reached. A pass that changed the mesh drops any
    /// later stage, since later passes must then run again.
    pub(crate) fn complete_stage(&mut self, stage: PreparationStage, changed: bool) {
        self.stage = if changed { stage } else { self.stage.max(stage) };
    }

    /// Extents synthesised for T-junctions, in creation order.
    #[must_use]
    pub fn junctions(&self) -> &[JunctionExtent] {
        &self.junctions
    }

    /// The extent recorded for `vertex` in `direction`, if any.
    #[must_use]
    pub fn junction(&self, vertex: VertexId, direction: Direction) -> Option<&JunctionExtent> {
        self.junctions
            .iter()
            .find(|j| j.vertex == vertex && j.direction == direction)
    }

    pub(crate) fn record_junction(&mut self, extent: JunctionExtent) {
        self.junctions.push(extent);
    }

    // --- Derived queries ---

    /// Resolves a link to `(edge, edge data, forward)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link or its edge is missing or unbound.
    pub fn link_edge(&self, id: LinkId) -> Result<(EdgeId, &EdgeData, bool), TopologyError> {
        let link = self.link(id)?;
        let edge_id = link.edge.ok_or(TopologyError::UnboundLink(id))?;
        Ok((edge_id, self.edge(edge_id)?, link.forward))
    }

    /// Returns the vertex a link leaves from and the one it arrives at.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is unbound or its edge unpatched.
    pub fn link_endpoints(&self, id: LinkId) -> Result<(VertexId, VertexId), TopologyError> {
        let (edge_id, edge, forward) = self.link_edge(id)?;
        let (start, end) = edge
            .endpoints
            .ok_or(TopologyError::UnpatchedEdge(edge_id))?;
        Ok(if forward { (start, end) } else { (end, start) })
    }

    /// Returns the faces on the `(left, right)` of a link's traversal.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is unbound.
    pub fn link_faces(&self, id: LinkId) -> Result<(Option<FaceId>, Option<FaceId>), TopologyError> {
        let (_, edge, forward) = self.link_edge(id)?;
        Ok(if forward {
            (edge.left, edge.right)
        } else {
            (edge.right, edge.left)
        })
    }

    /// The vertex reached by leaving `vertex` in `direction`, if linked.
    ///
    /// # Errors
    ///
    /// Returns an error if the vertex or its link cannot be resolved.
    pub fn vertex_neighbour(
        &self,
        vertex: VertexId,
        direction: Direction,
    ) -> Result<Option<VertexId>, TopologyError> {
        match self.vertex(vertex)?.links.at(direction) {
            Some(link) => Ok(Some(self.link_endpoints(link)?.1)),
            None => Ok(None),
        }
    }

    /// Returns `true` if the edge carries a boundary condition.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge or its condition is not found.
    pub fn edge_is_boundary(&self, id: EdgeId) -> Result<bool, TopologyError> {
        match self.edge(id)?.condition {
            Some(condition) => Ok(self.condition(condition)?.boundary),
            None => Ok(false),
        }
    }

    /// The vertices of a face loop, in loop order (the start of each link).
    ///
    /// # Errors
    ///
    /// Returns an error if any link of the loop cannot be resolved.
    pub fn face_vertices(&self, id: FaceId) -> Result<Vec<VertexId>, TopologyError> {
        self.face(id)?
            .links
            .iter()
            .map(|&link| self.link_endpoints(link).map(|(start, _)| start))
            .collect()
    }

    /// The parametric bounding rectangle of a face.
    ///
    /// # Errors
    ///
    /// Returns an error if the loop cannot be resolved or is empty.
    pub fn face_rect(&self, id: FaceId) -> Result<ParameterRect, TopologyError> {
        let vertices = self.face_vertices(id)?;
        let parameters = vertices
            .iter()
            .map(|&v| self.vertex(v).map(|data| data.parameter))
            .collect::<Result<Vec<_>, _>>()?;
        ParameterRect::enclosing(parameters).ok_or(TopologyError::TooFewLinks {
            face: id,
            count: 0,
        })
    }

    /// The parametric location of a node's anchor.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or its vertex is missing, or the node
    /// has no anchor.
    pub fn node_parameter(&self, id: NodeId) -> Result<Parameter, TopologyError> {
        match self.node(id)?.anchor {
            Some(NodeAnchor::Vertex(vertex)) => Ok(self.vertex(vertex)?.parameter),
            Some(NodeAnchor::Virtual(parameter)) => Ok(parameter),
            None => Err(TopologyError::EntityNotFound("node anchor".into())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn lookup_of_unknown_id_fails() {
        let mut other = TopologyStore::new();
        let vertex = other.add_vertex(VertexData::new(0.0, 0.0));
        let store = TopologyStore::new();
        assert!(matches!(
            store.vertex(vertex),
            Err(TopologyError::EntityNotFound(_))
        ));
    }

    #[test]
    fn link_resolves_through_orientation() {
        let mut store = TopologyStore::new();
        let a = store.add_vertex(VertexData::new(0.0, 0.0));
        let b = store.add_vertex(VertexData::new(1.0, 0.0));
        let face = store.add_face(FaceData::new());
        let edge = store.add_edge(EdgeData {
            endpoints: Some((a, b)),
            left: Some(face),
            ..EdgeData::new()
        });
        let reverse = store.add_link(LinkData {
            edge: Some(edge),
            forward: false,
        });

        assert_eq!(store.link_endpoints(reverse).unwrap(), (b, a));
        assert_eq!(store.link_faces(reverse).unwrap(), (None, Some(face)));
    }

    #[test]
    fn stage_drops_back_when_a_pass_changes_the_mesh() {
        let mut store = TopologyStore::new();
        store.complete_stage(PreparationStage::Connected, true);
        store.complete_stage(PreparationStage::HalfLinked, false);
        assert_eq!(store.stage(), PreparationStage::Connected);
        store.complete_stage(PreparationStage::HalfLinked, true);
        assert_eq!(store.stage(), PreparationStage::HalfLinked);
    }

    #[test]
    fn virtual_nodes_report_their_own_parameter() {
        let mut store = TopologyStore::new();
        let node = store.add_node(NodeData {
            anchor: Some(NodeAnchor::Virtual(Parameter::new(0.5, 1.0))),
            ..NodeData::new()
        });
        assert_eq!(store.node_parameter(node).unwrap(), Parameter::new(0.5, 1.0));
        assert!(store.node(node).unwrap().is_virtual());
    }
}
