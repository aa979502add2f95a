//! Operations that build a T-spline topology piece by piece, the way an
//! importer or a test script wires it.

mod add_link_to_face;
mod anchor_node;
mod bind_point;
mod patch_edge;
mod set_edge_condition;
mod set_node_neighbours;
mod set_oriented_link;
mod set_vertex_neighbours;

pub use add_link_to_face::AddLinkToFace;
pub use anchor_node::AnchorNode;
pub use bind_point::BindPoint;
pub use patch_edge::PatchEdge;
pub use set_edge_condition::SetEdgeCondition;
pub use set_node_neighbours::SetNodeNeighbours;
pub use set_oriented_link::SetOrientedLink;
pub use set_vertex_neighbours::SetVertexNeighbours;
