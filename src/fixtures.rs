//! Regular grids built through the construction operations.
#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use std::collections::HashMap;

use crate::math::Winding;
use crate::operations::construction::{
    AddLinkToFace, AnchorNode, BindPoint, PatchEdge, SetEdgeCondition, SetOrientedLink,
    SetVertexNeighbours,
};
use crate::spline::Spline;
use crate::topology::{
    Compass, EdgeConditionData, EdgeData, FaceData, FaceId, LinkData, LinkId, NodeAnchor,
    NodeData, NodeId, PointData, TopologyStore, VertexData, VertexId,
};

pub(crate) struct Grid {
    pub store: TopologyStore,
    pub spline: Spline,
    pub columns: usize,
    /// Row-major, `(columns + 1) × (rows + 1)`.
    pub vertices: Vec<VertexId>,
    /// One per vertex, same order, neighbours left empty.
    pub nodes: Vec<NodeId>,
    /// Row-major, `columns × rows`.
    pub faces: Vec<FaceId>,
}

impl Grid {
    pub fn vertex(&self, i: usize, j: usize) -> VertexId {
        self.vertices[j * (self.columns + 1) + i]
    }

    pub fn node(&self, i: usize, j: usize) -> NodeId {
        self.nodes[j * (self.columns + 1) + i]
    }
}

/// A `columns × rows` grid of unit faces with one node per vertex and
/// boundary conditions on every border edge. Control points sit at
/// `(s, t, height(s, t))`.
pub(crate) fn grid(
    columns: usize,
    rows: usize,
    degree: usize,
    winding: Winding,
    height: impl Fn(f64, f64) -> f64,
) -> Grid {
    let mut store = TopologyStore::new();
    let mut spline = Spline::new(degree, degree).unwrap();

    let mut vertices = Vec::new();
    for j in 0..=rows {
        for i in 0..=columns {
            vertices.push(store.add_vertex(VertexData::new(i as f64, j as f64)));
        }
    }
    let faces: Vec<FaceId> = (0..columns * rows)
        .map(|_| store.add_face(FaceData::new()))
        .collect();
    let v = |i: usize, j: usize| vertices[j * (columns + 1) + i];
    let face = |i: isize, j: isize| -> Option<FaceId> {
        let inside = (0..columns as isize).contains(&i) && (0..rows as isize).contains(&j);
        inside.then(|| faces[j as usize * columns + i as usize])
    };

    // (start, end, left, right) for every edge, horizontal then vertical.
    let mut edges = Vec::new();
    for j in 0..=rows {
        for i in 0..columns {
            let (ii, jj) = (i as isize, j as isize);
            edges.push((v(i, j), v(i + 1, j), face(ii, jj), face(ii, jj - 1)));
        }
    }
    for i in 0..=columns {
        for j in 0..rows {
            let (ii, jj) = (i as isize, j as isize);
            edges.push((v(i, j), v(i, j + 1), face(ii - 1, jj), face(ii, jj)));
        }
    }

    let image = spline.image_mut();
    let mut links: HashMap<(VertexId, VertexId), LinkId> = HashMap::new();
    for (start, end, left, right) in edges {
        let edge = store.add_edge(EdgeData::new());
        let mut patch = PatchEdge::new(edge, start, end);
        if let Some(left) = left {
            patch = patch.left(left);
        }
        if let Some(right) = right {
            patch = patch.right(right);
        }
        patch.execute(&mut store).unwrap();

        let forward = store.add_link(LinkData::new());
        let reverse = store.add_link(LinkData::new());
        SetOrientedLink::new(forward, edge, true).execute(&mut store).unwrap();
        SetOrientedLink::new(reverse, edge, false).execute(&mut store).unwrap();
        links.insert((start, end), forward);
        links.insert((end, start), reverse);

        if left.is_none() || right.is_none() {
            let condition = store.add_condition(EdgeConditionData::new());
            SetEdgeCondition::new(condition, edge, true)
                .execute(&mut store)
                .unwrap();
            image.conditions.push(condition);
        }
        image.edges.push(edge);
        image.links.extend([forward, reverse]);
    }

    for j in 0..=rows {
        for i in 0..=columns {
            let neighbours = Compass::new(
                (j < rows).then(|| v(i, j + 1)),
                (i > 0).then(|| v(i - 1, j)),
                (j > 0).then(|| v(i, j - 1)),
                (i < columns).then(|| v(i + 1, j)),
            );
            SetVertexNeighbours::new(v(i, j), neighbours)
                .execute(&mut store)
                .unwrap();
        }
    }

    for j in 0..rows {
        for i in 0..columns {
            let mut corners = vec![v(i, j), v(i + 1, j), v(i + 1, j + 1), v(i, j + 1)];
            if winding == Winding::Clockwise {
                corners.reverse();
            }
            let face = faces[j * columns + i];
            for k in 0..4 {
                let link = links[&(corners[k], corners[(k + 1) % 4])];
                AddLinkToFace::new(face, link).execute(&mut store).unwrap();
            }
        }
    }

    let mut nodes = Vec::new();
    for (index, &vertex) in vertices.iter().enumerate() {
        let (s, t) = ((index % (columns + 1)) as f64, (index / (columns + 1)) as f64);
        let node = store.add_node(NodeData::new());
        let point = store.add_point(PointData::new(s, t, height(s, t), 1.0));
        AnchorNode::new(node, NodeAnchor::Vertex(vertex))
            .execute(&mut store)
            .unwrap();
        BindPoint::new(node, point).execute(&mut store).unwrap();
        nodes.push(node);
    }

    let image = spline.image_mut();
    image.vertices.clone_from(&vertices);
    image.faces.clone_from(&faces);

    Grid {
        store,
        spline,
        columns,
        vertices,
        nodes,
        faces,
    }
}
