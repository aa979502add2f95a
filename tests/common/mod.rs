//! A bicubic surface over `[0, 1]²` with one interior T-junction.
//!
//! ```text
//! v6 ─────────── v7
//! │      f2       │
//! v3 ─── v4 ──── v5
//! │  f0  │   f1   │
//! v0 ─── v1 ──── v2
//! ```
//!
//! `v4` misses its northern link, so `f2` has five links. Corner vertices
//! carry 2×2 node blocks, edge midpoints carry node pairs.
#![allow(dead_code, clippy::unwrap_used)]

use tspline::operations::construction::{
    AddLinkToFace, AnchorNode, BindPoint, PatchEdge, SetEdgeCondition, SetNodeNeighbours,
    SetOrientedLink, SetVertexNeighbours,
};
use tspline::spline::Spline;
use tspline::topology::{
    Compass, EdgeConditionData, EdgeData, EdgeId, FaceData, FaceId, LinkData, LinkId, NodeAnchor,
    NodeData, NodeId, PointData, TopologyStore, VertexData, VertexId,
};

pub const NODE_COUNT: usize = 23;

/// Node names in creation order. The digit before the dash is the vertex.
pub const NODE_NAMES: [&str; NODE_COUNT] = [
    "n0-0", "n0-1", "n0-2", "n0-3", "n1-0", "n1-1", "n2-0", "n2-1", "n2-2", "n2-3", "n3-0",
    "n3-1", "n4-0", "n5-0", "n5-1", "n6-0", "n6-1", "n6-2", "n6-3", "n7-0", "n7-1", "n7-2",
    "n7-3",
];

pub struct Scenario {
    pub store: TopologyStore,
    pub spline: Spline,
    pub vertices: Vec<VertexId>,
    pub edges: Vec<EdgeId>,
    pub links: Vec<LinkId>,
    pub faces: Vec<FaceId>,
    pub nodes: Vec<NodeId>,
}

impl Scenario {
    pub fn node(&self, name: &str) -> NodeId {
        let index = NODE_NAMES.iter().position(|n| *n == name).unwrap();
        self.nodes[index]
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("tspline=debug"))
        .with_test_writer()
        .try_init();
}

pub fn scenario() -> Scenario {
    let mut store = TopologyStore::new();
    let mut spline = Spline::new(3, 3).unwrap();

    let vertices: Vec<VertexId> = [
        (0.0, 0.0),
        (0.5, 0.0),
        (1.0, 0.0),
        (0.0, 0.5),
        (0.5, 0.5),
        (1.0, 0.5),
        (0.0, 1.0),
        (1.0, 1.0),
    ]
    .into_iter()
    .map(|(s, t)| store.add_vertex(VertexData::new(s, t)))
    .collect();
    let v = |i: usize| vertices[i];

    let faces: Vec<FaceId> = (0..3).map(|_| store.add_face(FaceData::new())).collect();
    let f = |i: usize| Some(faces[i]);

    // (start, end, left, right)
    let layout = [
        (0, 1, f(0), None),
        (1, 2, f(1), None),
        (0, 3, None, f(0)),
        (1, 4, f(0), f(1)),
        (2, 5, f(1), None),
        (3, 4, f(2), f(0)),
        (4, 5, f(2), f(1)),
        (3, 6, None, f(2)),
        (5, 7, f(2), None),
        (6, 7, None, f(2)),
    ];
    let mut edges = Vec::new();
    let mut links = Vec::new();
    for (start, end, left, right) in layout {
        let edge = store.add_edge(EdgeData::new());
        let mut patch = PatchEdge::new(edge, v(start), v(end));
        if let Some(left) = left {
            patch = patch.left(left);
        }
        if let Some(right) = right {
            patch = patch.right(right);
        }
        patch.execute(&mut store).unwrap();
        for forward in [true, false] {
            let link = store.add_link(LinkData::new());
            SetOrientedLink::new(link, edge, forward)
                .execute(&mut store)
                .unwrap();
            links.push(link);
        }
        edges.push(edge);
    }

    let mut conditions = Vec::new();
    for e in [0, 1, 2, 4, 7, 8, 9] {
        let condition = store.add_condition(EdgeConditionData::new());
        SetEdgeCondition::new(condition, edges[e], true)
            .execute(&mut store)
            .unwrap();
        conditions.push(condition);
    }

    let loops: [&[usize]; 3] = [&[0, 6, 11, 5], &[2, 8, 13, 7], &[10, 12, 16, 19, 15]];
    for (face, ring) in faces.iter().zip(loops) {
        for &l in ring {
            AddLinkToFace::new(*face, links[l])
                .execute(&mut store)
                .unwrap();
        }
    }

    // (north, west, south, east)
    let around = [
        (Some(3), None, None, Some(1)),
        (Some(4), Some(0), None, Some(2)),
        (Some(5), Some(1), None, None),
        (Some(6), None, Some(0), Some(4)),
        (None, Some(3), Some(1), Some(5)),
        (Some(7), Some(4), Some(2), None),
        (None, None, Some(3), Some(7)),
        (None, Some(6), Some(5), None),
    ];
    for (i, (north, west, south, east)) in around.into_iter().enumerate() {
        let neighbours = Compass::new(north.map(v), west.map(v), south.map(v), east.map(v));
        SetVertexNeighbours::new(v(i), neighbours)
            .execute(&mut store)
            .unwrap();
    }

    let nodes: Vec<NodeId> = (0..NODE_COUNT)
        .map(|_| store.add_node(NodeData::new()))
        .collect();
    let n = |name: &str| {
        let index = NODE_NAMES.iter().position(|m| *m == name).unwrap();
        nodes[index]
    };

    let node_links: [(&str, [Option<&str>; 4]); NODE_COUNT] = [
        ("n0-0", [Some("n3-0"), None, Some("n0-2"), Some("n0-1")]),
        ("n0-1", [Some("n3-0"), Some("n0-0"), Some("n0-3"), Some("n1-1")]),
        ("n0-2", [Some("n0-0"), None, None, Some("n0-3")]),
        ("n0-3", [Some("n0-1"), Some("n0-2"), None, Some("n1-1")]),
        ("n1-0", [Some("n4-0"), Some("n0-3"), Some("n1-1"), Some("n2-2")]),
        ("n1-1", [Some("n1-0"), Some("n0-3"), None, Some("n2-2")]),
        ("n2-0", [Some("n5-1"), Some("n1-1"), Some("n2-2"), Some("n2-1")]),
        ("n2-1", [Some("n5-1"), Some("n2-0"), Some("n2-3"), None]),
        ("n2-2", [Some("n2-0"), Some("n1-1"), None, Some("n2-3")]),
        ("n2-3", [Some("n2-1"), Some("n2-2"), None, None]),
        ("n3-0", [Some("n6-2"), None, Some("n0-0"), Some("n3-1")]),
        ("n3-1", [Some("n6-2"), Some("n3-0"), Some("n0-0"), Some("n4-0")]),
        ("n4-0", [None, Some("n3-1"), Some("n1-0"), Some("n5-0")]),
        ("n5-0", [Some("n7-3"), Some("n4-0"), Some("n2-1"), Some("n5-1")]),
        ("n5-1", [Some("n7-3"), Some("n5-0"), Some("n2-1"), None]),
        ("n6-0", [None, None, Some("n6-2"), Some("n6-1")]),
        ("n6-1", [None, Some("n6-0"), Some("n6-3"), Some("n7-0")]),
        ("n6-2", [Some("n6-0"), None, Some("n3-0"), Some("n6-3")]),
        ("n6-3", [Some("n6-1"), Some("n6-2"), Some("n3-0"), Some("n7-0")]),
        ("n7-0", [None, Some("n6-1"), Some("n7-2"), Some("n7-1")]),
        ("n7-1", [None, Some("n7-0"), Some("n7-3"), None]),
        ("n7-2", [Some("n7-0"), Some("n6-1"), Some("n5-1"), Some("n7-3")]),
        ("n7-3", [Some("n7-1"), Some("n7-2"), Some("n5-1"), None]),
    ];
    for (name, [north, west, south, east]) in node_links {
        let neighbours = Compass::new(north.map(n), west.map(n), south.map(n), east.map(n));
        SetNodeNeighbours::new(n(name), neighbours)
            .execute(&mut store)
            .unwrap();
    }

    let points: [(f64, f64, f64); NODE_COUNT] = [
        (0.0, 1.0, 0.25),
        (1.0, 1.0, 0.5),
        (0.0, 0.0, 0.0),
        (1.0, 0.0, 0.25),
        (2.0, 1.0, 0.75),
        (2.0, 0.0, 0.5),
        (3.0, 1.0, 0.5),
        (4.0, 1.0, 0.25),
        (3.0, 0.0, 0.25),
        (4.0, 0.0, 0.0),
        (0.0, 2.0, 0.5),
        (1.0, 2.0, 0.75),
        (2.0, 2.0, -1.0),
        (3.0, 2.0, 0.75),
        (4.0, 2.0, 0.5),
        (0.0, 4.0, 0.0),
        (1.0, 4.0, 0.25),
        (0.0, 3.0, 0.25),
        (1.0, 3.0, 0.5),
        (3.0, 4.0, 0.25),
        (4.0, 4.0, 0.0),
        (3.0, 3.0, 0.5),
        (4.0, 3.0, 0.25),
    ];
    for ((name, &node), (x, y, z)) in NODE_NAMES.iter().zip(&nodes).zip(points) {
        let vertex = name[1..2].parse::<usize>().unwrap();
        AnchorNode::new(node, NodeAnchor::Vertex(v(vertex)))
            .execute(&mut store)
            .unwrap();
        let point = store.add_point(PointData::new(x, y, z, 1.0));
        BindPoint::new(node, point).execute(&mut store).unwrap();
    }

    let image = spline.image_mut();
    image.vertices.clone_from(&vertices);
    image.edges.clone_from(&edges);
    image.links.clone_from(&links);
    image.conditions = conditions;
    image.faces.clone_from(&faces);

    Scenario {
        store,
        spline,
        vertices,
        edges,
        links,
        faces,
        nodes,
    }
}
