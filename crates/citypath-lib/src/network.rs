use std::collections::{BTreeMap, HashMap};

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

use crate::error::{Error, Result};

/// Identifier of an intersection. Networks built from OpenStreetMap use the
/// OSM node id.
pub type NodeId = i64;

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Shrinks the heuristic scale slightly so floating point rounding in the
/// haversine formula can never make the estimate exceed an edge length.
const HEURISTIC_SLACK: f64 = 1.0 - 1e-9;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in metres.
    pub fn haversine_distance(&self, other: &Self) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let dlat = (other.lat - self.lat).to_radians();
        let dlon = (other.lon - self.lon).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
    }
}

/// Intersection within the road network.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub position: Coordinate,
}

/// Directed road segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    /// Segment length in the network's distance unit (metres for OSM data).
    pub length: f64,
}

/// Immutable drivable road network.
///
/// Nodes are stored in ascending id order and edges in insertion order, so
/// every search over the same network visits candidates in the same order.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    graph: DiGraph<Node, f64>,
    index: HashMap<NodeId, NodeIndex>,
    heuristic_scale: f64,
}

impl RoadNetwork {
    /// Start an empty [`RoadNetworkBuilder`].
    pub fn builder() -> RoadNetworkBuilder {
        RoadNetworkBuilder::default()
    }

    /// Build a network from nodes and directed edges.
    ///
    /// When the same node id appears twice the last position wins. Fails when
    /// an edge references an unknown node or carries a negative or non-finite
    /// length.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = Node>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self> {
        let ordered: BTreeMap<NodeId, Node> = nodes.into_iter().map(|n| (n.id, n)).collect();

        let mut graph = DiGraph::with_capacity(ordered.len(), 0);
        let mut index = HashMap::with_capacity(ordered.len());
        for node in ordered.into_values() {
            let idx = graph.add_node(node);
            index.insert(node.id, idx);
        }

        let mut scale = f64::INFINITY;
        for edge in edges {
            let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) else {
                return Err(Error::InvalidEdge {
                    from: edge.from,
                    to: edge.to,
                });
            };
            if !edge.length.is_finite() || edge.length < 0.0 {
                return Err(Error::InvalidEdgeLength {
                    from: edge.from,
                    to: edge.to,
                    length: edge.length,
                });
            }

            let span = graph[from].position.haversine_distance(&graph[to].position);
            if span > 0.0 {
                scale = scale.min(edge.length / span);
            }
            graph.add_edge(from, to, edge.length);
        }

        let heuristic_scale = if scale.is_finite() {
            scale * HEURISTIC_SLACK
        } else {
            0.0
        };

        Ok(Self {
            graph,
            index,
            heuristic_scale,
        })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Lookup a node by identifier.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&idx| &self.graph[idx])
    }

    /// Position of a node, if present.
    pub fn position(&self, id: NodeId) -> Option<Coordinate> {
        self.node(id).map(|node| node.position)
    }

    /// Iterate nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_weights()
    }

    /// Iterate edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.graph.raw_edges().iter().map(|edge| Edge {
            from: self.graph[edge.source()].id,
            to: self.graph[edge.target()].id,
            length: edge.weight,
        })
    }

    /// Length of the shortest direct edge `from -> to`, if one exists.
    pub fn edge_length(&self, from: NodeId, to: NodeId) -> Option<f64> {
        let from = *self.index.get(&from)?;
        let to = *self.index.get(&to)?;
        self.graph
            .edges_connecting(from, to)
            .map(|edge| *edge.weight())
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Total length of `path`, or `None` when a consecutive pair is not an edge.
    pub fn path_length(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_length(pair[0], pair[1]))
            .sum()
    }

    /// Multiplier applied to great-circle distance so that it never exceeds
    /// the length of any edge. Zero when no edge has a positive span.
    pub fn heuristic_scale(&self) -> f64 {
        self.heuristic_scale
    }

    pub(crate) fn graph(&self) -> &DiGraph<Node, f64> {
        &self.graph
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }
}

/// Incremental constructor for [`RoadNetwork`].
#[derive(Debug, Clone, Default)]
pub struct RoadNetworkBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl RoadNetworkBuilder {
    pub fn node(mut self, id: NodeId, lat: f64, lon: f64) -> Self {
        self.nodes.push(Node {
            id,
            position: Coordinate::new(lat, lon),
        });
        self
    }

    /// Add a one-way segment.
    pub fn edge(mut self, from: NodeId, to: NodeId, length: f64) -> Self {
        self.edges.push(Edge { from, to, length });
        self
    }

    /// Add a two-way segment.
    pub fn road(self, a: NodeId, b: NodeId, length: f64) -> Self {
        self.edge(a, b, length).edge(b, a, length)
    }

    pub fn build(self) -> Result<RoadNetwork> {
        RoadNetwork::from_parts(self.nodes, self.edges)
    }
}
