use std::fmt;

use petgraph::algo::astar;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::network::{NodeId, RoadNetwork};

/// Estimate used to guide the A* search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SearchHeuristic {
    /// Great-circle distance to the target, scaled by
    /// [`RoadNetwork::heuristic_scale`] so it stays admissible.
    #[default]
    GreatCircle,
    /// No estimate; the search behaves like Dijkstra's algorithm.
    Zero,
}

impl fmt::Display for SearchHeuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            SearchHeuristic::GreatCircle => "great-circle",
            SearchHeuristic::Zero => "zero",
        };
        f.write_str(value)
    }
}

/// Minimum-length route through the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePath {
    nodes: Vec<NodeId>,
    length: f64,
}

impl RoutePath {
    /// Node identifiers from source to target. Never empty.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Sum of the traversed edge lengths.
    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn source(&self) -> NodeId {
        self.nodes[0]
    }

    pub fn target(&self) -> NodeId {
        self.nodes[self.nodes.len() - 1]
    }

    /// Number of edges in the route.
    pub fn hop_count(&self) -> usize {
        self.nodes.len() - 1
    }
}

/// Find the shortest route between `source` and `target` with A* guided by
/// great-circle distance.
pub fn find_shortest_path(
    network: &RoadNetwork,
    source: NodeId,
    target: NodeId,
) -> Result<RoutePath> {
    find_shortest_path_with(network, source, target, SearchHeuristic::default())
}

/// Find the shortest route using the requested heuristic.
pub fn find_shortest_path_with(
    network: &RoadNetwork,
    source: NodeId,
    target: NodeId,
    heuristic: SearchHeuristic,
) -> Result<RoutePath> {
    let start = network
        .index_of(source)
        .ok_or(Error::InvalidNode { node: source })?;
    let goal = network
        .index_of(target)
        .ok_or(Error::InvalidNode { node: target })?;

    if start == goal {
        return Ok(RoutePath {
            nodes: vec![source],
            length: 0.0,
        });
    }

    let graph = network.graph();
    let goal_position = graph[goal].position;
    let scale = match heuristic {
        SearchHeuristic::GreatCircle => network.heuristic_scale(),
        SearchHeuristic::Zero => 0.0,
    };

    let (length, indices) = astar(
        graph,
        start,
        |node| node == goal,
        |edge| *edge.weight(),
        |node| scale * graph[node].position.haversine_distance(&goal_position),
    )
    .ok_or(Error::NoPathFound {
        source_node: source,
        target_node: target,
    })?;

    let nodes: Vec<NodeId> = indices.into_iter().map(|idx| graph[idx].id).collect();
    debug!(
        source,
        target,
        %heuristic,
        hops = nodes.len() - 1,
        length,
        "found shortest path"
    );

    Ok(RoutePath { nodes, length })
}
