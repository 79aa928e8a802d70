//! Route planning entry point.
//!
//! [`plan_route`] resolves the user's source and target selections against a
//! road network and its [`NodeLabels`], then runs the shortest-path search.
//!
//! # Example
//!
//! ```ignore
//! use citypath_lib::{plan_route, NodeLabels, OverpassProvider, NetworkProvider, RouteRequest};
//!
//! let network = OverpassProvider::from_env()?.fetch("Ottawa, Canada")?;
//! let labels = NodeLabels::build(&network);
//! let request = RouteRequest::new("45.4215, -75.6972".parse()?, "45.4236, -75.7009".parse()?);
//! let plan = plan_route(&network, &labels, &request)?;
//! println!("{} hops, {:.0} m", plan.path.hop_count(), plan.path.length());
//! ```

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::labels::NodeLabels;
use crate::network::{NodeId, RoadNetwork};
use crate::path::{find_shortest_path_with, RoutePath, SearchHeuristic};

/// How the user picked an intersection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSelector {
    /// Raw node identifier.
    Id(NodeId),
    /// Display label as produced by [`crate::labels::format_label`].
    Label(String),
}

impl NodeSelector {
    /// Resolve the selector to a node id of `network`.
    pub fn resolve(&self, network: &RoadNetwork, labels: &NodeLabels) -> Result<NodeId> {
        match self {
            NodeSelector::Id(id) if network.contains(*id) => Ok(*id),
            NodeSelector::Id(id) => Err(Error::InvalidNode { node: *id }),
            NodeSelector::Label(label) => labels.resolve(label),
        }
    }
}

impl From<&str> for NodeSelector {
    fn from(value: &str) -> Self {
        let value = value.trim();
        match value.parse::<NodeId>() {
            Ok(id) => NodeSelector::Id(id),
            Err(_) => NodeSelector::Label(value.to_string()),
        }
    }
}

impl FromStr for NodeSelector {
    type Err = Infallible;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        Ok(NodeSelector::from(value))
    }
}

impl fmt::Display for NodeSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeSelector::Id(id) => write!(f, "{id}"),
            NodeSelector::Label(label) => f.write_str(label),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub source: NodeSelector,
    pub target: NodeSelector,
    pub heuristic: SearchHeuristic,
}

impl RouteRequest {
    pub fn new(source: NodeSelector, target: NodeSelector) -> Self {
        Self {
            source,
            target,
            heuristic: SearchHeuristic::default(),
        }
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub source: NodeId,
    pub target: NodeId,
    pub heuristic: SearchHeuristic,
    pub path: RoutePath,
}

/// Resolve the request against `network` and find the shortest route.
pub fn plan_route(
    network: &RoadNetwork,
    labels: &NodeLabels,
    request: &RouteRequest,
) -> Result<RoutePlan> {
    let source = request.source.resolve(network, labels)?;
    let target = request.target.resolve(network, labels)?;

    let path = find_shortest_path_with(network, source, target, request.heuristic)?;
    info!(
        source,
        target,
        hops = path.hop_count(),
        length_m = path.length(),
        "planned route"
    );

    Ok(RoutePlan {
        source,
        target,
        heuristic: request.heuristic,
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> RoadNetwork {
        RoadNetwork::builder()
            .node(1, 45.4200, -75.7000)
            .node(2, 45.4200, -75.6900)
            .node(3, 45.4300, -75.6900)
            .road(1, 2, 790.0)
            .road(2, 3, 1_120.0)
            .build()
            .expect("valid network")
    }

    #[test]
    fn selector_parses_ids_and_labels() {
        assert_eq!("42".parse::<NodeSelector>().unwrap(), NodeSelector::Id(42));
        assert_eq!(
            " 45.4200, -75.7000 ".parse::<NodeSelector>().unwrap(),
            NodeSelector::Label("45.4200, -75.7000".to_string())
        );
        assert_eq!(NodeSelector::from(" 7 "), NodeSelector::Id(7));
    }

    #[test]
    fn plan_accepts_labels_and_ids() {
        let network = network();
        let labels = NodeLabels::build(&network);
        let request = RouteRequest::new(
            NodeSelector::Label("45.4200, -75.7000".to_string()),
            NodeSelector::Id(3),
        );
        let plan = plan_route(&network, &labels, &request).expect("route exists");
        assert_eq!(plan.source, 1);
        assert_eq!(plan.target, 3);
        assert_eq!(plan.path.nodes(), &[1, 2, 3]);
    }

    #[test]
    fn unknown_id_is_invalid_node() {
        let network = network();
        let labels = NodeLabels::build(&network);
        let request = RouteRequest::new(NodeSelector::Id(1), NodeSelector::Id(77));
        let err = plan_route(&network, &labels, &request).expect_err("node 77 missing");
        assert!(matches!(err, Error::InvalidNode { node: 77 }));
    }
}
