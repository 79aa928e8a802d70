//! citypath library entry points.
//!
//! This crate downloads the drivable road network of a place from
//! OpenStreetMap, finds the shortest route between two intersections with A*,
//! and renders the route as a map document. Hosts (the CLI) should only depend
//! on the functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod cities;
pub mod config;
pub mod error;
pub mod labels;
pub mod network;
pub mod osm;
pub mod output;
pub mod path;
pub mod render;
pub mod routing;

pub use cities::{canadian_cities, place_name, resolve_city};
pub use config::ProviderConfig;
pub use error::{Error, Result};
pub use labels::{display_name, format_label, NodeLabels};
pub use network::{Coordinate, Edge, Node, NodeId, RoadNetwork, RoadNetworkBuilder};
pub use osm::{NetworkProvider, OverpassFileProvider, OverpassProvider};
pub use output::{RouteRenderMode, RouteSummary};
pub use path::{find_shortest_path, find_shortest_path_with, RoutePath, SearchHeuristic};
pub use render::{render_path, MapDocument, Marker, MarkerKind, PolyLine};
pub use routing::{plan_route, NodeSelector, RoutePlan, RouteRequest};
