use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::network::{Coordinate, Edge, Node, NodeId, RoadNetwork};

/// Highway values that never carry motor traffic (or are service roads).
const EXCLUDED_HIGHWAYS: &[&str] = &[
    "abandoned",
    "bridleway",
    "bus_guideway",
    "construction",
    "corridor",
    "cycleway",
    "elevator",
    "escalator",
    "footway",
    "no",
    "path",
    "pedestrian",
    "planned",
    "platform",
    "proposed",
    "raceway",
    "razed",
    "service",
    "steps",
    "track",
];

const EXCLUDED_SERVICES: &[&str] = &[
    "alley",
    "driveway",
    "emergency_access",
    "parking",
    "parking_aisle",
    "private",
];

/// Raw Overpass API response (`[out:json]`).
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<OverpassElement>,
}

/// A single OSM element. Only nodes and ways are used.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

/// Build the Overpass QL query selecting drivable ways inside an area.
pub fn drive_query(area_id: i64, timeout_secs: u64) -> String {
    let highways = EXCLUDED_HIGHWAYS.join("|");
    let services = EXCLUDED_SERVICES.join("|");
    format!(
        "[out:json][timeout:{timeout_secs}];\n\
         area({area_id})->.searchArea;\n\
         (\n  way[\"highway\"][\"area\"!~\"yes\"][\"highway\"!~\"^({highways})$\"]\
         [\"motor_vehicle\"!~\"^no$\"][\"motorcar\"!~\"^no$\"]\
         [\"service\"!~\"^({services})$\"][\"access\"!~\"^private$\"](area.searchArea);\n);\n\
         (._;>;);\nout body;\n"
    )
}

/// Whether a way's tags describe a road open to cars.
pub fn is_drivable(tags: &HashMap<String, String>) -> bool {
    let tag = |key: &str| tags.get(key).map(String::as_str);

    let Some(highway) = tag("highway") else {
        return false;
    };
    if EXCLUDED_HIGHWAYS.contains(&highway) {
        return false;
    }
    if tag("area") == Some("yes") || tag("access") == Some("private") {
        return false;
    }
    if tag("motor_vehicle") == Some("no") || tag("motorcar") == Some("no") {
        return false;
    }
    !matches!(tag("service"), Some(service) if EXCLUDED_SERVICES.contains(&service))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Both,
    Forward,
    Backward,
}

fn direction(tags: &HashMap<String, String>) -> Direction {
    match tags.get("oneway").map(String::as_str) {
        Some("yes" | "true" | "1") => Direction::Forward,
        Some("-1" | "reverse") => Direction::Backward,
        Some(_) => Direction::Both,
        None => {
            let motorway = tags.get("highway").map(String::as_str) == Some("motorway");
            let roundabout = matches!(
                tags.get("junction").map(String::as_str),
                Some("roundabout" | "circular")
            );
            if motorway || roundabout {
                Direction::Forward
            } else {
                Direction::Both
            }
        }
    }
}

/// Convert an Overpass response into a routable network.
///
/// Ways are split at intersections (nodes shared by several way positions
/// and way endpoints); intermediate nodes are folded into the edge length.
/// Nodes not touched by any drivable edge are dropped.
pub fn network_from_overpass(response: &OverpassResponse) -> Result<RoadNetwork> {
    let positions: HashMap<NodeId, Coordinate> = response
        .elements
        .iter()
        .filter(|element| element.kind == "node")
        .filter_map(|element| match (element.lat, element.lon) {
            (Some(lat), Some(lon)) => Some((element.id, Coordinate::new(lat, lon))),
            _ => None,
        })
        .collect();

    let ways: Vec<&OverpassElement> = response
        .elements
        .iter()
        .filter(|element| element.kind == "way" && element.nodes.len() >= 2)
        .filter(|element| is_drivable(&element.tags))
        .filter(|way| {
            let complete = way.nodes.iter().all(|id| positions.contains_key(id));
            if !complete {
                warn!(way = way.id, "skipping way with nodes missing coordinates");
            }
            complete
        })
        .collect();

    let mut occurrences: HashMap<NodeId, usize> = HashMap::new();
    for way in &ways {
        for id in &way.nodes {
            *occurrences.entry(*id).or_default() += 1;
        }
    }

    let mut nodes: BTreeMap<NodeId, Node> = BTreeMap::new();
    let mut edges: Vec<Edge> = Vec::new();

    for way in &ways {
        let last = way.nodes.len() - 1;
        let mut segment_start = way.nodes[0];
        let mut length = 0.0;

        for (position, pair) in way.nodes.windows(2).enumerate() {
            length += positions[&pair[0]].haversine_distance(&positions[&pair[1]]);

            let current = pair[1];
            let is_end = position + 1 == last;
            if !is_end && occurrences[&current] < 2 {
                continue;
            }

            for id in [segment_start, current] {
                nodes.entry(id).or_insert(Node {
                    id,
                    position: positions[&id],
                });
            }
            match direction(&way.tags) {
                Direction::Forward => edges.push(Edge {
                    from: segment_start,
                    to: current,
                    length,
                }),
                Direction::Backward => edges.push(Edge {
                    from: current,
                    to: segment_start,
                    length,
                }),
                Direction::Both => {
                    edges.push(Edge {
                        from: segment_start,
                        to: current,
                        length,
                    });
                    edges.push(Edge {
                        from: current,
                        to: segment_start,
                        length,
                    });
                }
            }

            segment_start = current;
            length = 0.0;
        }
    }

    debug!(
        elements = response.elements.len(),
        drivable_ways = ways.len(),
        "converted overpass response"
    );

    let network = RoadNetwork::from_parts(nodes.into_values(), edges)?;
    info!(
        nodes = network.node_count(),
        edges = network.edge_count(),
        "built road network"
    );
    Ok(network)
}
