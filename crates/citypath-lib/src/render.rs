//! Route map documents.
//!
//! [`render_path`] turns a path into a [`MapDocument`]: a base map centred on
//! the first node, a start and an end marker, and one polyline per traversed
//! segment. The document can be exported as a standalone Leaflet page or as
//! GeoJSON.

use std::fmt::Write;

use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::network::{Coordinate, NodeId, RoadNetwork};

/// Zoom level used for route maps.
pub const DEFAULT_ZOOM: u8 = 12;

const LEAFLET_VERSION: &str = "1.9.4";
const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Marker role on a route map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    pub fn label(self) -> &'static str {
        match self {
            MarkerKind::Start => "Start",
            MarkerKind::End => "End",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            MarkerKind::Start => "green",
            MarkerKind::End => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub kind: MarkerKind,
    pub node: NodeId,
    pub location: Coordinate,
    pub popup: String,
    pub color: String,
}

impl Marker {
    fn new(kind: MarkerKind, node: NodeId, location: Coordinate) -> Self {
        Self {
            kind,
            node,
            location,
            popup: kind.label().to_string(),
            color: kind.color().to_string(),
        }
    }
}

/// Straight line between two consecutive path nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolyLine {
    pub from: NodeId,
    pub to: NodeId,
    pub points: [Coordinate; 2],
    pub color: String,
}

/// Renderable route map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    pub center: Coordinate,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub lines: Vec<PolyLine>,
}

/// Build the map for `path`, which must be non-empty and only reference nodes
/// of `network`.
pub fn render_path(network: &RoadNetwork, path: &[NodeId]) -> Result<MapDocument> {
    let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
        return Err(Error::EmptyPath);
    };

    let positions = path
        .iter()
        .map(|&id| {
            network
                .position(id)
                .map(|position| (id, position))
                .ok_or(Error::InvalidNode { node: id })
        })
        .collect::<Result<Vec<_>>>()?;

    let start = positions[0].1;
    let end = positions[positions.len() - 1].1;

    let lines = positions
        .windows(2)
        .map(|pair| PolyLine {
            from: pair[0].0,
            to: pair[1].0,
            points: [pair[0].1, pair[1].1],
            color: "blue".to_string(),
        })
        .collect();

    Ok(MapDocument {
        center: start,
        zoom: DEFAULT_ZOOM,
        markers: vec![
            Marker::new(MarkerKind::Start, first, start),
            Marker::new(MarkerKind::End, last, end),
        ],
        lines,
    })
}

impl MapDocument {
    /// Export as a GeoJSON `FeatureCollection`. Coordinates use `[lon, lat]`.
    pub fn to_geojson(&self) -> Value {
        let markers = self.markers.iter().map(|marker| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [marker.location.lon, marker.location.lat],
                },
                "properties": {
                    "role": marker.kind,
                    "node": marker.node,
                    "popup": marker.popup,
                    "marker-color": marker.color,
                },
            })
        });
        let lines = self.lines.iter().map(|line| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": line
                        .points
                        .iter()
                        .map(|point| [point.lon, point.lat])
                        .collect::<Vec<_>>(),
                },
                "properties": {
                    "from": line.from,
                    "to": line.to,
                    "stroke": line.color,
                },
            })
        });

        json!({
            "type": "FeatureCollection",
            "features": markers.chain(lines).collect::<Vec<_>>(),
        })
    }

    /// Export as a standalone HTML page rendering the map with Leaflet.
    pub fn to_html(&self) -> Result<String> {
        // `</` inside the inline script would terminate it early.
        let data = serde_json::to_string(self)?.replace("</", "<\\/");

        let mut page = String::new();
        let _ = writeln!(page, "<!DOCTYPE html>");
        let _ = writeln!(page, "<html>");
        let _ = writeln!(page, "<head>");
        let _ = writeln!(page, "<meta charset=\"utf-8\">");
        let _ = writeln!(page, "<title>Shortest Path</title>");
        let _ = writeln!(
            page,
            "<link rel=\"stylesheet\" href=\"https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css\">"
        );
        let _ = writeln!(
            page,
            "<script src=\"https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js\"></script>"
        );
        let _ = writeln!(
            page,
            "<style>html, body, #map {{ height: 100%; margin: 0; }}</style>"
        );
        let _ = writeln!(page, "</head>");
        let _ = writeln!(page, "<body>");
        let _ = writeln!(page, "<div id=\"map\"></div>");
        let _ = writeln!(page, "<script>");
        let _ = writeln!(page, "const route = {data};");
        let _ = writeln!(
            page,
            "const map = L.map('map').setView([route.center.lat, route.center.lon], route.zoom);"
        );
        let _ = writeln!(
            page,
            "L.tileLayer('{TILE_URL}', {{ maxZoom: 19, attribution: '{TILE_ATTRIBUTION}' }}).addTo(map);"
        );
        let _ = writeln!(page, "for (const line of route.lines) {{");
        let _ = writeln!(
            page,
            "  L.polyline(line.points.map(p => [p.lat, p.lon]), {{ color: line.color }}).addTo(map);"
        );
        let _ = writeln!(page, "}}");
        let _ = writeln!(page, "for (const marker of route.markers) {{");
        let _ = writeln!(
            page,
            "  L.circleMarker([marker.location.lat, marker.location.lon], {{ radius: 8, color: marker.color, fillColor: marker.color, fillOpacity: 0.9 }})"
        );
        let _ = writeln!(page, "    .bindPopup(marker.popup).addTo(map);");
        let _ = writeln!(page, "}}");
        let _ = writeln!(page, "</script>");
        let _ = writeln!(page, "</body>");
        let _ = writeln!(page, "</html>");
        Ok(page)
    }
}
