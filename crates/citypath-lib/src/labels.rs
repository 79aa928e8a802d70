//! Human-readable node labels used for selecting intersections.
//!
//! A label is the node's latitude and longitude rounded to four decimals.
//! Distinct intersections closer than the rounding step share a label; the
//! [`NodeLabels`] index keeps every candidate and refuses to pick one
//! silently.

use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};
use crate::network::{Coordinate, NodeId, RoadNetwork};

/// Format a position as a display label.
pub fn format_label(position: Coordinate) -> String {
    format!("{:.4}, {:.4}", position.lat, position.lon)
}

/// Map every node of `network` to its display label.
pub fn display_name(network: &RoadNetwork) -> BTreeMap<NodeId, String> {
    network
        .nodes()
        .map(|node| (node.id, format_label(node.position)))
        .collect()
}

/// Bidirectional index between node ids and display labels, built once per
/// network.
#[derive(Debug, Clone, Default)]
pub struct NodeLabels {
    by_node: BTreeMap<NodeId, String>,
    by_label: HashMap<String, Vec<NodeId>>,
}

impl NodeLabels {
    pub fn build(network: &RoadNetwork) -> Self {
        let by_node = display_name(network);
        let mut by_label: HashMap<String, Vec<NodeId>> = HashMap::with_capacity(by_node.len());
        for (&id, label) in &by_node {
            by_label.entry(label.clone()).or_default().push(id);
        }
        Self { by_node, by_label }
    }

    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }

    /// Label for a node id.
    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.by_node.get(&id).map(String::as_str)
    }

    /// All node ids sharing `label`, in ascending order.
    pub fn candidates(&self, label: &str) -> &[NodeId] {
        self.by_label.get(label).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve an exact label back to its node id.
    pub fn resolve(&self, label: &str) -> Result<NodeId> {
        match self.candidates(label) {
            [] => Err(Error::UnknownNodeLabel {
                label: label.to_string(),
            }),
            [id] => Ok(*id),
            many => Err(Error::AmbiguousNodeLabel {
                label: label.to_string(),
                candidates: many.to_vec(),
            }),
        }
    }

    /// Labels shared by more than one node, sorted by label.
    pub fn ambiguous(&self) -> Vec<(&str, &[NodeId])> {
        let mut shared: Vec<(&str, &[NodeId])> = self
            .by_label
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(label, ids)| (label.as_str(), ids.as_slice()))
            .collect();
        shared.sort_by(|a, b| a.0.cmp(b.0));
        shared
    }

    /// Iterate `(id, label)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &str)> + '_ {
        self.by_node.iter().map(|(&id, label)| (id, label.as_str()))
    }
}
