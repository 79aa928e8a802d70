use thiserror::Error;

use crate::network::NodeId;

/// Convenient result alias for the citypath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The road network for a place could not be downloaded or decoded.
    #[error("failed to acquire road network for {place}: {reason}")]
    AcquisitionFailure { place: String, reason: String },

    /// Raised when a node identifier is not part of the road network.
    #[error("node {node} is not part of the road network")]
    InvalidNode { node: NodeId },

    /// Raised when the search exhausts the graph without reaching the target.
    #[error("no path found between {source_node} and {target_node}")]
    NoPathFound {
        source_node: NodeId,
        target_node: NodeId,
    },

    /// Raised when asked to render a path without any nodes.
    #[error("cannot render an empty path")]
    EmptyPath,

    /// Raised when an edge references a node missing from the node mapping.
    #[error("edge {from} -> {to} references a node missing from the graph")]
    InvalidEdge { from: NodeId, to: NodeId },

    /// Raised when an edge length is negative or not finite.
    #[error("edge {from} -> {to} has invalid length {length}")]
    InvalidEdgeLength { from: NodeId, to: NodeId, length: f64 },

    /// Raised when a display label matches no node.
    #[error("no node is labelled '{label}'")]
    UnknownNodeLabel { label: String },

    /// Raised when a display label is shared by several nodes.
    #[error("label '{label}' is ambiguous; candidates: {}", format_ids(.candidates))]
    AmbiguousNodeLabel {
        label: String,
        candidates: Vec<NodeId>,
    },

    /// Raised when a city name is not in the catalog.
    #[error("unknown city: {name}{}", format_suggestions(.suggestions))]
    UnknownCity {
        name: String,
        suggestions: Vec<String>,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON encoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn acquisition(place: &str, reason: impl ToString) -> Self {
        Error::AcquisitionFailure {
            place: place.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn format_ids(ids: &[NodeId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
