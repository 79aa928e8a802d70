use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::labels::NodeLabels;
use crate::network::{NodeId, RoadNetwork};
use crate::path::SearchHeuristic;
use crate::routing::RoutePlan;

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    pub label: String,
}

/// Step taken during traversal of a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    pub index: usize,
    pub id: NodeId,
    pub label: String,
    /// Distance travelled from the start when reaching this step.
    pub distance_m: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    pub heuristic: SearchHeuristic,
    pub hops: usize,
    pub length_m: f64,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a summary with resolved labels and
    /// cumulative distances.
    pub fn from_plan(
        place: Option<&str>,
        network: &RoadNetwork,
        labels: &NodeLabels,
        plan: &RoutePlan,
    ) -> Result<Self> {
        let nodes = plan.path.nodes();
        let label_of = |id: NodeId| {
            labels
                .label(id)
                .map(str::to_string)
                .ok_or(Error::InvalidNode { node: id })
        };

        let mut steps = Vec::with_capacity(nodes.len());
        let mut travelled = 0.0;
        for (index, &id) in nodes.iter().enumerate() {
            if index > 0 {
                let previous = nodes[index - 1];
                travelled += network
                    .edge_length(previous, id)
                    .ok_or(Error::InvalidNode { node: id })?;
            }
            steps.push(RouteStep {
                index,
                id,
                label: label_of(id)?,
                distance_m: travelled,
            });
        }

        Ok(Self {
            place: place.map(str::to_string),
            heuristic: plan.heuristic,
            hops: plan.path.hop_count(),
            length_m: plan.path.length(),
            start: RouteEndpoint {
                id: plan.source,
                label: label_of(plan.source)?,
            },
            goal: RouteEndpoint {
                id: plan.target,
                label: label_of(plan.target)?,
            },
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn heading(&self) -> String {
        match &self.place {
            Some(place) => format!("Route in {place}"),
            None => "Route".to_string(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "{}: {} -> {} ({} hops, {}, heuristic: {})",
            self.heading(),
            self.start.label,
            self.goal.label,
            self.hops,
            format_distance(self.length_m),
            self.heuristic
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>4}: {} ({}) {:>10}",
                step.index,
                step.label,
                step.id,
                format_distance(step.distance_m)
            );
        }
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**{}**: _{} to {}_ ({} hops, {})",
            self.heading(),
            self.start.label,
            self.goal.label,
            self.hops,
            format_distance(self.length_m)
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** (`{}`) at {}",
                step.index,
                step.label,
                step.id,
                format_distance(step.distance_m)
            );
        }
        buffer
    }
}

/// Format metres as `"850 m"` or `"12.34 km"`.
pub fn format_distance(metres: f64) -> String {
    if metres < 1_000.0 {
        format!("{metres:.0} m")
    } else {
        format!("{:.2} km", metres / 1_000.0)
    }
}
