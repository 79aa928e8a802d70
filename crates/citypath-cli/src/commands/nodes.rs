use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use citypath_cli::output::{write_json, OutputFormat};
use citypath_cli::terminal::format_with_separators;
use citypath_lib::{place_name, NodeId, NodeLabels};

use super::{CommandContext, NodesArgs};

#[derive(Serialize)]
struct NodeEntry<'a> {
    id: NodeId,
    label: &'a str,
}

#[derive(Serialize)]
struct AmbiguousLabel<'a> {
    label: &'a str,
    nodes: &'a [NodeId],
}

#[derive(Serialize)]
struct NodeListing<'a> {
    place: String,
    node_count: usize,
    nodes: Vec<NodeEntry<'a>>,
    ambiguous: Vec<AmbiguousLabel<'a>>,
}

pub fn run(context: &CommandContext, args: &NodesArgs) -> Result<()> {
    let (city, network) = context.load_city(&args.city)?;
    let labels = NodeLabels::build(&network);
    let limit = args.limit.unwrap_or(usize::MAX);

    let listing = NodeListing {
        place: place_name(city),
        node_count: labels.len(),
        nodes: labels
            .iter()
            .take(limit)
            .map(|(id, label)| NodeEntry { id, label })
            .collect(),
        ambiguous: labels
            .ambiguous()
            .into_iter()
            .map(|(label, nodes)| AmbiguousLabel { label, nodes })
            .collect(),
    };

    let mut stdout = io::stdout().lock();
    match context.format {
        OutputFormat::Json => write_json(&mut stdout, &listing)?,
        OutputFormat::Text => {
            let p = &context.palette;
            writeln!(
                stdout,
                "{}{}{}: {} intersections",
                p.white_bold,
                listing.place,
                p.reset,
                format_with_separators(listing.node_count as u64)
            )?;
            for entry in &listing.nodes {
                writeln!(stdout, "{:>12}  {}", entry.id, entry.label)?;
            }
            let hidden = listing.node_count - listing.nodes.len();
            if hidden > 0 {
                writeln!(
                    stdout,
                    "{}... and {} more{}",
                    p.gray,
                    format_with_separators(hidden as u64),
                    p.reset
                )?;
            }
            for shared in &listing.ambiguous {
                let ids: Vec<String> = shared.nodes.iter().map(NodeId::to_string).collect();
                writeln!(
                    stdout,
                    "{}warning:{} label '{}' is shared by nodes {}; select them by id",
                    p.yellow,
                    p.reset,
                    shared.label,
                    ids.join(", ")
                )?;
            }
        }
    }
    Ok(())
}
