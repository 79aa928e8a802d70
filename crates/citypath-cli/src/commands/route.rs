use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;

use citypath_cli::output::{
    write_footer, write_json, write_map_files, write_route_text, OutputFormat,
};
use citypath_lib::{place_name, plan_route, render_path, NodeLabels, RouteRequest, RouteSummary};

use super::{CommandContext, RouteArgs};

#[derive(Serialize)]
struct RouteOutput<'a> {
    #[serde(flatten)]
    summary: &'a RouteSummary,
    maps: &'a [PathBuf],
}

pub fn run(context: &CommandContext, args: &RouteArgs) -> Result<()> {
    let started = Instant::now();
    let (city, network) = context.load_city(&args.city)?;
    let labels = NodeLabels::build(&network);

    let request = RouteRequest::new(args.from.clone(), args.to.clone());
    let plan = plan_route(&network, &labels, &request)
        .with_context(|| format!("failed to find a route from {} to {}", args.from, args.to))?;
    let place = place_name(city);
    let summary = RouteSummary::from_plan(Some(&place), &network, &labels, &plan)?;
    let map = render_path(&network, plan.path.nodes())?;
    let maps = write_map_files(&map, args.output.as_deref(), args.geojson.as_deref())?;

    let mut stdout = io::stdout().lock();
    match context.format {
        OutputFormat::Json => write_json(
            &mut stdout,
            &RouteOutput {
                summary: &summary,
                maps: &maps,
            },
        )?,
        OutputFormat::Text => {
            let p = &context.palette;
            write_route_text(&mut stdout, &summary, p)?;
            for path in &maps {
                writeln!(stdout, "{}Map written to {}{}", p.green, path.display(), p.reset)?;
            }
            write_footer(&mut stdout, started.elapsed(), p)?;
        }
    }
    Ok(())
}
