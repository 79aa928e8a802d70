//! Handlers for the one-shot subcommands.

pub mod cities;
pub mod nodes;
pub mod route;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use citypath_cli::output::OutputFormat;
use citypath_cli::session::load_network;
use citypath_cli::terminal::ColorPalette;
use citypath_lib::{
    resolve_city, NetworkProvider, NodeSelector, OverpassFileProvider, OverpassProvider,
    RoadNetwork,
};

/// Settings shared by every command.
pub struct CommandContext {
    overpass_file: Option<PathBuf>,
    pub format: OutputFormat,
    pub palette: ColorPalette,
}

impl CommandContext {
    pub fn new(overpass_file: Option<PathBuf>, format: OutputFormat, palette: ColorPalette) -> Self {
        Self {
            overpass_file,
            format,
            palette,
        }
    }

    /// Network source selected by `--overpass-file`, or the live services.
    pub fn provider(&self) -> Result<Box<dyn NetworkProvider>> {
        match &self.overpass_file {
            Some(path) => Ok(Box::new(OverpassFileProvider::new(path.clone()))),
            None => {
                let provider = OverpassProvider::from_env()
                    .context("failed to set up the OpenStreetMap client")?;
                Ok(Box::new(provider))
            }
        }
    }

    /// Resolve `city` against the catalog and load its road network.
    pub fn load_city(&self, city: &str) -> Result<(&'static str, RoadNetwork)> {
        let city = resolve_city(city)?;
        let provider = self.provider()?;
        let network = load_network(provider.as_ref(), city)
            .with_context(|| format!("failed to load the road network of {city}"))?;
        Ok((city, network))
    }
}

#[derive(Args, Debug)]
pub struct NodesArgs {
    /// City from the catalog, e.g. "Ottawa".
    #[arg(long)]
    pub city: String,

    /// Show at most this many intersections.
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// City from the catalog, e.g. "Ottawa".
    #[arg(long)]
    pub city: String,

    /// Start intersection, as a node id or a "lat, lon" label.
    #[arg(long = "from")]
    pub from: NodeSelector,

    /// Destination intersection, as a node id or a "lat, lon" label.
    #[arg(long = "to")]
    pub to: NodeSelector,

    /// Write the route as a Leaflet HTML map.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Write the route as GeoJSON.
    #[arg(long)]
    pub geojson: Option<PathBuf>,
}
