//! Interactive route finding session.
//!
//! The session asks for a city, downloads its road network and then keeps
//! asking for pairs of intersections, printing each route and writing it to a
//! map file. Every failure inside the loop is reported as
//! `An error occurred: ...` and the user is asked again.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use tracing::info;

use citypath_lib::{
    canadian_cities, place_name, plan_route, render_path, resolve_city, NetworkProvider,
    NodeLabels, NodeSelector, RoadNetwork, RouteRequest, RouteSummary,
};

use crate::output::{write_map_files, write_route_text};
use crate::terminal::{format_with_separators, ColorPalette, LoadingIndicator};

/// Number of labels shown by the `list` command.
const LIST_LIMIT: usize = 20;

/// Fetch the road network of a catalog city while showing a loading message.
pub fn load_network(
    provider: &dyn NetworkProvider,
    city: &str,
) -> citypath_lib::Result<RoadNetwork> {
    let place = place_name(city);
    let _loading =
        LoadingIndicator::stderr(&format!("Downloading the road network of {place}..."));
    provider.fetch(&place)
}

/// Pick a city from the catalog by 1-based number or by name.
pub fn choose_city(answer: &str) -> Result<&'static str> {
    let cities = canadian_cities();
    match answer.trim().parse::<usize>() {
        Ok(number) => number
            .checked_sub(1)
            .and_then(|index| cities.get(index))
            .copied()
            .ok_or_else(|| {
                anyhow!(
                    "city number {number} is out of range (1-{})",
                    cities.len()
                )
            }),
        Err(_) => Ok(resolve_city(answer)?),
    }
}

/// What to do after leaving the intersection prompt.
enum Next {
    ChangeCity,
    Quit,
}

pub struct Session<'a, R, W> {
    provider: &'a dyn NetworkProvider,
    input: R,
    output: W,
    map_path: PathBuf,
    palette: ColorPalette,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        provider: &'a dyn NetworkProvider,
        input: R,
        output: W,
        map_path: PathBuf,
        palette: ColorPalette,
    ) -> Self {
        Self {
            provider,
            input,
            output,
            map_path,
            palette,
        }
    }

    /// Run until the user quits or input ends. Only I/O failures on the
    /// session's own streams are returned.
    pub fn run(&mut self) -> io::Result<()> {
        let p = self.palette;
        writeln!(self.output, "{}Shortest Path Finder{}", p.white_bold, p.reset)?;
        self.write_cities()?;

        loop {
            let Some(answer) =
                self.prompt("Select a city (number or name, 'list' to show cities, q to quit)")?
            else {
                return Ok(());
            };
            if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
                return Ok(());
            }
            if answer.eq_ignore_ascii_case("list") {
                self.write_cities()?;
                continue;
            }

            let loaded = choose_city(&answer).and_then(|city| {
                let network = load_network(self.provider, city)
                    .with_context(|| format!("failed to load the road network of {city}"))?;
                Ok((city, network))
            });
            let (city, network) = match loaded {
                Ok(loaded) => loaded,
                Err(err) => {
                    self.report(&err)?;
                    continue;
                }
            };

            writeln!(
                self.output,
                "Loaded {} intersections and {} road segments for {}{}{}",
                format_with_separators(network.node_count() as u64),
                format_with_separators(network.edge_count() as u64),
                p.white_bold,
                place_name(city),
                p.reset
            )?;

            match self.route_loop(city, &network)? {
                Next::ChangeCity => continue,
                Next::Quit => return Ok(()),
            }
        }
    }

    fn route_loop(&mut self, city: &str, network: &RoadNetwork) -> io::Result<Next> {
        let labels = NodeLabels::build(network);
        loop {
            let Some(source) = self.prompt(
                "Start intersection (label or id, 'list [prefix]' to browse, empty to change city)",
            )?
            else {
                return Ok(Next::Quit);
            };
            if source.is_empty() {
                return Ok(Next::ChangeCity);
            }
            if source.eq_ignore_ascii_case("q") {
                return Ok(Next::Quit);
            }
            if let Some(prefix) = source.strip_prefix("list") {
                self.write_labels(&labels, prefix.trim())?;
                continue;
            }

            let Some(target) = self.prompt("Destination intersection (empty to go back)")? else {
                return Ok(Next::Quit);
            };
            if target.is_empty() {
                continue;
            }

            if let Err(err) = self.find_route(city, network, &labels, &source, &target) {
                self.report(&err)?;
            }
        }
    }

    fn find_route(
        &mut self,
        city: &str,
        network: &RoadNetwork,
        labels: &NodeLabels,
        source: &str,
        target: &str,
    ) -> Result<()> {
        let request = RouteRequest::new(NodeSelector::from(source), NodeSelector::from(target));
        let plan = plan_route(network, labels, &request)?;
        let summary = RouteSummary::from_plan(Some(&place_name(city)), network, labels, &plan)?;
        let map = render_path(network, plan.path.nodes())?;
        write_map_files(&map, Some(&self.map_path), None)?;
        info!(city, map = %self.map_path.display(), "route map written");

        write_route_text(&mut self.output, &summary, &self.palette)?;
        writeln!(
            self.output,
            "{}Map written to {}{}",
            self.palette.green,
            self.map_path.display(),
            self.palette.reset
        )?;
        Ok(())
    }

    fn write_cities(&mut self) -> io::Result<()> {
        writeln!(self.output, "Cities:")?;
        for (index, city) in canadian_cities().iter().enumerate() {
            writeln!(self.output, "{:>4}. {city}", index + 1)?;
        }
        Ok(())
    }

    fn write_labels(&mut self, labels: &NodeLabels, prefix: &str) -> io::Result<()> {
        let mut matching = labels.iter().filter(|(_, label)| label.starts_with(prefix));
        for (id, label) in matching.by_ref().take(LIST_LIMIT) {
            writeln!(self.output, "  {label}  (id {id})")?;
        }
        let remaining = matching.count();
        if remaining > 0 {
            writeln!(
                self.output,
                "{}  ... and {} more{}",
                self.palette.gray,
                format_with_separators(remaining as u64),
                self.palette.reset
            )?;
        }
        Ok(())
    }

    fn report(&mut self, err: &anyhow::Error) -> io::Result<()> {
        writeln!(
            self.output,
            "{}An error occurred: {err:#}{}",
            self.palette.red, self.palette.reset
        )
    }

    /// Ask a question; `None` once input is exhausted.
    fn prompt(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(
            self.output,
            "{}{question}:{} ",
            self.palette.cyan, self.palette.reset
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
