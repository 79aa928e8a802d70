mod commands;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use citypath_cli::output::OutputFormat;
use citypath_cli::session::Session;
use citypath_cli::terminal::ColorPalette;

use commands::{CommandContext, NodesArgs, RouteArgs};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Shortest driving routes between intersections of Canadian cities"
)]
struct Cli {
    /// Read the road network from a saved Overpass JSON response instead of
    /// downloading it.
    #[arg(long, global = true)]
    overpass_file: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Disable ANSI colors in the output.
    #[arg(long, global = true)]
    no_color: bool,

    /// Map file written by the interactive session.
    #[arg(long, default_value = "route.html")]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the cities that can be searched.
    Cities,
    /// List the intersections of a city with their labels.
    Nodes(NodesArgs),
    /// Find the shortest route between two intersections of a city.
    Route(RouteArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let context = CommandContext::new(
        cli.overpass_file,
        cli.format,
        ColorPalette::for_flag(cli.no_color),
    );

    match cli.command {
        Some(Command::Cities) => commands::cities::run(&context),
        Some(Command::Nodes(args)) => commands::nodes::run(&context, &args),
        Some(Command::Route(args)) => commands::route::run(&context, &args),
        None => run_interactive(&context, cli.output),
    }
}

fn run_interactive(context: &CommandContext, map_path: PathBuf) -> Result<()> {
    let provider = context.provider()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(
        provider.as_ref(),
        stdin.lock(),
        stdout.lock(),
        map_path,
        context.palette,
    )
    .run()
    .context("interactive session failed")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
