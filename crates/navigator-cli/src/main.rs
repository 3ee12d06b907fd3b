use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use navigator_lib::{find_paths_filtered, load_catalog, Catalog, Error as LibError, JumpLevel};

mod output;

use output::{OutputFormat, RouteSummary};

#[derive(Parser, Debug)]
#[command(author, version, about = "Star-system catalog and jump-route utilities")]
struct Cli {
    /// Override the star-system catalog file path.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute every shortest jump route between two system names.
    Route {
        /// Starting system name.
        #[arg(long = "from")]
        from: String,
        /// Destination system name.
        #[arg(long = "to")]
        to: String,
        /// Restrict the route to these jump levels (comma separated).
        #[arg(long, value_delimiter = ',')]
        levels: Option<Vec<JumpLevel>>,
    },
    /// List every system in the catalog.
    Systems,
    /// Show the jump links of a single system.
    Links {
        /// System name.
        system: String,
        /// Include links that have not been charted yet.
        #[arg(long)]
        all: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let catalog =
        load_catalog(cli.data.as_deref()).context("failed to load the star-system catalog")?;

    match cli.command {
        Command::Route { from, to, levels } => {
            handle_route(&catalog, &from, &to, levels, cli.format)
        }
        Command::Systems => handle_systems(&catalog, cli.format),
        Command::Links { system, all } => handle_links(&catalog, &system, all, cli.format),
    }
}

fn handle_route(
    catalog: &Catalog,
    from: &str,
    to: &str,
    levels: Option<Vec<JumpLevel>>,
    format: OutputFormat,
) -> Result<()> {
    let origin = catalog.resolve(from)?;
    let destination = catalog.resolve(to)?;
    let allowed = levels.unwrap_or_else(|| JumpLevel::ALL.to_vec());

    let routes = find_paths_filtered(catalog, &origin.name, &destination.name, &allowed)
        .ok_or_else(|| LibError::RouteNotFound {
            origin: origin.name.clone(),
            destination: destination.name.clone(),
        })?;

    let summary = RouteSummary::new(&origin.name, &destination.name, allowed, routes);
    output::render_route(&summary, format)
}

fn handle_systems(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    output::render_systems(catalog, format)
}

fn handle_links(catalog: &Catalog, name: &str, all: bool, format: OutputFormat) -> Result<()> {
    let system = catalog.resolve(name)?;
    output::render_links(system, all, format)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
