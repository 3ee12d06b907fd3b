//! Output formatting for route and catalog listings.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use navigator_lib::{Catalog, JumpLevel, JumpLink, StarSystem};

/// Rendering style selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable listing.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
}

/// Route query result in its reportable form.
#[derive(Debug, Serialize)]
pub struct RouteSummary {
    pub origin: String,
    pub destination: String,
    pub levels: Vec<JumpLevel>,
    pub jumps: usize,
    pub routes: Vec<Vec<String>>,
}

impl RouteSummary {
    pub fn new(
        origin: &str,
        destination: &str,
        levels: Vec<JumpLevel>,
        routes: Vec<Vec<String>>,
    ) -> Self {
        // Tied routes all share the same hop count.
        let jumps = routes.first().map(|route| route.len() - 1).unwrap_or(0);
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            levels,
            jumps,
            routes,
        }
    }
}

#[derive(Debug, Serialize)]
struct SystemSummary<'a> {
    name: &'a str,
    links: usize,
    uncharted: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkSummary<'a> {
    destination: &'a str,
    level: JumpLevel,
    discovered: Option<i32>,
    distance: f64,
}

pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            let levels = summary
                .levels
                .iter()
                .map(JumpLevel::label)
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "Routes from {} to {} ({} jumps; levels: {}):",
                summary.origin, summary.destination, summary.jumps, levels
            );
            for (index, route) in summary.routes.iter().enumerate() {
                println!(" {}. {}", index + 1, route.join(" -> "));
            }
            Ok(())
        }
        OutputFormat::Json => render_json(summary),
    }
}

pub fn render_systems(catalog: &Catalog, format: OutputFormat) -> anyhow::Result<()> {
    let mut systems: Vec<&StarSystem> = catalog.systems().iter().collect();
    systems.sort_by(|a, b| a.name.cmp(&b.name));

    match format {
        OutputFormat::Text => {
            println!("{} systems in the catalog:", systems.len());
            for system in systems {
                let uncharted = system.jump_links.len() - system.discovered_links().count();
                if uncharted > 0 {
                    println!(
                        " - {} ({} links, {} uncharted)",
                        system.name,
                        system.jump_links.len(),
                        uncharted
                    );
                } else {
                    println!(" - {} ({} links)", system.name, system.jump_links.len());
                }
            }
            Ok(())
        }
        OutputFormat::Json => {
            let payload: Vec<SystemSummary<'_>> = systems
                .iter()
                .map(|system| SystemSummary {
                    name: &system.name,
                    links: system.jump_links.len(),
                    uncharted: system.jump_links.len() - system.discovered_links().count(),
                })
                .collect();
            render_json(&payload)
        }
    }
}

pub fn render_links(
    system: &StarSystem,
    include_uncharted: bool,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let links: Vec<&JumpLink> = system
        .jump_links
        .iter()
        .filter(|link| include_uncharted || link.discovered.is_some())
        .collect();

    match format {
        OutputFormat::Text => {
            println!("Jump links from {}:", system.name);
            for link in links {
                match link.discovered {
                    Some(year) => println!(
                        " - {} ({}, {:.1} ly, charted {})",
                        link.destination, link.level, link.distance, year
                    ),
                    None => println!(
                        " - {} ({}, {:.1} ly, uncharted)",
                        link.destination, link.level, link.distance
                    ),
                }
            }
            Ok(())
        }
        OutputFormat::Json => {
            let payload: Vec<LinkSummary<'_>> = links
                .iter()
                .map(|link| LinkSummary {
                    destination: &link.destination,
                    level: link.level,
                    discovered: link.discovered,
                    distance: link.distance,
                })
                .collect();
            render_json(&payload)
        }
    }
}

fn render_json<T: Serialize>(payload: &T) -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, payload)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
