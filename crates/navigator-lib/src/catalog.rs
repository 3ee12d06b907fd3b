//! Star-system catalog loading and lookup.
//!
//! The catalog is a single JSON document listing every known system with its
//! coordinates and jump links. It is loaded once and never mutated; the
//! pathfinder consumes the listing on every query.

use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variable that overrides the catalog source path.
pub const CATALOG_ENV_VAR: &str = "NAVIGATOR_CATALOG";

/// Discrete jump-link tiers, ordered from shortest to longest reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum JumpLevel {
    Alpha,
    Beta,
    Gamma,
    Delta,
    Epsilon,
}

impl JumpLevel {
    /// Every tier in ascending reach order; the default pathfinding allow-list.
    pub const ALL: [JumpLevel; 5] = [
        JumpLevel::Alpha,
        JumpLevel::Beta,
        JumpLevel::Gamma,
        JumpLevel::Delta,
        JumpLevel::Epsilon,
    ];

    /// Canonical label used in the catalog document.
    pub fn label(&self) -> &'static str {
        match self {
            JumpLevel::Alpha => "Alpha",
            JumpLevel::Beta => "Beta",
            JumpLevel::Gamma => "Gamma",
            JumpLevel::Delta => "Delta",
            JumpLevel::Epsilon => "Epsilon",
        }
    }

    /// Classify a link from the Euclidean distance between its endpoints.
    ///
    /// Distances are rounded to one decimal before banding; a distance that
    /// falls between bands has no tier. These bands match the offline catalog
    /// tooling that assigns levels to newly charted links.
    pub fn classify(distance: f64) -> Option<JumpLevel> {
        let tenths = (distance * 10.0).round() as i64;
        match tenths {
            6 => Some(JumpLevel::Alpha),
            9..=10 => Some(JumpLevel::Beta),
            15..=17 => Some(JumpLevel::Gamma),
            24..=27 => Some(JumpLevel::Delta),
            39..=44 => Some(JumpLevel::Epsilon),
            _ => None,
        }
    }
}

impl fmt::Display for JumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JumpLevel {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "alpha" => Ok(JumpLevel::Alpha),
            "beta" => Ok(JumpLevel::Beta),
            "gamma" => Ok(JumpLevel::Gamma),
            "delta" => Ok(JumpLevel::Delta),
            "epsilon" => Ok(JumpLevel::Epsilon),
            _ => Err(Error::UnknownJumpLevel {
                value: value.to_string(),
            }),
        }
    }
}

/// Cartesian coordinates for a star system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinates {
    /// Calculate the Euclidean distance to another position.
    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// A directed jump link to another system.
///
/// `discovered` records the charting year; links without one appear in the
/// catalog but are not traversable. `distance` is the coordinate distance
/// recorded when the link was classified, kept for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JumpLink {
    pub destination: String,
    #[serde(rename = "jumpLevel")]
    pub level: JumpLevel,
    pub discovered: Option<i32>,
    pub distance: f64,
}

/// A star system entry in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarSystem {
    pub name: String,
    #[serde(default)]
    pub transit_times: Vec<u32>,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub jump_links: Vec<JumpLink>,
}

impl StarSystem {
    /// Links that have been charted and are usable for pathfinding.
    pub fn discovered_links(&self) -> impl Iterator<Item = &JumpLink> {
        self.jump_links
            .iter()
            .filter(|link| link.discovered.is_some())
    }
}

/// Immutable, ordered collection of star systems.
///
/// Systems keep their document order and lookups go through a name index.
/// The listing order is what makes repeated searches deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    systems: Vec<StarSystem>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from systems, preserving their order.
    ///
    /// Duplicate names are rejected. Links that point outside the catalog or
    /// that lack a matching reciprocal are kept but logged, mirroring the
    /// audit the offline tooling performs.
    pub fn from_systems(systems: Vec<StarSystem>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(systems.len());
        for (index, system) in systems.iter().enumerate() {
            if by_name.insert(system.name.clone(), index).is_some() {
                return Err(Error::DuplicateSystem {
                    name: system.name.clone(),
                });
            }
        }

        let catalog = Self { systems, by_name };
        catalog.audit_links();
        Ok(catalog)
    }

    /// Parse a catalog from its JSON document form.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let systems: Vec<StarSystem> = serde_json::from_str(raw)?;
        Self::from_systems(systems)
    }

    /// Load a catalog from a JSON file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::CatalogNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&raw)?;
        debug!(
            "loaded {} systems from {}",
            catalog.systems.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// The catalog compiled into the library.
    pub fn bundled() -> &'static Catalog {
        static BUNDLED: Lazy<Catalog> = Lazy::new(|| {
            Catalog::from_json_str(include_str!("../data/star_systems.json"))
                .expect("bundled catalog parses")
        });
        &BUNDLED
    }

    /// All systems in document order.
    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    /// Number of systems in the catalog.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// `true` when the catalog holds no systems.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Lookup a system by its case-sensitive name.
    pub fn system_by_name(&self, name: &str) -> Option<&StarSystem> {
        self.by_name.get(name).map(|&index| &self.systems[index])
    }

    /// Lookup a system, failing with fuzzy suggestions for unknown names.
    pub fn resolve(&self, name: &str) -> Result<&StarSystem> {
        self.system_by_name(name).ok_or_else(|| Error::UnknownSystem {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, 3),
        })
    }

    /// Rank catalog names by similarity to `name`, best first.
    ///
    /// Case-insensitive Jaro-Winkler with a floor that drops unrelated names;
    /// at most `limit` results.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        const SIMILARITY_FLOOR: f64 = 0.7;

        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .systems
            .iter()
            .map(|system| {
                let score = strsim::jaro_winkler(&needle, &system.name.to_lowercase());
                (score, system.name.as_str())
            })
            .filter(|(score, _)| *score >= SIMILARITY_FLOOR)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    fn audit_links(&self) {
        for system in &self.systems {
            for link in &system.jump_links {
                let Some(target) = self.system_by_name(&link.destination) else {
                    warn!(
                        "link {} -> {} points outside the catalog",
                        system.name, link.destination
                    );
                    continue;
                };
                let reciprocal = target
                    .jump_links
                    .iter()
                    .find(|back| back.destination == system.name);
                match reciprocal {
                    None => warn!(
                        "link {} -> {} has no reciprocal",
                        system.name, link.destination
                    ),
                    Some(back) if back.level != link.level => warn!(
                        "jump level mismatch: {} -> {} is {}, reciprocal is {}",
                        system.name, link.destination, link.level, back.level
                    ),
                    Some(_) => {}
                }
            }
        }
    }
}

/// Resolve and load the catalog to search.
///
/// Resolution order: explicit `target` path, then the [`CATALOG_ENV_VAR`]
/// environment variable, then the bundled dataset.
pub fn load_catalog(target: Option<&Path>) -> Result<Catalog> {
    if let Some(path) = target {
        return Catalog::load(path);
    }
    if let Ok(value) = env::var(CATALOG_ENV_VAR) {
        if !value.is_empty() {
            return Catalog::load(Path::new(&value));
        }
    }
    Ok(Catalog::bundled().clone())
}
