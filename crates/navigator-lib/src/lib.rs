//! Star-system navigation library.
//!
//! This crate loads the star-system catalog and computes jump routes between
//! systems. The pathfinder keeps every tied-shortest route instead of picking
//! one, so consumers (CLI, map frontends) can present all alternatives.
//! Higher-level consumers should depend on the functions exported here
//! instead of reimplementing behavior.

#![deny(warnings)]

pub mod catalog;
pub mod error;
pub mod pathfinder;

pub use catalog::{
    load_catalog, Catalog, Coordinates, JumpLevel, JumpLink, StarSystem, CATALOG_ENV_VAR,
};
pub use error::{Error, Result};
pub use pathfinder::{
    find_paths, find_paths_filtered, find_paths_with, SearchLimits, MAX_SEARCH_ITERATIONS,
};
