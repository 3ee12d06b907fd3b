//! All-shortest-paths search over the jump-link graph.
//!
//! This module implements a Dijkstra-style search specialized for the star
//! catalog:
//!
//! - every hop costs 1, so "distance" is hop count;
//! - links are usable only when discovered and when their jump level is in
//!   the caller's allow-list;
//! - ties are kept, not broken: the predecessor map records every system
//!   that reaches a node at its best hop count, and reconstruction fans out
//!   each branch, so the result is the full set of equal-length routes.
//!
//! "No path" is an expected outcome and is reported as `None`, never as an
//! error. All search state lives on the stack of a single call, so a shared
//! [`Catalog`] can serve concurrent queries.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use tracing::warn;

use crate::catalog::{Catalog, JumpLevel, StarSystem};

/// Hard ceiling on closest-system selections per search.
pub const MAX_SEARCH_ITERATIONS: usize = 500;

/// Hop count assigned to systems the search has not reached.
const UNREACHED: usize = usize::MAX;

/// Budget limits applied to a single search.
#[derive(Debug, Clone)]
pub struct SearchLimits {
    /// Maximum closest-system selections before the search is abandoned.
    pub max_iterations: usize,
    /// Optional wall-clock cutoff, treated exactly like iteration exhaustion.
    pub deadline: Option<Instant>,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_iterations: MAX_SEARCH_ITERATIONS,
            deadline: None,
        }
    }
}

impl SearchLimits {
    fn deadline_passed(&self) -> bool {
        self.deadline
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false)
    }
}

/// Find every tied-shortest route from `origin` to `destination` using all
/// five jump levels.
///
/// Names are resolved against the catalog listing; a name the catalog does
/// not contain yields `None`, the same as an unreachable destination.
pub fn find_paths(
    catalog: &Catalog,
    origin: &str,
    destination: &str,
) -> Option<Vec<Vec<String>>> {
    find_paths_filtered(catalog, origin, destination, &JumpLevel::ALL)
}

/// Find every tied-shortest route using only the allowed jump levels.
pub fn find_paths_filtered(
    catalog: &Catalog,
    origin: &str,
    destination: &str,
    allowed: &[JumpLevel],
) -> Option<Vec<Vec<String>>> {
    find_paths_with(catalog, origin, destination, allowed, &SearchLimits::default())
}

/// Find every tied-shortest route under explicit search limits.
///
/// Each returned route runs from origin to destination inclusive; all routes
/// share the minimum hop count and appear in predecessor discovery order.
/// Returns `None` when either name is missing from the catalog, when no
/// route exists, or when the search exhausts its iteration or deadline
/// budget.
pub fn find_paths_with(
    catalog: &Catalog,
    origin: &str,
    destination: &str,
    allowed: &[JumpLevel],
    limits: &SearchLimits,
) -> Option<Vec<Vec<String>>> {
    let origin = catalog.system_by_name(origin)?;
    let destination = catalog.system_by_name(destination)?;

    let mut state = SearchState::new(catalog, &origin.name);
    let mut iterations = 0usize;

    while !state.frontier.is_empty() {
        iterations += 1;

        let Some(current_name) = state.closest_system() else {
            break;
        };
        let Some(current) = catalog.system_by_name(current_name) else {
            break;
        };

        state.relax_links(current, allowed);

        if current.name == destination.name {
            return build_paths(&origin.name, &destination.name, &state.previous);
        }

        // Failsafe against graphs larger than the budget allows.
        if iterations > limits.max_iterations || limits.deadline_passed() {
            warn!(
                "abandoning search from {} to {} after {} iterations",
                origin.name, destination.name, iterations
            );
            state.frontier.clear();
        }
    }

    None
}

/// Mutable state for one search, freshly built per call.
struct SearchState<'a> {
    /// Names in catalog listing order; drives deterministic selection.
    order: Vec<&'a str>,
    distance: HashMap<&'a str, usize>,
    previous: HashMap<&'a str, Vec<&'a str>>,
    frontier: HashSet<&'a str>,
}

impl<'a> SearchState<'a> {
    fn new(catalog: &'a Catalog, origin: &str) -> Self {
        let systems = catalog.systems();
        let mut order = Vec::with_capacity(systems.len());
        let mut distance = HashMap::with_capacity(systems.len());
        let mut previous = HashMap::with_capacity(systems.len());
        let mut frontier = HashSet::with_capacity(systems.len());

        for system in systems {
            let name = system.name.as_str();
            order.push(name);
            distance.insert(name, if name == origin { 0 } else { UNREACHED });
            previous.insert(name, Vec::new());
            frontier.insert(name);
        }

        Self {
            order,
            distance,
            previous,
            frontier,
        }
    }

    /// First frontier member with the minimum recorded hop count, scanning in
    /// listing order. Strict less-than keeps the earliest of tied systems.
    fn closest_system(&self) -> Option<&'a str> {
        let mut best: Option<(&'a str, usize)> = None;
        for &name in &self.order {
            if !self.frontier.contains(name) {
                continue;
            }
            let hops = self.distance.get(name).copied().unwrap_or(UNREACHED);
            match best {
                Some((_, best_hops)) if hops >= best_hops => {}
                _ => best = Some((name, hops)),
            }
        }
        best.map(|(name, _)| name)
    }

    /// Finalize `current` and relax its usable links.
    ///
    /// A system selected while still unreached relaxes nothing; it can
    /// neither improve nor validly tie a route, and skipping it keeps the
    /// predecessor map empty for everything the origin cannot reach.
    fn relax_links(&mut self, current: &'a StarSystem, allowed: &[JumpLevel]) {
        let current_name = current.name.as_str();
        self.frontier.remove(current_name);

        let current_hops = self.distance.get(current_name).copied().unwrap_or(UNREACHED);
        if current_hops == UNREACHED {
            return;
        }

        let candidate = current_hops + 1;
        for link in current.discovered_links() {
            let destination = link.destination.as_str();
            if !self.frontier.contains(destination) {
                continue;
            }
            if !allowed.contains(&link.level) {
                continue;
            }

            let known = self.distance.get(destination).copied().unwrap_or(UNREACHED);
            if candidate < known {
                self.distance.insert(destination, candidate);
                self.previous.insert(destination, vec![current_name]);
            } else if candidate == known {
                if let Some(predecessors) = self.previous.get_mut(destination) {
                    predecessors.push(current_name);
                }
            }
        }
    }
}

/// Assemble the result set once the destination has been finalized.
///
/// A destination equal to the origin is the one-system route. A destination
/// with no recorded predecessors was never reached.
fn build_paths(
    origin: &str,
    destination: &str,
    previous: &HashMap<&str, Vec<&str>>,
) -> Option<Vec<Vec<String>>> {
    if origin == destination {
        return Some(vec![vec![origin.to_string()]]);
    }

    let reached = previous
        .get(destination)
        .map(|predecessors| !predecessors.is_empty())
        .unwrap_or(false);
    if !reached {
        return None;
    }

    Some(traverse(destination, previous))
}

/// Walk the predecessor map backwards from the destination, fanning out on
/// every tied branch. Depth-first with an explicit worklist; predecessors are
/// pushed in reverse so branches complete in discovery order.
fn traverse(destination: &str, previous: &HashMap<&str, Vec<&str>>) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    let mut pending: Vec<(&str, Vec<&str>)> = vec![(destination, Vec::new())];

    while let Some((current, tail)) = pending.pop() {
        let mut path = Vec::with_capacity(tail.len() + 1);
        path.push(current);
        path.extend(tail);

        match previous.get(current) {
            Some(predecessors) if !predecessors.is_empty() => {
                for &predecessor in predecessors.iter().rev() {
                    pending.push((predecessor, path.clone()));
                }
            }
            _ => paths.push(path.iter().map(|name| name.to_string()).collect()),
        }
    }

    paths
}
