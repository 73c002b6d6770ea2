//! A* search over the 16-heading move lattice.
//!
//! Positions are continuous; identity for the closed set and cost map comes
//! from a quantized grid key sized to the active step length.

use crate::error::{Result, RouteError};
use crate::models::LngLat;
use crate::spatial::distance;
use crate::zones::ExclusionZones;
use serde::{Deserialize, Serialize};
use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

pub const HEADING_COUNT: usize = 16;
pub const HEADING_INCREMENT_DEG: f64 = 22.5;

/// Grid keys resolve positions to `step / KEY_SUBDIVISIONS`.
const KEY_SUBDIVISIONS: f64 = 1000.0;

/// How the central area's one-way rule is treated during search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralPolicy {
    /// Moves leaving the central area are not blocked.
    #[default]
    Ignore,
    /// Moves that would leave the central area, or clip through it without
    /// stopping inside, are skipped.
    Enforce,
}

/// Parameters for a single search stage.
#[derive(Debug, Clone, Copy)]
pub struct SearchParams<'a> {
    pub stage: &'a str,
    pub step: f64,
    pub threshold: f64,
    pub max_expansions: Option<usize>,
    pub central_policy: CentralPolicy,
}

/// Outcome of a successful search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSearch {
    /// Start to goal-proximity waypoint, inclusive.
    pub path: Vec<LngLat>,
    pub nodes_visited: usize,
}

/// Move vectors for the 16 compass headings at one step length.
#[derive(Debug, Clone)]
pub struct HeadingTable {
    step: f64,
    moves: [(f64, f64); HEADING_COUNT],
}

impl HeadingTable {
    pub fn new(step: f64) -> Self {
        let mut moves = [(0.0, 0.0); HEADING_COUNT];
        for (i, entry) in moves.iter_mut().enumerate() {
            let angle = (i as f64 * HEADING_INCREMENT_DEG).to_radians();
            *entry = (step * angle.cos(), step * angle.sin());
        }
        Self { step, moves }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// `(dlng, dlat)` per heading, counter-clockwise from east.
    ///
    /// This is the order neighbours are discovered in, which decides ties
    /// between equal f-scores.
    pub fn moves(&self) -> &[(f64, f64); HEADING_COUNT] {
        &self.moves
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridKey {
    lng: i64,
    lat: i64,
}

impl GridKey {
    fn new(position: LngLat, resolution: f64) -> Self {
        Self {
            lng: (position.lng / resolution).round() as i64,
            lat: (position.lat / resolution).round() as i64,
        }
    }
}

#[derive(Debug, Clone)]
struct SearchNode {
    position: LngLat,
    key: GridKey,
    g_score: f64,
    parent: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier entry. Equal f scores pop in discovery order (arena index).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f_score: FloatOrd,
    index: usize,
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score
            .cmp(&other.f_score)
            .then_with(|| self.index.cmp(&other.index))
    }
}

fn check_params(params: &SearchParams<'_>) -> Result<()> {
    if !params.step.is_finite() || params.step <= 0.0 {
        return Err(RouteError::InvalidConfig(format!(
            "{} stage step must be positive and finite, got {}",
            params.stage, params.step
        )));
    }
    if !params.threshold.is_finite() || params.threshold < 0.0 {
        return Err(RouteError::InvalidConfig(format!(
            "{} stage threshold must be non-negative and finite, got {}",
            params.stage, params.threshold
        )));
    }
    Ok(())
}

/// Search from `start` until a position within `params.threshold` of `goal`.
///
/// Every candidate move is one step along one of the 16 headings; moves whose
/// segment touches a no-fly polygon are discarded. Exhausting the frontier is
/// reported as [`RouteError::NoRouteFound`].
pub fn find_path(
    start: LngLat,
    goal: LngLat,
    zones: &ExclusionZones,
    params: &SearchParams<'_>,
) -> Result<PathSearch> {
    check_params(params)?;

    let headings = HeadingTable::new(params.step);
    let step = headings.step();
    let resolution = step / KEY_SUBDIVISIONS;

    let start_key = GridKey::new(start, resolution);
    let mut arena = vec![SearchNode {
        position: start,
        key: start_key,
        g_score: 0.0,
        parent: None,
    }];
    let mut open_set: BinaryHeap<Reverse<OpenNode>> = BinaryHeap::new();
    open_set.push(Reverse(OpenNode {
        f_score: FloatOrd(distance(start, goal)),
        index: 0,
    }));
    let mut closed_set: HashSet<GridKey> = HashSet::new();
    let mut g_score: HashMap<GridKey, f64> = HashMap::new();
    g_score.insert(start_key, 0.0);

    let mut nodes_visited = 0usize;

    while let Some(Reverse(entry)) = open_set.pop() {
        let current_index = entry.index;
        let (current, current_key, current_g) = {
            let node = &arena[current_index];
            (node.position, node.key, node.g_score)
        };

        if closed_set.contains(&current_key) {
            continue;
        }
        let best_g = g_score.get(&current_key).copied().unwrap_or(f64::INFINITY);
        if current_g > best_g {
            continue;
        }

        nodes_visited += 1;

        if distance(current, goal) <= params.threshold {
            let path = reconstruct_path(&arena, current_index);
            tracing::debug!(
                stage = params.stage,
                step,
                nodes_visited,
                waypoints = path.len(),
                "search reached goal proximity"
            );
            return Ok(PathSearch {
                path,
                nodes_visited,
            });
        }

        if let Some(budget) = params.max_expansions {
            if nodes_visited >= budget {
                tracing::warn!(
                    stage = params.stage,
                    budget,
                    "search budget exhausted before reaching goal"
                );
                return Err(RouteError::SearchBudgetExceeded {
                    stage: params.stage.to_string(),
                    budget,
                });
            }
        }

        closed_set.insert(current_key);

        for &(dlng, dlat) in headings.moves() {
            let neighbour = LngLat::new(current.lng + dlng, current.lat + dlat);
            let neighbour_key = GridKey::new(neighbour, resolution);
            if closed_set.contains(&neighbour_key) {
                continue;
            }
            if zones.is_obstructed(current, neighbour, step) {
                continue;
            }
            if params.central_policy == CentralPolicy::Enforce
                && (zones.would_exit_central(current, neighbour, step)
                    || zones.would_cut_through_central(current, neighbour, step))
            {
                continue;
            }

            let tentative_g = current_g + step;
            let improves = g_score
                .get(&neighbour_key)
                .map_or(true, |&known| tentative_g < known);
            if !improves {
                continue;
            }

            g_score.insert(neighbour_key, tentative_g);
            let index = arena.len();
            arena.push(SearchNode {
                position: neighbour,
                key: neighbour_key,
                g_score: tentative_g,
                parent: Some(current_index),
            });
            open_set.push(Reverse(OpenNode {
                f_score: FloatOrd(tentative_g + distance(neighbour, goal)),
                index,
            }));
        }
    }

    tracing::debug!(stage = params.stage, nodes_visited, "search frontier exhausted");
    Err(RouteError::NoRouteFound {
        stage: params.stage.to_string(),
        nodes_visited,
    })
}

fn reconstruct_path(arena: &[SearchNode], goal_index: usize) -> Vec<LngLat> {
    let mut path = Vec::new();
    let mut cursor = Some(goal_index);
    while let Some(index) = cursor {
        let node = &arena[index];
        path.push(node.position);
        cursor = node.parent;
    }
    path.reverse();
    path
}
