//! Multi-resolution delivery route planning.
//!
//! A route is planned in stages of decreasing step length. Each stage starts
//! where the previous one stopped, so the expensive fine search only covers
//! the last stretch before the destination. The raw stage waypoints are then
//! stitched into fixed-length moves.

use crate::error::{Result, RouteError};
use crate::models::{LngLat, MOVE_DISTANCE};
use crate::route_engine::{find_path, CentralPolicy, SearchParams};
use crate::stitch::stitch_path;
use crate::zones::ExclusionZones;
use serde::{Deserialize, Serialize};

/// Default destination for every delivery.
pub const DELIVERY_HUB: LngLat = LngLat::new(-3.186874, 55.944494);

pub const DEFAULT_MAX_EXPANSIONS: usize = 500_000;

/// Tolerance when checking that a stage step is a whole number of moves.
const STEP_MULTIPLE_TOLERANCE: f64 = 1e-6;

/// One search stage: step length and goal-proximity threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    pub step: f64,
    pub threshold: f64,
}

impl StageConfig {
    pub fn new(name: impl Into<String>, step: f64, threshold: f64) -> Self {
        Self {
            name: name.into(),
            step,
            threshold,
        }
    }
}

/// Coarse, medium and fine stages.
pub fn default_stages() -> Vec<StageConfig> {
    vec![
        StageConfig::new("coarse", 0.0039, 0.02055),
        StageConfig::new("medium", 0.0009, 0.0021),
        StageConfig::new("fine", 0.00015, 0.00015),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub stages: Vec<StageConfig>,
    /// Length of each move in the stitched output.
    pub move_distance: f64,
    /// Per-stage expansion budget. `None` searches until the frontier empties.
    pub max_expansions: Option<usize>,
    pub central_policy: CentralPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            stages: default_stages(),
            move_distance: MOVE_DISTANCE,
            max_expansions: Some(DEFAULT_MAX_EXPANSIONS),
            central_policy: CentralPolicy::Ignore,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(RouteError::InvalidConfig(
                "at least one search stage is required".to_string(),
            ));
        }
        if !self.move_distance.is_finite() || self.move_distance <= 0.0 {
            return Err(RouteError::InvalidConfig(format!(
                "move distance must be positive and finite, got {}",
                self.move_distance
            )));
        }
        if self.max_expansions == Some(0) {
            return Err(RouteError::InvalidConfig(
                "expansion budget must be at least 1".to_string(),
            ));
        }

        for stage in &self.stages {
            if !stage.step.is_finite() || stage.step <= 0.0 {
                return Err(RouteError::InvalidConfig(format!(
                    "{} stage step must be positive and finite, got {}",
                    stage.name, stage.step
                )));
            }
            if !stage.threshold.is_finite() || stage.threshold < 0.0 {
                return Err(RouteError::InvalidConfig(format!(
                    "{} stage threshold must be non-negative and finite, got {}",
                    stage.name, stage.threshold
                )));
            }

            let ratio = stage.step / self.move_distance;
            if (ratio - ratio.round()).abs() > STEP_MULTIPLE_TOLERANCE {
                tracing::warn!(
                    stage = %stage.name,
                    step = stage.step,
                    move_distance = self.move_distance,
                    "stage step is not a whole number of moves; stitched moves will not be uniform"
                );
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageStats {
    pub stage: String,
    pub step: f64,
    /// Raw waypoints returned by this stage, including its start.
    pub waypoints: usize,
    pub nodes_visited: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRoute {
    pub path: Vec<LngLat>,
    pub stages: Vec<StageStats>,
    pub nodes_visited: usize,
}

impl DeliveryRoute {
    pub fn final_position(&self) -> Option<LngLat> {
        self.path.last().copied()
    }
}

/// Plan a route from `start` to `destination` avoiding every no-fly zone.
///
/// Any stage failing aborts the whole plan with that stage's error.
pub fn plan_delivery_route(
    start: LngLat,
    destination: LngLat,
    zones: &ExclusionZones,
    config: &PlannerConfig,
) -> Result<DeliveryRoute> {
    config.validate()?;
    start.validate()?;
    destination.validate()?;

    let mut raw_path = Vec::new();
    let mut stages = Vec::with_capacity(config.stages.len());
    let mut nodes_visited = 0usize;
    let mut cursor = start;

    for stage in &config.stages {
        tracing::debug!(
            stage = %stage.name,
            step = stage.step,
            threshold = stage.threshold,
            from_lng = cursor.lng,
            from_lat = cursor.lat,
            "starting search stage"
        );

        let params = SearchParams {
            stage: &stage.name,
            step: stage.step,
            threshold: stage.threshold,
            max_expansions: config.max_expansions,
            central_policy: config.central_policy,
        };
        let search = find_path(cursor, destination, zones, &params)?;

        if let Some(&last) = search.path.last() {
            cursor = last;
        }
        nodes_visited += search.nodes_visited;
        stages.push(StageStats {
            stage: stage.name.clone(),
            step: stage.step,
            waypoints: search.path.len(),
            nodes_visited: search.nodes_visited,
        });
        raw_path.extend(search.path);
    }

    let path = stitch_path(&raw_path, config.move_distance);
    tracing::debug!(
        raw_waypoints = raw_path.len(),
        moves = path.len().saturating_sub(1),
        nodes_visited,
        "delivery route planned"
    );

    Ok(DeliveryRoute {
        path,
        stages,
        nodes_visited,
    })
}
