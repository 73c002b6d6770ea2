//! Error types for geometry validation and route planning.

use thiserror::Error;

/// Structural problems with input geometry.
///
/// These are only produced by the validators (`LngLat::validate`,
/// `NamedRegion::validate`, `ExclusionZones::validated`). The planner itself
/// assumes well-formed polygons.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("position ({lng}, {lat}) is outside the valid longitude/latitude range")]
    PositionOutOfRange { lng: f64, lat: f64 },

    #[error("region '{name}' has no vertices")]
    EmptyRegion { name: String },

    #[error("region '{name}' is not closed (first vertex must equal last)")]
    RegionNotClosed { name: String },

    #[error("region '{name}' has {count} distinct vertices, at least 3 are required")]
    TooFewVertices { name: String, count: usize },

    #[error("region '{name}' has collinear vertices starting at index {index}")]
    CollinearVertices { name: String, index: usize },
}

/// Failures surfaced by the planner and orchestrator.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouteError {
    /// The frontier was exhausted before any node came within the stage's
    /// goal-proximity threshold.
    #[error("no route found during {stage} stage after expanding {nodes_visited} nodes")]
    NoRouteFound { stage: String, nodes_visited: usize },

    #[error("search budget of {budget} expansions exceeded during {stage} stage")]
    SearchBudgetExceeded { stage: String, budget: usize },

    #[error("invalid planner configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),
}

pub type Result<T> = std::result::Result<T, RouteError>;
