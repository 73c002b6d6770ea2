//! Plan a delivery route for a scenario file.
//!
//! Usage:
//!   cargo run -p flightpath-cli --bin plan_route -- --scenario scenario.json --geojson

use anyhow::{Context, Result};
use clap::Parser;
use flightpath_cli::{config, render_route, Config, Scenario};
use flightpath_core::{plan_delivery_route, CentralPolicy};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Plan a drone delivery route around no-fly zones
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scenario JSON file (start, optional destination, zones)
    #[arg(long)]
    scenario: PathBuf,

    /// Print a GeoJSON FeatureCollection instead of the coordinate array
    #[arg(long)]
    geojson: bool,

    /// Never leave the central area once inside it
    #[arg(long)]
    enforce_central: bool,

    /// Per-stage expansion budget (0 = unlimited)
    #[arg(long)]
    max_expansions: Option<usize>,
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the route.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(config::log_filter()?)
        .init();

    let args = Args::parse();

    let mut planner = Config::from_env().planner_config();
    if args.enforce_central {
        planner.central_policy = CentralPolicy::Enforce;
    }
    if let Some(expansions) = args.max_expansions {
        planner.max_expansions = config::budget(expansions);
    }

    let scenario = Scenario::load(&args.scenario)?;
    let zones = scenario.zones()?;
    let destination = scenario.destination();

    tracing::info!(
        scenario = %args.scenario.display(),
        no_fly_zones = zones.no_fly_zones().len(),
        central_policy = ?planner.central_policy,
        "Planning route"
    );

    let route = plan_delivery_route(scenario.start, destination, &zones, &planner)
        .with_context(|| {
            format!(
                "Failed to plan route from ({}, {}) to ({}, {})",
                scenario.start.lng, scenario.start.lat, destination.lng, destination.lat
            )
        })?;

    for stage in &route.stages {
        tracing::info!(
            stage = %stage.stage,
            waypoints = stage.waypoints,
            nodes_visited = stage.nodes_visited,
            "Stage complete"
        );
    }
    tracing::info!(
        moves = route.path.len().saturating_sub(1),
        nodes_visited = route.nodes_visited,
        "Route planned"
    );

    println!("{}", render_route(&route, &scenario, &zones, args.geojson)?);
    Ok(())
}
