//! Scenario files: start, optional destination and the zone snapshot.

use anyhow::{Context, Result};
use flightpath_core::{
    DeliveryRoute, ExclusionZones, FeatureCollection, LngLat, NamedRegion, DELIVERY_HUB,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub start: LngLat,
    #[serde(default)]
    pub destination: Option<LngLat>,
    #[serde(default)]
    pub no_fly_zones: Vec<NamedRegion>,
    pub central: NamedRegion,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse scenario JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    pub fn destination(&self) -> LngLat {
        self.destination.unwrap_or(DELIVERY_HUB)
    }

    /// Validated zone snapshot for planning.
    pub fn zones(&self) -> Result<ExclusionZones> {
        ExclusionZones::validated(self.no_fly_zones.clone(), self.central.clone())
            .context("Scenario contains invalid zone geometry")
    }
}

/// Render a planned route as pretty JSON.
///
/// Plain output is the coordinate array; GeoJSON output adds the zones and
/// labelled start/destination points.
pub fn render_route(
    route: &DeliveryRoute,
    scenario: &Scenario,
    zones: &ExclusionZones,
    geojson: bool,
) -> Result<String> {
    let rendered = if geojson {
        let collection = FeatureCollection::from_route(&route.path)
            .with_regions(zones)
            .with_points([
                ("start", scenario.start),
                ("destination", scenario.destination()),
            ]);
        serde_json::to_string_pretty(&collection)
    } else {
        serde_json::to_string_pretty(&route.path)
    };
    rendered.context("Failed to serialize route")
}
