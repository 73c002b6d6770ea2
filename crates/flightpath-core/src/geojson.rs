//! GeoJSON value types for rendering routes and zones.

use crate::models::{LngLat, NamedRegion};
use crate::zones::ExclusionZones;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `[lng, lat]` coordinate pair.
pub type Position = [f64; 2];

fn position(point: LngLat) -> Position {
    [point.lng, point.lat]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
}

impl Geometry {
    pub fn point(point: LngLat) -> Self {
        Self::Point {
            coordinates: position(point),
        }
    }

    pub fn line_string(path: &[LngLat]) -> Self {
        Self::LineString {
            coordinates: path.iter().copied().map(position).collect(),
        }
    }

    /// Single-ring polygon from a region's vertices.
    pub fn polygon(region: &NamedRegion) -> Self {
        Self::Polygon {
            coordinates: vec![region.vertices().iter().copied().map(position).collect()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Collection holding the route as a single `LineString`.
    pub fn from_route(path: &[LngLat]) -> Self {
        let route = Feature::new(Geometry::line_string(path))
            .with_property("name", "route")
            .with_property("moves", path.len().saturating_sub(1));
        Self {
            features: vec![route],
        }
    }

    /// Append every no-fly polygon and the central area.
    pub fn with_regions(mut self, zones: &ExclusionZones) -> Self {
        for region in zones.no_fly_zones() {
            self.features.push(
                Feature::new(Geometry::polygon(region))
                    .with_property("name", region.name())
                    .with_property("kind", "no_fly"),
            );
        }
        let central = zones.central();
        self.features.push(
            Feature::new(Geometry::polygon(central))
                .with_property("name", central.name())
                .with_property("kind", "central"),
        );
        self
    }

    /// Append labelled points such as the start and destination.
    pub fn with_points<'a, I>(mut self, points: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, LngLat)>,
    {
        self.features.extend(points.into_iter().map(|(name, point)| {
            Feature::new(Geometry::point(point)).with_property("name", name)
        }));
        self
    }
}
