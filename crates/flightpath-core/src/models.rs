//! Core data models: positions and named polygon regions.

use crate::error::GeometryError;
use crate::spatial::{distance, orientation, point_in_polygon, BoundingBox, Orientation};
use serde::{Deserialize, Serialize};

/// Distance covered by a single drone move in the final route output.
pub const MOVE_DISTANCE: f64 = 0.00015;

/// Two positions closer than this are considered the same place.
pub const CLOSE_DISTANCE: f64 = 0.00015;

/// A point given by longitude and latitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Check the position lies strictly inside the longitude/latitude domain.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let valid = self.lng.is_finite()
            && self.lat.is_finite()
            && self.lng > -180.0
            && self.lng < 180.0
            && self.lat > -90.0
            && self.lat < 90.0;
        if valid {
            Ok(())
        } else {
            Err(GeometryError::PositionOutOfRange {
                lng: self.lng,
                lat: self.lat,
            })
        }
    }

    /// Move `distance` along a compass bearing (degrees, 0 = north, clockwise).
    pub fn next_position(&self, bearing_deg: f64, distance: f64) -> Self {
        let bearing = bearing_deg.to_radians();
        Self {
            lng: self.lng + distance * bearing.sin(),
            lat: self.lat + distance * bearing.cos(),
        }
    }

    pub fn distance_to(&self, other: &LngLat) -> f64 {
        distance(*self, *other)
    }

    pub fn is_close_to(&self, other: &LngLat) -> bool {
        self.distance_to(other) < CLOSE_DISTANCE
    }
}

/// Serialized form of a region: just its name and ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RegionDefinition {
    name: String,
    vertices: Vec<LngLat>,
}

/// A named polygon (no-fly zone or the central area).
///
/// The ring is expected closed (first vertex == last). Bounds are computed
/// once on construction; the region cannot be mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RegionDefinition", into = "RegionDefinition")]
pub struct NamedRegion {
    name: String,
    vertices: Vec<LngLat>,
    bbox: Option<BoundingBox>,
}

impl From<RegionDefinition> for NamedRegion {
    fn from(definition: RegionDefinition) -> Self {
        Self::new(definition.name, definition.vertices)
    }
}

impl From<NamedRegion> for RegionDefinition {
    fn from(region: NamedRegion) -> Self {
        Self {
            name: region.name,
            vertices: region.vertices,
        }
    }
}

impl NamedRegion {
    pub fn new(name: impl Into<String>, vertices: Vec<LngLat>) -> Self {
        let bbox = BoundingBox::from_points(&vertices);
        Self {
            name: name.into(),
            vertices,
            bbox,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[LngLat] {
        &self.vertices
    }

    /// Cached bounds, `None` only for a region without vertices.
    pub fn bbox(&self) -> Option<&BoundingBox> {
        self.bbox.as_ref()
    }

    /// Iterate the ring's edges, wrapping from the last vertex to the first.
    pub fn edges(&self) -> impl Iterator<Item = (LngLat, LngLat)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Containment test with a bounding-box pre-filter. Boundary points are inside.
    pub fn contains(&self, point: LngLat) -> bool {
        match &self.bbox {
            Some(bbox) if !bbox.rejects_point(point, 0.0) => {
                point_in_polygon(point, &self.vertices)
            }
            _ => false,
        }
    }

    /// Check the region is a usable polygon.
    ///
    /// Rejects rings that are open, have fewer than three distinct vertices,
    /// contain three consecutive collinear vertices, or leave the
    /// longitude/latitude domain.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let (Some(first), Some(last)) = (self.vertices.first(), self.vertices.last()) else {
            return Err(GeometryError::EmptyRegion {
                name: self.name.clone(),
            });
        };

        for vertex in &self.vertices {
            vertex.validate()?;
        }

        if first != last {
            return Err(GeometryError::RegionNotClosed {
                name: self.name.clone(),
            });
        }

        // The closing vertex repeats the first one.
        let distinct = self.vertices.len() - 1;
        if distinct < 3 {
            return Err(GeometryError::TooFewVertices {
                name: self.name.clone(),
                count: distinct,
            });
        }

        for (index, triple) in self.vertices.windows(3).enumerate() {
            if orientation(triple[0], triple[1], triple[2]) == Orientation::Collinear {
                return Err(GeometryError::CollinearVertices {
                    name: self.name.clone(),
                    index,
                });
            }
        }

        Ok(())
    }
}
