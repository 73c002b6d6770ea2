//! Exclusion zones: hard no-fly polygons plus the one-way central area.

use crate::error::GeometryError;
use crate::models::{LngLat, NamedRegion};
use crate::spatial::{point_in_polygon, segments_intersect};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the obstacle model used by one or more searches.
///
/// A loader builds this once; searches only ever borrow it, so a snapshot
/// can be shared between threads planning different requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionZones {
    no_fly_zones: Vec<NamedRegion>,
    central: NamedRegion,
}

impl ExclusionZones {
    /// Build a snapshot from already-validated regions.
    pub fn new(no_fly_zones: Vec<NamedRegion>, central: NamedRegion) -> Self {
        Self {
            no_fly_zones,
            central,
        }
    }

    /// Build a snapshot, validating every region first.
    pub fn validated(
        no_fly_zones: Vec<NamedRegion>,
        central: NamedRegion,
    ) -> Result<Self, GeometryError> {
        for region in no_fly_zones.iter().chain(std::iter::once(&central)) {
            region.validate()?;
        }
        Ok(Self::new(no_fly_zones, central))
    }

    pub fn no_fly_zones(&self) -> &[NamedRegion] {
        &self.no_fly_zones
    }

    pub fn central(&self) -> &NamedRegion {
        &self.central
    }

    /// Whether segment `from -> to` touches any no-fly polygon edge.
    ///
    /// Polygons whose bounds (grown by `margin`) cannot reach the segment are
    /// skipped without testing edges.
    pub fn is_obstructed(&self, from: LngLat, to: LngLat, margin: f64) -> bool {
        self.no_fly_zones.iter().any(|region| {
            let Some(bbox) = region.bbox() else {
                return false;
            };
            if bbox.rejects_segment(from, to, margin) {
                return false;
            }
            region
                .edges()
                .any(|(edge_start, edge_end)| segments_intersect(from, to, edge_start, edge_end))
        })
    }

    /// Whether moving `from -> to` would leave the central area.
    ///
    /// True only when `from` is inside the central polygon and `to` is not.
    pub fn would_exit_central(&self, from: LngLat, to: LngLat, margin: f64) -> bool {
        let Some(bbox) = self.central.bbox() else {
            return false;
        };
        if bbox.rejects_point(from, margin) {
            return false;
        }
        if !point_in_polygon(from, self.central.vertices()) {
            return false;
        }
        !point_in_polygon(to, self.central.vertices())
    }

    /// Whether `from -> to` crosses the central boundary without ending inside.
    ///
    /// True when neither endpoint is inside the central polygon but the
    /// segment touches one of its edges, such as a move clipping a corner.
    pub fn would_cut_through_central(&self, from: LngLat, to: LngLat, margin: f64) -> bool {
        let Some(bbox) = self.central.bbox() else {
            return false;
        };
        if bbox.rejects_segment(from, to, margin) {
            return false;
        }
        let vertices = self.central.vertices();
        if point_in_polygon(from, vertices) || point_in_polygon(to, vertices) {
            return false;
        }
        self.central
            .edges()
            .any(|(edge_start, edge_end)| segments_intersect(from, to, edge_start, edge_end))
    }

    pub fn is_in_central(&self, point: LngLat) -> bool {
        self.central.contains(point)
    }

    /// Whether `point` lies inside (or on the boundary of) any no-fly polygon.
    pub fn is_in_any_no_fly_zone(&self, point: LngLat) -> bool {
        self.no_fly_zones.iter().any(|region| region.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(name: &str, min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> NamedRegion {
        NamedRegion::new(
            name,
            vec![
                LngLat::new(min_lng, min_lat),
                LngLat::new(max_lng, min_lat),
                LngLat::new(max_lng, max_lat),
                LngLat::new(min_lng, max_lat),
                LngLat::new(min_lng, min_lat),
            ],
        )
    }

    fn zones() -> ExclusionZones {
        ExclusionZones::new(
            vec![rect("block", 1.0, 1.0, 2.0, 2.0)],
            rect("central", 0.0, 0.0, 4.0, 4.0),
        )
    }

    #[test]
    fn segment_through_no_fly_zone_is_obstructed() {
        let zones = zones();
        assert!(zones.is_obstructed(LngLat::new(0.5, 1.5), LngLat::new(2.5, 1.5), 0.1));
    }

    #[test]
    fn segment_touching_edge_is_obstructed() {
        let zones = zones();
        assert!(zones.is_obstructed(LngLat::new(0.5, 1.5), LngLat::new(1.0, 1.5), 0.1));
    }

    #[test]
    fn segment_clear_of_zone_is_not_obstructed() {
        let zones = zones();
        // Inside the box margin but clear of every edge.
        assert!(!zones.is_obstructed(LngLat::new(0.5, 1.5), LngLat::new(0.9, 1.5), 0.5));
        // Far away: rejected by the bounding box.
        assert!(!zones.is_obstructed(LngLat::new(3.0, 3.0), LngLat::new(3.5, 3.5), 0.1));
    }

    #[test]
    fn long_segment_spanning_zone_is_obstructed_even_with_far_endpoints() {
        let zones = zones();
        assert!(zones.is_obstructed(LngLat::new(-10.0, 1.5), LngLat::new(10.0, 1.5), 0.0));
    }

    #[test]
    fn exit_from_central_is_detected() {
        let zones = zones();
        assert!(zones.would_exit_central(LngLat::new(3.9, 3.0), LngLat::new(4.1, 3.0), 0.2));
        // Entering is fine.
        assert!(!zones.would_exit_central(LngLat::new(4.1, 3.0), LngLat::new(3.9, 3.0), 0.2));
        // Staying inside is fine.
        assert!(!zones.would_exit_central(LngLat::new(3.0, 3.0), LngLat::new(3.5, 3.0), 0.2));
        // Landing on the boundary counts as staying inside.
        assert!(!zones.would_exit_central(LngLat::new(3.9, 3.0), LngLat::new(4.0, 3.0), 0.2));
    }

    #[test]
    fn corner_cut_through_central_is_detected() {
        let zones = zones();
        // Clips the (4, 4) corner with both ends outside.
        let (from, to) = (LngLat::new(3.5, 4.2), LngLat::new(4.2, 3.5));
        assert!(zones.would_cut_through_central(from, to, 0.5));
        assert!(!zones.would_exit_central(from, to, 0.5));
        // Passes the corner on the outside.
        let (from, to) = (LngLat::new(4.2, 4.5), LngLat::new(4.5, 4.2));
        assert!(!zones.would_cut_through_central(from, to, 0.5));
        // Entering is not a cut.
        let (from, to) = (LngLat::new(4.5, 3.0), LngLat::new(3.5, 3.0));
        assert!(!zones.would_cut_through_central(from, to, 0.5));
    }

    #[test]
    fn point_queries() {
        let zones = zones();
        assert!(zones.is_in_any_no_fly_zone(LngLat::new(1.5, 1.5)));
        assert!(!zones.is_in_any_no_fly_zone(LngLat::new(0.5, 0.5)));
        assert!(zones.is_in_central(LngLat::new(0.5, 0.5)));
        assert!(!zones.is_in_central(LngLat::new(5.0, 0.5)));
    }

    #[test]
    fn validated_rejects_bad_region() {
        let open = NamedRegion::new(
            "open",
            vec![
                LngLat::new(0.0, 0.0),
                LngLat::new(1.0, 0.0),
                LngLat::new(1.0, 1.0),
            ],
        );
        let central = rect("central", 0.0, 0.0, 4.0, 4.0);
        let result = ExclusionZones::validated(vec![open], central.clone());
        assert!(matches!(result, Err(GeometryError::RegionNotClosed { .. })));
        assert!(ExclusionZones::validated(Vec::new(), central).is_ok());
    }

    #[test]
    fn snapshot_deserializes_from_json() {
        let json = serde_json::json!({
            "no_fly_zones": [{
                "name": "George Square Area",
                "vertices": [
                    {"lng": -3.190578818321228, "lat": 55.94402412577528},
                    {"lng": -3.1899887323379517, "lat": 55.94284650540911},
                    {"lng": -3.187097311019897, "lat": 55.94328811724263},
                    {"lng": -3.187682032585144, "lat": 55.944477740393744},
                    {"lng": -3.190578818321228, "lat": 55.94402412577528}
                ]
            }],
            "central": {
                "name": "central",
                "vertices": [
                    {"lng": -3.192473, "lat": 55.946233},
                    {"lng": -3.192473, "lat": 55.942617},
                    {"lng": -3.184319, "lat": 55.942617},
                    {"lng": -3.184319, "lat": 55.946233},
                    {"lng": -3.192473, "lat": 55.946233}
                ]
            }
        });
        let zones: ExclusionZones = serde_json::from_value(json).unwrap();
        assert_eq!(zones.no_fly_zones().len(), 1);
        assert!(zones.no_fly_zones()[0].bbox().is_some());
        assert!(zones.is_in_any_no_fly_zone(LngLat::new(-3.1888, 55.9437)));
    }
}
