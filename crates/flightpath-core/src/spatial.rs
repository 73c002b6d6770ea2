//! Planar geometry over longitude/latitude pairs.
//!
//! Coordinates are treated as Cartesian units (lng = x, lat = y). Nothing in
//! here is geodesic: distances are plain Euclidean norms in degrees.

use crate::models::LngLat;
use serde::{Deserialize, Serialize};

/// Turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Euclidean distance between two positions. Exactly zero for coincident points.
pub fn distance(a: LngLat, b: LngLat) -> f64 {
    let dlng = a.lng - b.lng;
    let dlat = a.lat - b.lat;
    (dlng * dlng + dlat * dlat).sqrt()
}

/// Orientation of the triplet (p, q, r).
///
/// Collinearity is exact floating-point equality with zero. No tolerance is
/// applied, so nearly-collinear triples classify by the sign of the residue.
pub fn orientation(p: LngLat, q: LngLat, r: LngLat) -> Orientation {
    let val = (q.lat - p.lat) * (r.lng - q.lng) - (q.lng - p.lng) * (r.lat - q.lat);
    if val == 0.0 {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// For collinear p, q, r: whether q lies on the closed segment pr.
pub fn on_segment(p: LngLat, q: LngLat, r: LngLat) -> bool {
    q.lng <= p.lng.max(r.lng)
        && q.lng >= p.lng.min(r.lng)
        && q.lat <= p.lat.max(r.lat)
        && q.lat >= p.lat.min(r.lat)
}

/// Whether segments p1p2 and q1q2 share at least one point.
///
/// Touching (an endpoint on the other segment) and collinear overlap both
/// count as intersecting.
pub fn segments_intersect(p1: LngLat, p2: LngLat, q1: LngLat, q2: LngLat) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, q1, p2))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, p2))
        || (o3 == Orientation::Collinear && on_segment(q1, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(q1, p2, q2))
}

/// Even-odd containment test over a polygon ring.
///
/// Points on an edge or vertex are inside. Rings with fewer than three
/// vertices contain nothing. The ring may be given closed (first == last) or
/// open; the wrap-around edge is always considered.
pub fn point_in_polygon(point: LngLat, vertices: &[LngLat]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];

        if orientation(a, b, point) == Orientation::Collinear && on_segment(a, point, b) {
            return true;
        }

        if ((a.lat > point.lat) != (b.lat > point.lat))
            && (point.lng < (b.lng - a.lng) * (point.lat - a.lat) / (b.lat - a.lat) + a.lng)
        {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Compass bearing from `from` to `to` in degrees, 0 = north, clockwise, in `[0, 360)`.
///
/// Returns 0 for coincident points.
pub fn bearing_deg(from: LngLat, to: LngLat) -> f64 {
    let dlng = to.lng - from.lng;
    let dlat = to.lat - from.lat;
    if dlng == 0.0 && dlat == 0.0 {
        return 0.0;
    }
    dlng.atan2(dlat).to_degrees().rem_euclid(360.0)
}

/// Axis-aligned bounds of a polygon, used as a cheap pre-filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub max_lng: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Bounds of a vertex list, or `None` when it is empty.
    pub fn from_points(points: &[LngLat]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = Self {
            min_lng: first.lng,
            max_lng: first.lng,
            min_lat: first.lat,
            max_lat: first.lat,
        };
        for point in &points[1..] {
            bbox.min_lng = bbox.min_lng.min(point.lng);
            bbox.max_lng = bbox.max_lng.max(point.lng);
            bbox.min_lat = bbox.min_lat.min(point.lat);
            bbox.max_lat = bbox.max_lat.max(point.lat);
        }
        Some(bbox)
    }

    /// True when `point` is provably outside the box grown by `margin`.
    pub fn rejects_point(&self, point: LngLat, margin: f64) -> bool {
        point.lat > self.max_lat + margin
            || point.lat < self.min_lat - margin
            || point.lng > self.max_lng + margin
            || point.lng < self.min_lng - margin
    }

    /// True when segment ab provably cannot touch the box grown by `margin`.
    pub fn rejects_segment(&self, a: LngLat, b: LngLat, margin: f64) -> bool {
        a.lng.max(b.lng) < self.min_lng - margin
            || a.lng.min(b.lng) > self.max_lng + margin
            || a.lat.max(b.lat) < self.min_lat - margin
            || a.lat.min(b.lat) > self.max_lat + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lng: f64, lat: f64) -> LngLat {
        LngLat::new(lng, lat)
    }

    fn regular_polygon(center: LngLat, radius: f64, sides: usize) -> Vec<LngLat> {
        let mut ring: Vec<LngLat> = (0..sides)
            .map(|i| {
                let angle = i as f64 * std::f64::consts::TAU / sides as f64;
                p(
                    center.lng + radius * angle.cos(),
                    center.lat + radius * angle.sin(),
                )
            })
            .collect();
        ring.push(ring[0]);
        ring
    }

    #[test]
    fn distance_is_zero_for_coincident_points() {
        let a = p(-3.186874, 55.944494);
        assert_eq!(distance(a, a), 0.0);
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((distance(p(0.0, 0.0), p(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn orientation_classifies_turns() {
        let origin = p(0.0, 0.0);
        let east = p(1.0, 0.0);
        assert_eq!(orientation(origin, east, p(2.0, 0.0)), Orientation::Collinear);
        assert_eq!(orientation(origin, east, p(1.0, -1.0)), Orientation::Clockwise);
        assert_eq!(
            orientation(origin, east, p(1.0, 1.0)),
            Orientation::CounterClockwise
        );
    }

    #[test]
    fn crossing_segments_intersect() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(1.0, 0.0)
        ));
    }

    #[test]
    fn touching_endpoint_counts_as_intersection() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 5.0)
        ));
        // T-junction: endpoint lands in the middle of the other segment.
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 3.0)
        ));
    }

    #[test]
    fn collinear_segments_intersect_only_when_overlapping() {
        assert!(segments_intersect(
            p(0.0, 0.0),
            p(2.0, 0.0),
            p(1.0, 0.0),
            p(3.0, 0.0)
        ));
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(2.0, 0.0),
            p(3.0, 0.0)
        ));
    }

    #[test]
    fn parallel_and_distant_segments_do_not_intersect() {
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(0.0, 1.0),
            p(1.0, 1.0)
        ));
        assert!(!segments_intersect(
            p(0.0, 0.0),
            p(1.0, 1.0),
            p(5.0, 0.0),
            p(6.0, -1.0)
        ));
    }

    #[test]
    fn regular_polygon_contains_centroid_not_far_point() {
        let center = p(-3.19, 55.945);
        let ring = regular_polygon(center, 0.002, 8);
        assert!(point_in_polygon(center, &ring));
        assert!(!point_in_polygon(p(-3.18, 55.945), &ring));
        assert!(!point_in_polygon(p(-3.19, 55.96), &ring));
    }

    #[test]
    fn boundary_points_are_inside() {
        let square = vec![
            p(0.0, 0.0),
            p(1.0, 0.0),
            p(1.0, 1.0),
            p(0.0, 1.0),
            p(0.0, 0.0),
        ];
        // On each kind of edge.
        assert!(point_in_polygon(p(0.5, 0.0), &square));
        assert!(point_in_polygon(p(0.5, 1.0), &square));
        assert!(point_in_polygon(p(0.0, 0.5), &square));
        assert!(point_in_polygon(p(1.0, 0.5), &square));
        // On vertices.
        assert!(point_in_polygon(p(0.0, 0.0), &square));
        assert!(point_in_polygon(p(1.0, 1.0), &square));
        // Just outside an edge.
        assert!(!point_in_polygon(p(1.0 + 1e-9, 0.5), &square));
        assert!(!point_in_polygon(p(0.5, -1e-9), &square));
    }

    #[test]
    fn concave_notch_is_outside() {
        // U shape opening north; the notch spans x in (1, 2), y in (1, 3).
        let u_shape = vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 3.0),
            p(2.0, 3.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
            p(0.0, 0.0),
        ];
        assert!(!point_in_polygon(p(1.5, 2.0), &u_shape));
        assert!(point_in_polygon(p(0.5, 2.0), &u_shape));
        assert!(point_in_polygon(p(1.5, 0.5), &u_shape));
    }

    #[test]
    fn open_ring_is_treated_as_closed() {
        let triangle = vec![p(0.0, 0.0), p(4.0, 0.0), p(0.0, 4.0)];
        assert!(point_in_polygon(p(1.0, 1.0), &triangle));
        assert!(point_in_polygon(p(2.0, 2.0), &triangle));
        assert!(!point_in_polygon(p(3.0, 3.0), &triangle));
    }

    #[test]
    fn degenerate_ring_contains_nothing() {
        let line = vec![p(0.0, 0.0), p(1.0, 1.0)];
        assert!(!point_in_polygon(p(0.5, 0.5), &line));
        assert!(!point_in_polygon(p(0.0, 0.0), &[]));
    }

    #[test]
    fn bearing_uses_compass_convention() {
        let origin = p(0.0, 0.0);
        assert!((bearing_deg(origin, p(0.0, 1.0)) - 0.0).abs() < 1e-12);
        assert!((bearing_deg(origin, p(1.0, 0.0)) - 90.0).abs() < 1e-12);
        assert!((bearing_deg(origin, p(0.0, -1.0)) - 180.0).abs() < 1e-12);
        assert!((bearing_deg(origin, p(-1.0, 0.0)) - 270.0).abs() < 1e-12);
        assert_eq!(bearing_deg(origin, origin), 0.0);
    }

    #[test]
    fn bounding_box_rejection_respects_margin() {
        let bbox = BoundingBox::from_points(&[p(0.0, 0.0), p(1.0, 2.0)]).unwrap();
        assert_eq!(bbox.max_lat, 2.0);
        assert!(!bbox.rejects_point(p(0.5, 1.0), 0.0));
        assert!(bbox.rejects_point(p(1.5, 1.0), 0.1));
        assert!(!bbox.rejects_point(p(1.05, 1.0), 0.1));

        // Segment spanning the box with both endpoints outside it is not rejected.
        assert!(!bbox.rejects_segment(p(-1.0, 1.0), p(2.0, 1.0), 0.0));
        assert!(bbox.rejects_segment(p(2.0, 0.0), p(3.0, 2.0), 0.5));
        assert!(BoundingBox::from_points(&[]).is_none());
    }
}
