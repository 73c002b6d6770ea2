//! Resample coarse route segments into fixed-length moves.

use crate::models::LngLat;
use crate::spatial::distance;

/// Split every segment of `path` into moves of `move_distance`.
///
/// Each pair contributes `round(len / move_distance)` evenly spaced points,
/// excluding the segment end; the last input point is appended once. A pair
/// that rounds to zero moves (a repeated junction between stages) contributes
/// nothing. A non-positive `move_distance` returns the input unchanged.
pub fn stitch_path(path: &[LngLat], move_distance: f64) -> Vec<LngLat> {
    let last = match path {
        [] => return Vec::new(),
        [only] => return vec![*only],
        [.., last] => *last,
    };
    if !move_distance.is_finite() || move_distance <= 0.0 {
        return path.to_vec();
    }

    let mut stitched = Vec::with_capacity(path.len());
    for pair in path.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let moves = (distance(start, end) / move_distance).round() as usize;
        if moves == 0 {
            continue;
        }
        let dlng = (end.lng - start.lng) / moves as f64;
        let dlat = (end.lat - start.lat) / moves as f64;
        stitched.extend((0..moves).map(|j| {
            let j = j as f64;
            LngLat::new(start.lng + j * dlng, start.lat + j * dlat)
        }));
    }
    stitched.push(last);
    stitched
}
