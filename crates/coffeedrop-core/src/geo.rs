//! Great-circle distance and nearest-candidate ranking.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in miles, matching the legacy haversine SQL.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Great-circle distance in miles (spherical law of cosines).
///
/// Reproduces the legacy formula
/// `3959 * acos(cos(la)·cos(lb)·cos(gb − ga) + sin(la)·sin(lb))`,
/// with the acos argument clamped to `[-1, 1]` so floating-point overshoot
/// on identical or antipodal points cannot produce NaN.
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    let (la, ga) = (a.lat.to_radians(), a.lng.to_radians());
    let (lb, gb) = (b.lat.to_radians(), b.lng.to_radians());

    let cos_angle = la.cos() * lb.cos() * (gb - ga).cos() + la.sin() * lb.sin();
    EARTH_RADIUS_MILES * cos_angle.clamp(-1.0, 1.0).acos()
}

/// Returns the candidate closest to `origin`, with its distance in miles.
///
/// Ties keep the first candidate seen; an empty pool yields `None`.
/// Callers are expected to have filtered out candidates without
/// coordinates — rows with NULL lat/lng never enter the pool.
pub fn nearest<T>(
    origin: Coordinate,
    candidates: impl IntoIterator<Item = (T, Coordinate)>,
) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    for (id, coord) in candidates {
        let miles = distance_miles(origin, coord);
        match &best {
            Some((_, best_miles)) if miles >= *best_miles => {}
            _ => best = Some((id, miles)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: Coordinate = Coordinate {
        lat: 51.5074,
        lng: -0.1278,
    };
    const MANCHESTER: Coordinate = Coordinate {
        lat: 53.4808,
        lng: -2.2426,
    };
    const EDINBURGH: Coordinate = Coordinate {
        lat: 55.9533,
        lng: -3.1883,
    };

    #[test]
    fn london_to_manchester_is_about_163_miles() {
        let miles = distance_miles(LONDON, MANCHESTER);
        assert!((miles - 163.0).abs() < 2.0, "got {miles}");
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_miles(LONDON, EDINBURGH);
        let back = distance_miles(EDINBURGH, LONDON);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn identical_points_are_zero_not_nan() {
        // Without the clamp, cos rounding can push the acos argument just
        // above 1.0 for identical points.
        let miles = distance_miles(LONDON, LONDON);
        assert!(miles.abs() < 1e-6, "got {miles}");
    }

    #[test]
    fn nearest_picks_the_minimum_distance_candidate() {
        let found = nearest(
            LONDON,
            vec![(1_i64, EDINBURGH), (2, MANCHESTER)],
        );
        let (id, miles) = found.expect("candidate expected");
        assert_eq!(id, 2);
        assert!(miles < distance_miles(LONDON, EDINBURGH));
    }

    #[test]
    fn nearest_of_empty_pool_is_none() {
        let pool: Vec<(i64, Coordinate)> = Vec::new();
        assert!(nearest(LONDON, pool).is_none());
    }

    #[test]
    fn nearest_keeps_first_seen_on_ties() {
        let found = nearest(LONDON, vec![(10_i64, MANCHESTER), (20, MANCHESTER)]);
        assert_eq!(found.expect("candidate expected").0, 10);
    }
}
