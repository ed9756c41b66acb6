//! Great-circle distance on a spherical Earth.
//!
//! The one geospatial primitive the wallet needs: how far a stored card's
//! location is from a reference point, in kilometres. Haversine on a sphere
//! of radius 6371 km is accurate to well under 0.5% for these distances,
//! which is plenty for a 1 km proximity filter.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Haversine great-circle distance between two points, in kilometres.
///
/// Pure and total: no failure modes, symmetric in its arguments, and zero
/// for identical points.
pub fn distance_km(a: Coordinates, b: Coordinates) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        let p = Coordinates::new(-33.8688, 151.2093);
        assert_eq!(distance_km(p, p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = Coordinates::new(48.8566, 2.3522);
        let b = Coordinates::new(51.5074, -0.1278);
        let ab = distance_km(a, b);
        let ba = distance_km(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        // One degree of arc on a 6371 km sphere is ~111.19 km
        let a = Coordinates::new(0.0, 0.0);
        let b = Coordinates::new(0.0, 1.0);
        let d = distance_km(a, b);
        assert!((d - 111.19).abs() < 0.05, "got {}", d);
    }

    #[test]
    fn test_paris_to_london() {
        let paris = Coordinates::new(48.8566, 2.3522);
        let london = Coordinates::new(51.5074, -0.1278);
        let d = distance_km(paris, london);
        // ~344 km; allow a couple of km for the spherical approximation
        assert!((d - 344.0).abs() < 3.0, "got {}", d);
    }
}
