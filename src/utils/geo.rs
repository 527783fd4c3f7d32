use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters (spherical approximation).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two coordinates using the haversine formula.
/// Returns meters. Safe for coincident and antipodal inputs.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // clamp guards against a sneaking past 1.0 through rounding
    let c = 2.0 * a.sqrt().clamp(0.0, 1.0).asin();

    EARTH_RADIUS_M * c
}

/// The office circle a check-in/check-out must fall inside.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OfficeGeofence {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

impl OfficeGeofence {
    pub fn new(latitude: f64, longitude: f64, radius_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_m,
        }
    }

    /// Distance in meters from the given point to the office center.
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> f64 {
        distance_meters(latitude, longitude, self.latitude, self.longitude)
    }

    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        self.distance_to(latitude, longitude) <= self.radius_m
    }
}

/// Human-readable distance: meters below 1 km, kilometers above.
pub fn format_distance(distance_m: f64) -> String {
    if distance_m < 1000.0 {
        format!("{} m", distance_m as i64)
    } else {
        format!("{:.2} km", distance_m / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ~1 degree of latitude in meters on the 6,371 km sphere
    const DEG_LAT_M: f64 = 111_194.93;

    #[test]
    fn coincident_points_are_zero_distance() {
        assert_eq!(distance_meters(-1.9441, 30.0619, -1.9441, 30.0619), 0.0);
        assert_eq!(distance_meters(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn antipodal_points_are_finite() {
        let d = distance_meters(90.0, 0.0, -90.0, 0.0);
        assert!(d.is_finite());
        // half the circumference, within a meter
        assert!((d - std::f64::consts::PI * 6_371_000.0).abs() < 1.0);
    }

    #[test]
    fn known_offset_matches_haversine() {
        // 0.01 deg of latitude at the equator is ~1,112 m
        let d = distance_meters(0.0, 0.0, 0.01, 0.0);
        assert!((d - 0.01 * DEG_LAT_M).abs() < 0.5);
    }

    #[test]
    fn office_center_is_inside_geofence() {
        let fence = OfficeGeofence::new(-1.9441, 30.0619, 200.0);
        assert!(fence.contains(-1.9441, 30.0619));
    }

    #[test]
    fn point_just_past_radius_is_outside() {
        let fence = OfficeGeofence::new(-1.9441, 30.0619, 200.0);
        // ~201 m north of center
        let lat = -1.9441 + 201.0 / DEG_LAT_M;
        let d = fence.distance_to(lat, 30.0619);
        assert!((d - 201.0).abs() < 0.5);
        assert!(!fence.contains(lat, 30.0619));
    }

    #[test]
    fn point_inside_radius_is_inside() {
        let fence = OfficeGeofence::new(-1.9441, 30.0619, 200.0);
        // ~111 m north of center
        assert!(fence.contains(-1.9441 + 0.001, 30.0619));
    }

    #[test]
    fn distance_formatting() {
        assert_eq!(format_distance(450.7), "450 m");
        assert_eq!(format_distance(999.0), "999 m");
        assert_eq!(format_distance(1500.0), "1.50 km");
    }
}
