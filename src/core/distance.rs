use geo::Point;

/// Earth's radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers
///
/// Uses the spherical law of cosines on a sphere of radius 6371 km.
/// Points are `geo` points, so `x` is longitude and `y` is latitude.
///
/// # Arguments
/// * `origin` - Query point in degrees
/// * `other` - Candidate point in degrees
///
/// # Returns
/// Unrounded distance in kilometers
#[inline]
pub fn great_circle_distance_km(origin: Point<f64>, other: Point<f64>) -> f64 {
    let lat1 = origin.y().to_radians();
    let lat2 = other.y().to_radians();
    let delta_lng = other.x().to_radians() - origin.x().to_radians();

    let cosine = lat1.cos() * lat2.cos() * delta_lng.cos() + lat1.sin() * lat2.sin();

    // Rounding can push identical points just past 1.0, where acos is NaN
    EARTH_RADIUS_KM * cosine.clamp(-1.0, 1.0).acos()
}

/// Round a distance to one decimal place for display
#[inline]
pub fn round_distance(distance_km: f64) -> f64 {
    (distance_km * 10.0).round() / 10.0
}

/// Check that a latitude/longitude pair lies in its valid domain
#[inline]
pub fn is_valid_coordinate(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}
