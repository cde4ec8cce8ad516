use crate::constants::EARTH_RADIUS_KM;

/// Great-circle distance in kilometres between two points given in degrees.
///
/// Uses the haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
///
/// # Examples
/// ```
/// use rail_precedence::geometry::haversine_km;
///
/// // Same point
/// assert_eq!(haversine_km(28.6, 77.2, 28.6, 77.2), 0.0);
///
/// // One degree of latitude is roughly 111 km
/// let d = haversine_km(0.0, 0.0, 1.0, 0.0);
/// assert!((d - 111.19).abs() < 0.01);
/// ```
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Inferred travel time in minutes for covering `distance_km` at `avg_speed_kmph`.
///
/// A non-positive speed yields zero rather than an infinite time; callers
/// normalise travel times to a minimum before routing anyway.
#[must_use]
pub fn travel_minutes(distance_km: f64, avg_speed_kmph: f64) -> f64 {
    if avg_speed_kmph <= 0.0 {
        return 0.0;
    }
    (distance_km / avg_speed_kmph) * 60.0
}
