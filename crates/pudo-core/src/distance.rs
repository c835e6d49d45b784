//! Great-circle distance on a spherical Earth.

use pudo_model::Coordinate;

/// Mean Earth radius in kilometers (IUGG arithmetic mean).
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine distance between two coordinates, in kilometers.
///
/// # Example
///
/// ```
/// use pudo_core::haversine_km;
/// use pudo_model::Coordinate;
///
/// // One degree of latitude is roughly 111 km.
/// let d = haversine_km(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
/// assert!((d - 111.2).abs() < 0.1);
/// ```
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat * 0.5).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon * 0.5).sin().powi(2);

    // Rounding can push h just past 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.min(1.0).sqrt().asin()
}
