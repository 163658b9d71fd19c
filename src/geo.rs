use std::f64::consts::PI;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;
/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Degrees to radians. NaN in, NaN out.
#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Great-circle distance using the haversine formula.
/// Input lat/lon in degrees. Output in the unit of `radius`.
///
/// Never panics: non-finite input comes back as NaN or infinity.
pub fn haversine_with_radius(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        to_radians(lat1),
        to_radians(lon1),
        to_radians(lat2),
        to_radians(lon2),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points. `clamp` keeps NaN as NaN.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    radius * c
}

/// Haversine distance in kilometers on a sphere of radius [`EARTH_RADIUS_KM`].
#[inline]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_with_radius(lat1, lon1, lat2, lon2, EARTH_RADIUS_KM)
}

/// Haversine distance in meters.
#[inline]
pub fn haversine_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine_with_radius(lat1, lon1, lat2, lon2, EARTH_RADIUS_M)
}
