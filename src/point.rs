use crate::error::{GeoError, Result};
use crate::geo;

/// A latitude/longitude pair in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Builds a point, rejecting non-finite or out-of-range coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        Ok(Self {
            lat: validate_latitude(lat)?,
            lon: validate_longitude(lon)?,
        })
    }

    pub fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        geo::haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}

fn ensure_within(value: f64, min: f64, max: f64, field: &'static str) -> Result<f64> {
    if !value.is_finite() || value < min || value > max {
        Err(GeoError::InvalidCoordinate { field, value })
    } else {
        Ok(value)
    }
}

pub fn validate_latitude(value: f64) -> Result<f64> {
    ensure_within(value, -90.0, 90.0, "latitude")
}

pub fn validate_longitude(value: f64) -> Result<f64> {
    ensure_within(value, -180.0, 180.0, "longitude")
}

/// Anything that can report where it is.
///
/// `None` means the record has no value for that coordinate, which the
/// sorter reports as [`GeoError::InvalidPlace`].
pub trait HasCoordinates {
    fn latitude(&self) -> Option<f64>;
    fn longitude(&self) -> Option<f64>;
}

impl HasCoordinates for GeoPoint {
    fn latitude(&self) -> Option<f64> {
        Some(self.lat)
    }

    fn longitude(&self) -> Option<f64> {
        Some(self.lon)
    }
}

/// `(lat, lon)`
impl HasCoordinates for (f64, f64) {
    fn latitude(&self) -> Option<f64> {
        Some(self.0)
    }

    fn longitude(&self) -> Option<f64> {
        Some(self.1)
    }
}

impl<T: HasCoordinates + ?Sized> HasCoordinates for &T {
    fn latitude(&self) -> Option<f64> {
        (**self).latitude()
    }

    fn longitude(&self) -> Option<f64> {
        (**self).longitude()
    }
}
