//! Great-circle (haversine) distance and ordering of places by proximity to a
//! reference point.

pub mod error;
pub mod geo;
pub mod places;
pub mod point;
pub mod sort;

pub use error::{GeoError, Result};
pub use geo::{haversine_km, haversine_meters, to_radians, EARTH_RADIUS_KM, EARTH_RADIUS_M};
pub use point::{GeoPoint, HasCoordinates};
pub use sort::{nearest_places, sort_places_by_distance, sort_places_by_distance_with_radius};
