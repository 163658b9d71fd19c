use ordered_float::OrderedFloat;
use tracing::debug;

use crate::error::{GeoError, Result};
use crate::geo::{self, EARTH_RADIUS_KM};
use crate::point::{validate_latitude, validate_longitude, GeoPoint, HasCoordinates};

/// Returns a copy of `places` ordered by ascending great-circle distance (km)
/// from `(lat, lon)`.
///
/// The sort is stable: places at the same distance keep their input order.
/// `places` itself is left untouched.
///
/// Fails with [`GeoError::InvalidCoordinate`] if the reference point is not a
/// valid coordinate and with [`GeoError::InvalidPlace`] for the first place
/// whose coordinates are missing, non-finite or out of range.
pub fn sort_places_by_distance<P>(places: &[P], lat: f64, lon: f64) -> Result<Vec<P>>
where
    P: HasCoordinates + Clone,
{
    sort_places_by_distance_with_radius(places, lat, lon, EARTH_RADIUS_KM)
}

/// Same as [`sort_places_by_distance`] on a sphere of the given radius.
pub fn sort_places_by_distance_with_radius<P>(
    places: &[P],
    lat: f64,
    lon: f64,
    radius: f64,
) -> Result<Vec<P>>
where
    P: HasCoordinates + Clone,
{
    Ok(sorted_with_distances(places, lat, lon, radius)?
        .into_iter()
        .map(|(place, _)| place)
        .collect())
}

/// The `limit` nearest places to `(lat, lon)`, each paired with its distance in km.
pub fn nearest_places<P>(places: &[P], lat: f64, lon: f64, limit: usize) -> Result<Vec<(P, f64)>>
where
    P: HasCoordinates + Clone,
{
    let mut sorted = sorted_with_distances(places, lat, lon, EARTH_RADIUS_KM)?;
    sorted.truncate(limit);
    Ok(sorted)
}

pub(crate) fn sorted_with_distances<P>(
    places: &[P],
    lat: f64,
    lon: f64,
    radius: f64,
) -> Result<Vec<(P, f64)>>
where
    P: HasCoordinates + Clone,
{
    let reference = GeoPoint::new(lat, lon)?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeoError::InvalidCoordinate {
            field: "radius",
            value: radius,
        });
    }

    let mut keyed = Vec::with_capacity(places.len());
    for (index, place) in places.iter().enumerate() {
        let point = place_point(index, place)?;
        let d = geo::haversine_with_radius(reference.lat, reference.lon, point.lat, point.lon, radius);
        keyed.push((place.clone(), d));
    }

    // slice::sort_by_key is stable.
    keyed.sort_by_key(|&(_, d)| OrderedFloat(d));
    debug!(
        count = keyed.len(),
        lat = reference.lat,
        lon = reference.lon,
        "sorted places by distance"
    );
    Ok(keyed)
}

fn place_point<P: HasCoordinates>(index: usize, place: &P) -> Result<GeoPoint> {
    let invalid = |reason: String| GeoError::InvalidPlace { index, reason };
    let lat = place
        .latitude()
        .ok_or_else(|| invalid("missing latitude".to_string()))?;
    let lon = place
        .longitude()
        .ok_or_else(|| invalid("missing longitude".to_string()))?;
    validate_latitude(lat).map_err(|e| invalid(e.to_string()))?;
    validate_longitude(lon).map_err(|e| invalid(e.to_string()))?;
    Ok(GeoPoint::new_unchecked(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Cafe {
        name: &'static str,
        lat: Option<f64>,
        lon: Option<f64>,
    }

    impl Cafe {
        fn at(name: &'static str, lat: f64, lon: f64) -> Self {
            Self {
                name,
                lat: Some(lat),
                lon: Some(lon),
            }
        }
    }

    impl HasCoordinates for Cafe {
        fn latitude(&self) -> Option<f64> {
            self.lat
        }

        fn longitude(&self) -> Option<f64> {
            self.lon
        }
    }

    fn names(cafes: &[Cafe]) -> Vec<&'static str> {
        cafes.iter().map(|c| c.name).collect()
    }

    fn cafes() -> Vec<Cafe> {
        vec![
            Cafe::at("tokyo", 35.6762, 139.6503),
            Cafe::at("paris", 48.8566, 2.3522),
            Cafe::at("london", 51.5074, -0.1278),
            Cafe::at("new_york", 40.7128, -74.0060),
            Cafe::at("berlin", 52.5200, 13.4050),
        ]
    }

    #[test]
    fn sorts_by_distance_from_reference() {
        // Reference point in London.
        let sorted = sort_places_by_distance(&cafes(), 51.5074, -0.1278).unwrap();
        assert_eq!(
            names(&sorted),
            vec!["london", "paris", "berlin", "new_york", "tokyo"]
        );
    }

    #[test]
    fn output_is_non_decreasing() {
        let places = cafes();
        for &(lat, lon) in &[(0.0, 0.0), (-33.8688, 151.2093), (64.1466, -21.9426), (90.0, 0.0)] {
            let sorted = sort_places_by_distance(&places, lat, lon).unwrap();
            assert_eq!(sorted.len(), places.len());
            let dists: Vec<f64> = sorted
                .iter()
                .map(|c| geo::haversine_km(lat, lon, c.lat.unwrap(), c.lon.unwrap()))
                .collect();
            assert!(dists.windows(2).all(|w| w[0] <= w[1]), "{:?}", dists);
        }
    }

    #[test]
    fn input_is_not_mutated() {
        let places = cafes();
        let before = places.clone();
        let _ = sort_places_by_distance(&places, 0.0, 0.0).unwrap();
        assert_eq!(places, before);
    }

    #[test]
    fn ties_keep_input_order() {
        let places = vec![
            Cafe::at("far", 10.0, 10.0),
            Cafe::at("first", 1.0, 1.0),
            Cafe::at("second", 1.0, 1.0),
            Cafe::at("third", 1.0, 1.0),
        ];
        let sorted = sort_places_by_distance(&places, 0.0, 0.0).unwrap();
        assert_eq!(names(&sorted), vec!["first", "second", "third", "far"]);
    }

    #[test]
    fn empty_and_singleton() {
        let empty: Vec<Cafe> = Vec::new();
        assert!(sort_places_by_distance(&empty, 0.0, 0.0).unwrap().is_empty());

        let one = vec![Cafe::at("only", 5.0, 5.0)];
        assert_eq!(sort_places_by_distance(&one, 0.0, 0.0).unwrap(), one);
    }

    #[test]
    fn works_with_plain_points() {
        let points = vec![(0.0, 2.0), (0.0, 3.0), (0.0, 1.0)];
        let sorted = sort_places_by_distance(&points, 0.0, 0.0).unwrap();
        assert_eq!(sorted, vec![(0.0, 1.0), (0.0, 2.0), (0.0, 3.0)]);
    }

    #[test]
    fn missing_coordinate_is_rejected() {
        let mut places = cafes();
        places[3].lon = None;
        match sort_places_by_distance(&places, 0.0, 0.0) {
            Err(GeoError::InvalidPlace { index, reason }) => {
                assert_eq!(index, 3);
                assert_eq!(reason, "missing longitude");
            }
            other => panic!("expected InvalidPlace, got {:?}", other),
        }
    }

    #[test]
    fn non_finite_place_is_rejected() {
        let mut places = cafes();
        places[1].lat = Some(f64::NAN);
        assert!(matches!(
            sort_places_by_distance(&places, 0.0, 0.0),
            Err(GeoError::InvalidPlace { index: 1, .. })
        ));
    }

    #[test]
    fn invalid_reference_is_rejected() {
        assert!(matches!(
            sort_places_by_distance(&cafes(), 91.0, 0.0),
            Err(GeoError::InvalidCoordinate { field: "latitude", .. })
        ));
        assert!(matches!(
            sort_places_by_distance(&cafes(), 0.0, f64::NAN),
            Err(GeoError::InvalidCoordinate { field: "longitude", .. })
        ));
    }

    #[test]
    fn radius_must_be_positive() {
        assert!(matches!(
            sort_places_by_distance_with_radius(&cafes(), 0.0, 0.0, 0.0),
            Err(GeoError::InvalidCoordinate { field: "radius", .. })
        ));
        let on_mars = sort_places_by_distance_with_radius(&cafes(), 51.5074, -0.1278, 3389.5).unwrap();
        assert_eq!(names(&on_mars)[0], "london");
    }

    #[test]
    fn nearest_is_truncated_with_distances() {
        let nearest = nearest_places(&cafes(), 51.5074, -0.1278, 2).unwrap();
        assert_eq!(nearest.len(), 2);
        assert_eq!(nearest[0].0.name, "london");
        assert_eq!(nearest[0].1, 0.0);
        assert_eq!(nearest[1].0.name, "paris");
        assert!((nearest[1].1 - 343.5).abs() < 1.0, "got {}", nearest[1].1);

        assert_eq!(nearest_places(&cafes(), 0.0, 0.0, 100).unwrap().len(), 5);
    }
}
