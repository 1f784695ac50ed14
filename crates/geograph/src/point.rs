use std::fmt::Display;

use geo::{HaversineDistance, Point};
use geo_types::Coord;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Meters per statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// An immutable latitude/longitude pair in decimal degrees.
///
/// Coordinates compare and hash exactly, with no tolerance: two points are
/// the same vertex only when both components are bit-equal. That makes
/// `GeoPoint` usable as a map key for vertex deduplication.
///
/// Latitude is expected in -90..90 and longitude in -180..180; values are
/// taken as given and not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: OrderedFloat<f64>,
    lon: OrderedFloat<f64>,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> GeoPoint {
        Self {
            lat: OrderedFloat(lat),
            lon: OrderedFloat(lon),
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat.0
    }

    pub fn lon(&self) -> f64 {
        self.lon.0
    }

    /// Great-circle distance to `other` in statute miles.
    ///
    /// Haversine on the mean-radius sphere. Symmetric, zero exactly when
    /// the points are equal, and within floating-point error it satisfies
    /// the triangle inequality.
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        let a: Point = (*self).into();
        let b: Point = (*other).into();

        a.haversine_distance(&b) / METERS_PER_MILE
    }
}

impl From<GeoPoint> for Point {
    fn from(point: GeoPoint) -> Point {
        Point::new(point.lon(), point.lat())
    }
}

impl From<GeoPoint> for Coord {
    fn from(point: GeoPoint) -> Coord {
        Coord {
            x: point.lon(),
            y: point.lat(),
        }
    }
}

impl Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}
