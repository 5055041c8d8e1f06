//! Geographic coordinate and derived pose types

use geo::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A WGS84 position in degrees, without altitude
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Convert to a `geo` point (x = longitude, y = latitude)
    #[inline(always)]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Linear interpolation of latitude and longitude independently.
    ///
    /// `delta` is expected in `[0, 1]`; it is not clamped.
    #[inline(always)]
    pub fn lerp(self, other: Coordinate, delta: f64) -> Coordinate {
        Coordinate {
            latitude: self.latitude + delta * (other.latitude - self.latitude),
            longitude: self.longitude + delta * (other.longitude - self.longitude),
        }
    }

    /// Arithmetic mean of both components (not the geodesic midpoint)
    #[inline(always)]
    pub fn midpoint(self, other: Coordinate) -> Coordinate {
        Coordinate {
            latitude: (self.latitude + other.latitude) / 2.0,
            longitude: (self.longitude + other.longitude) / 2.0,
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<Point<f64>> for Coordinate {
    #[inline]
    fn from(point: Point<f64>) -> Self {
        Coordinate::new(point.y(), point.x())
    }
}

impl From<Coordinate> for Point<f64> {
    #[inline]
    fn from(coordinate: Coordinate) -> Self {
        coordinate.to_point()
    }
}

impl From<(f64, f64)> for Coordinate {
    /// Build from a `(latitude, longitude)` tuple
    #[inline]
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Coordinate::new(latitude, longitude)
    }
}

impl From<&gpx::Waypoint> for Coordinate {
    #[inline]
    fn from(waypoint: &gpx::Waypoint) -> Self {
        Coordinate::from(waypoint.point())
    }
}

/// Oriented pose between two consecutive route positions
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    /// Latitude of the arithmetic midpoint, in degrees
    pub latitude: f64,
    /// Longitude of the arithmetic midpoint, in degrees
    pub longitude: f64,
    /// Forward azimuth from the first to the second position, in `[0, 360)`
    pub bearing_degrees: f64,
}

impl State {
    #[inline]
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
