//! Distance and bearing policies
//!
//! A route keeps one metric for its whole lifetime: the cumulative distance index of every
//! segment, the progress values passed to queries and geofence radii are all expressed in
//! the unit of the [`DistanceFunction`] the caller picked. Mixing metrics inside one route
//! is not detected.

use crate::Coordinate;
use geo::{Bearing, Distance, Euclidean, Geodesic, Haversine};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// End-of-range snap tolerance for degree-scale (planar) progress
pub const PLANAR_BOUNDARY_TOLERANCE: f64 = 1e-8;

/// End-of-range snap tolerance for meter-scale (geodesic and spherical) progress
pub const METRIC_BOUNDARY_TOLERANCE: f64 = 1e-6;

/// A distance policy between two coordinates.
///
/// Implementations must be pure and return a finite, non-negative value for finite input.
pub trait DistanceFunction: Send + Sync {
    /// Distance between `a` and `b` in this policy's unit
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64;

    /// Initial heading from `a` towards `b` in degrees, `[0, 360)`.
    ///
    /// Every policy reports the WGS84 forward azimuth by default, so headings stay
    /// comparable regardless of how progress is measured.
    fn bearing(&self, a: Coordinate, b: Coordinate) -> f64 {
        bearing(a, b)
    }

    /// Maximum overshoot past the end of a segment that still snaps to its last vertex
    fn boundary_tolerance(&self) -> f64;
}

impl<T: DistanceFunction + ?Sized> DistanceFunction for &T {
    #[inline]
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        (**self).distance(a, b)
    }

    #[inline]
    fn bearing(&self, a: Coordinate, b: Coordinate) -> f64 {
        (**self).bearing(a, b)
    }

    #[inline]
    fn boundary_tolerance(&self) -> f64 {
        (**self).boundary_tolerance()
    }
}

/// Euclidean distance treating (latitude, longitude) as Cartesian axes.
///
/// The unit is "coordinate degrees". Only meaningful for small extents or synthetic data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanarDistance;

impl DistanceFunction for PlanarDistance {
    #[inline(always)]
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        Euclidean.distance(a.to_point(), b.to_point())
    }

    #[inline]
    fn boundary_tolerance(&self) -> f64 {
        PLANAR_BOUNDARY_TOLERANCE
    }
}

/// Geodesic distance in meters on the WGS84 ellipsoid (Karney's algorithm)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EllipsoidalDistance;

impl DistanceFunction for EllipsoidalDistance {
    #[inline(always)]
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        Geodesic.distance(a.to_point(), b.to_point())
    }

    #[inline]
    fn boundary_tolerance(&self) -> f64 {
        METRIC_BOUNDARY_TOLERANCE
    }
}

/// Great-circle distance in meters on a sphere of mean Earth radius.
///
/// Cheaper than [`EllipsoidalDistance`] at the cost of up to ~0.5% error.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HaversineDistance;

impl DistanceFunction for HaversineDistance {
    #[inline(always)]
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        Haversine.distance(a.to_point(), b.to_point())
    }

    #[inline]
    fn boundary_tolerance(&self) -> f64 {
        METRIC_BOUNDARY_TOLERANCE
    }
}

/// Runtime-selectable distance policy
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Metric {
    Planar,
    #[default]
    Ellipsoidal,
    Haversine,
}

impl DistanceFunction for Metric {
    #[inline]
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        match self {
            Metric::Planar => PlanarDistance.distance(a, b),
            Metric::Ellipsoidal => EllipsoidalDistance.distance(a, b),
            Metric::Haversine => HaversineDistance.distance(a, b),
        }
    }

    #[inline]
    fn boundary_tolerance(&self) -> f64 {
        match self {
            Metric::Planar => PlanarDistance.boundary_tolerance(),
            Metric::Ellipsoidal => EllipsoidalDistance.boundary_tolerance(),
            Metric::Haversine => HaversineDistance.boundary_tolerance(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Planar => "planar",
            Metric::Ellipsoidal => "ellipsoidal",
            Metric::Haversine => "haversine",
        };
        f.write_str(name)
    }
}

/// Initial forward azimuth from `a` to `b` on the WGS84 ellipsoid.
///
/// Returns degrees clockwise from true north in `[0, 360)`. Identical points yield `0.0`.
#[inline]
pub fn bearing(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let azimuth = Geodesic.bearing(a.to_point(), b.to_point()).rem_euclid(360.0);
    // rem_euclid can round a tiny negative azimuth up to exactly 360
    if azimuth >= 360.0 { 0.0 } else { azimuth }
}
