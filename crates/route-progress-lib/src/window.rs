//! Circular geofence test

use crate::{Coordinate, DistanceFunction, Result, utils};

/// A circle around `center`, measured with `distance_fn`
///
/// `radius` is in the unit of `distance_fn`, so the same metric a route was built with
/// gives radii that are comparable with its progress values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Window<D> {
    pub center: Coordinate,
    pub radius: f64,
    pub distance_fn: D,
}

impl<D: DistanceFunction> Window<D> {
    /// Create a window, rejecting negative or non-finite radii
    pub fn new(center: Coordinate, radius: f64, distance_fn: D) -> Result<Self> {
        utils::validate_tolerance("window radius", radius)?;
        Ok(Self {
            center,
            radius,
            distance_fn,
        })
    }

    /// True when `position` lies within the radius, boundary included
    #[inline]
    pub fn contains(&self, position: Coordinate) -> bool {
        self.distance_fn.distance(position, self.center) <= self.radius
    }
}

/// True when `position` lies inside `window` (distance to the center `<=` radius)
#[inline]
pub fn is_inside<D: DistanceFunction>(position: Coordinate, window: &Window<D>) -> bool {
    window.contains(position)
}
