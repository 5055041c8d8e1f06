//! Construction-time settings for segments and paths

use crate::{DistanceFunction, Result, utils};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for building segments and paths
///
/// Every field only affects construction; queries read the values captured at build time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Override of the end-of-range snap tolerance.
    /// A progress value at most this far past the end of a segment or path resolves to its
    /// last coordinate instead of failing. `None` uses the metric's own tolerance
    /// (degree scale for planar, meter scale for geodesic metrics).
    /// Default: None
    pub boundary_tolerance: Option<f64>,
    /// Reject paths whose consecutive segments do not meet.
    /// Default: false (contiguity is the caller's responsibility)
    pub check_contiguity: bool,
    /// Maximum gap between the last coordinate of a segment and the first coordinate of
    /// the next one, in the metric's unit, when `check_contiguity` is enabled.
    /// Default: 1.0
    pub contiguity_tolerance: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boundary_tolerance: None,
            check_contiguity: false,
            contiguity_tolerance: 1.0,
        }
    }
}

impl Config {
    /// Check that every numeric setting is finite and non-negative
    pub fn validate(&self) -> Result<()> {
        if let Some(tolerance) = self.boundary_tolerance {
            utils::validate_tolerance("boundary_tolerance", tolerance)?;
        }
        utils::validate_tolerance("contiguity_tolerance", self.contiguity_tolerance)
    }

    /// Snap tolerance to use with `distance_fn`
    #[inline]
    pub fn boundary_tolerance_for<D>(&self, distance_fn: &D) -> f64
    where
        D: DistanceFunction + ?Sized,
    {
        self.boundary_tolerance
            .unwrap_or_else(|| distance_fn.boundary_tolerance())
    }
}
