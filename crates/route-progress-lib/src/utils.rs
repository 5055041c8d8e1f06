//! Utility functions for cumulative distance indexing and ordered lookups

use crate::{Coordinate, DistanceFunction, Result, RouteError};

/// Build the running-total distance array of an ordered coordinate sequence
///
/// # Arguments
/// * `coordinates` - Ordered polyline vertices
/// * `distance_fn` - Metric used for every consecutive pair
///
/// # Returns
/// A vector parallel to `coordinates` where element `i` is the distance travelled from the
/// first vertex to vertex `i`. Element 0 is always `0.0`; a single coordinate yields `[0.0]`
/// and an empty input yields an empty vector.
pub fn cumulative_distances<D>(coordinates: &[Coordinate], distance_fn: &D) -> Vec<f64>
where
    D: DistanceFunction + ?Sized,
{
    let mut distances = Vec::with_capacity(coordinates.len());
    let mut total = 0.0;
    let mut previous: Option<Coordinate> = None;

    for &coordinate in coordinates {
        if let Some(prev) = previous {
            total += distance_fn.distance(prev, coordinate);
        }
        distances.push(total);
        previous = Some(coordinate);
    }

    distances
}

/// Index of the first element that is `>= target` ("lower bound")
///
/// `values` must be sorted in non-decreasing order. Returns `values.len()` when every element
/// is smaller than `target`. A NaN target compares false against everything and returns `0`.
#[inline(always)]
pub fn lower_bound(values: &[f64], target: f64) -> usize {
    values.partition_point(|&value| value < target)
}

/// Check that a precomputed cumulative array is usable as a lookup index
///
/// The array must be non-empty, start at exactly `0.0`, contain only finite values and be
/// non-decreasing.
pub fn validate_cumulative(values: &[f64]) -> Result<()> {
    let Some(&first) = values.first() else {
        return Err(RouteError::Configuration(
            "cumulative distance array is empty".to_string(),
        ));
    };

    if first != 0.0 {
        return Err(RouteError::Configuration(format!(
            "cumulative distance array must start at 0, found {first}"
        )));
    }

    if let Some(index) = values.iter().position(|value| !value.is_finite()) {
        return Err(RouteError::Configuration(format!(
            "cumulative distance at index {index} is not finite"
        )));
    }

    if let Some(index) = values.windows(2).position(|pair| pair[1] < pair[0]) {
        return Err(RouteError::Configuration(format!(
            "cumulative distances decrease at index {}: {} -> {}",
            index + 1,
            values[index],
            values[index + 1]
        )));
    }

    Ok(())
}

/// Check that a tolerance is usable (finite and non-negative)
pub fn validate_tolerance(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RouteError::Configuration(format!(
            "{name} must be finite and non-negative, got {value}"
        )))
    }
}
