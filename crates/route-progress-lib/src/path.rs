//! Path - an ordered chain of segments with one global progress parameterization
//!
//! The path owns its segments and a parallel array of segment start offsets. Global progress
//! is resolved to a segment with the same lower-bound search the segments use internally;
//! local progress is always derived from the offsets and never stored.

use crate::segment::internal_error;
use crate::{
    Config, Coordinate, DistanceFunction, Result, RouteError, Segment, State, bearing, utils,
};

use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered chain of segments exposing one global progress parameterization
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Path {
    /// Caller-defined identifier
    id: String,
    /// Ordered segments (never empty)
    segments: Vec<Segment>,
    /// Start offset of every segment followed by the total distance.
    /// `cumulative_distances[i]` is where segment `i` starts, so the array has
    /// `segments.len() + 1` entries and starts at `0.0`.
    cumulative_distances: Vec<f64>,
    /// Overshoot past the end of the path that still resolves to its last coordinate
    boundary_tolerance: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Path {
    /// Assemble a path from ordered segments
    ///
    /// Consecutive segments are expected to meet geographically; this is not checked.
    /// Use [`Path::with_config`] with `check_contiguity` to enforce it.
    ///
    /// # Returns
    /// The path, or `RouteError::Configuration` if `segments` is empty
    pub fn new(id: impl Into<String>, segments: Vec<Segment>) -> Result<Self> {
        Self::build(id.into(), segments, None)
    }

    /// Assemble a path with explicit construction settings
    ///
    /// `distance_fn` is only used to measure the gaps between consecutive segments when
    /// `config.check_contiguity` is enabled, and must be the metric the segments were built with.
    pub fn with_config<D>(
        id: impl Into<String>,
        segments: Vec<Segment>,
        distance_fn: &D,
        config: &Config,
    ) -> Result<Self>
    where
        D: DistanceFunction + ?Sized,
    {
        config.validate()?;
        let id = id.into();
        if config.check_contiguity {
            check_contiguity(&id, &segments, distance_fn, config.contiguity_tolerance)?;
        }
        Self::build(id, segments, config.boundary_tolerance)
    }

    fn build(id: String, segments: Vec<Segment>, boundary_tolerance: Option<f64>) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("path::build");

        if segments.is_empty() {
            return Err(RouteError::Configuration(format!(
                "path '{id}' has no segments"
            )));
        }

        let mut cumulative_distances = Vec::with_capacity(segments.len() + 1);
        let mut total = 0.0;
        cumulative_distances.push(total);
        for segment in &segments {
            total += segment.total_distance();
            cumulative_distances.push(total);
        }

        let boundary_tolerance = boundary_tolerance.unwrap_or_else(|| {
            segments
                .iter()
                .map(Segment::boundary_tolerance)
                .fold(0.0, f64::max)
        });

        tracing::debug!(
            "Built path '{}' with {} segments, total distance {}",
            id,
            segments.len(),
            total
        );

        Ok(Path {
            id,
            segments,
            cumulative_distances,
            boundary_tolerance,
        })
    }

    /// Resolve global progress to `(segment_index, local_progress)`
    ///
    /// A progress value exactly on a boundary between two segments resolves to the end of
    /// the earlier segment.
    pub fn locate(&self, progress: f64) -> Result<(usize, f64)> {
        let total = self.total_distance();
        if !(0.0..=total + self.boundary_tolerance).contains(&progress) {
            return Err(RouteError::OutOfRange {
                value: progress,
                min: 0.0,
                max: total,
            });
        }

        if progress == 0.0 {
            return Ok((0, 0.0));
        }
        if (progress - total).abs() <= self.boundary_tolerance {
            let last = self.segments.len() - 1;
            return Ok((last, self.segments[last].total_distance()));
        }

        let cumulative = &self.cumulative_distances;
        let index = utils::lower_bound(cumulative, progress);
        if index == 0 || index >= cumulative.len() {
            return Err(internal_error(format!(
                "path '{}': search for progress {progress} landed on index {index} of {}",
                self.id,
                cumulative.len()
            )));
        }

        // Offsets are running sums, so the difference can overshoot the segment by rounding
        let segment_total = self.segments[index - 1].total_distance();
        Ok((index - 1, (progress - cumulative[index - 1]).min(segment_total)))
    }

    /// Coordinate reached after travelling `progress` along the whole path
    pub fn position(&self, progress: f64) -> Result<Coordinate> {
        let (index, local_progress) = self.locate(progress)?;
        self.segments[index].position(local_progress)
    }

    /// Coordinate reached after travelling `ratio * total_distance`, with `ratio` in `[0, 1]`
    pub fn position_from_ratio(&self, ratio: f64) -> Result<Coordinate> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(RouteError::OutOfRange {
                value: ratio,
                min: 0.0,
                max: 1.0,
            });
        }
        self.position(ratio * self.total_distance())
    }

    /// Positions for every progress value, failing on the first invalid one
    pub fn positions(&self, progress_series: &[f64]) -> Result<Vec<Coordinate>> {
        progress_series
            .iter()
            .map(|&progress| self.position(progress))
            .collect()
    }

    /// Turn a progress series into oriented poses
    ///
    /// Returns one [`State`] per consecutive pair (so `len - 1` states, none for fewer than
    /// two samples): the arithmetic midpoint of both positions and the ellipsoidal forward
    /// azimuth from the first position to the second.
    pub fn chain_state(&self, progress_series: &[f64]) -> Result<Vec<State>> {
        if progress_series.len() < 2 {
            return Ok(Vec::new());
        }

        let positions = self.positions(progress_series)?;
        Ok(positions
            .windows(2)
            .map(|pair| state_between(pair[0], pair[1]))
            .collect())
    }

    /// Same result as [`Path::chain_state`], computed in parallel
    pub fn par_chain_state(&self, progress_series: &[f64]) -> Result<Vec<State>> {
        #[cfg(feature = "profiling")]
        profiling::scope!("path::par_chain_state");

        if progress_series.len() < 2 {
            return Ok(Vec::new());
        }

        let positions: Vec<Coordinate> = progress_series
            .par_iter()
            .map(|&progress| self.position(progress))
            .collect::<Result<_>>()?;
        Ok(positions
            .par_windows(2)
            .map(|pair| state_between(pair[0], pair[1]))
            .collect())
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[inline]
    pub fn segment(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Global progress at which segment `index` starts
    #[inline]
    pub fn segment_offset(&self, index: usize) -> Option<f64> {
        if index < self.segments.len() {
            self.cumulative_distances.get(index).copied()
        } else {
            None
        }
    }

    /// Segment start offsets followed by the total distance
    #[inline]
    pub fn cumulative_distances(&self) -> &[f64] {
        &self.cumulative_distances
    }

    /// Sum of all segment lengths
    ///
    /// This is O(1) as the value is computed during construction.
    #[inline]
    pub fn total_distance(&self) -> f64 {
        self.cumulative_distances.last().copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn boundary_tolerance(&self) -> f64 {
        self.boundary_tolerance
    }
}

#[inline]
fn state_between(from: Coordinate, to: Coordinate) -> State {
    let midpoint = from.midpoint(to);
    State {
        latitude: midpoint.latitude,
        longitude: midpoint.longitude,
        bearing_degrees: bearing(from, to),
    }
}

fn check_contiguity<D>(
    id: &str,
    segments: &[Segment],
    distance_fn: &D,
    tolerance: f64,
) -> Result<()>
where
    D: DistanceFunction + ?Sized,
{
    for (index, pair) in segments.windows(2).enumerate() {
        let gap = distance_fn.distance(pair[0].last(), pair[1].first());
        if gap > tolerance {
            return Err(RouteError::Configuration(format!(
                "path '{id}': segment {} ('{}') ends {gap} away from the start of segment {} ('{}')",
                index,
                pair[0].id(),
                index + 1,
                pair[1].id()
            )));
        }
    }
    Ok(())
}
