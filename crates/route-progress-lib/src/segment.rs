//! Polyline segments with a cumulative distance index
//!
//! A [`Segment`] is one stretch of a route between two named waypoints. It precomputes the
//! running distance to every vertex at construction, so resolving a progress value into a
//! coordinate is a binary search followed by a linear interpolation.

use crate::{Config, Coordinate, DistanceFunction, Result, RouteError, utils};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One polyline stretch of a route with its own local progress parameterization
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Segment {
    /// Caller-defined identifier
    id: String,
    /// Descriptive identifier of the starting waypoint
    source: String,
    /// Descriptive identifier of the ending waypoint
    target: String,
    /// Ordered polyline vertices (never empty)
    coordinates: Vec<Coordinate>,
    /// Distance from the first vertex to each vertex, parallel to `coordinates`
    cumulative_distances: Vec<f64>,
    /// Overshoot past the end that still resolves to the last vertex
    boundary_tolerance: f64,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Segment {
    /// Create a segment, measuring the polyline with `distance_fn`
    ///
    /// # Arguments
    /// * `id` - Identifier of the segment
    /// * `source` / `target` - Descriptive waypoint identifiers (not used geometrically)
    /// * `coordinates` - Ordered vertices, at least one
    /// * `distance_fn` - Metric defining the unit of progress for this segment
    ///
    /// # Returns
    /// The segment, or `RouteError::Configuration` if `coordinates` is empty
    pub fn new<D>(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        coordinates: Vec<Coordinate>,
        distance_fn: &D,
    ) -> Result<Self>
    where
        D: DistanceFunction + ?Sized,
    {
        Self::with_config(
            id,
            source,
            target,
            coordinates,
            distance_fn,
            &Config::default(),
        )
    }

    /// Create a segment with explicit construction settings
    pub fn with_config<D>(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        coordinates: Vec<Coordinate>,
        distance_fn: &D,
        config: &Config,
    ) -> Result<Self>
    where
        D: DistanceFunction + ?Sized,
    {
        #[cfg(feature = "profiling")]
        profiling::scope!("segment::new");

        let id = id.into();
        config.validate()?;
        if coordinates.is_empty() {
            return Err(RouteError::Configuration(format!(
                "segment '{id}' has no coordinates"
            )));
        }

        let cumulative_distances = utils::cumulative_distances(&coordinates, distance_fn);
        let segment = Segment {
            id,
            source: source.into(),
            target: target.into(),
            coordinates,
            cumulative_distances,
            boundary_tolerance: config.boundary_tolerance_for(distance_fn),
        };
        tracing::debug!(
            "Built segment '{}' with {} points, total distance {}",
            segment.id,
            segment.coordinates.len(),
            segment.total_distance()
        );
        Ok(segment)
    }

    /// Create a segment from a precomputed cumulative distance array
    ///
    /// The array must have one entry per coordinate, start at `0.0`, be finite and
    /// non-decreasing. `boundary_tolerance` should match the unit the array was computed in.
    pub fn with_cumulative_distances(
        id: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        coordinates: Vec<Coordinate>,
        cumulative_distances: Vec<f64>,
        boundary_tolerance: f64,
    ) -> Result<Self> {
        let id = id.into();
        if coordinates.is_empty() {
            return Err(RouteError::Configuration(format!(
                "segment '{id}' has no coordinates"
            )));
        }
        if coordinates.len() != cumulative_distances.len() {
            return Err(RouteError::Configuration(format!(
                "segment '{id}' has {} coordinates but {} cumulative distances",
                coordinates.len(),
                cumulative_distances.len()
            )));
        }
        utils::validate_cumulative(&cumulative_distances)?;
        utils::validate_tolerance("boundary_tolerance", boundary_tolerance)?;

        Ok(Segment {
            id,
            source: source.into(),
            target: target.into(),
            coordinates,
            cumulative_distances,
            boundary_tolerance,
        })
    }

    /// Coordinate reached after travelling `progress` along the segment
    ///
    /// `progress` must lie in `[0, total_distance]`. Values at most `boundary_tolerance`
    /// away from `total_distance` resolve to the last coordinate.
    ///
    /// Interpolation is linear in latitude and longitude between the two bracketing
    /// vertices, which assumes the polyline is dense enough for chords to match arcs.
    pub fn position(&self, progress: f64) -> Result<Coordinate> {
        let total = self.total_distance();
        if !(0.0..=total + self.boundary_tolerance).contains(&progress) {
            return Err(RouteError::OutOfRange {
                value: progress,
                min: 0.0,
                max: total,
            });
        }

        if progress == 0.0 {
            return Ok(self.first());
        }
        if (progress - total).abs() <= self.boundary_tolerance {
            return Ok(self.last());
        }

        let cumulative = &self.cumulative_distances;
        let index = utils::lower_bound(cumulative, progress);
        if index == 0 || index >= cumulative.len() {
            return Err(internal_error(format!(
                "segment '{}': search for progress {progress} landed on index {index} of {}",
                self.id,
                cumulative.len()
            )));
        }

        let d0 = cumulative[index - 1];
        let d1 = cumulative[index];
        if d1 <= d0 {
            return Err(internal_error(format!(
                "segment '{}': empty bracket [{d0}, {d1}] for progress {progress}",
                self.id
            )));
        }

        let delta = (progress - d0) / (d1 - d0);
        Ok(self.coordinates[index - 1].lerp(self.coordinates[index], delta))
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

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[inline]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    #[inline]
    pub fn cumulative_distances(&self) -> &[f64] {
        &self.cumulative_distances
    }

    /// Length of the polyline in the unit of its metric
    ///
    /// This is O(1), the value is the last entry of the cumulative index.
    #[inline]
    pub fn total_distance(&self) -> f64 {
        self.cumulative_distances.last().copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn boundary_tolerance(&self) -> f64 {
        self.boundary_tolerance
    }

    #[inline]
    pub fn first(&self) -> Coordinate {
        self.coordinates[0]
    }

    #[inline]
    pub fn last(&self) -> Coordinate {
        self.coordinates[self.coordinates.len() - 1]
    }

    /// Number of vertices
    #[inline]
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    /// Always false for a constructed segment
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

pub(crate) fn internal_error(message: String) -> RouteError {
    tracing::error!("{message}");
    RouteError::Internal(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EllipsoidalDistance, PlanarDistance};

    fn coords(pairs: &[(f64, f64)]) -> Vec<Coordinate> {
        pairs.iter().copied().map(Coordinate::from).collect()
    }

    fn planar_segment(pairs: &[(f64, f64)]) -> Segment {
        Segment::new("s", "a", "b", coords(pairs), &PlanarDistance).unwrap()
    }

    fn assert_close(actual: Coordinate, expected: Coordinate) {
        assert!(
            (actual.latitude - expected.latitude).abs() < 1e-9
                && (actual.longitude - expected.longitude).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_two_point_planar_segment() {
        let segment = planar_segment(&[(0.0, 0.0), (0.0, 10.0)]);

        assert_eq!(segment.total_distance(), 10.0);
        assert_eq!(segment.position(5.0).unwrap(), Coordinate::new(0.0, 5.0));
    }

    #[test]
    fn test_empty_segment_fails() {
        let result = Segment::new("s", "a", "b", Vec::new(), &PlanarDistance);
        assert!(matches!(result, Err(RouteError::Configuration(_))));
    }

    #[test]
    fn test_metadata_accessors() {
        let segment = Segment::new(
            "seg-1",
            "Central",
            "North",
            coords(&[(1.0, 2.0), (3.0, 4.0)]),
            &PlanarDistance,
        )
        .unwrap();

        assert_eq!(segment.id(), "seg-1");
        assert_eq!(segment.source(), "Central");
        assert_eq!(segment.target(), "North");
        assert_eq!(segment.len(), 2);
        assert!(!segment.is_empty());
        assert_eq!(segment.first(), Coordinate::new(1.0, 2.0));
        assert_eq!(segment.last(), Coordinate::new(3.0, 4.0));
        assert_eq!(segment.boundary_tolerance(), 1e-8);
    }

    #[test]
    fn test_position_at_vertices() {
        let segment = planar_segment(&[(0.0, 0.0), (0.0, 3.0), (4.0, 3.0)]);

        assert_eq!(segment.cumulative_distances(), &[0.0, 3.0, 7.0]);
        assert_close(segment.position(0.0).unwrap(), Coordinate::new(0.0, 0.0));
        assert_close(segment.position(3.0).unwrap(), Coordinate::new(0.0, 3.0));
        assert_close(segment.position(7.0).unwrap(), Coordinate::new(4.0, 3.0));
        assert_close(segment.position(5.0).unwrap(), Coordinate::new(2.0, 3.0));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let segment = planar_segment(&[(0.0, 0.0), (0.0, 10.0)]);

        assert!(matches!(
            segment.position(-1.0),
            Err(RouteError::OutOfRange { .. })
        ));
        assert!(matches!(
            segment.position(11.0),
            Err(RouteError::OutOfRange { .. })
        ));
        assert!(matches!(
            segment.position(f64::NAN),
            Err(RouteError::OutOfRange { .. })
        ));
        assert!(matches!(
            segment.position(f64::INFINITY),
            Err(RouteError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_end_tolerance_snaps_to_last_coordinate() {
        let segment = planar_segment(&[(0.0, 0.0), (0.0, 10.0)]);

        assert_eq!(
            segment.position(10.0 + 5e-9).unwrap(),
            Coordinate::new(0.0, 10.0)
        );
        assert_eq!(
            segment.position(10.0 - 5e-9).unwrap(),
            Coordinate::new(0.0, 10.0)
        );
        assert!(segment.position(10.0 + 1e-6).is_err());
    }

    #[test]
    fn test_single_coordinate_segment() {
        let segment = planar_segment(&[(45.0, 7.0)]);

        assert_eq!(segment.total_distance(), 0.0);
        assert_eq!(segment.cumulative_distances(), &[0.0]);
        assert_eq!(segment.position(0.0).unwrap(), Coordinate::new(45.0, 7.0));
        assert!(segment.position(1.0).is_err());
        assert_eq!(
            segment.position_from_ratio(1.0).unwrap(),
            Coordinate::new(45.0, 7.0)
        );
    }

    #[test]
    fn test_duplicate_vertices_are_skipped() {
        let segment = planar_segment(&[(0.0, 0.0), (0.0, 2.0), (0.0, 2.0), (0.0, 4.0)]);

        assert_eq!(segment.cumulative_distances(), &[0.0, 2.0, 2.0, 4.0]);
        assert_close(segment.position(2.0).unwrap(), Coordinate::new(0.0, 2.0));
        assert_close(segment.position(3.0).unwrap(), Coordinate::new(0.0, 3.0));
    }

    #[test]
    fn test_position_from_ratio() {
        let segment = planar_segment(&[(0.0, 0.0), (10.0, 20.0)]);

        assert_close(
            segment.position_from_ratio(0.25).unwrap(),
            Coordinate::new(2.5, 5.0),
        );
        assert!(matches!(
            segment.position_from_ratio(-0.1),
            Err(RouteError::OutOfRange { .. })
        ));
        assert!(matches!(
            segment.position_from_ratio(1.1),
            Err(RouteError::OutOfRange { .. })
        ));
        assert!(segment.position_from_ratio(f64::NAN).is_err());
    }

    #[test]
    fn test_repeated_queries_are_identical() {
        let segment = planar_segment(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.5)]);
        let first = segment.position(1.7).unwrap();
        for _ in 0..10 {
            assert_eq!(segment.position(1.7).unwrap(), first);
        }
    }

    #[test]
    fn test_ellipsoidal_segment_end_matches_last_coordinate() {
        let coordinates = coords(&[(51.5074, -0.1278), (51.5076, -0.1276), (51.5078, -0.1274)]);
        let segment = Segment::new("london", "a", "b", coordinates, &EllipsoidalDistance).unwrap();

        assert!(segment.total_distance() > 0.0);
        assert!(segment.total_distance() < 1000.0);
        assert_eq!(segment.boundary_tolerance(), 1e-6);
        assert_eq!(
            segment.position(segment.total_distance()).unwrap(),
            Coordinate::new(51.5078, -0.1274)
        );
    }

    #[test]
    fn test_config_overrides_tolerance() {
        let config = Config {
            boundary_tolerance: Some(0.5),
            ..Config::default()
        };
        let segment = Segment::with_config(
            "s",
            "a",
            "b",
            coords(&[(0.0, 0.0), (0.0, 10.0)]),
            &PlanarDistance,
            &config,
        )
        .unwrap();

        assert_eq!(segment.position(10.4).unwrap(), Coordinate::new(0.0, 10.0));
        assert!(segment.position(10.6).is_err());
    }

    #[test]
    fn test_precomputed_cumulative_distances() {
        let segment = Segment::with_cumulative_distances(
            "s",
            "a",
            "b",
            coords(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]),
            vec![0.0, 100.0, 300.0],
            1e-6,
        )
        .unwrap();

        assert_eq!(segment.total_distance(), 300.0);
        assert_close(segment.position(200.0).unwrap(), Coordinate::new(0.0, 1.5));
    }

    #[test]
    fn test_precomputed_cumulative_distances_validated() {
        let mismatched = Segment::with_cumulative_distances(
            "s",
            "a",
            "b",
            coords(&[(0.0, 0.0), (0.0, 1.0)]),
            vec![0.0],
            1e-6,
        );
        assert!(matches!(mismatched, Err(RouteError::Configuration(_))));

        let decreasing = Segment::with_cumulative_distances(
            "s",
            "a",
            "b",
            coords(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]),
            vec![0.0, 2.0, 1.0],
            1e-6,
        );
        assert!(matches!(decreasing, Err(RouteError::Configuration(_))));

        let empty = Segment::with_cumulative_distances("s", "a", "b", vec![], vec![], 1e-6);
        assert!(matches!(empty, Err(RouteError::Configuration(_))));
    }

    #[test]
    fn test_corrupted_index_reports_internal_error() {
        // Bypasses validation, as deserialization would
        let segment = Segment {
            id: "broken".to_string(),
            source: "a".to_string(),
            target: "b".to_string(),
            coordinates: coords(&[(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]),
            cumulative_distances: vec![5.0, 6.0, 10.0],
            boundary_tolerance: 1e-8,
        };

        assert!(matches!(
            segment.position(1.0),
            Err(RouteError::Internal(_))
        ));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn valid_coord() -> impl Strategy<Value = Coordinate> {
            (-80.0..=80.0, -179.0..=179.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
        }

        proptest! {
            #[test]
            fn prop_cumulative_distances_non_decreasing(
                coordinates in prop::collection::vec(valid_coord(), 1..20)
            ) {
                let segment =
                    Segment::new("s", "a", "b", coordinates.clone(), &EllipsoidalDistance).unwrap();
                let cumulative = segment.cumulative_distances();
                prop_assert_eq!(cumulative.len(), coordinates.len());
                prop_assert_eq!(cumulative[0], 0.0);
                prop_assert!(cumulative.windows(2).all(|pair| pair[0] <= pair[1]));
                prop_assert_eq!(
                    segment.position(segment.total_distance()).unwrap(),
                    *coordinates.last().unwrap()
                );
            }

            #[test]
            fn prop_two_point_interpolation(
                start in valid_coord(),
                end in valid_coord(),
                ratio in 0.0..=1.0f64
            ) {
                prop_assume!(PlanarDistance.distance(start, end) > 1e-3);
                let segment = Segment::new("s", "a", "b", vec![start, end], &PlanarDistance).unwrap();
                let position = segment.position(ratio * segment.total_distance()).unwrap();
                let expected = Coordinate::new(
                    start.latitude + ratio * (end.latitude - start.latitude),
                    start.longitude + ratio * (end.longitude - start.longitude),
                );
                // Near the end the snap tolerance may pick the last vertex instead
                prop_assert!((position.latitude - expected.latitude).abs() < 1e-7);
                prop_assert!((position.longitude - expected.longitude).abs() < 1e-7);
            }
        }
    }
}
