//! GPX route import
//!
//! Builds a [`Path`] from a GPX document: every non-empty track segment, then every route
//! (`<rte>`), becomes one [`Segment`] in document order. This only reads route definitions;
//! the points are taken as given.

use crate::{Config, Coordinate, DistanceFunction, Path, Result, RouteError, Segment};
use std::io::BufReader;

/// Build a path from parsed GPX data
///
/// # Arguments
/// * `id` - Identifier of the resulting path
/// * `gpx_data` - Parsed GPX document
/// * `distance_fn` - Metric used to measure every segment
/// * `config` - Construction settings applied to every segment and to the path
///
/// # Returns
/// The path, or `RouteError::Configuration` if the document contains no points
pub fn path_from_gpx<D>(
    id: impl Into<String>,
    gpx_data: &gpx::Gpx,
    distance_fn: &D,
    config: &Config,
) -> Result<Path>
where
    D: DistanceFunction + ?Sized,
{
    #[cfg(feature = "profiling")]
    profiling::scope!("import::path_from_gpx");

    let id = id.into();
    let mut segments = Vec::new();

    for (track_index, track) in gpx_data.tracks.iter().enumerate() {
        for (segment_index, track_segment) in track.segments.iter().enumerate() {
            let segment_id = format!("{track_index}-{segment_index}");
            if let Some(segment) =
                segment_from_waypoints(segment_id, &track_segment.points, distance_fn, config)?
            {
                segments.push(segment);
            }
        }
    }

    for (route_index, route) in gpx_data.routes.iter().enumerate() {
        let segment_id = format!("rte-{route_index}");
        if let Some(segment) =
            segment_from_waypoints(segment_id, &route.points, distance_fn, config)?
        {
            segments.push(segment);
        }
    }

    if segments.is_empty() {
        return Err(RouteError::Configuration(format!(
            "GPX document for path '{id}' has no points"
        )));
    }

    tracing::debug!("Imported {} segments into path '{}'", segments.len(), id);
    Path::with_config(id, segments, distance_fn, config)
}

/// Read a GPX file and build a path from it
pub fn load_path<P, D>(
    file: P,
    id: impl Into<String>,
    distance_fn: &D,
    config: &Config,
) -> Result<Path>
where
    P: AsRef<std::path::Path>,
    D: DistanceFunction + ?Sized,
{
    #[cfg(feature = "profiling")]
    profiling::scope!("import::load_path");

    let file = file.as_ref();
    tracing::debug!("Reading GPX file {}", file.display());
    let reader = BufReader::new(std::fs::File::open(file)?);
    let gpx_data = gpx::read(reader)?;
    path_from_gpx(id, &gpx_data, distance_fn, config)
}

fn segment_from_waypoints<D>(
    segment_id: String,
    waypoints: &[gpx::Waypoint],
    distance_fn: &D,
    config: &Config,
) -> Result<Option<Segment>>
where
    D: DistanceFunction + ?Sized,
{
    let (Some(first), Some(last)) = (waypoints.first(), waypoints.last()) else {
        tracing::warn!("Skipping GPX segment {} without points", segment_id);
        return Ok(None);
    };

    let source = first
        .name
        .clone()
        .unwrap_or_else(|| format!("{segment_id}:start"));
    let target = last
        .name
        .clone()
        .unwrap_or_else(|| format!("{segment_id}:end"));
    let coordinates: Vec<Coordinate> = waypoints.iter().map(Coordinate::from).collect();

    Segment::with_config(segment_id, source, target, coordinates, distance_fn, config).map(Some)
}
