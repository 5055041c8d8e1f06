//! Route Progress Library - Distance-to-Position Interpolation Along Routes
//!
//! This library converts a scalar "distance travelled along a route" into a geographic
//! location, and a series of such distances into oriented poses. It is meant for vehicle
//! and train tracking or playback, where progress is known as odometry, cumulative trip
//! distance or an interpolated schedule value and must be rendered as a point on a map.
//!
//! # Architecture
//!
//! - **[`DistanceFunction`]**: Planar, ellipsoidal (WGS84 geodesic) and spherical metrics
//! - **[`Segment`]**: Immutable polyline with a precomputed cumulative distance index
//! - **[`Path`]**: Ordered chain of segments exposing one global progress parameterization
//! - **[`Window`]**: Circular geofence sharing the metric abstraction
//! - **[`import`]**: Builds paths from GPX route definitions
//!
//! # Performance Characteristics
//!
//! - **Build Time**: O(N) per segment, one distance evaluation per polyline edge
//! - **Query Time**: O(log S + log N) for a position, O(K·(log S + log N)) for K samples
//! - **Memory**: O(N) for coordinates plus one `f64` per vertex and per segment
//!
//! All structures are read-only once built, so a [`Path`] can be shared across threads
//! and queried concurrently without locks.

mod config;
mod coordinate;
pub mod import;
mod metric;
mod path;
mod segment;
pub mod utils;
mod window;

// Public API exports
pub use config::Config;
pub use coordinate::{Coordinate, State};
pub use metric::{
    DistanceFunction, EllipsoidalDistance, HaversineDistance, Metric, PlanarDistance, bearing,
};
pub use path::Path;
pub use segment::Segment;
pub use window::{Window, is_inside};

/// Error types for route construction and queries
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Invalid construction input; the caller must fix it, retrying will not help
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Value {value} is out of range [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    /// A lookup invariant was violated, which indicates a bug
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RouteError>;
