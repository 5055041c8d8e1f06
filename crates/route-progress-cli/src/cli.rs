use clap::{Parser, Subcommand, ValueEnum};
use route_progress_lib::{Config, Metric};
use std::path::PathBuf;

/// Query positions and headings along a GPX route by distance travelled
#[derive(Parser, Debug)]
#[command(name = "route-progress", version, about)]
pub struct Args {
    /// GPX file holding the route definition (tracks and routes, in document order)
    pub gpx_file: PathBuf,

    /// Metric used to measure the route; progress values and radii use its unit
    #[arg(long, value_enum, default_value_t = MetricArg::Ellipsoidal)]
    pub metric: MetricArg,

    /// Override of the end-of-route snap tolerance
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Reject routes whose consecutive segments do not meet
    #[arg(long)]
    pub check_contiguity: bool,

    /// Maximum gap between consecutive segments with --check-contiguity
    #[arg(long, default_value_t = 1.0)]
    pub contiguity_tolerance: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the route id, segment count and total distance
    Info,
    /// Position after travelling each PROGRESS
    Position {
        #[arg(required = true, allow_negative_numbers = true)]
        progress: Vec<f64>,
    },
    /// Position at a fraction of the total distance
    Ratio {
        #[arg(allow_negative_numbers = true)]
        ratio: f64,
    },
    /// Segment owning PROGRESS and the progress within it
    Locate {
        #[arg(allow_negative_numbers = true)]
        progress: f64,
    },
    /// Midpoint and heading between each consecutive pair of PROGRESS values
    Chain {
        #[arg(required = true, num_args = 2.., allow_negative_numbers = true)]
        progress: Vec<f64>,
    },
    /// Whether the position at PROGRESS lies inside a circular window
    Inside {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long)]
        radius: f64,
        #[arg(allow_negative_numbers = true)]
        progress: f64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricArg {
    Planar,
    Ellipsoidal,
    Haversine,
}

impl From<MetricArg> for Metric {
    fn from(metric: MetricArg) -> Self {
        match metric {
            MetricArg::Planar => Metric::Planar,
            MetricArg::Ellipsoidal => Metric::Ellipsoidal,
            MetricArg::Haversine => Metric::Haversine,
        }
    }
}

impl Args {
    /// Construction settings requested on the command line
    pub fn config(&self) -> Config {
        Config {
            boundary_tolerance: self.tolerance,
            check_contiguity: self.check_contiguity,
            contiguity_tolerance: self.contiguity_tolerance,
        }
    }
}
