mod cli;
mod logging;

use clap::Parser;
use cli::{Args, Command};
use route_progress_lib::{Coordinate, Metric, Path, RouteError, Window, import};
use serde_json::{Value, json};
use std::process::ExitCode;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    logging::setup_logging();

    let args = Args::parse();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load the route named on the command line and answer the requested query
fn run(args: &Args) -> Result<String, CliError> {
    profiling::scope!("cli::run");

    let metric = Metric::from(args.metric);
    let id = args
        .gpx_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "route".to_string());
    let path = import::load_path(&args.gpx_file, id, &metric, &args.config())?;
    tracing::info!(
        "Loaded path '{}' ({} segments, total distance {} using {} metric)",
        path.id(),
        path.segments().len(),
        path.total_distance(),
        metric
    );

    let output = answer(&path, metric, &args.command)?;
    Ok(serde_json::to_string_pretty(&output)?)
}

fn answer(path: &Path, metric: Metric, command: &Command) -> Result<Value, CliError> {
    let value = match command {
        Command::Info => json!({
            "id": path.id(),
            "metric": metric.to_string(),
            "segments": path.segments().len(),
            "total_distance": path.total_distance(),
        }),
        Command::Position { progress } => serde_json::to_value(path.positions(progress)?)?,
        Command::Ratio { ratio } => serde_json::to_value(path.position_from_ratio(*ratio)?)?,
        Command::Locate { progress } => {
            let (index, local_progress) = path.locate(*progress)?;
            let segment = &path.segments()[index];
            json!({
                "segment_index": index,
                "segment_id": segment.id(),
                "source": segment.source(),
                "target": segment.target(),
                "local_progress": local_progress,
            })
        }
        Command::Chain { progress } => serde_json::to_value(path.par_chain_state(progress)?)?,
        Command::Inside {
            lat,
            lon,
            radius,
            progress,
        } => {
            let window = Window::new(Coordinate::new(*lat, *lon), *radius, metric)?;
            let position = path.position(*progress)?;
            json!({
                "position": position,
                "inside": window.contains(position),
            })
        }
    };
    Ok(value)
}
