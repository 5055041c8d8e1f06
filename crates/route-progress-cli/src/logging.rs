/*!
Logging setup for the command-line tool.

Logs go to stderr so stdout only carries query results. `RUST_LOG` is honoured when set;
otherwise debug builds log at DEBUG and release builds at INFO.
*/

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const DEBUG_FILTER: &str = "debug";
const RELEASE_FILTER: &str = "info";

/// Initialize the global tracing subscriber.
pub fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cfg!(debug_assertions) {
            DEBUG_FILTER
        } else {
            RELEASE_FILTER
        })
    });

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filter);
    tracing_subscriber::registry().with(fmt_layer).init();

    tracing::debug!("Logging initialized");
}
