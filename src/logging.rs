// src/logging.rs
// =============================================================================
// Sets up the tracing subscriber.
//
// Log lines go to stderr so `--json` output on stdout stays machine-readable.
// The level is controlled by RUST_LOG, e.g.:
//   RUST_LOG=repo_finder=debug repo-finder search tokio
// =============================================================================

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "repo_finder=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
