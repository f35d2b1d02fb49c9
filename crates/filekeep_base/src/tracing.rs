use crate::error::{FilekeepError, FilekeepResult};
pub use tracing::instrument;
pub use tracing::{debug, error, info, trace, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber: fmt output filtered by `RUST_LOG` (default `info`),
/// plus the error layer that lets [`FilekeepError`] capture span traces.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing() -> FilekeepResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| {
            Box::new(FilekeepError::message(format!(
                "Failed to install tracing subscriber: {}",
                e
            )))
        })
}
