//! Logging bootstrap for the catalog binaries.

use catalog_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over `telemetry.level`; an unparsable level falls back to `info`.
/// Calling this more than once keeps the first subscriber.
pub fn init(settings: &TelemetrySettings) {
    let filter = env_filter(settings);

    let installed = match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .try_init(),
    };

    match installed {
        Ok(()) => tracing::debug!(
            target: "catalog-telemetry",
            format = ?settings.log_format,
            "tracing subscriber installed"
        ),
        Err(_) => tracing::debug!(
            target: "catalog-telemetry",
            "tracing subscriber already installed"
        ),
    }
}

fn env_filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}
