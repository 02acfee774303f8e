//! Logging and tracing bootstrap for Folio.

use anyhow::anyhow;
use folio_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// The filter honors `RUST_LOG` and falls back to `info`. Must be called
/// once, before any other component emits events.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match settings.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|error| anyhow!("failed to install tracing subscriber: {error}"))?;

    tracing::info!(target: "folio-telemetry", format = ?settings.log_format, "telemetry initialized");

    Ok(())
}
