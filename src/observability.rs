use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogFormat, ObservabilityConfig};

/// Install the global tracing subscriber
///
/// `RUST_LOG` wins over `observability.log_level` when set.
pub fn init(config: &ObservabilityConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let result = match config.log_format {
        LogFormat::Json => fmt().with_env_filter(filter).json().try_init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).try_init(),
    };

    if let Err(e) = result {
        ::tracing::warn!(error = %e, "tracing init failed");
    }
}
