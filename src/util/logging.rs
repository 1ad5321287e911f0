use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

const DEFAULT_FILTER: &str = "tradedesk=info";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Calling this twice keeps the first subscriber.
pub fn init_logger(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let result = match format {
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(layer.compact())
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .try_init(),
    };

    if let Err(err) = result {
        tracing::debug!("logger already initialised: {err}");
    }
}
