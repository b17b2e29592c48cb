use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::formatter::CustomFormatter;

static SUBSCRIBER_INIT: std::sync::Once = std::sync::Once::new();

/// Installs the global tracing subscriber. Safe to call more than once; only the first call counts.
pub fn setup_logging() {
    SUBSCRIBER_INIT.call_once(|| {
        // RUST_LOG overrides; default to info for this crate and warn elsewhere
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("warn,{name}=info", name = env!("CARGO_CRATE_NAME"))));

        let result = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().event_format(CustomFormatter))
            .with(ErrorLayer::default())
            .try_init();

        if let Err(error) = result {
            eprintln!("Failed to install tracing subscriber: {error}");
        }
    });
}
