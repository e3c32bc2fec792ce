//! Logging initialization and configuration.

use std::io;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Initializes the logging subsystem based on configuration.
///
/// Events go to stderr so command output on stdout stays machine-readable.
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(io::stderr);
            subscriber.with(json_layer).init();
        }
        "pretty" => {
            let pretty_layer = fmt::layer()
                .pretty()
                .with_target(true)
                .with_writer(io::stderr);
            subscriber.with(pretty_layer).init();
        }
        _ => {
            let compact_layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(io::stderr);
            subscriber.with(compact_layer).init();
        }
    }
}
