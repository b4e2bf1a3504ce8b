//! Diagnostics setup.

use crate::config::CliConfig;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
#[must_use]
pub fn default_filter(config: &CliConfig) -> String {
    let level = config.verbosity.filter_level();
    format!("robomission={level},robomission_cli={level}")
}

/// Install the global subscriber on stderr. `RUST_LOG` overrides the
/// verbosity flags. Calling it twice is harmless.
pub fn init_logging(config: &CliConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(config)));

    let json = config.log_json.then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_current_span(false)
    });
    let text = (!config.log_json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_ansi(config.use_color())
            .with_writer(std::io::stderr)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .try_init();
}
