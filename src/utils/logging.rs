//! Structured logging setup.
//!
//! The crate itself only emits `tracing` events; installing a subscriber is left to the
//! application. `init_logging` is a convenience for binaries, demos and tests.

use crate::config::LoggingConfig;
use tracing::info;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt::format::FmtSpan;

/// Install a global fmt subscriber built from `config`.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false` if a global
/// subscriber was already installed, which makes repeated calls harmless.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level).into())
        .from_env_lossy();

    let span_events = if config.log_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(span_events)
        .with_target(true);

    let installed = if config.json_format {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        info!(
            app = %config.app_name,
            level = %config.log_level,
            json = config.json_format,
            "Logging initialized"
        );
    }
    installed
}
