//! Tracing setup: structured logging with span definitions.

pub mod spans;

use concord_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted for the log filter.
pub const LOG_ENV_VAR: &str = "CONCORD_LOG";

/// Initialize from the `[observability]` config section.
///
/// `CONCORD_LOG` still wins over `log_level` when set. Safe to call more than
/// once; later calls are ignored.
pub fn init_from_config(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    // try_init: a second subscriber (e.g. from a test harness) is not an error here.
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
}
