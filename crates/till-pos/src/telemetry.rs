//! # Telemetry
//!
//! Structured logging setup.
//!
//! ## Log Levels
//! - `debug` - per-operation detail (queries, decrements)
//! - `info`  - state transitions (sale recorded, resets)
//! - `warn`  - rejected operations (out of stock, short payment)
//! - `error` - storage failures

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "info,till=debug,sqlx=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over `configured`, which wins over
/// [`DEFAULT_LOG_FILTER`]. Returns `false` if a global subscriber was
/// already installed, in which case nothing changes.
pub fn init_tracing(configured: Option<&str>) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        configured
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
