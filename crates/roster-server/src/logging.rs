//! Logging setup with roster segment prefixes.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing with a default filter.
///
/// `RUST_LOG` wins over `default_filter` when set. Safe to call more than
/// once; only the first call installs a subscriber.
pub fn init_with_filter(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init();
}

/// Segment prefixes for log lines.
pub mod prefix {
    /// Startup milestones
    pub const OPEN: &str = "✿";
    /// Shutdown milestones
    pub const CLOSE: &str = "❀";
    /// Storage operations
    pub const DB: &str = "⊔";
    /// Query traffic
    pub const QUERY: &str = "꩜";
}
