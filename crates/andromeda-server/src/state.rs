//! Application state shared across handlers.

use std::sync::Arc;

use andromeda_core::{Clock, Config, SystemClock};

/// Shared application state.
///
/// Configuration is fixed at startup, so handlers read it without locking.
pub struct AppState {
    /// Effective configuration.
    pub config: Config,
    /// Source of "now" for the current-time endpoint.
    pub clock: Arc<dyn Clock>,
}

/// Handle passed to every handler.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create state that reads the system clock.
    #[must_use]
    pub fn new(config: Config) -> SharedState {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create state with an explicit clock.
    #[must_use]
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> SharedState {
        Arc::new(Self { config, clock })
    }
}
