//! Shared application state.

use std::sync::Arc;

use searchtrack_core::clock::Clock;
use searchtrack_store::SqliteSearchStore;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// SQLite-backed analytics store.
    pub store: SqliteSearchStore,
    /// Time source; swapped for a fixed clock in tests.
    pub clock: Arc<dyn Clock>,
    /// Expected API token, derived from the shared secret at startup.
    pub api_token: String,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(store: SqliteSearchStore, clock: Arc<dyn Clock>, api_token: String) -> Self {
        Self {
            store,
            clock,
            api_token,
        }
    }
}
