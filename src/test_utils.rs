//! Shared test utilities.
//!
//! Common helpers for initializing test tracing and building seeded
//! fixtures.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::handler::RequestHandler;
use crate::store::ProductStore;

/// Initializes tracing for a test, tolerating repeated calls.
pub(crate) fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_test_writer() // Crucial for `cargo test` output
        .try_init(); // Use try_init to avoid panic if already initialized
}

/// A request handler over a freshly seeded store.
pub(crate) fn seeded_handler() -> RequestHandler {
    RequestHandler::new(Arc::new(ProductStore::new()))
}
