use std::sync::Arc;

use dotenvy::dotenv;
use estoque::config;
use estoque::errors::Result;
use estoque::handler::RequestHandler;
use estoque::store::ProductStore;
use estoque::web::{AppState, router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()?;
    info!(host = %app_config.host, port = app_config.port, "Configuration loaded.");

    // 4. Initialize the seeded in-memory store shared by all handlers
    let store = Arc::new(ProductStore::new());
    info!("Product store initialized with seed data.");

    // 5. Serve the catalog routes
    let state = AppState::new(RequestHandler::new(store));
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(app_config.bind_addr()).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
