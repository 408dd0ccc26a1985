//! votematch web server
//!
//! Run with: cargo run -p votematch-web

use tracing::info;
use tracing_subscriber::EnvFilter;
use votematch_config::Config;
use votematch_db::{load_catalog, InMemoryStore};
use votematch_web::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load_or_default()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting votematch web server...");

    let catalog = load_catalog(&config.catalog.path)?;
    let store = InMemoryStore::new(catalog);
    let state = AppState::in_memory(store, config.scoring.explanation_top_axes);

    let app = build_router(state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
