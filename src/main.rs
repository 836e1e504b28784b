//! Shelf - a personal PDF library and reader.
//!
//! This is the main entry point for the shelf web server.
//! The application is organized into the following modules:
//!
//! - `storage`: Key-value persistence (sled)
//! - `session`: Login, implicit registration and logout
//! - `library`: The document list and its persistence
//! - `upload`: PDF intake, encoding and naming
//! - `viewer`: Blob references for the embedded reader
//! - `share`: Share links and importing them
//! - `app`: The controller tying it all together
//! - `handlers` / `templates`: HTTP routes and HTML rendering

use std::sync::Arc;

use shelf::{router, AppState, Config};
use tower_http::trace::TraceLayer;
use tracing::info;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shelf=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;
    let addr = config.addr;
    let db_path = config.db_path.clone();

    let state = Arc::new(AppState::open(config)?);
    let app = router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Shelf running at http://{}", addr);
    info!("Database: {}", db_path.display());

    axum::serve(listener, app).await?;
    Ok(())
}
