//! Shelf library - re-exports for testing and external use.
//!
//! A small personal PDF library: users log in (registering on first use),
//! upload PDFs, search and read them in an embedded viewer, share them
//! through self-contained links, and comment on each document. Everything
//! lives in one local sled database.

use axum::{
    extract::DefaultBodyLimit,
    http::{header::HOST, HeaderMap},
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod app;
pub mod error;
pub mod handlers;
pub mod ids;
pub mod library;
pub mod models;
pub mod session;
pub mod share;
pub mod storage;
pub mod templates;
pub mod upload;
pub mod viewer;

// ============================================================================
// Configuration
// ============================================================================

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DB_PATH: &str = ".shelf_db";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 64;

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub db_path: PathBuf,
    pub max_upload_bytes: usize,
    /// Origin used in share links. Derived from the Host header when unset.
    pub public_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.parse().unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            public_origin: None,
        }
    }
}

impl Config {
    /// Read `SHELF_ADDR`, `SHELF_DB_PATH`, `SHELF_MAX_UPLOAD_MB` and
    /// `SHELF_PUBLIC_ORIGIN`, falling back to the defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("SHELF_ADDR") {
            config.addr = addr.parse()?;
        }
        if let Ok(path) = std::env::var("SHELF_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Ok(mb) = std::env::var("SHELF_MAX_UPLOAD_MB") {
            config.max_upload_bytes = parse_upload_limit(&mb)?;
        }
        config.public_origin = std::env::var("SHELF_PUBLIC_ORIGIN").ok();

        Ok(config)
    }
}

/// Convert a megabyte count into the body limit in bytes.
fn parse_upload_limit(mb: &str) -> anyhow::Result<usize> {
    mb.trim()
        .parse::<usize>()?
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("SHELF_MAX_UPLOAD_MB is too large: {}", mb))
}

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    app: Mutex<app::App>,
    pub blobs: viewer::BlobRegistry,
    pub config: Config,
}

impl AppState {
    /// Open the sled database named in `config` and restore the library.
    pub fn open(config: Config) -> error::Result<Self> {
        let store = storage::SledStore::open(&config.db_path)?;
        Self::with_store(Arc::new(store), Arc::new(ids::UuidGenerator), config)
    }

    pub fn with_store(
        store: Arc<dyn storage::KeyValueStore>,
        ids: Arc<dyn ids::IdGenerator>,
        config: Config,
    ) -> error::Result<Self> {
        let blobs = viewer::BlobRegistry::new();
        let app = app::App::load(store, ids, blobs.clone())?;
        Ok(Self {
            app: Mutex::new(app),
            blobs,
            config,
        })
    }

    pub fn app(&self) -> MutexGuard<'_, app::App> {
        self.app.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark an upload as in flight. The status is settled when the returned
    /// guard drops, including when the request is abandoned mid-body.
    pub fn begin_upload(self: &Arc<Self>) -> error::Result<UploadInFlight> {
        self.app().mark_uploading()?;
        Ok(UploadInFlight {
            state: Arc::clone(self),
        })
    }

    /// Origin for share links: the configured one, else `http://<Host>`.
    pub fn origin(&self, headers: &HeaderMap) -> String {
        if let Some(ref origin) = self.config.public_origin {
            return origin.clone();
        }
        let host = headers
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| self.config.addr.to_string());
        format!("http://{}", host)
    }
}

pub struct UploadInFlight {
    state: Arc<AppState>,
}

impl Drop for UploadInFlight {
    fn drop(&mut self) {
        self.state.app().settle_upload();
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    let max_upload = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(handlers::index))
        .route("/login", get(handlers::login_page).post(handlers::login_submit))
        .route("/logout", get(handlers::logout))
        // Upload
        .route("/upload", post(handlers::upload))
        .route("/upload/name", post(handlers::name_upload))
        .route("/upload/cancel", post(handlers::cancel_upload))
        .route("/dismiss", post(handlers::dismiss))
        // Reader
        .route("/read/{id}", get(handlers::read))
        .route("/close", get(handlers::close))
        .route("/blob/{id}", get(handlers::blob))
        // Comments
        .route("/comments/{id}", get(handlers::toggle_comments))
        .route("/comment/{id}", post(handlers::comment))
        // Delete
        .route("/delete/confirm", post(handlers::confirm_delete))
        .route("/delete/cancel", post(handlers::cancel_delete))
        .route("/delete/{id}", post(handlers::request_delete))
        // Share
        .route("/share/{id}", get(handlers::share))
        .route("/import", post(handlers::import))
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
}

// Re-export commonly used types
pub use app::App;
pub use error::ShelfError;
pub use library::Library;
pub use models::{AppStatus, Comment, PdfFile, PendingUpload, Registry, User};
pub use session::{current_user, login_or_register, logout};
pub use share::{build_share_link, parse_share_fragment, SharedDocument};
pub use storage::{KeyValueStore, MemoryStore, SledStore};
pub use viewer::{BlobRegistry, ViewHandle, Viewer};
