//! Error type shared by the library, session and upload code paths.
//!
//! User-facing kinds (validation, wrong password, bad payloads) are rendered
//! inline by the handlers. Infrastructure kinds are logged and turned into a
//! plain 500 response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("Please enter both a name and a password")]
    Validation,

    #[error("Wrong password for this user")]
    Auth,

    #[error("Not logged in")]
    Unauthenticated,

    #[error("Stored document could not be decoded: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Only the owner may delete this document")]
    Forbidden,

    #[error("Invalid share link: {0}")]
    InvalidShareLink(String),

    #[error("Storage error: {0}")]
    Storage(#[from] sled::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ShelfError>;

impl IntoResponse for ShelfError {
    fn into_response(self) -> Response {
        let status = match &self {
            ShelfError::Unauthenticated => return Redirect::to("/login").into_response(),
            ShelfError::Validation
            | ShelfError::Upload(_)
            | ShelfError::Decode(_)
            | ShelfError::InvalidShareLink(_) => StatusCode::BAD_REQUEST,
            ShelfError::Auth => StatusCode::UNAUTHORIZED,
            ShelfError::Forbidden => StatusCode::FORBIDDEN,
            ShelfError::NotFound(_) => StatusCode::NOT_FOUND,
            ShelfError::Storage(e) => {
                tracing::error!("Storage error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ShelfError::Serialization(e) => {
                tracing::error!("Serialization error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}
