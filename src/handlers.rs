//! HTTP route handlers.
//!
//! Each handler is one UI event: lock the controller, call the matching
//! action, then render or redirect back to the library. The controller lock
//! is never held across an `.await`.

use crate::error::{Result, ShelfError};
use crate::templates::{base_html, login_form, render_library};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

// ============================================================================
// Library Page
// ============================================================================

#[derive(Deserialize)]
pub struct LibraryQuery {
    pub q: Option<String>,
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LibraryQuery>,
) -> Response {
    let app = state.app();
    let Some(user) = app.user() else {
        return Redirect::to("/login").into_response();
    };

    let search = query.q.unwrap_or_default();
    let content = render_library(&app, &search);
    Html(base_html("Shelf", &content, Some(&search), Some(user))).into_response()
}

// ============================================================================
// Authentication Handlers
// ============================================================================

pub async fn login_page(State(state): State<Arc<AppState>>) -> Response {
    if state.app().user().is_some() {
        return Redirect::to("/").into_response();
    }
    Html(base_html("Login", &login_form(None, "", ""), None, None)).into_response()
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub password: String,
    /// Share fragment the visitor arrived with, if any.
    #[serde(default)]
    pub fragment: String,
}

pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut app = state.app();
    let response = match app.login(&form.name, &form.password).map(|_| ()) {
        Ok(()) => {
            if !form.fragment.is_empty() {
                if let Err(e) = app.import_shared(&form.fragment) {
                    tracing::warn!("share link ignored at login: {}", e);
                }
            }
            Redirect::to("/").into_response()
        }
        Err(e @ (ShelfError::Validation | ShelfError::Auth)) => {
            let status = match e {
                ShelfError::Auth => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_REQUEST,
            };
            let form_html = login_form(Some(&e.to_string()), form.name.trim(), &form.fragment);
            (status, Html(base_html("Login", &form_html, None, None))).into_response()
        }
        Err(e) => e.into_response(),
    };
    response
}

pub async fn logout(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    state.app().logout()?;
    Ok(Redirect::to("/login"))
}

// ============================================================================
// Upload Handlers
// ============================================================================

/// Receive a multipart upload with a `file` field and move to the naming
/// step. Non-PDF files are dropped without a message.
pub async fn upload(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Result<Redirect> {
    let _in_flight = state.begin_upload()?;

    let mut received = None;
    let read = loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map(|b| b.to_vec())
                    .map_err(|e| ShelfError::Upload(e.to_string()));
                received = Some((file_name, content_type));
                break bytes;
            }
            Ok(Some(_)) => continue,
            Ok(None) => break Err(ShelfError::Upload("no file in request".to_string())),
            Err(e) => break Err(ShelfError::Upload(e.to_string())),
        }
    };

    let (file_name, content_type) = received.unwrap_or_default();
    // Failures are shown through the status banner on the library page.
    let outcome = state
        .app()
        .receive_upload(&file_name, content_type.as_deref(), read);
    if let Err(e) = outcome {
        tracing::debug!("upload dropped: {}", e);
    }
    Ok(Redirect::to("/"))
}

#[derive(Deserialize)]
pub struct NameForm {
    #[serde(default)]
    pub name: String,
}

pub async fn name_upload(
    State(state): State<Arc<AppState>>,
    Form(form): Form<NameForm>,
) -> Result<Redirect> {
    state.app().save_upload(&form.name)?;
    Ok(Redirect::to("/"))
}

pub async fn cancel_upload(State(state): State<Arc<AppState>>) -> Redirect {
    state.app().cancel_upload();
    Redirect::to("/")
}

pub async fn dismiss(State(state): State<Arc<AppState>>) -> Redirect {
    state.app().dismiss_error();
    Redirect::to("/")
}

// ============================================================================
// Reader Handlers
// ============================================================================

pub async fn read(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> Result<Redirect> {
    let opened = state.app().open(&id).map(|_| ());
    match opened {
        // A corrupt payload is reported through the status banner.
        Ok(()) | Err(ShelfError::Decode(_)) => Ok(Redirect::to("/")),
        Err(e) => Err(e),
    }
}

pub async fn close(State(state): State<Arc<AppState>>) -> Redirect {
    state.app().close_viewer();
    Redirect::to("/")
}

/// Serve the bytes behind a live viewer reference.
pub async fn blob(Path(id): Path<Uuid>, State(state): State<Arc<AppState>>) -> Response {
    match state.blobs.get(&id) {
        Some(blob) => ([(header::CONTENT_TYPE, blob.content_type)], blob.bytes).into_response(),
        None => (StatusCode::NOT_FOUND, "Reference expired").into_response(),
    }
}

// ============================================================================
// Comment Handlers
// ============================================================================

#[derive(Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

pub async fn comment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Form(form): Form<CommentForm>,
) -> Result<Redirect> {
    state.app().add_comment(&id, &form.text)?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_comments(Path(id): Path<String>, State(state): State<Arc<AppState>>) -> Redirect {
    state.app().toggle_thread(&id);
    Redirect::to("/")
}

// ============================================================================
// Delete Handlers
// ============================================================================

pub async fn request_delete(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Redirect> {
    state.app().request_delete(&id)?;
    Ok(Redirect::to("/"))
}

pub async fn confirm_delete(State(state): State<Arc<AppState>>) -> Result<Redirect> {
    state.app().confirm_delete()?;
    Ok(Redirect::to("/"))
}

pub async fn cancel_delete(State(state): State<Arc<AppState>>) -> Redirect {
    state.app().cancel_delete();
    Redirect::to("/")
}

// ============================================================================
// Share Handlers
// ============================================================================

/// Return the share link for a record as plain text.
pub async fn share(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<String> {
    let origin = state.origin(&headers);
    let link = state.app().share_link(&id, &origin);
    link
}

#[derive(Deserialize)]
pub struct ImportForm {
    pub fragment: String,
}

pub async fn import(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ImportForm>,
) -> Result<Redirect> {
    state.app().import_shared(&form.fragment)?;
    Ok(Redirect::to("/"))
}
