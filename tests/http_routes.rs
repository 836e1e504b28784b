//! Route-level tests: drive the router the way a browser would.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use shelf::ids::SequentialIds;
use shelf::{router, AppState, Config, MemoryStore};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Helpers
// ============================================================================

fn test_state() -> Arc<AppState> {
    Arc::new(
        AppState::with_store(
            Arc::new(MemoryStore::new()),
            Arc::new(SequentialIds::new("id")),
            Config::default(),
        )
        .unwrap(),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, location, String::from_utf8_lossy(&body).into_owned())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_upload(file_name: &str, content_type: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "shelf-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_index_redirects_to_login() {
    let app = router(test_state());
    let (status, location, _) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_login_errors_render_inline() {
    let app = router(test_state());

    let (status, _, body) = send(&app, form("/login", "name=&password=x")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Please enter both a name and a password"));

    send(&app, form("/login", "name=A&password=x")).await;
    send(&app, get("/logout")).await;

    let (status, _, body) = send(&app, form("/login", "name=A&password=wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("Wrong password"));
}

#[tokio::test]
async fn test_upload_name_read_and_comment() {
    let state = test_state();
    let app = router(state.clone());

    let (_, location, _) = send(&app, form("/login", "name=A&password=x")).await;
    assert_eq!(location.as_deref(), Some("/"));

    send(&app, multipart_upload("Book.pdf", "application/pdf", b"%PDF-1.4 test")).await;
    let (_, _, page) = send(&app, get("/")).await;
    assert!(page.contains("Name this document"));
    assert!(page.contains("value=\"Book\""));

    send(&app, form("/upload/name", "name=My+Book")).await;
    let (_, _, page) = send(&app, get("/")).await;
    assert!(page.contains("My Book"));
    assert!(page.contains("action=\"/delete/id-1\""));

    send(&app, get("/read/id-1")).await;
    let blob_url = {
        let app_state = state.app();
        app_state.viewer().handle().unwrap().url()
    };
    let (status, _, bytes) = send(&app, get(&blob_url)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, "%PDF-1.4 test");

    send(&app, get("/close")).await;
    let (status, _, _) = send(&app, get(&blob_url)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    send(&app, form("/comment/id-1", "text=loved+it")).await;
    send(&app, get("/comments/id-1")).await;
    let (_, _, page) = send(&app, get("/")).await;
    assert!(page.contains("loved it"));
}

#[tokio::test]
async fn test_non_pdf_upload_is_silently_dropped() {
    let state = test_state();
    let app = router(state.clone());
    send(&app, form("/login", "name=A&password=x")).await;

    let (status, location, _) = send(&app, multipart_upload("notes.txt", "text/plain", b"hello")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
    assert!(state.app().pending_upload().is_none());
}

#[tokio::test]
async fn test_other_user_cannot_delete() {
    let state = test_state();
    let app = router(state.clone());

    send(&app, form("/login", "name=A&password=x")).await;
    send(&app, multipart_upload("Book.pdf", "application/pdf", b"%PDF")).await;
    send(&app, form("/upload/name", "name=")).await;
    send(&app, get("/logout")).await;

    send(&app, form("/login", "name=B&password=y")).await;
    let (status, _, _) = send(&app, form("/delete/id-1", "")).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(state.app().library().len(), 1);
}

#[tokio::test]
async fn test_share_link_and_import() {
    let state = test_state();
    let app = router(state.clone());

    send(&app, form("/login", "name=A&password=x")).await;
    send(&app, multipart_upload("Book.pdf", "application/pdf", b"%PDF-share")).await;
    send(&app, form("/upload/name", "name=Shared+Book")).await;

    let request = Request::builder()
        .uri("/share/id-1")
        .header(header::HOST, "reader.local:3000")
        .body(Body::empty())
        .unwrap();
    let (status, _, link) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(link.starts_with("http://reader.local:3000/#share="));
    assert!(link.ends_with("&name=Shared%20Book"));

    let fragment = link.split_once('#').unwrap().1;
    let body = format!("fragment={}", urlencoding::encode(fragment));
    send(&app, form("/import", &body)).await;
    assert_eq!(
        state.app().pending_upload().unwrap().default_name,
        "Shared Book"
    );
}

#[tokio::test]
async fn test_unknown_blob_is_not_found() {
    let app = router(test_state());
    let (status, _, _) = send(
        &app,
        get("/blob/00000000-0000-0000-0000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_share_link_survives_login() {
    let state = test_state();
    let app = router(state.clone());

    send(&app, form("/login", "name=A&password=x")).await;
    send(&app, multipart_upload("Dune.pdf", "application/pdf", b"%PDF-dune")).await;
    send(&app, form("/upload/name", "name=Dune")).await;
    let (_, _, link) = send(&app, get("/share/id-1")).await;
    let fragment = link.split_once('#').unwrap().1.to_string();
    send(&app, get("/logout")).await;

    // A logged-out recipient lands on the login page, which keeps the hash.
    let (status, location, _) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login"));
    let (_, _, login_page) = send(&app, get("/login")).await;
    assert!(login_page.contains("name=\"fragment\""));
    assert!(login_page.contains("location.hash"));

    let body = format!(
        "name=B&password=y&fragment={}",
        urlencoding::encode(&format!("#{}", fragment))
    );
    let (_, location, _) = send(&app, form("/login", &body)).await;
    assert_eq!(location.as_deref(), Some("/"));

    let (_, _, page) = send(&app, get("/")).await;
    assert!(page.contains("Name this document"));
    assert!(page.contains("value=\"Dune\""));
}

#[tokio::test]
async fn test_failed_login_keeps_share_fragment() {
    let app = router(test_state());
    send(&app, form("/login", "name=A&password=x")).await;
    send(&app, get("/logout")).await;

    let (status, _, body) = send(
        &app,
        form("/login", "name=A&password=wrong&fragment=%23share%3DJVBERg%3D%3D"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body.contains("value=\"#share=JVBERg==\""));
}

#[tokio::test]
async fn test_uploading_banner_can_be_dismissed() {
    let state = test_state();
    let app = router(state.clone());
    send(&app, form("/login", "name=A&password=x")).await;

    state.app().mark_uploading().unwrap();
    let (_, _, page) = send(&app, get("/")).await;
    assert!(page.contains("Uploading..."));
    assert!(page.contains("action=\"/dismiss\""));

    send(&app, form("/dismiss", "")).await;
    assert_eq!(state.app().status(), shelf::AppStatus::Idle);
}
