//! End-to-end router tests.
//!
//! Each test builds the full router over a fresh in-memory store and the
//! guest analysis backend, then drives it with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use scrivano_ai::{
    AnalysisService, GuestBackend, StubTextExtractor, StubTranscriber, StubVideoMetadata,
};
use scrivano_api::{build_router, AppState};
use scrivano_store::MemoryStore;

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    let analysis = Arc::new(AnalysisService::new(
        Box::new(GuestBackend::new()),
        Box::new(StubTextExtractor),
        Box::new(StubTranscriber),
        Box::new(StubVideoMetadata),
    ));
    build_router(AppState {
        notes: store.clone(),
        folders: store,
        analysis,
        rate_limiter: None,
    })
}

fn json_request(method: &str, uri: &str, user: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, user: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_request(
    uri: &str,
    user: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-user-id", user)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_endpoint_is_open() {
    let response = app().oneshot(get_request("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn api_routes_require_user_header() {
    let app = app();

    let response = app
        .clone()
        .oneshot(get_request("/api/notes", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication required");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/ai/summarize-note",
            None,
            r#"{"content":"hello"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn note_crud_round_trip() {
    let app = app();

    // Create
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/notes",
            Some("alice"),
            r#"{"title":"Groceries","content":"<p>milk</p>"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["title"], "Groceries");
    assert_eq!(created["folderId"], serde_json::Value::Null);
    let id = created["id"].as_str().unwrap().to_string();

    // List
    let response = app
        .clone()
        .oneshot(get_request("/api/notes", Some("alice")))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Update title only; content survives
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/notes/{id}"),
            Some("alice"),
            r#"{"title":"Groceries v2"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Groceries v2");
    assert_eq!(updated["content"], "<p>milk</p>");

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/notes/{id}"))
                .header("x-user-id", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    // Gone
    let response = app
        .oneshot(get_request(&format!("/api/notes/{id}"), Some("alice")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn notes_are_invisible_across_owners() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/notes",
            Some("alice"),
            r#"{"title":"Secret","content":"mine"}"#,
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    // Another caller sees an empty list and 404 on direct access
    let response = app
        .clone()
        .oneshot(get_request("/api/notes", Some("bob")))
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert!(listed.as_array().unwrap().is_empty());

    let response = app
        .oneshot(get_request(&format!("/api/notes/{id}"), Some("bob")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn folder_delete_cascades_to_contained_notes() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/folders",
            Some("alice"),
            r#"{"name":"Work"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let folder_id = body_json(response).await["id"]
        .as_str()
        .unwrap()
        .to_string();

    // One note in the folder, one outside
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/notes",
            Some("alice"),
            &format!(r#"{{"title":"In","content":"a","folderId":"{folder_id}"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/notes",
            Some("alice"),
            r#"{"title":"Out","content":"b"}"#,
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/folders/{folder_id}"))
                .header("x-user-id", "alice")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(get_request("/api/notes", Some("alice")))
        .await
        .unwrap();
    let listed = body_json(response).await;
    let titles: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Out"]);
}

#[tokio::test]
async fn empty_folder_name_is_rejected() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/folders",
            Some("alice"),
            r#"{"name":"   "}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Folder name is required");
}

#[tokio::test]
async fn invalid_youtube_url_is_a_validation_error() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/ai/analyze-youtube",
            Some("alice"),
            r#"{"url":"https://example.com/not-a-video"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn youtube_analysis_in_guest_mode_is_kind_tagged() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/ai/analyze-youtube",
            Some("alice"),
            r#"{"url":"https://www.youtube.com/watch?v=dQw4w9WgXcQ"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["type"], "youtube");
    assert!(body["summary"].as_str().unwrap().contains("dQw4w9WgXcQ"));
}

#[tokio::test]
async fn summarize_note_requires_content() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/ai/summarize-note",
            Some("alice"),
            r#"{"content":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn summarize_note_returns_analysis_shape() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/api/ai/summarize-note",
            Some("alice"),
            r#"{"content":"<p>A long note about gardening.</p>"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["type"], "note-summary");
    assert!(body["keyPoints"].is_array());
    assert!(body["confidence"].is_number());
}

#[tokio::test]
async fn image_upload_without_file_field_is_rejected() {
    let response = app()
        .oneshot(multipart_request(
            "/api/ai/analyze-image",
            "alice",
            "attachment", // wrong field name
            "photo.png",
            "image/png",
            b"fake-bytes",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "No image file provided");
}

#[tokio::test]
async fn image_upload_with_unsupported_mime_is_rejected() {
    let response = app()
        .oneshot(multipart_request(
            "/api/ai/analyze-image",
            "alice",
            "image",
            "notes.txt",
            "text/plain",
            b"not an image",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "File type not supported");
}

#[tokio::test]
async fn image_upload_in_guest_mode_returns_analysis() {
    let response = app()
        .oneshot(multipart_request(
            "/api/ai/analyze-image",
            "alice",
            "image",
            "photo.png",
            "image/png",
            b"fake-png-bytes",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["type"], "image");
}
