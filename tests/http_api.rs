// API-level tests driving the full router with stubbed synthesis/export,
// so no AWS or ffmpeg is needed.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use common::{service_with, test_config, CaptureExporter, StubSynthesis};
use lingotape_backend::controllers::{audio::AudioController, files::FileController};
use lingotape_backend::infrastructure::http::build_router;
use lingotape_backend::infrastructure::repositories::AudioFileRepository;
use lingotape_backend::infrastructure::toolchain::ToolchainProbe;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "lingotape-test-boundary";

fn router_with(
    dir: &Path,
    synthesis: StubSynthesis,
    exporter: CaptureExporter,
    toolchain: ToolchainProbe,
) -> Router {
    let config = Arc::new(test_config(dir));
    let (service, _, _) = service_with(synthesis, exporter, dir.to_path_buf());
    let audio_controller = Arc::new(AudioController::new(service, Arc::new(toolchain), config));
    let file_controller = Arc::new(FileController::new(Arc::new(AudioFileRepository::new(
        dir.to_path_buf(),
    ))));
    build_router(audio_controller, file_controller)
}

fn working_router(dir: &Path) -> Router {
    router_with(
        dir,
        StubSynthesis::new(&[]),
        CaptureExporter::writing(b"mp3-bytes"),
        // Empty tool list: nothing to probe, capability check passes
        ToolchainProbe::with_tools(vec![]),
    )
}

fn broken_toolchain_router(dir: &Path) -> Router {
    router_with(
        dir,
        StubSynthesis::new(&[]),
        CaptureExporter::writing(b"mp3-bytes"),
        ToolchainProbe::with_tools(vec!["no-such-encoder".to_string()]),
    )
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart request by hand; each part is (name, filename, content)
fn multipart_post(uri: &str, parts: &[(&str, Option<&str>, &str)]) -> Request<Body> {
    let mut body = String::new();
    for (name, filename, content) in parts {
        body.push_str(&format!("--{}\r\n", BOUNDARY));
        match filename {
            Some(filename) => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\r\n",
                name, filename
            )),
            None => body.push_str(&format!(
                "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                name
            )),
        }
        body.push_str(content);
        body.push_str("\r\n");
    }
    body.push_str(&format!("--{}--\r\n", BOUNDARY));

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn it_should_return_ok_for_health_check() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn it_should_list_ten_supported_languages() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(&app, get("/api/audio/languages")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 10);
    assert_eq!(body["languages"]["it"], "Italian");
    assert_eq!(body["languages"]["zh"], "Chinese");
}

#[tokio::test]
async fn it_should_report_missing_tools_in_capabilities() {
    let dir = tempfile::tempdir().unwrap();
    let app = broken_toolchain_router(dir.path());

    let (status, body) = send(&app, get("/api/audio/capabilities")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["ffmpeg_available"], false);
    assert_eq!(body["missing_tools"][0], "no-such-encoder");
    assert_eq!(body["supported_languages"]["en"], "English");
}

#[tokio::test]
async fn it_should_refuse_generation_while_toolchain_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let app = broken_toolchain_router(dir.path());

    let (status, body) = send(
        &app,
        json_post("/api/audio/text", json!({"text": "Hello", "language": "en"})),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("no-such-encoder"));

    // The capability gate fires before any synthesis: no file may appear
    let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
    assert!(entries.next_entry().await.unwrap().is_none());
}

#[tokio::test]
async fn it_should_generate_audio_for_a_single_text() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(
        &app,
        json_post("/api/audio/text", json!({"text": "Hello", "language": "en"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["generated_filename"], "text_audio_en.mp3");

    let (status, body) = send(&app, get("/api/audio/files")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["files"][0]["filename"], "text_audio_en.mp3");
    assert_eq!(body["files"][0]["size_bytes"], 9);
}

#[tokio::test]
async fn it_should_reject_unknown_language_codes() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(
        &app,
        json_post("/api/audio/text", json!({"text": "Hello", "language": "xx"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("xx"));
}

#[tokio::test]
async fn it_should_reject_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(
        &app,
        json_post("/api/audio/text", json!({"text": "   "})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn it_should_generate_audio_from_a_csv_upload() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(
        &app,
        multipart_post(
            "/api/audio/csv",
            &[("file", Some("phrases.csv"), "Ciao,Привет\nBuongiorno,Утро\n")],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["generated_filename"], "output.mp3");
}

#[tokio::test]
async fn it_should_honor_the_config_part_of_a_csv_upload() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let config = json!({
        "languages": [
            {"column_index": 0, "language_code": "en", "flag": "🇬🇧"},
            {"column_index": 1, "language_code": "fr", "flag": "🇫🇷"}
        ],
        "output_filename": "travel.mp3",
        "inter_language_pause_ms": 2000,
        "inter_row_pause_ms": 500
    });

    let (status, body) = send(
        &app,
        multipart_post(
            "/api/audio/csv",
            &[
                ("file", Some("phrases.csv"), "Hello,Bonjour\n"),
                ("config", None, &config.to_string()),
            ],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["generated_filename"], "travel.mp3");
}

#[tokio::test]
async fn it_should_reject_non_csv_uploads() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(
        &app,
        multipart_post(
            "/api/audio/csv",
            &[("file", Some("notes.txt"), "Ciao,Привет\n")],
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Only CSV files are supported"));
}

#[tokio::test]
async fn it_should_reject_a_csv_request_without_a_file_part() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(
        &app,
        multipart_post("/api/audio/csv", &[("config", None, "{}")]),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn it_should_download_and_delete_generated_files() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    send(
        &app,
        json_post("/api/audio/text", json!({"text": "Hello", "language": "en"})),
    )
    .await;

    // Download
    let response = app
        .clone()
        .oneshot(get("/api/audio/files/text_audio_en.mp3"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "audio/mpeg"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"mp3-bytes");

    // Delete
    let (status, body) = send(&app, delete("/api/audio/files/text_audio_en.mp3")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    // Second delete is a miss with the uniform error shape
    let (status, body) = send(&app, delete("/api/audio/files/text_audio_en.mp3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn it_should_return_not_found_for_missing_downloads() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(&app, get("/api/audio/files/never-made.mp3")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn it_should_list_an_empty_catalog_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = working_router(dir.path());

    let (status, body) = send(&app, get("/api/audio/files")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(body["files"], json!([]));
}
