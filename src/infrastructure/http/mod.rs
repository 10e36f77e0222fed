pub mod request_id;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::controllers::{audio::AudioController, files::FileController, health};
use crate::infrastructure::config::Config;
use request_id::request_id_middleware;

/// CSV uploads are text; 16 MiB covers any realistic phrase table without
/// being unbounded.
const CSV_UPLOAD_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    audio_controller: Arc<AudioController>,
    file_controller: Arc<FileController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(audio_controller, file_controller);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Assemble the application router; split out so tests can drive it without
/// binding a socket
pub fn build_router(
    audio_controller: Arc<AudioController>,
    file_controller: Arc<FileController>,
) -> Router {
    let audio_routes = Router::new()
        .route(
            "/api/audio/capabilities",
            get(AudioController::capabilities),
        )
        .route("/api/audio/languages", get(AudioController::languages))
        .route("/api/audio/text", post(AudioController::text_to_audio))
        .route(
            "/api/audio/csv",
            post(AudioController::csv_to_audio)
                .layer(DefaultBodyLimit::max(CSV_UPLOAD_LIMIT_BYTES)),
        )
        .with_state(audio_controller);

    let file_routes = Router::new()
        .route("/api/audio/files", get(FileController::list_files))
        .route(
            "/api/audio/files/:filename",
            get(FileController::download_file).delete(FileController::delete_file),
        )
        .with_state(file_controller);

    Router::new()
        .route("/health", get(health::health))
        .merge(audio_routes)
        .merge(file_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
