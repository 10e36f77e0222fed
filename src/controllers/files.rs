use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::audio::dto::{DeleteResponse, FileListResponse},
    error::AppResult,
    infrastructure::repositories::AudioFileRepository,
};

pub struct FileController {
    file_repo: Arc<AudioFileRepository>,
}

impl FileController {
    pub fn new(file_repo: Arc<AudioFileRepository>) -> Self {
        Self { file_repo }
    }

    /// GET /api/audio/files - List all generated audio files
    pub async fn list_files(
        State(controller): State<Arc<FileController>>,
    ) -> AppResult<Json<FileListResponse>> {
        let files = controller.file_repo.list().await?;
        Ok(Json(FileListResponse {
            total: files.len(),
            files,
        }))
    }

    /// GET /api/audio/files/:filename - Download a generated audio file
    pub async fn download_file(
        State(controller): State<Arc<FileController>>,
        Path(filename): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let bytes = controller.file_repo.read(&filename).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        if let Ok(disposition) =
            HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
        {
            headers.insert(header::CONTENT_DISPOSITION, disposition);
        }

        Ok((StatusCode::OK, headers, Body::from(bytes)))
    }

    /// DELETE /api/audio/files/:filename - Delete a generated audio file
    pub async fn delete_file(
        State(controller): State<Arc<FileController>>,
        Path(filename): Path<String>,
    ) -> AppResult<Json<DeleteResponse>> {
        controller.file_repo.remove(&filename).await?;
        Ok(Json(DeleteResponse {
            success: true,
            message: format!("File {} deleted successfully", filename),
        }))
    }
}
