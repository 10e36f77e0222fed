use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::audio::{
        dto::{
            validate_output_name, AudioGenerationRequest, CapabilitiesResponse,
            GenerationResponse, LanguagesResponse, TextToAudioRequest,
        },
        supported_languages, AudioService, AudioServiceApi,
    },
    error::{AppError, AppResult},
    infrastructure::{config::Config, toolchain::ToolchainProbe},
};

pub struct AudioController {
    audio_service: Arc<AudioService>,
    toolchain: Arc<ToolchainProbe>,
    config: Arc<Config>,
}

impl AudioController {
    pub fn new(
        audio_service: Arc<AudioService>,
        toolchain: Arc<ToolchainProbe>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            audio_service,
            toolchain,
            config,
        }
    }

    /// GET /api/audio/capabilities - Toolchain availability and languages
    pub async fn capabilities(
        State(controller): State<Arc<AudioController>>,
    ) -> Json<CapabilitiesResponse> {
        let status = controller.toolchain.check().await;
        Json(CapabilitiesResponse {
            status: if status.available {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            ffmpeg_available: status.available,
            missing_tools: status.missing,
            supported_languages: supported_languages(),
        })
    }

    /// GET /api/audio/languages - Supported language listing
    pub async fn languages() -> Json<LanguagesResponse> {
        let languages = supported_languages();
        Json(LanguagesResponse {
            total: languages.len(),
            languages,
        })
    }

    /// POST /api/audio/text - Convert a single text to audio
    pub async fn text_to_audio(
        State(controller): State<Arc<AudioController>>,
        Json(request): Json<TextToAudioRequest>,
    ) -> AppResult<Json<GenerationResponse>> {
        controller.ensure_toolchain().await?;

        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }
        let language = request.language_code()?;
        if let Some(name) = &request.output_filename {
            validate_output_name(name)?;
        }

        let file = controller
            .audio_service
            .text_to_audio(&request.text, language, request.output_filename)
            .await
            .map_err(AppError::from)?;

        Ok(Json(GenerationResponse::ok(
            "Audio generated successfully",
            file.filename,
        )))
    }

    /// POST /api/audio/csv - Convert a CSV phrase table to one audio file.
    /// Multipart body: `file` part holds the CSV, optional `config` part
    /// holds the job settings as JSON.
    pub async fn csv_to_audio(
        State(controller): State<Arc<AudioController>>,
        mut multipart: Multipart,
    ) -> AppResult<Json<GenerationResponse>> {
        controller.ensure_toolchain().await?;

        let mut csv_bytes: Option<Vec<u8>> = None;
        let mut csv_filename = String::new();
        let mut request: Option<AudioGenerationRequest> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::BadRequest(format!("Malformed multipart body: {}", e))
        })? {
            let part_name = field.name().map(str::to_string);
            match part_name.as_deref() {
                Some("file") => {
                    csv_filename = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read uploaded file: {}", e))
                    })?;
                    csv_bytes = Some(bytes.to_vec());
                }
                Some("config") => {
                    let raw = field.text().await.map_err(|e| {
                        AppError::BadRequest(format!("Failed to read config part: {}", e))
                    })?;
                    request = Some(serde_json::from_str(&raw).map_err(|e| {
                        AppError::BadRequest(format!("Invalid job config: {}", e))
                    })?);
                }
                _ => {}
            }
        }

        let csv_bytes = csv_bytes.ok_or_else(|| {
            AppError::BadRequest("Missing 'file' part with the CSV upload".to_string())
        })?;
        if !csv_filename.to_lowercase().ends_with(".csv") {
            return Err(AppError::BadRequest(
                "Only CSV files are supported".to_string(),
            ));
        }

        let request = request.unwrap_or_else(|| controller.default_generation_request());
        let job_config = request.into_config()?;

        tracing::info!(
            upload = %csv_filename,
            bytes = csv_bytes.len(),
            "CSV audio generation requested"
        );

        let file = controller
            .audio_service
            .csv_to_audio(&csv_bytes, job_config)
            .await
            .map_err(AppError::from)?;

        Ok(Json(GenerationResponse::ok(
            "Audio generated successfully from CSV",
            file.filename,
        )))
    }

    /// Fail fast with a capability error when the codec toolchain is absent,
    /// before any synthesis work starts
    async fn ensure_toolchain(&self) -> AppResult<()> {
        let status = self.toolchain.check().await;
        if !status.available {
            return Err(AppError::CapabilityUnavailable(format!(
                "Missing required tools: {}. Please install ffmpeg and ffprobe.",
                status.missing.join(", ")
            )));
        }
        Ok(())
    }

    fn default_generation_request(&self) -> AudioGenerationRequest {
        let mut request = AudioGenerationRequest::default();
        request.inter_language_pause_ms = self.config.default_inter_language_pause_ms;
        request.inter_row_pause_ms = self.config.default_inter_row_pause_ms;
        request
    }
}
