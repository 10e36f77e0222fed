use super::language::LanguageCode;
use super::model::{AudioJobConfig, LanguageDirective, StoredAudioFile};
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Request for POST /api/audio/text
#[derive(Debug, Serialize, Deserialize)]
pub struct TextToAudioRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_filename: Option<String>,
}

impl TextToAudioRequest {
    /// Resolve the language code, defaulting to Italian when omitted.
    /// Unknown codes are rejected here so unchecked strings never reach
    /// the synthesis gateway.
    pub fn language_code(&self) -> Result<LanguageCode, AppError> {
        match &self.language {
            Some(code) => code.parse().map_err(AppError::BadRequest),
            None => Ok(LanguageCode::Italian),
        }
    }
}

/// One column-to-language mapping inside a CSV job request
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageDirectiveRequest {
    pub column_index: usize,
    pub language_code: String,
    #[serde(default)]
    pub flag: String,
}

/// `config` part of POST /api/audio/csv
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioGenerationRequest {
    #[serde(default = "default_directives")]
    pub languages: Vec<LanguageDirectiveRequest>,
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
    #[serde(default = "default_inter_language_pause_ms")]
    pub inter_language_pause_ms: u64,
    #[serde(default = "default_inter_row_pause_ms")]
    pub inter_row_pause_ms: u64,
}

impl Default for AudioGenerationRequest {
    fn default() -> Self {
        Self {
            languages: default_directives(),
            output_filename: default_output_filename(),
            inter_language_pause_ms: default_inter_language_pause_ms(),
            inter_row_pause_ms: default_inter_row_pause_ms(),
        }
    }
}

fn default_directives() -> Vec<LanguageDirectiveRequest> {
    vec![
        LanguageDirectiveRequest {
            column_index: 0,
            language_code: "it".to_string(),
            flag: "🇮🇹".to_string(),
        },
        LanguageDirectiveRequest {
            column_index: 1,
            language_code: "ru".to_string(),
            flag: "🇷🇺".to_string(),
        },
    ]
}

fn default_output_filename() -> String {
    "output.mp3".to_string()
}

fn default_inter_language_pause_ms() -> u64 {
    5000
}

fn default_inter_row_pause_ms() -> u64 {
    1000
}

impl AudioGenerationRequest {
    /// Validate the request and build the job configuration.
    /// All field-level checks happen here, once, at the boundary.
    pub fn into_config(self) -> Result<AudioJobConfig, AppError> {
        if self.languages.is_empty() {
            return Err(AppError::BadRequest(
                "At least one language configuration is required".to_string(),
            ));
        }

        validate_output_name(&self.output_filename)?;

        let mut directives = Vec::with_capacity(self.languages.len());
        for entry in self.languages {
            let language_code = entry
                .language_code
                .parse::<LanguageCode>()
                .map_err(AppError::BadRequest)?;
            directives.push(LanguageDirective {
                column_index: entry.column_index,
                language_code,
                flag: entry.flag,
            });
        }

        Ok(AudioJobConfig {
            directives,
            output_name: self.output_filename,
            inter_language_pause_ms: self.inter_language_pause_ms,
            inter_row_pause_ms: self.inter_row_pause_ms,
        })
    }
}

/// Reject empty names and anything that could escape the output directory
pub fn validate_output_name(name: &str) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Output filename must not be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(AppError::BadRequest(format!(
            "Invalid output filename: {}",
            name
        )));
    }
    Ok(())
}

/// Response for both audio generation endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationResponse {
    pub fn ok(message: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            generated_filename: Some(filename.into()),
            error: None,
        }
    }
}

/// Response for GET /api/audio/files
#[derive(Debug, Serialize, Deserialize)]
pub struct FileListResponse {
    pub files: Vec<StoredAudioFile>,
    pub total: usize,
}

/// Response for DELETE /api/audio/files/:filename
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
}

/// Response for GET /api/audio/capabilities
#[derive(Debug, Serialize)]
pub struct CapabilitiesResponse {
    pub status: String,
    pub ffmpeg_available: bool,
    pub missing_tools: Vec<String>,
    pub supported_languages: BTreeMap<&'static str, &'static str>,
}

/// Response for GET /api/audio/languages
#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub languages: BTreeMap<&'static str, &'static str>,
    pub total: usize,
}
