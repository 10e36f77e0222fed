use super::language::LanguageCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maps one CSV column to the language its cells are written in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageDirective {
    pub column_index: usize,
    pub language_code: LanguageCode,
    pub flag: String,
}

/// Per-request settings for a CSV batch job
#[derive(Debug, Clone)]
pub struct AudioJobConfig {
    pub directives: Vec<LanguageDirective>,
    pub output_name: String,
    pub inter_language_pause_ms: u64,
    pub inter_row_pause_ms: u64,
}

/// An audio artifact produced by an export, addressed by filename inside
/// the output directory
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub filename: String,
    pub path: PathBuf,
}

/// Listing entry for a file already present in the output directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAudioFile {
    pub filename: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}
