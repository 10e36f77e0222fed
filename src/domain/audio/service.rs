use super::buffer::AudioBuffer;
use super::error::AudioServiceError;
use super::language::LanguageCode;
use super::model::{AudioJobConfig, GeneratedFile};
use crate::infrastructure::repositories::{AudioExporter, SynthesisRepository};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// Fixed warm-up pad at the start of every batch compilation
const LEAD_IN_SILENCE_MS: u64 = 1000;

pub struct AudioService {
    synthesis: Arc<dyn SynthesisRepository>,
    exporter: Arc<dyn AudioExporter>,
    output_dir: PathBuf,
}

impl AudioService {
    pub fn new(
        synthesis: Arc<dyn SynthesisRepository>,
        exporter: Arc<dyn AudioExporter>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            synthesis,
            exporter,
            output_dir,
        }
    }
}

#[async_trait]
pub trait AudioServiceApi: Send + Sync {
    /// Convert a CSV phrase table into one stitched audio file.
    ///
    /// Rows that fail validation are dropped up front; rows whose synthesis
    /// fails are skipped whole (never partially included). The job only
    /// fails as a unit on malformed CSV or a failed export.
    async fn csv_to_audio(
        &self,
        csv_bytes: &[u8],
        config: AudioJobConfig,
    ) -> Result<GeneratedFile, AudioServiceError>;

    /// Convert a single text to one audio file, no padding or stitching
    async fn text_to_audio(
        &self,
        text: &str,
        language: LanguageCode,
        output_filename: Option<String>,
    ) -> Result<GeneratedFile, AudioServiceError>;
}

#[async_trait]
impl AudioServiceApi for AudioService {
    async fn csv_to_audio(
        &self,
        csv_bytes: &[u8],
        config: AudioJobConfig,
    ) -> Result<GeneratedFile, AudioServiceError> {
        if config.directives.is_empty() {
            return Err(AudioServiceError::Invalid(
                "At least one language configuration is required".to_string(),
            ));
        }

        let rows = parse_rows(csv_bytes)?;
        let valid_rows: Vec<&Vec<String>> = rows
            .iter()
            .filter(|row| row_is_valid(row, &config))
            .collect();

        tracing::info!(
            total_rows = rows.len(),
            valid_rows = valid_rows.len(),
            languages = config.directives.len(),
            output_name = %config.output_name,
            "Generating batch audio"
        );

        let mut compilation = AudioBuffer::silence(LEAD_IN_SILENCE_MS);
        let mut processed = 0usize;
        let mut skipped = 0usize;

        for (index, row) in valid_rows.iter().enumerate() {
            tracing::debug!(row = index + 1, preview = %row_preview(row, &config), "Synthesizing row");

            match self.synthesize_row(row, &config).await {
                Ok(row_audio) => {
                    compilation.append(&row_audio);
                    processed += 1;
                }
                Err(err) => {
                    // Best-effort batch: the scratch buffer for this row is
                    // dropped here, so none of its languages reach the output.
                    tracing::warn!(
                        row = index + 1,
                        error = %err,
                        "Skipping row after synthesis failure"
                    );
                    skipped += 1;
                }
            }
        }

        let file = self.export(&compilation, &config.output_name).await?;

        tracing::info!(
            processed,
            skipped,
            duration_ms = compilation.duration_ms(),
            filename = %file.filename,
            "Batch audio exported"
        );

        Ok(file)
    }

    async fn text_to_audio(
        &self,
        text: &str,
        language: LanguageCode,
        output_filename: Option<String>,
    ) -> Result<GeneratedFile, AudioServiceError> {
        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return Err(AudioServiceError::Invalid(
                "Text cannot be empty".to_string(),
            ));
        }

        let filename =
            output_filename.unwrap_or_else(|| format!("text_audio_{}.mp3", language.as_str()));

        let audio = self
            .synthesis
            .synthesize(&normalized, language)
            .await
            .map_err(AudioServiceError::Synthesis)?;

        let file = self.export(&audio, &filename).await?;

        tracing::info!(
            language = %language,
            duration_ms = audio.duration_ms(),
            filename = %file.filename,
            "Text audio exported"
        );

        Ok(file)
    }
}

impl AudioService {
    /// Synthesize every language of one row into a scratch buffer, with the
    /// configured pause after each segment. Any failure abandons the whole
    /// row's audio.
    async fn synthesize_row(
        &self,
        row: &[String],
        config: &AudioJobConfig,
    ) -> Result<AudioBuffer, String> {
        let mut row_audio = AudioBuffer::empty();
        let last = config.directives.len() - 1;

        for (position, directive) in config.directives.iter().enumerate() {
            let text = normalize_text(&row[directive.column_index]);
            let segment = self
                .synthesis
                .synthesize(&text, directive.language_code)
                .await?;
            row_audio.append(&segment);

            if position == last {
                row_audio.push_silence(config.inter_row_pause_ms);
            } else {
                row_audio.push_silence(config.inter_language_pause_ms);
            }
        }

        Ok(row_audio)
    }

    async fn export(
        &self,
        audio: &AudioBuffer,
        filename: &str,
    ) -> Result<GeneratedFile, AudioServiceError> {
        let path = self.output_dir.join(filename);
        self.exporter
            .export(audio, &path)
            .await
            .map_err(AudioServiceError::Export)?;
        Ok(GeneratedFile {
            filename: filename.to_string(),
            path,
        })
    }
}

/// Parse CSV bytes into rows of cells. No header row is assumed and ragged
/// record lengths are allowed; the validity filter deals with short rows.
fn parse_rows(csv_bytes: &[u8]) -> Result<Vec<Vec<String>>, AudioServiceError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv_bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| AudioServiceError::Invalid(format!("Failed to parse CSV: {}", e)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// A row is usable when every configured column holds a non-blank cell and
/// the first language's cell is not purely numeric (stray index/header rows).
fn row_is_valid(row: &[String], config: &AudioJobConfig) -> bool {
    for directive in &config.directives {
        match row.get(directive.column_index) {
            Some(cell) if !cell.trim().is_empty() => {}
            _ => return false,
        }
    }

    let numeric = regex::Regex::new(r"^\d+\.?\d*$").unwrap();
    let first_cell = row[config.directives[0].column_index].trim();
    !numeric.is_match(first_cell)
}

/// Trim, then strip any comma or period immediately followed by whitespace.
/// TTS engines otherwise render a breath pause at each clause boundary.
fn normalize_text(text: &str) -> String {
    let clause_break = regex::Regex::new(r"[,.](\s)").unwrap();
    clause_break.replace_all(text.trim(), "$1").into_owned()
}

fn row_preview(row: &[String], config: &AudioJobConfig) -> String {
    config
        .directives
        .iter()
        .map(|d| format!("{} {}", d.flag, normalize_text(&row[d.column_index])))
        .collect::<Vec<_>>()
        .join(" | ")
}
