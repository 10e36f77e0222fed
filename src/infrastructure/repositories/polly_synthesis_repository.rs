use super::synthesis_repository::SynthesisRepository;
use crate::domain::audio::buffer::SAMPLE_RATE_HZ;
use crate::domain::audio::{AudioBuffer, LanguageCode};
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// AWS Polly implementation of the synthesis repository
pub struct PollySynthesisRepository {
    polly_client: Arc<PollyClient>,
}

impl PollySynthesisRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    /// Call AWS Polly to synthesize a single text batch as 16 kHz PCM
    async fn call_polly(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<AudioBuffer, String> {
        let voice_name = voice_for_language(language);
        let engine = engine_for_voice(voice_name);

        tracing::debug!(
            language = %language,
            voice = voice_name,
            engine = ?engine,
            output_format = "Pcm",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(VoiceId::from(voice_name))
            .output_format(OutputFormat::Pcm)
            .sample_rate(SAMPLE_RATE_HZ.to_string())
            .engine(engine.clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    language = %language,
                    voice = voice_name,
                    engine = ?engine,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                format!("AWS Polly error: {:?}", e)
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            format!("Failed to read audio stream: {}", e)
        })?;

        Ok(AudioBuffer::from_pcm_bytes(&audio_stream.into_bytes()))
    }
}

#[async_trait]
impl SynthesisRepository for PollySynthesisRepository {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<AudioBuffer, String> {
        let text = text.trim();
        if text.is_empty() {
            return Err("Text is empty after normalization".to_string());
        }

        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text);
        if batches.len() > 1 {
            tracing::info!(
                batch_count = batches.len(),
                text_length = text.len(),
                "Text split into batches"
            );
        }

        let mut merged = AudioBuffer::empty();
        for batch in &batches {
            let segment = self.call_polly(batch, language).await?;
            merged.append(&segment);
        }

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "polly",
            language = %language,
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_duration_ms = merged.duration_ms(),
            "Speech synthesis completed"
        );

        Ok(merged)
    }
}

/// Select the Polly voice for a language
pub fn voice_for_language(language: LanguageCode) -> &'static str {
    match language {
        LanguageCode::Italian => "Bianca",
        LanguageCode::Russian => "Tatyana",
        LanguageCode::English => "Joanna",
        LanguageCode::Spanish => "Lupe",
        LanguageCode::French => "Lea",
        LanguageCode::German => "Vicki",
        LanguageCode::Portuguese => "Ines",
        LanguageCode::Japanese => "Takumi",
        LanguageCode::Korean => "Seoyeon",
        LanguageCode::Chinese => "Zhiyu",
    }
}

/// Neural engine where the voice supports it, standard otherwise
/// (Russian voices are standard-only)
fn engine_for_voice(voice: &str) -> Engine {
    if is_voice_neural_compatible(voice) {
        Engine::Neural
    } else {
        Engine::Standard
    }
}

/// Check if a voice supports the neural engine
fn is_voice_neural_compatible(voice: &str) -> bool {
    // Based on AWS Polly documentation
    const NEURAL_VOICES: &[&str] = &[
        // English
        "Joanna", "Matthew", "Ivy", "Kendra", "Kimberly", "Salli", "Joey", "Justin", "Kevin",
        // Spanish
        "Lupe", "Pedro", "Sergio", // French
        "Lea", "Remi", // German
        "Vicki", "Daniel", // Italian
        "Bianca", "Adriano", // Portuguese
        "Ines", "Camila", "Vitoria", "Thiago", // Japanese
        "Takumi", "Kazuha", "Tomoko", // Korean
        "Seoyeon", // Mandarin Chinese
        "Zhiyu",
    ];

    NEURAL_VOICES.contains(&voice)
}

/// Split text into batches of at most MAX_BATCH_SIZE characters, cutting on
/// sentence boundaries where possible
fn split_into_batches(text: &str) -> Vec<String> {
    if text.len() <= MAX_BATCH_SIZE {
        return vec![text.to_string()];
    }

    let boundary = regex::Regex::new(r"[.!?]+\s+").unwrap();
    let mut pieces: Vec<&str> = Vec::new();
    let mut last_end = 0;
    for mat in boundary.find_iter(text) {
        pieces.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        pieces.push(&text[last_end..]);
    }

    let mut batches = Vec::new();
    let mut current = String::new();

    for piece in pieces {
        if piece.len() > MAX_BATCH_SIZE {
            // No sentence boundary to cut on: flush, then hard-split
            if !current.is_empty() {
                batches.push(current.trim().to_string());
                current = String::new();
            }
            let chars: Vec<char> = piece.chars().collect();
            for chunk in chars.chunks(MAX_BATCH_SIZE) {
                batches.push(chunk.iter().collect());
            }
            continue;
        }

        if !current.is_empty() && current.len() + piece.len() > MAX_BATCH_SIZE {
            batches.push(current.trim().to_string());
            current = String::new();
        }
        current.push_str(piece);
    }

    if !current.is_empty() {
        batches.push(current.trim().to_string());
    }

    batches
}
