use crate::domain::audio::{AudioBuffer, LanguageCode};
use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying TTS engine (AWS Polly, or a mock in tests).
///
/// Implementations are responsible for:
/// - Handling engine-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single decoded buffer
/// - Engine-specific voice selection
#[async_trait]
pub trait SynthesisRepository: Send + Sync {
    /// Synthesize text to speech for a given language
    ///
    /// Returns decoded mono PCM ready for concatenation
    ///
    /// # Errors
    /// Returns error if the engine is unreachable, the language is not
    /// renderable by it, or the text is empty after normalization
    async fn synthesize(&self, text: &str, language: LanguageCode)
        -> Result<AudioBuffer, String>;
}
