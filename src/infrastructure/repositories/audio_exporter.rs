use crate::domain::audio::AudioBuffer;
use async_trait::async_trait;
use std::path::Path;

/// Repository for encoding a decoded buffer into an audio file on disk.
/// Abstracts the codec toolchain (ffmpeg, or a capture mock in tests).
///
/// An existing file at the target path is overwritten: concurrent jobs
/// exporting to the same name race and the last writer wins.
#[async_trait]
pub trait AudioExporter: Send + Sync {
    /// Encode `audio` and write it to `path`
    ///
    /// # Errors
    /// Returns error if the encoder cannot be run or the path is not
    /// writable
    async fn export(&self, audio: &AudioBuffer, path: &Path) -> Result<(), String>;
}
