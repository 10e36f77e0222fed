use super::audio_exporter::AudioExporter;
use crate::domain::audio::AudioBuffer;
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Encodes PCM to MP3 by piping samples into an `ffmpeg` child process
pub struct FfmpegExporter;

impl FfmpegExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FfmpegExporter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioExporter for FfmpegExporter {
    async fn export(&self, audio: &AudioBuffer, path: &Path) -> Result<(), String> {
        let start_time = std::time::Instant::now();

        let mut child = Command::new("ffmpeg")
            .arg("-y")
            .args(["-f", "s16le"])
            .args(["-ar", &audio.sample_rate().to_string()])
            .args(["-ac", "1"])
            .args(["-i", "pipe:0"])
            .args(["-codec:a", "libmp3lame"])
            .args(["-q:a", "4"])
            .arg(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("Failed to spawn ffmpeg: {}", e))?;

        let pcm = audio.to_pcm_bytes();
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| "Failed to open ffmpeg stdin".to_string())?;
        stdin
            .write_all(&pcm)
            .await
            .map_err(|e| format!("Failed to stream samples to ffmpeg: {}", e))?;
        // Close stdin so ffmpeg sees end of input and finalizes the file
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| format!("Failed to wait for ffmpeg: {}", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::error!(
                path = %path.display(),
                status = ?output.status.code(),
                stderr = %stderr,
                "ffmpeg export failed"
            );
            return Err(format!(
                "ffmpeg exited with status {:?}: {}",
                output.status.code(),
                stderr.lines().last().unwrap_or("unknown error")
            ));
        }

        tracing::info!(
            path = %path.display(),
            pcm_bytes = pcm.len(),
            duration_ms = audio.duration_ms(),
            encode_latency_ms = start_time.elapsed().as_millis(),
            "Audio exported"
        );

        Ok(())
    }
}
