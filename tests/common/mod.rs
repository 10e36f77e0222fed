// Shared test doubles for the synthesis and export seams.
#![allow(dead_code)]

use async_trait::async_trait;
use lingotape_backend::domain::audio::{AudioBuffer, AudioService, LanguageCode};
use lingotape_backend::infrastructure::config::{Config, Environment, LogFormat};
use lingotape_backend::infrastructure::repositories::{AudioExporter, SynthesisRepository};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Synthesis stub returning a fixed-length silent buffer per language, with
/// optional failure injection on an exact text
pub struct StubSynthesis {
    durations_ms: HashMap<LanguageCode, u64>,
    fail_on: Option<String>,
    pub calls: Mutex<Vec<(String, LanguageCode)>>,
}

impl StubSynthesis {
    pub fn new(durations: &[(LanguageCode, u64)]) -> Self {
        Self {
            durations_ms: durations.iter().copied().collect(),
            fail_on: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, text: &str) -> Self {
        self.fail_on = Some(text.to_string());
        self
    }

    pub fn synthesized_texts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(text, _)| text.clone())
            .collect()
    }
}

#[async_trait]
impl SynthesisRepository for StubSynthesis {
    async fn synthesize(
        &self,
        text: &str,
        language: LanguageCode,
    ) -> Result<AudioBuffer, String> {
        if self.fail_on.as_deref() == Some(text) {
            return Err(format!("engine cannot render: {}", text));
        }
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language));
        let duration = self.durations_ms.get(&language).copied().unwrap_or(500);
        Ok(AudioBuffer::silence(duration))
    }
}

/// Exporter stub that records what was exported instead of invoking ffmpeg.
/// When `write_bytes` is set the bytes are written to the target path so
/// catalog endpoints have something to serve.
pub struct CaptureExporter {
    pub exported: Mutex<Vec<(PathBuf, u64)>>,
    fail: bool,
    write_bytes: Option<Vec<u8>>,
}

impl Default for CaptureExporter {
    fn default() -> Self {
        Self {
            exported: Mutex::new(Vec::new()),
            fail: false,
            write_bytes: None,
        }
    }
}

impl CaptureExporter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn writing(bytes: &[u8]) -> Self {
        Self {
            write_bytes: Some(bytes.to_vec()),
            ..Default::default()
        }
    }

    pub fn exported_durations(&self) -> Vec<u64> {
        self.exported
            .lock()
            .unwrap()
            .iter()
            .map(|(_, duration)| *duration)
            .collect()
    }
}

#[async_trait]
impl AudioExporter for CaptureExporter {
    async fn export(&self, audio: &AudioBuffer, path: &Path) -> Result<(), String> {
        if self.fail {
            return Err("output path is not writable".to_string());
        }
        if let Some(bytes) = &self.write_bytes {
            tokio::fs::write(path, bytes)
                .await
                .map_err(|e| e.to_string())?;
        }
        self.exported
            .lock()
            .unwrap()
            .push((path.to_path_buf(), audio.duration_ms()));
        Ok(())
    }
}

/// Wire an AudioService over the stubs, keeping handles to both doubles
pub fn service_with(
    synthesis: StubSynthesis,
    exporter: CaptureExporter,
    output_dir: PathBuf,
) -> (Arc<AudioService>, Arc<StubSynthesis>, Arc<CaptureExporter>) {
    let synthesis = Arc::new(synthesis);
    let exporter = Arc::new(exporter);
    let service = Arc::new(AudioService::new(
        synthesis.clone(),
        exporter.clone(),
        output_dir,
    ));
    (service, synthesis, exporter)
}

pub fn test_config(output_dir: &Path) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        output_dir: output_dir.to_path_buf(),
        aws_region: "eu-west-1".to_string(),
        environment: Environment::Development,
        log_format: LogFormat::Pretty,
        default_inter_language_pause_ms: 5000,
        default_inter_row_pause_ms: 1000,
    }
}
