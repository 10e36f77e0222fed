use crate::domain::audio::StoredAudioFile;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FileStoreError {
    #[error("Audio file not found: {0}")]
    NotFound(String),
    #[error("Invalid filename: {0}")]
    InvalidName(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FileStoreError> for AppError {
    fn from(err: FileStoreError) -> Self {
        match err {
            FileStoreError::NotFound(name) => AppError::NotFound(name),
            FileStoreError::InvalidName(msg) => AppError::BadRequest(msg),
            FileStoreError::Io(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Thin catalog over the fixed output directory. The filesystem is the only
/// index; no metadata is persisted anywhere else.
pub struct AudioFileRepository {
    output_dir: PathBuf,
}

impl AudioFileRepository {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// All `.mp3` files currently in the output directory, newest first.
    /// A missing or empty directory yields an empty list, never an error.
    pub async fn list(&self) -> Result<Vec<StoredAudioFile>, FileStoreError> {
        let mut entries = match tokio::fs::read_dir(&self.output_dir).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("mp3") {
                continue;
            }
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }

            let filename = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };

            files.push(StoredAudioFile {
                filename,
                size_bytes: metadata.len(),
                created_at: file_timestamp(&metadata),
            });
        }

        files.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(files)
    }

    /// Read a stored file's bytes
    pub async fn read(&self, filename: &str) -> Result<Vec<u8>, FileStoreError> {
        let path = self.resolve(filename)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(FileStoreError::NotFound(filename.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Remove a stored file
    pub async fn remove(&self, filename: &str) -> Result<(), FileStoreError> {
        let path = self.resolve(filename)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(filename = %filename, "Audio file deleted");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(FileStoreError::NotFound(filename.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Resolve a caller-supplied filename inside the output directory,
    /// rejecting anything that could escape it
    fn resolve(&self, filename: &str) -> Result<PathBuf, FileStoreError> {
        if filename.is_empty()
            || filename.contains('/')
            || filename.contains('\\')
            || filename.contains("..")
        {
            return Err(FileStoreError::InvalidName(filename.to_string()));
        }
        Ok(self.output_dir.join(filename))
    }
}

fn file_timestamp(metadata: &std::fs::Metadata) -> DateTime<Utc> {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
}
