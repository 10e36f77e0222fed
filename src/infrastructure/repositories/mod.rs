pub mod audio_exporter;
pub mod audio_file_repository;
pub mod ffmpeg_exporter;
pub mod polly_synthesis_repository;
pub mod synthesis_repository;

pub use audio_exporter::AudioExporter;
pub use audio_file_repository::{AudioFileRepository, FileStoreError};
pub use ffmpeg_exporter::FfmpegExporter;
pub use polly_synthesis_repository::PollySynthesisRepository;
pub use synthesis_repository::SynthesisRepository;
