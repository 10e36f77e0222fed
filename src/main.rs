use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingotape_backend::controllers::audio::AudioController;
use lingotape_backend::controllers::files::FileController;
use lingotape_backend::domain::audio::AudioService;
use lingotape_backend::infrastructure::config::{Config, LogFormat};
use lingotape_backend::infrastructure::http::start_http_server;
use lingotape_backend::infrastructure::repositories::{
    AudioExporter, AudioFileRepository, FfmpegExporter, PollySynthesisRepository,
    SynthesisRepository,
};
use lingotape_backend::infrastructure::toolchain::ToolchainProbe;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting LingoTape Backend on {}:{}",
        config.host,
        config.port
    );

    // The output directory is created and validated once here; nothing in
    // the pipeline touches directory layout afterwards
    std::fs::create_dir_all(&config.output_dir)?;
    tracing::info!(
        output_dir = %config.output_dir.display(),
        "Output directory ready"
    );

    // Create AWS Polly client
    tracing::info!(
        "Initializing AWS Polly client with region: {}",
        config.aws_region
    );

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.aws_region.clone()))
        .load()
        .await;

    let polly_client = Arc::new(aws_sdk_polly::Client::new(&aws_config));
    tracing::info!("AWS Polly client initialized successfully");

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories and external tool seams
    tracing::info!("Instantiating repositories...");
    let synthesis_repo: Arc<dyn SynthesisRepository> =
        Arc::new(PollySynthesisRepository::new(polly_client));
    let exporter: Arc<dyn AudioExporter> = Arc::new(FfmpegExporter::new());
    let file_repo = Arc::new(AudioFileRepository::new(config.output_dir.clone()));
    let toolchain = Arc::new(ToolchainProbe::new());

    // Surface toolchain problems at startup; requests are still gated per call
    let toolchain_status = toolchain.check().await;
    if toolchain_status.available {
        tracing::info!("Audio toolchain verified (ffmpeg, ffprobe)");
    } else {
        tracing::warn!(
            missing = ?toolchain_status.missing,
            "Audio toolchain incomplete; generation requests will be rejected until it is installed"
        );
    }

    // 2. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let audio_service = Arc::new(AudioService::new(
        synthesis_repo,
        exporter,
        config.output_dir.clone(),
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let audio_controller = Arc::new(AudioController::new(
        audio_service,
        toolchain,
        config.clone(),
    ));
    let file_controller = Arc::new(FileController::new(file_repo));

    // Start HTTP server with all routes
    start_http_server(config, audio_controller, file_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lingotape_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lingotape_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
