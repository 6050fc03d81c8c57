use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use music_guesser_server::catalog::load_catalog;
use music_guesser_server::config::{AppConfig, CliConfig, FileConfig};
use music_guesser_server::game::GameService;
use music_guesser_server::playlist::PlaylistRegistry;
use music_guesser_server::preview::{
    DeezerPreviewClient, NoOpPreviewLookup, PreviewLookup, DEFAULT_DEEZER_BASE_URL,
};
use music_guesser_server::server::{metrics, run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    if path_buf.is_absolute() {
        return Ok(path_buf);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(path_buf))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the JSON songs catalog.
    #[clap(value_parser = parse_path, default_value = "songs.json")]
    pub songs_path: PathBuf,

    /// Path to a TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The address to bind to.
    #[clap(long, default_value = "127.0.0.1")]
    pub host: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to a directory to be statically served under /static.
    #[clap(long)]
    pub static_dir_path: Option<String>,

    /// Base URL of the audio previews provider, empty to disable previews.
    #[clap(long, default_value = DEFAULT_DEEZER_BASE_URL)]
    pub preview_base_url: String,

    /// Timeout in seconds for preview lookups.
    #[clap(long, default_value_t = 5)]
    pub preview_timeout_sec: u64,

    /// Age in seconds after which a started game session is discarded.
    #[clap(long, default_value_t = 3600)]
    pub session_max_age_sec: u64,

    /// Interval in seconds between sweeps of stale sessions. Set to 0 to disable.
    #[clap(long, default_value_t = 600)]
    pub sweep_interval_sec: u64,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            songs_path: self.songs_path.clone(),
            host: self.host.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level.clone(),
            static_dir_path: self.static_dir_path.clone(),
            preview_base_url: self.preview_base_url.clone(),
            preview_timeout_sec: self.preview_timeout_sec,
            session_max_age_sec: self.session_max_age_sec,
            sweep_interval_sec: self.sweep_interval_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Reading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    let catalog = Arc::new(load_catalog(
        &config.songs_path,
        config.game.available_genre_threshold,
    ));

    info!("Initializing metrics...");
    metrics::init_metrics();
    metrics::init_catalog_metrics(catalog.count());

    let preview: Arc<dyn PreviewLookup> = if config.preview_base_url.is_empty() {
        info!("Audio previews disabled");
        Arc::new(NoOpPreviewLookup)
    } else {
        info!("Audio previews resolved through {}", config.preview_base_url);
        Arc::new(DeezerPreviewClient::new(
            &config.preview_base_url,
            config.preview_timeout_sec,
        )?)
    };

    let game_service = Arc::new(GameService::new(
        catalog,
        Arc::new(PlaylistRegistry::default()),
        preview,
        config.game.rules(),
    ));

    // Spawn background task for session sweeping if enabled
    if config.sweep_interval_sec > 0 {
        let interval_sec = config.sweep_interval_sec;
        let max_age_sec = config.session_max_age_sec;
        let sweeping_service = game_service.clone();

        info!(
            "Session sweeping enabled: max age {}s, sweeping every {}s",
            max_age_sec, interval_sec
        );

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_sec));

            // Skip the first immediate tick, wait for the first interval
            ticker.tick().await;

            loop {
                ticker.tick().await;
                sweeping_service.sweep(max_age_sec);
            }
        });
    }

    info!("Ready to serve at {}:{}!", config.host, config.port);
    info!("Metrics available at port {}!", config.metrics_port);
    run_server(config.server_config(), game_service).await
}
