mod file_config;

pub use file_config::{FileConfig, GameConfig};

use crate::catalog::DEFAULT_AVAILABLE_GENRE_THRESHOLD;
use crate::game::GameRules;
use crate::preview::DEFAULT_DEEZER_BASE_URL;
use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub songs_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub static_dir_path: Option<String>,
    pub preview_base_url: String,
    pub preview_timeout_sec: u64,
    pub session_max_age_sec: u64,
    pub sweep_interval_sec: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            songs_path: PathBuf::from("songs.json"),
            host: "127.0.0.1".to_string(),
            port: 8000,
            metrics_port: 9091,
            logging_level: RequestsLoggingLevel::Path,
            static_dir_path: None,
            preview_base_url: DEFAULT_DEEZER_BASE_URL.to_string(),
            preview_timeout_sec: 5,
            session_max_age_sec: 3600,
            sweep_interval_sec: 600,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub songs_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub static_dir_path: Option<String>,
    pub preview_base_url: String,
    pub preview_timeout_sec: u64,
    pub session_max_age_sec: u64,
    /// 0 disables the periodic sweep.
    pub sweep_interval_sec: u64,

    pub game: GameSettingsConfig,
}

/// Game tuning, only configurable through the `[game]` section of the
/// config file.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSettingsConfig {
    pub time_limit_sec: u32,
    pub max_questions: usize,
    pub max_choices: usize,
    pub available_genre_threshold: usize,
}

impl Default for GameSettingsConfig {
    fn default() -> Self {
        let rules = GameRules::default();
        GameSettingsConfig {
            time_limit_sec: rules.time_limit_sec,
            max_questions: rules.max_questions,
            max_choices: rules.max_choices,
            available_genre_threshold: DEFAULT_AVAILABLE_GENRE_THRESHOLD,
        }
    }
}

impl GameSettingsConfig {
    pub fn rules(&self) -> GameRules {
        GameRules {
            time_limit_sec: self.time_limit_sec,
            max_questions: self.max_questions,
            max_choices: self.max_choices,
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let songs_path = file
            .songs_path
            .map(PathBuf::from)
            .unwrap_or_else(|| cli.songs_path.clone());
        let host = file.host.unwrap_or_else(|| cli.host.clone());
        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let static_dir_path = file
            .static_dir_path
            .or_else(|| cli.static_dir_path.clone());
        let preview_base_url = file
            .preview_base_url
            .unwrap_or_else(|| cli.preview_base_url.clone());
        let preview_timeout_sec = file
            .preview_timeout_sec
            .unwrap_or(cli.preview_timeout_sec);
        let session_max_age_sec = file
            .session_max_age_sec
            .unwrap_or(cli.session_max_age_sec);
        let sweep_interval_sec = file.sweep_interval_sec.unwrap_or(cli.sweep_interval_sec);

        if preview_timeout_sec == 0 {
            bail!("preview_timeout_sec must be greater than 0");
        }
        if session_max_age_sec == 0 {
            bail!("session_max_age_sec must be greater than 0");
        }

        let defaults = GameSettingsConfig::default();
        let game_file = file.game.unwrap_or_default();
        let game = GameSettingsConfig {
            time_limit_sec: game_file.time_limit_sec.unwrap_or(defaults.time_limit_sec),
            max_questions: game_file.max_questions.unwrap_or(defaults.max_questions),
            max_choices: game_file.max_choices.unwrap_or(defaults.max_choices),
            available_genre_threshold: game_file
                .available_genre_threshold
                .unwrap_or(defaults.available_genre_threshold),
        };
        if game.time_limit_sec == 0 {
            bail!("game.time_limit_sec must be greater than 0");
        }
        if game.max_questions == 0 || game.max_choices == 0 {
            bail!("game.max_questions and game.max_choices must be greater than 0");
        }

        Ok(Self {
            songs_path,
            host,
            port,
            metrics_port,
            logging_level,
            static_dir_path,
            preview_base_url,
            preview_timeout_sec,
            session_max_age_sec,
            sweep_interval_sec,
            game,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            host: self.host.clone(),
            port: self.port,
            metrics_port: self.metrics_port,
            static_dir_path: self.static_dir_path.clone(),
            session_max_age_sec: self.session_max_age_sec,
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
