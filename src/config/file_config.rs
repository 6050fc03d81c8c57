use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub songs_path: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub static_dir_path: Option<String>,
    pub preview_base_url: Option<String>,
    pub preview_timeout_sec: Option<u64>,
    pub session_max_age_sec: Option<u64>,
    pub sweep_interval_sec: Option<u64>,

    pub game: Option<GameConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct GameConfig {
    pub time_limit_sec: Option<u32>,
    pub max_questions: Option<usize>,
    pub max_choices: Option<usize>,
    pub available_genre_threshold: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
