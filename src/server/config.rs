use super::RequestsLoggingLevel;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
    /// Directory served under `/static`, if any.
    pub static_dir_path: Option<String>,
    /// Age of the sessions swept after a game is started.
    pub session_max_age_sec: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            host: "127.0.0.1".to_string(),
            port: 8000,
            metrics_port: 9091,
            static_dir_path: None,
            session_max_age_sec: 3600,
        }
    }
}
