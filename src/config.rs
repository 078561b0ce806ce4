use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub statsapi: StatsApiConfig,
    pub scan: ScanConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    /// Sent verbatim as `Cache-Control` on `/api/stats` when set.
    pub cache_control: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_owned(),
            port: 3000,
            cache_control: None,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StatsApiConfig {
    pub base_url: String,
    pub sport_id: u32,
    pub timeout_seconds: u64,
    /// IANA zone that decides what "today" means for the schedule.
    pub timezone: String,
}

impl Default for StatsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://statsapi.mlb.com/api/v1".to_owned(),
            sport_id: 1,
            timeout_seconds: 30,
            timezone: "America/New_York".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub game_log_limit: usize,
    pub exclude_pitchers: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            game_log_limit: 20,
            exclude_pitchers: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads `path` (or `config/default.toml` when it exists), then applies
    /// `.env` and environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(bind) = var("BVP_BIND") {
            self.server.bind = bind;
        }
        if let Some(port) = var("BVP_PORT") {
            self.server.port = port.parse().with_context(|| format!("BVP_PORT '{port}' is not a valid port"))?;
        }
        if let Some(base_url) = var("STATSAPI_BASE_URL") {
            self.statsapi.base_url = base_url;
        }
        if let Some(timezone) = var("STATSAPI_TIMEZONE") {
            self.statsapi.timezone = timezone;
        }
        Ok(())
    }
}
