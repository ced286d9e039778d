use serde::Deserialize;

use crate::domain::api_key::DEFAULT_DAILY_LIMIT;
use crate::domain::project::{PageLimits, DEFAULT_PER_PAGE, MAX_PER_PAGE};
use crate::infrastructure::project::DEFAULT_SIMILAR_LIMIT;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub access: AccessConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub seed: SeedConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Access gate settings
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Header an upstream authenticator sets to the signed-in account id
    #[serde(default = "default_session_header")]
    pub session_header: String,
    /// Daily limit given to seeded keys that do not set one
    #[serde(default = "default_daily_limit")]
    pub default_daily_limit: u64,
    /// Zero key counts at UTC midnight
    #[serde(default = "default_true")]
    pub quota_reset_enabled: bool,
}

/// Listing and suggestion settings
#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_per_page")]
    pub default_per_page: usize,
    /// Never above 25, whatever is configured
    #[serde(default = "default_max_per_page")]
    pub max_per_page: usize,
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// JSON seed file; the directory starts empty without one
    #[serde(default)]
    pub path: Option<String>,
}

/// Prometheus metrics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

fn default_session_header() -> String {
    "x-session-account".to_string()
}

fn default_daily_limit() -> u64 {
    DEFAULT_DAILY_LIMIT
}

fn default_true() -> bool {
    true
}

fn default_per_page() -> usize {
    DEFAULT_PER_PAGE
}

fn default_max_per_page() -> usize {
    MAX_PER_PAGE
}

fn default_similar_limit() -> usize {
    DEFAULT_SIMILAR_LIMIT
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            session_header: default_session_header(),
            default_daily_limit: default_daily_limit(),
            quota_reset_enabled: true,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            similar_limit: default_similar_limit(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_metrics_path(),
        }
    }
}

impl RankingConfig {
    pub fn page_limits(&self) -> PageLimits {
        PageLimits::new(self.default_per_page, self.max_per_page)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
