//! Application configuration

mod app_config;

pub use app_config::{
    AccessConfig, AppConfig, LogFormat, LoggingConfig, MetricsConfig, RankingConfig, SeedConfig,
    ServerConfig,
};
