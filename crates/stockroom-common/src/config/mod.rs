//! Configuration structs

mod app_config;

pub use app_config::{
    AlertsConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, RateLimitConfig, RedisConfig, SearchConfig, ServerConfig, SnowflakeConfig,
};
