use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Orders database configuration
    pub database: DatabaseConfig,
    /// Twilio provider configuration
    pub twilio: TwilioConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    /// Server host (default: 0.0.0.0)
    pub host: String,
    /// Server port (default: 3000)
    pub port: u16,
}

/// Orders database configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection URL for the orders database
    pub url: String,
}

/// Twilio provider configuration. All three values are required; there are
/// no defaults.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// Sender phone number for outbound messages
    pub from_number: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Log level (default: info)
    pub level: String,
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// Sources, later ones winning: built-in defaults, `config/default`,
    /// `config/local` (gitignored), then environment variables prefixed
    /// with `ORDERSMS` and nested with `__` (e.g.
    /// `ORDERSMS__TWILIO__ACCOUNT_SID`).
    ///
    /// Missing required values (database url, Twilio credentials) fail
    /// here, at startup, instead of surfacing later as a failed provider
    /// call.
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(Environment::with_prefix("ORDERSMS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
