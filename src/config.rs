use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SmsRelayError};

/// Application configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

/// Hosted message store (Supabase REST) credentials and table name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub url: String,
    pub key: String,
    pub table: String,
}

/// SMS gateway (Twilio) credentials and the configured origin number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
    pub format: String, // "json" or "text"
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            table: "messages".to_string(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
            format: "text".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence
    pub fn load() -> Result<Self> {
        let config = Config::builder()
            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(File::with_name("config").required(false))
            // Add environment variables with prefix
            .add_source(
                Environment::with_prefix("SMS_RELAY")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;

        // Validate configuration
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    ///
    /// Missing store or gateway credentials abort startup.
    pub fn validate(&self) -> Result<()> {
        // Validate store config
        if self.store.url.trim().is_empty() {
            return Err(SmsRelayError::InvalidConfig(
                "Supabase credentials are not set: store.url is required".to_string(),
            ));
        }
        if self.store.key.trim().is_empty() {
            return Err(SmsRelayError::InvalidConfig(
                "Supabase credentials are not set: store.key is required".to_string(),
            ));
        }
        if self.store.table.trim().is_empty() {
            return Err(SmsRelayError::InvalidConfig(
                "store.table must not be empty".to_string(),
            ));
        }

        // Validate gateway config
        if self.gateway.account_sid.trim().is_empty() {
            return Err(SmsRelayError::InvalidConfig(
                "Twilio credentials are not set: gateway.account_sid is required".to_string(),
            ));
        }
        if self.gateway.auth_token.trim().is_empty() {
            return Err(SmsRelayError::InvalidConfig(
                "Twilio credentials are not set: gateway.auth_token is required".to_string(),
            ));
        }
        if self.gateway.from_number.trim().is_empty() {
            return Err(SmsRelayError::InvalidConfig(
                "Twilio credentials are not set: gateway.from_number is required".to_string(),
            ));
        }

        // Validate server config
        if self.server.bind_address.trim().is_empty() {
            return Err(SmsRelayError::InvalidConfig(
                "server.bind_address must not be empty".to_string(),
            ));
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(SmsRelayError::InvalidConfig(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level, valid_levels
            )));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(SmsRelayError::InvalidConfig(format!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format, valid_formats
            )));
        }

        Ok(())
    }

    /// Get log level from environment or config
    #[must_use]
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}
