//! Application configuration management.

use chrono::NaiveDate;
use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Billing derivation settings.
    #[serde(default)]
    pub billing: BillingConfig,
    /// Event trigger settings.
    pub trigger: TriggerConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key shared with the identity layer.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

/// Billing derivation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct BillingConfig {
    /// First Monday of biweekly period zero.
    #[serde(default = "default_biweekly_anchor")]
    pub biweekly_anchor: NaiveDate,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            biweekly_anchor: default_biweekly_anchor(),
        }
    }
}

/// Monday 1970-01-05, the first ISO Monday after the Unix epoch.
#[must_use]
pub fn default_biweekly_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 5).unwrap_or_default()
}

/// Settings for the attendance-change trigger endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerConfig {
    /// Shared secret the delivery mechanism presents in `x-trigger-secret`.
    pub secret: String,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("ROSTRA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use chrono::Datelike;

    #[test]
    fn test_default_anchor_is_monday() {
        let anchor = default_biweekly_anchor();
        assert_eq!(anchor, NaiveDate::from_ymd_opt(1970, 1, 5).unwrap());
        assert_eq!(anchor.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("ROSTRA__DATABASE__URL", Some("postgres://localhost/rostra")),
                ("ROSTRA__JWT__SECRET", Some("jwt-secret")),
                ("ROSTRA__TRIGGER__SECRET", Some("trigger-secret")),
                ("ROSTRA__SERVER__PORT", Some("9090")),
                ("RUN_MODE", Some("test-nonexistent")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.database.url, "postgres://localhost/rostra");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.jwt.secret, "jwt-secret");
                assert_eq!(config.jwt.access_token_expiry_secs, 900);
                assert_eq!(config.trigger.secret, "trigger-secret");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.server.host, "0.0.0.0");
                assert_eq!(config.billing.biweekly_anchor, default_biweekly_anchor());
            },
        );
    }

    #[test]
    fn test_load_anchor_override() {
        temp_env::with_vars(
            [
                ("ROSTRA__DATABASE__URL", Some("postgres://localhost/rostra")),
                ("ROSTRA__JWT__SECRET", Some("jwt-secret")),
                ("ROSTRA__TRIGGER__SECRET", Some("trigger-secret")),
                ("ROSTRA__BILLING__BIWEEKLY_ANCHOR", Some("2024-01-01")),
                ("RUN_MODE", Some("test-nonexistent")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(
                    config.billing.biweekly_anchor,
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                );
            },
        );
    }
}
