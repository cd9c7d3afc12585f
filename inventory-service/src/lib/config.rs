use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin_seed: AdminSeedConfig,
}

/// Which adapter family backs the user and product ports.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// `Debug` is implemented by hand so the secret never reaches a log line.
#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_ms: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_ms", &self.expiration_ms)
            .finish()
    }
}

/// Default administrator account created at startup when missing.
#[derive(Deserialize, Clone)]
pub struct AdminSeedConfig {
    #[serde(default = "default_seed_enabled")]
    pub enabled: bool,
    #[serde(default = "default_seed_username")]
    pub username: String,
    #[serde(default = "default_seed_password")]
    pub password: String,
    #[serde(default = "default_seed_email")]
    pub email: String,
}

impl Default for AdminSeedConfig {
    fn default() -> Self {
        Self {
            enabled: default_seed_enabled(),
            username: default_seed_username(),
            password: default_seed_password(),
            email: default_seed_email(),
        }
    }
}

impl std::fmt::Debug for AdminSeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeedConfig")
            .field("enabled", &self.enabled)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_seed_enabled() -> bool {
    true
}

fn default_seed_username() -> String {
    "admin".to_string()
}

fn default_seed_password() -> String {
    "admin123".to_string()
}

fn default_seed_email() -> String {
    "admin@testepratico.com".to_string()
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: JWT__EXPIRATION_MS=3600000 overrides jwt.expiration_ms
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;

    use super::*;

    fn parse(toml: &str) -> Result<Config, ConfigError> {
        ConfigBuilder::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = parse(
            r#"
            [server]
            http_port = 9000

            [database]
            url = "postgresql://localhost/inventory"

            [jwt]
            secret = "s"
            expiration_ms = 1000
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.server.http_port, 9000);
        assert_eq!(config.database.backend, StorageBackend::Postgres);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.admin_seed.enabled);
        assert_eq!(config.admin_seed.username, "admin");
        assert_eq!(config.jwt.expiration_ms, 1000);
    }

    #[test]
    fn test_memory_backend() {
        let config = parse(
            r#"
            [server]
            http_port = 9000

            [database]
            backend = "memory"

            [jwt]
            secret = "s"
            expiration_ms = 1000

            [admin_seed]
            enabled = false
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(config.database.url.is_empty());
        assert!(!config.admin_seed.enabled);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let jwt = JwtConfig {
            secret: "super-secret-value".to_string(),
            expiration_ms: 1000,
        };
        let seed = AdminSeedConfig::default();

        assert!(!format!("{:?}", jwt).contains("super-secret-value"));
        assert!(!format!("{:?}", seed).contains("admin123"));
    }
}
