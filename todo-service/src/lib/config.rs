use std::env;

use auth::random_secret;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

const GENERATED_SECRET_LEN: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Trusted browser origin. Any origin is accepted when unset.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    #[serde(default)]
    pub secret: Option<String>,
    pub expiration_minutes: i64,
}

impl TokenConfig {
    /// Key used both to sign tokens and to pepper password digests.
    ///
    /// Without a configured secret a random one is generated, so every token
    /// and every stored digest is invalidated on restart.
    pub fn signing_secret(&self) -> Vec<u8> {
        match self.secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret.as_bytes().to_vec(),
            _ => {
                tracing::warn!(
                    "No token secret configured, generating a random one; \
                     tokens and passwords will not survive a restart"
                );
                random_secret(GENERATED_SECRET_LEN)
            }
        }
    }

    pub fn lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.expiration_minutes)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults (port 8000, 30 minute tokens)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 8000)?
            .set_default("token.expiration_minutes", 30)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // DATABASE__URL=postgres://... overrides database.url
            .add_source(
                Environment::default()
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        configuration.try_deserialize()
    }
}
