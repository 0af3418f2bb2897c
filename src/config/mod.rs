//! Application configuration
//!
//! Configuration is assembled once at startup and then passed around
//! explicitly inside [`crate::web::AppState`]. Sources are layered, lowest
//! precedence first:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. `LIVEMATCH__SECTION__KEY` environment variables
//! 4. the flat `PORT`, `CORS_ORIGIN`, `ADMIN_TOKEN` and `DB_PATH` variables
//!
//! CLI flags are applied on top by the binary.

use anyhow::Result;
use config::{Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::obfuscation::DEFAULT_KEY_BASE;

pub const DEFAULT_ADMIN_TOKEN: &str = "changeme";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub web: WebConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    pub rate_limit: RateLimitConfig,
    pub obfuscation: ObfuscationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origin, `*` for any
    pub cors_origin: String,
    /// Maximum accepted JSON body size in bytes
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObfuscationConfig {
    pub key_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 4000,
                cors_origin: "*".to_string(),
                max_body_bytes: 1024 * 1024,
            },
            database: DatabaseConfig {
                path: PathBuf::from("./livematch.db"),
                max_connections: 10,
            },
            admin: AdminConfig {
                token: DEFAULT_ADMIN_TOKEN.to_string(),
            },
            rate_limit: RateLimitConfig {
                max_requests: 200,
                window_secs: 60,
            },
            obfuscation: ObfuscationConfig {
                key_base: DEFAULT_KEY_BASE.to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from `path` (if it exists) and the process environment
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Load configuration, resolving the flat legacy variables through `lookup`
    pub fn load_with_env<F>(path: impl AsRef<Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let path = path.as_ref();

        let builder = config::Config::builder()
            .set_default("web.host", defaults.web.host)?
            .set_default("web.port", i64::from(defaults.web.port))?
            .set_default("web.cors_origin", defaults.web.cors_origin)?
            .set_default("web.max_body_bytes", defaults.web.max_body_bytes as i64)?
            .set_default(
                "database.path",
                defaults.database.path.to_string_lossy().to_string(),
            )?
            .set_default(
                "database.max_connections",
                i64::from(defaults.database.max_connections),
            )?
            .set_default("admin.token", defaults.admin.token)?
            .set_default(
                "rate_limit.max_requests",
                i64::from(defaults.rate_limit.max_requests),
            )?
            .set_default(
                "rate_limit.window_secs",
                defaults.rate_limit.window_secs as i64,
            )?
            .set_default("obfuscation.key_base", defaults.obfuscation.key_base)?
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("LIVEMATCH")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("web.port", lookup("PORT"))?
            .set_override_option("web.cors_origin", lookup("CORS_ORIGIN"))?
            .set_override_option("admin.token", lookup("ADMIN_TOKEN"))?
            .set_override_option("database.path", lookup("DB_PATH"))?;

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.admin.token.is_empty() {
            anyhow::bail!("admin.token must not be empty");
        }
        if self.rate_limit.max_requests == 0 || self.rate_limit.window_secs == 0 {
            anyhow::bail!("rate_limit.max_requests and rate_limit.window_secs must be non-zero");
        }
        Ok(())
    }

    pub fn uses_default_admin_token(&self) -> bool {
        self.admin.token == DEFAULT_ADMIN_TOKEN
    }
}
