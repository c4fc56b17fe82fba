//! The settings schema.
//!
//! [`Settings`] is the typed, read-only projection of every configuration
//! layer. Each section is its own [`confique::Config`] struct so it can be
//! constructed and validated independently; the root derives `Config` too,
//! which gives the YAML template and the key metadata used for environment
//! binding and strict mode.
//!
//! String fields accept scalar input of any type (`password: 123456` in YAML
//! or `DATABASE__USER=1000` in the environment), numeric and boolean fields
//! must coerce to their declared type.

use std::path::PathBuf;

use confique::Config;
use serde::{Deserialize, Serialize};

/// Root settings object.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Base YAML file the settings were loaded from (from CONFIG_BASE_PATH).
    pub config_base_path: Option<PathBuf>,

    /// Environment-specific YAML file layered over the base file (from CONFIG_ENV_PATH).
    pub config_env_path: Option<PathBuf>,

    /// Database connection settings.
    #[config(nested)]
    pub database: DatabaseSettings,

    /// Upstream API client settings.
    #[config(nested)]
    pub api: ApiSettings,

    /// Worker and batching settings.
    #[config(nested)]
    pub app: AppSettings,

    /// Log output settings.
    #[config(nested)]
    pub logging: LoggingSettings,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DatabaseSettings {
    /// Database server host name.
    #[config(deserialize_with = lenient::string, default = "localhost")]
    pub host: String,

    /// Database server port.
    #[config(default = 3306)]
    pub port: u16,

    /// Database user name.
    #[config(deserialize_with = lenient::string, default = "root")]
    pub user: String,

    /// Database password. Prefer the DATABASE_PASSWORD variable over files.
    #[config(deserialize_with = lenient::string, default = "")]
    pub password: String,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiSettings {
    /// Base URL of the upstream API.
    #[config(deserialize_with = lenient::string, default = "http://localhost:8080/api")]
    pub url: String,

    /// Request timeout in milliseconds.
    #[config(default = 5000)]
    pub timeout: u64,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Maximum number of concurrent workers.
    #[config(default = 20)]
    pub max_workers: u32,

    /// Number of records processed per batch.
    #[config(default = 1000)]
    pub batch_size: u32,

    /// How many times a failed batch is retried.
    #[config(default = 3)]
    pub max_retry: u32,

    /// Application log level.
    #[config(deserialize_with = lenient::string, default = "INFO")]
    pub log_level: String,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log level for the logging backend.
    #[config(deserialize_with = lenient::string, default = "INFO")]
    pub level: String,

    /// Show progress output while processing.
    #[config(default = true)]
    pub show_progress: bool,
}

impl Settings {
    /// Database connection string: `mysql://{user}:{password}@{host}:{port}`.
    ///
    /// With the `url` feature, user and password are percent-encoded.
    pub fn database_url(&self) -> String {
        let db = &self.database;
        format!(
            "mysql://{}:{}@{}:{}",
            userinfo(&db.user),
            userinfo(&db.password),
            db.host,
            db.port
        )
    }
}

#[cfg(feature = "url")]
fn userinfo(raw: &str) -> String {
    use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

#[cfg(not(feature = "url"))]
fn userinfo(raw: &str) -> String {
    raw.to_string()
}

mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Str(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    /// Accept any scalar and keep its textual form.
    pub(super) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Scalar::deserialize(deserializer)? {
            Scalar::Str(s) => s,
            Scalar::Int(i) => i.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Bool(b) => b.to_string(),
        })
    }
}
