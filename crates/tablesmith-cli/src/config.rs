use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use thiserror::Error;

use tablesmith_core::redact_connection_string;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "tablesmith.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("can not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("can not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub output: OutputConfig,
}

/// Connection settings: either a full `url` or its individual parts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
    pub sslmode: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 5432,
            user: None,
            password: None,
            dbname: None,
            sslmode: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("outputs"),
        }
    }
}

impl DatabaseConfig {
    /// Build driver connect options from the configured url or parts.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url)
                .map_err(|err| ConfigError::Invalid(format!("database.url: {err}")));
        }

        let dbname = self
            .dbname
            .as_deref()
            .ok_or_else(|| ConfigError::Invalid("database.dbname is required".to_string()))?;

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(dbname);
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(mode) = &self.sslmode {
            let mode = PgSslMode::from_str(mode)
                .map_err(|err| ConfigError::Invalid(format!("database.sslmode: {err}")))?;
            options = options.ssl_mode(mode);
        }
        Ok(options)
    }

    /// Connection description safe to log.
    pub fn redacted(&self) -> String {
        if let Some(url) = &self.url {
            return redact_connection_string(url).redacted;
        }
        let auth = match (&self.user, &self.password) {
            (Some(user), Some(_)) => format!("{user}:***@"),
            (Some(user), None) => format!("{user}@"),
            _ => String::new(),
        };
        format!(
            "postgres://{auth}{}:{}/{}",
            self.host,
            self.port,
            self.dbname.as_deref().unwrap_or_default()
        )
    }

    /// Database name for progress messages.
    pub fn database_name(&self) -> String {
        match &self.url {
            Some(url) => redact_connection_string(url).database.unwrap_or_default(),
            None => self.dbname.clone().unwrap_or_default(),
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}
