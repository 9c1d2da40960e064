//! [`Config`]-related definitions.

use std::{path::PathBuf, time};

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use serde::Deserialize;
use service::infra::rest;
use smart_default::SmartDefault;

/// Console configuration.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    /// API configuration.
    #[serde(default)]
    pub api: Api,

    /// Session configuration.
    #[serde(default)]
    pub session: Session,

    /// Lists configuration.
    #[serde(default)]
    pub list: List,

    /// Log configuration.
    #[serde(default)]
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the `PRM.`-prefixed environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("PRM").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the API server.
    #[default("http://localhost:8000".to_owned())]
    pub base_url: String,

    /// Versioned path prefix of the API endpoints.
    #[default("/api/v1".to_owned())]
    pub prefix: String,

    /// Timeout of a single API request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl From<Api> for rest::Config {
    fn from(value: Api) -> Self {
        let Api {
            base_url,
            prefix,
            timeout,
        } = value;
        Self {
            base_url,
            prefix,
            timeout,
        }
    }
}

/// Session configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Session {
    /// Path of the file the session is persisted to between runs.
    #[default(PathBuf::from(".prm-session"))]
    pub path: PathBuf,

    /// Indicator whether the session is persisted at all.
    #[default(true)]
    pub persist: bool,
}

impl Session {
    /// Creates a new [`rest::Store`] as configured.
    #[must_use]
    pub fn store(&self) -> rest::Store {
        if self.persist {
            rest::Store::persisted(self.path.clone())
        } else {
            rest::Store::in_memory()
        }
    }
}

/// Lists configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct List {
    /// Number of items per page when not specified.
    #[default(50)]
    pub page_size: u32,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
