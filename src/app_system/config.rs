//! Environment-backed configuration.
//!
//! Values are parsed strictly: a variable that is set but empty, or that does
//! not parse, is an error rather than a silent fallback to the default.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::{seed_products, Product};
use crate::store::ProductStore;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Environment keys read by [`Config::from_env`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigEnv {
    /// Inventory actor mailbox size (positive integer).
    ChannelCapacity,
    /// Optional JSON seed file replacing the built-in product set.
    SeedPath,
    /// Log output format, `compact` or `json`.
    LogFormat,
}

impl ConfigEnv {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChannelCapacity => "INVENTORY_CHANNEL_CAPACITY",
            Self::SeedPath => "INVENTORY_SEED_PATH",
            Self::LogFormat => "INVENTORY_LOG_FORMAT",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("failed to read seed file {path}: {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse seed file {path}: {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid seed data: {0}")]
    SeedData(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub channel_capacity: usize,
    pub seed_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            seed_path: None,
            log_format: LogFormat::Compact,
        }
    }
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which maps a variable name to its
    /// value when set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: ConfigEnv| -> Result<Option<String>, ConfigError> {
            match lookup(key.as_str()) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { name: key.as_str() }),
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        let channel_capacity = read(ConfigEnv::ChannelCapacity)?
            .map(|raw| parse_capacity(&raw))
            .transpose()?
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY);
        let seed_path = read(ConfigEnv::SeedPath)?.map(PathBuf::from);
        let log_format = read(ConfigEnv::LogFormat)?
            .map(|raw| parse_log_format(&raw))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            channel_capacity,
            seed_path,
            log_format,
        })
    }

    /// Builds the initial store, from the seed file when one is configured.
    pub fn seed_store(&self) -> Result<ProductStore, ConfigError> {
        let products = match &self.seed_path {
            Some(path) => load_seed_file(path)?,
            None => seed_products(),
        };
        ProductStore::new(products).map_err(|e| ConfigError::SeedData(e.to_string()))
    }
}

fn parse_capacity(raw: &str) -> Result<usize, ConfigError> {
    let name = ConfigEnv::ChannelCapacity.as_str();
    let capacity: usize = raw.parse().map_err(|_| ConfigError::Invalid {
        name,
        reason: format!("expected a positive integer, got {raw:?}"),
    })?;
    if capacity == 0 {
        return Err(ConfigError::Invalid {
            name,
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(capacity)
}

fn parse_log_format(raw: &str) -> Result<LogFormat, ConfigError> {
    if raw.eq_ignore_ascii_case("compact") {
        Ok(LogFormat::Compact)
    } else if raw.eq_ignore_ascii_case("json") {
        Ok(LogFormat::Json)
    } else {
        Err(ConfigError::Invalid {
            name: ConfigEnv::LogFormat.as_str(),
            reason: format!("expected compact or json, got {raw:?}"),
        })
    }
}

/// Reads a JSON array of product records.
fn load_seed_file(path: &Path) -> Result<Vec<Product>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::SeedRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ConfigError::SeedParse {
        path: path.to_path_buf(),
        source,
    })
}
