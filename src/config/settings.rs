//! TOML-based configuration for tablecheck.
//!
//! Supports a config file (tablecheck.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [source]
//! path = "data/data.csv"
//!
//! [output]
//! dir = "tmp"
//!
//! [transform]
//! dish_rank_cutoff = 5
//!
//! [warehouses.default]
//! driver = "bigquery"
//! dataset = "bigquery-dataengineering.tablecheck_data"
//! credentials = "${GOOGLE_APPLICATION_CREDENTIALS}"
//! location = "US"
//!
//! [warehouses.local]
//! driver = "sqlite"
//! path = "./tmp/warehouse.db"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::warehouse::{Driver, WarehouseConfig};
use crate::transform::{TransformOptions, DEFAULT_DISH_RANK_CUTOFF};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(String),

    #[error("Unsupported driver: {0}")]
    UnsupportedDriver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Raw order file.
    pub source: SourceSettings,

    /// Export directory.
    pub output: OutputSettings,

    /// Aggregation options.
    pub transform: TransformSettings,

    /// Named warehouse targets.
    pub warehouses: HashMap<String, WarehouseSettings>,
}

/// Source file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Path to the raw CSV (supports ${ENV_VAR} expansion).
    pub path: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: "data/data.csv".to_string(),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory the table CSVs are written to.
    pub dir: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: "tmp".to_string(),
        }
    }
}

/// Aggregation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Highest dish rank kept per restaurant.
    pub dish_rank_cutoff: u32,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            dish_rank_cutoff: DEFAULT_DISH_RANK_CUTOFF,
        }
    }
}

impl TransformSettings {
    pub fn to_options(&self) -> TransformOptions {
        TransformOptions::default().with_dish_rank_cutoff(self.dish_rank_cutoff)
    }
}

/// Warehouse target configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WarehouseSettings {
    /// Warehouse driver (bigquery, sqlite).
    pub driver: String,

    /// BigQuery dataset, `project.dataset` or `dataset`.
    #[serde(default)]
    pub dataset: Option<String>,

    /// Service-account key file (supports ${ENV_VAR} expansion).
    #[serde(default)]
    pub credentials: Option<String>,

    /// BigQuery location, e.g. "US".
    #[serde(default)]
    pub location: Option<String>,

    /// SQLite database file.
    #[serde(default)]
    pub path: Option<String>,
}

impl WarehouseSettings {
    /// Get the driver type.
    pub fn driver_type(&self) -> Result<Driver, SettingsError> {
        Driver::from_str(&self.driver)
            .map_err(|_| SettingsError::UnsupportedDriver(self.driver.clone()))
    }

    /// Resolve into a warehouse target, expanding environment variables.
    pub fn resolve(&self) -> Result<WarehouseConfig, SettingsError> {
        let config = match self.driver_type()? {
            Driver::BigQuery => WarehouseConfig::BigQuery {
                dataset: expand_env_vars(require(&self.dataset, "dataset")?)?,
                credentials: PathBuf::from(expand_env_vars(require(
                    &self.credentials,
                    "credentials",
                )?)?),
                location: self.location.as_deref().map(expand_env_vars).transpose()?,
            },
            Driver::Sqlite => {
                WarehouseConfig::sqlite(expand_env_vars(require(&self.path, "path")?)?)
            }
        };

        config
            .validate()
            .map_err(|e| SettingsError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }
}

fn require<'a>(value: &'a Option<String>, key: &str) -> Result<&'a str, SettingsError> {
    value
        .as_deref()
        .ok_or_else(|| SettingsError::InvalidConfig(format!("missing '{}'", key)))
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `TABLECHECK_CONFIG`
    /// 2. `./tablecheck.toml`
    /// 3. `~/.config/tablecheck/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("TABLECHECK_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("tablecheck.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tablecheck").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Source path with environment variables expanded.
    pub fn source_path(&self) -> Result<PathBuf, SettingsError> {
        Ok(PathBuf::from(expand_env_vars(&self.source.path)?))
    }

    /// Output directory with environment variables expanded.
    pub fn output_dir(&self) -> Result<PathBuf, SettingsError> {
        Ok(PathBuf::from(expand_env_vars(&self.output.dir)?))
    }

    /// Get a warehouse by name.
    pub fn get_warehouse(&self, name: &str) -> Result<&WarehouseSettings, SettingsError> {
        self.warehouses
            .get(name)
            .ok_or_else(|| SettingsError::WarehouseNotFound(name.to_string()))
    }

    /// Get the default warehouse ("default" if defined, otherwise the
    /// first by name).
    pub fn default_warehouse(&self) -> Option<(&str, &WarehouseSettings)> {
        if let Some(warehouse) = self.warehouses.get("default") {
            return Some(("default", warehouse));
        }
        self.warehouses
            .iter()
            .min_by(|a, b| a.0.cmp(b.0))
            .map(|(k, v)| (k.as_str(), v))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '}' {
                    closed = true;
                    break;
                }
                name.push(ch);
            }
            if !closed {
                return Err(SettingsError::InvalidConfig(format!(
                    "unterminated variable reference '${{{}'",
                    name
                )));
            }
            name
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if name.is_empty() {
                // Lone '$'
                result.push('$');
                continue;
            }
            name
        };

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
