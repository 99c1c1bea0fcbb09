//! Warehouse connection configuration.
//!
//! Supports configuration via environment variables:
//! - `TABLECHECK_WAREHOUSE_DRIVER`: Warehouse driver (bigquery, sqlite)
//! - `TABLECHECK_DATASET`: BigQuery dataset, `project.dataset` or `dataset`
//! - `GOOGLE_APPLICATION_CREDENTIALS`: Path to a service-account key file
//! - `TABLECHECK_BIGQUERY_LOCATION`: BigQuery location (optional)
//! - `TABLECHECK_SQLITE_PATH`: SQLite database file

use std::env;
use std::path::PathBuf;

/// Error type for warehouse configuration.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unsupported driver: {0}. Supported: bigquery, sqlite")]
    UnsupportedDriver(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Supported warehouse drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    /// Google BigQuery
    BigQuery,
    /// SQLite file
    Sqlite,
}

impl Driver {
    /// Parse driver from string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, WarehouseConfigError> {
        match s.trim().to_lowercase().as_str() {
            "bigquery" | "bq" => Ok(Driver::BigQuery),
            "sqlite" | "sqlite3" => Ok(Driver::Sqlite),
            other => Err(WarehouseConfigError::UnsupportedDriver(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Driver::BigQuery => "bigquery",
            Driver::Sqlite => "sqlite",
        }
    }
}

/// Resolved warehouse target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarehouseConfig {
    BigQuery {
        /// `project.dataset`, or a bare dataset id.
        dataset: String,
        /// Service-account key file.
        credentials: PathBuf,
        location: Option<String>,
    },
    Sqlite {
        path: PathBuf,
    },
}

impl WarehouseConfig {
    /// Create a BigQuery target.
    pub fn bigquery(dataset: impl Into<String>, credentials: impl Into<PathBuf>) -> Self {
        WarehouseConfig::BigQuery {
            dataset: dataset.into(),
            credentials: credentials.into(),
            location: None,
        }
    }

    /// Create a SQLite target.
    pub fn sqlite(path: impl Into<PathBuf>) -> Self {
        WarehouseConfig::Sqlite { path: path.into() }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `TABLECHECK_WAREHOUSE_DRIVER`: bigquery or sqlite
    /// - `TABLECHECK_DATASET` and `GOOGLE_APPLICATION_CREDENTIALS` (BigQuery)
    /// - `TABLECHECK_SQLITE_PATH` (SQLite)
    pub fn from_env() -> Result<Self, WarehouseConfigError> {
        let driver = Driver::from_str(&require_env("TABLECHECK_WAREHOUSE_DRIVER")?)?;

        let config = match driver {
            Driver::BigQuery => WarehouseConfig::BigQuery {
                dataset: require_env("TABLECHECK_DATASET")?,
                credentials: PathBuf::from(require_env("GOOGLE_APPLICATION_CREDENTIALS")?),
                location: env::var("TABLECHECK_BIGQUERY_LOCATION").ok(),
            },
            Driver::Sqlite => WarehouseConfig::sqlite(require_env("TABLECHECK_SQLITE_PATH")?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn driver(&self) -> Driver {
        match self {
            WarehouseConfig::BigQuery { .. } => Driver::BigQuery,
            WarehouseConfig::Sqlite { .. } => Driver::Sqlite,
        }
    }

    /// Check that required values are non-empty and well formed.
    pub fn validate(&self) -> Result<(), WarehouseConfigError> {
        match self {
            WarehouseConfig::BigQuery { dataset, .. } => {
                split_dataset(dataset)?;
            }
            WarehouseConfig::Sqlite { path } => {
                if path.as_os_str().is_empty() {
                    return Err(WarehouseConfigError::InvalidConfig(
                        "sqlite path is empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Split a dataset id into its optional project and the dataset name.
///
/// The project is everything before the last `.`, so domain-scoped
/// projects such as `example.com:proj` are kept whole. A project holding
/// a `.` must carry the `domain:` prefix. Dataset names are letters,
/// digits and underscores.
pub fn split_dataset(dataset: &str) -> Result<(Option<&str>, &str), WarehouseConfigError> {
    let invalid = || {
        WarehouseConfigError::InvalidConfig(format!(
            "dataset must be 'project.dataset' or 'dataset', got '{}'",
            dataset
        ))
    };

    let (project, name) = match dataset.rsplit_once('.') {
        Some((project, name)) => (Some(project), name),
        None => (None, dataset),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid());
    }
    if let Some(project) = project {
        if project.trim().is_empty() || (project.contains('.') && !project.contains(':')) {
            return Err(invalid());
        }
    }
    Ok((project, name))
}

fn require_env(name: &str) -> Result<String, WarehouseConfigError> {
    env::var(name).map_err(|_| WarehouseConfigError::MissingEnvVar(name.to_string()))
}
