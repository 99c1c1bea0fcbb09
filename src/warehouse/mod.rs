//! Bulk loading of exported tables into a warehouse.
//!
//! A [`Warehouse`] loads one CSV into one table with truncate-and-load
//! semantics: the header row is skipped, column types are inferred, and
//! the table's previous contents are replaced, never appended to.
//!
//! [`load_all`] drives a warehouse over the export directory. A missing
//! file is skipped with a warning; a failed load is recorded and the
//! remaining tables are still attempted.

pub mod bigquery;
mod error;
pub mod sqlite;

pub use bigquery::BigQueryWarehouse;
pub use error::{CredentialsError, LoadError, LoadResult};
pub use sqlite::SqliteWarehouse;

use std::path::Path;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::config::WarehouseConfig;
use crate::export::table_path;
use crate::model::TableName;

/// Outcome of a single successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub table: TableName,
    pub output_rows: u64,
}

/// A destination that accepts truncate-and-load of CSV files.
#[async_trait]
pub trait Warehouse: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Replace the contents of `table` with the rows of the CSV at `path`.
    ///
    /// Returns once the load has completed or failed.
    async fn load_csv(&self, table: TableName, path: &Path) -> LoadResult<LoadSummary>;
}

/// Build the warehouse described by a config.
pub async fn connect(config: &WarehouseConfig) -> LoadResult<Box<dyn Warehouse>> {
    config.validate()?;
    match config {
        WarehouseConfig::BigQuery {
            dataset,
            credentials,
            location,
        } => {
            let warehouse =
                BigQueryWarehouse::from_key_file(credentials, dataset, location.clone()).await?;
            Ok(Box::new(warehouse))
        }
        WarehouseConfig::Sqlite { path } => Ok(Box::new(SqliteWarehouse::open(path)?)),
    }
}

/// What happened to one table during [`load_all`].
#[derive(Debug)]
pub enum TableOutcome {
    Loaded(LoadSummary),
    /// No export file for the table.
    Skipped { table: TableName },
    Failed { table: TableName, error: LoadError },
}

impl TableOutcome {
    pub fn table(&self) -> TableName {
        match self {
            TableOutcome::Loaded(summary) => summary.table,
            TableOutcome::Skipped { table } | TableOutcome::Failed { table, .. } => *table,
        }
    }
}

/// Per-table outcomes of a load run, in load order.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub outcomes: Vec<TableOutcome>,
}

impl LoadReport {
    /// True if any table failed to load.
    pub fn is_degraded(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o, TableOutcome::Failed { .. }))
    }

    pub fn loaded(&self) -> impl Iterator<Item = &LoadSummary> {
        self.outcomes.iter().filter_map(|o| match o {
            TableOutcome::Loaded(summary) => Some(summary),
            _ => None,
        })
    }

    pub fn skipped(&self) -> impl Iterator<Item = TableName> + '_ {
        self.outcomes.iter().filter_map(|o| match o {
            TableOutcome::Skipped { table } => Some(*table),
            _ => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (TableName, &LoadError)> {
        self.outcomes.iter().filter_map(|o| match o {
            TableOutcome::Failed { table, error } => Some((*table, error)),
            _ => None,
        })
    }
}

/// Load each table's export from `dir`, one after another.
pub async fn load_all(warehouse: &dyn Warehouse, dir: &Path, tables: &[TableName]) -> LoadReport {
    let mut report = LoadReport::default();

    for &table in tables {
        let path = table_path(dir, table);
        if !path.exists() {
            warn!(table = %table, path = %path.display(), "CSV file not found, skipping");
            report.outcomes.push(TableOutcome::Skipped { table });
            continue;
        }

        match warehouse.load_csv(table, &path).await {
            Ok(summary) => {
                info!(
                    warehouse = warehouse.name(),
                    table = %table,
                    rows = summary.output_rows,
                    "Loaded table"
                );
                report.outcomes.push(TableOutcome::Loaded(summary));
            }
            Err(error) => {
                error!(warehouse = warehouse.name(), table = %table, %error, "Load failed");
                report.outcomes.push(TableOutcome::Failed { table, error });
            }
        }
    }

    info!(
        warehouse = warehouse.name(),
        loaded = report.loaded().count(),
        skipped = report.skipped().count(),
        failed = report.failed().count(),
        "Load complete"
    );
    report
}
