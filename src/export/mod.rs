//! CSV export of the cleaned and derived tables.
//!
//! Every file gets a header row taken from the table's column list, so an
//! empty table still exports as a valid, loadable file.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::info;

use crate::model::{CleanedRecord, TableName, TableRow};
use crate::transform::{DerivedTables, Session};

/// Errors that can occur while writing or reading exported tables.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type ExportResult<T> = Result<T, ExportError>;

/// A table written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub table: TableName,
    pub path: PathBuf,
    pub rows: usize,
}

/// Path of a table's export inside `dir`.
pub fn table_path(dir: &Path, table: TableName) -> PathBuf {
    dir.join(table.file_name())
}

/// Write rows to `path`, replacing any existing file.
///
/// The header is the column list of the rows' table. The parent directory
/// is created if needed.
pub fn write_table<R: TableRow>(path: &Path, rows: &[R]) -> ExportResult<usize> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let file = File::create(path).map_err(io_err)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    let headers: Vec<String> = R::TABLE.columns().into_iter().map(|c| c.name).collect();
    writer.write_record(&headers).map_err(csv_err)?;
    for row in rows {
        writer.serialize(row).map_err(csv_err)?;
    }
    writer.flush().map_err(io_err)?;

    Ok(rows.len())
}

/// Read an exported table back into typed rows.
pub fn read_table<R: DeserializeOwned>(path: &Path) -> ExportResult<Vec<R>> {
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_err)?;
    reader
        .deserialize()
        .collect::<Result<Vec<R>, _>>()
        .map_err(csv_err)
}

/// Writes every table of a run into one directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    dir: PathBuf,
}

impl Exporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Export one table.
    pub fn export<R: TableRow>(&self, rows: &[R]) -> ExportResult<ExportedFile> {
        let table = R::TABLE;
        let path = table_path(&self.dir, table);
        let rows = write_table(&path, rows)?;
        info!(table = %table, rows, path = %path.display(), "Exported table");
        Ok(ExportedFile { table, path, rows })
    }

    /// Export the cleaned table and all derived tables, in load order.
    pub fn export_all(
        &self,
        cleaned: &[CleanedRecord],
        derived: &DerivedTables,
    ) -> ExportResult<Vec<ExportedFile>> {
        Ok(vec![
            self.export(cleaned)?,
            self.export(&derived.restaurant_stats)?,
            self.export(&derived.customer_stats)?,
            self.export(&derived.popular_dishes)?,
            self.export(&derived.profitable_dishes)?,
            self.export(&derived.frequent_visitors)?,
        ])
    }

    /// Export a session's tables. Only `cleaned_data` is written if the
    /// session has not been derived.
    pub fn export_session(&self, session: &Session) -> ExportResult<Vec<ExportedFile>> {
        match session.derived() {
            Some(derived) => self.export_all(session.cleaned(), derived),
            None => Ok(vec![self.export(session.cleaned())?]),
        }
    }
}
