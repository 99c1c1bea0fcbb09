//! Ingestion of the raw order file and cleaning into `cleaned_data`.
//!
//! Columns are located by header name, so the source may order them freely
//! and may carry extra columns. Empty cells are nulls.

mod columns;

pub use columns::{Column, ColumnMap};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::model::{CleanedRecord, RawRecord};

/// Errors that can occur while reading the source file.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Failed to read source: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    fn parse(line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(e) => IngestError::Io(e),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => IngestError::parse(
                line,
                format!("expected {} fields, found {}", expected_len, len),
            ),
            csv::ErrorKind::Utf8 { err, .. } => IngestError::parse(line, err.to_string()),
            other => IngestError::parse(line, format!("{:?}", other)),
        }
    }
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Load every row of a CSV file with a header row.
///
/// # Errors
///
/// `SourceNotFound` if the path does not exist; `Parse` if a row has the
/// wrong number of fields, a required header is missing, or a cost is not
/// a number.
pub fn load(path: &Path) -> IngestResult<Vec<RawRecord>> {
    if !path.exists() {
        return Err(IngestError::SourceNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let records = load_from_reader(BufReader::new(file))?;
    info!(path = %path.display(), rows = records.len(), "Loaded raw records");
    Ok(records)
}

/// Load rows from any CSV reader. See [`load`].
pub fn load_from_reader<R: Read>(reader: R) -> IngestResult<Vec<RawRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let columns = ColumnMap::from_headers(headers.iter()).map_err(|e| IngestError::parse(1, e))?;
    debug!(?columns, "Resolved source columns");

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);

        let cost = match columns.get(&row, Column::Cost) {
            Some(text) => Some(parse_cost(text).ok_or_else(|| {
                IngestError::parse(line, format!("invalid cost value '{}'", text))
            })?),
            None => None,
        };

        records.push(RawRecord {
            restaurant: columns.get(&row, Column::Restaurant).map(str::to_string),
            dish: columns.get(&row, Column::Dish).map(str::to_string),
            customer: columns.get(&row, Column::Customer).map(str::to_string),
            cost,
        });
    }

    Ok(records)
}

fn parse_cost(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// Result of cleaning: surviving records plus the number dropped.
#[derive(Debug, Clone, Default)]
pub struct CleanOutcome {
    pub records: Vec<CleanedRecord>,
    pub dropped: usize,
}

/// Keep only complete records with a representable cost.
///
/// Rejected rows are counted, never fatal.
pub fn clean(raw: &[RawRecord]) -> CleanOutcome {
    let records: Vec<CleanedRecord> = raw.iter().filter_map(RawRecord::clean).collect();
    let dropped = raw.len() - records.len();

    if dropped > 0 {
        debug!(dropped, "Dropped incomplete or out-of-range records");
    }
    info!(rows = records.len(), "Cleaned records");

    CleanOutcome { records, dropped }
}
