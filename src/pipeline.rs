//! End-to-end runs: source file to exported tables to warehouse.
//!
//! ```text
//! CSV → Ingest → Clean → Aggregate (×5) → Export (×6) → Load (×6)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tablecheck::pipeline::{self, PipelineOptions};
//! use tablecheck::config::WarehouseConfig;
//!
//! let options = PipelineOptions::default()
//!     .with_source("data/data.csv")
//!     .with_output_dir("tmp");
//! let output = pipeline::transform(&options)?;
//!
//! let target = WarehouseConfig::sqlite("tmp/warehouse.db");
//! let report = pipeline::load(&target, &options.output_dir).await?;
//! assert!(!report.is_degraded());
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{Settings, SettingsError, WarehouseConfig};
use crate::export::{ExportError, ExportedFile, Exporter};
use crate::ingest::IngestError;
use crate::model::TableName;
use crate::transform::{Session, TransformOptions};
use crate::warehouse::{self, LoadError, LoadReport};

// ============================================================================
// Error Types
// ============================================================================

/// Errors that stop a run.
///
/// A table that fails to load does not stop a run; it is recorded in the
/// [`LoadReport`] instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Settings(#[from] SettingsError),

    #[error("Warehouse error: {0}")]
    Load(#[from] LoadError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

// ============================================================================
// Options
// ============================================================================

/// Options for a run.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Raw order file.
    pub source: PathBuf,

    /// Directory the table CSVs are written to and loaded from.
    pub output_dir: PathBuf,

    pub transform: TransformOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/data.csv"),
            output_dir: PathBuf::from("tmp"),
            transform: TransformOptions::default(),
        }
    }
}

impl PipelineOptions {
    /// Options taken from settings.
    pub fn from_settings(settings: &Settings) -> PipelineResult<Self> {
        Ok(Self {
            source: settings.source_path()?,
            output_dir: settings.output_dir()?,
            transform: settings.transform.to_options(),
        })
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_transform(mut self, transform: TransformOptions) -> Self {
        self.transform = transform;
        self
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Result of the transformation stage.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// Rows kept by cleaning.
    pub cleaned_rows: usize,

    /// Rows rejected by cleaning.
    pub dropped_rows: usize,

    /// Files written, in load order.
    pub exported: Vec<ExportedFile>,
}

/// Result of a full run.
#[derive(Debug)]
pub struct RunOutput {
    pub transform: TransformOutput,
    pub load: LoadReport,
}

// ============================================================================
// Stages
// ============================================================================

/// Ingest, clean, aggregate and export.
///
/// Any ingest error aborts before anything is written.
pub fn transform(options: &PipelineOptions) -> PipelineResult<TransformOutput> {
    info!(source = %options.source.display(), "Starting transformation");

    let mut session = Session::open(&options.source)?;
    session.derive(&options.transform);

    let exported = Exporter::new(&options.output_dir).export_session(&session)?;
    info!(
        dir = %options.output_dir.display(),
        files = exported.len(),
        "Transformation complete"
    );

    Ok(TransformOutput {
        cleaned_rows: session.cleaned().len(),
        dropped_rows: session.dropped(),
        exported,
    })
}

/// Load every table's export from `dir` into the warehouse.
///
/// Errors only if the warehouse cannot be reached at all; per-table
/// failures are in the report.
pub async fn load(target: &WarehouseConfig, dir: &Path) -> PipelineResult<LoadReport> {
    let warehouse = warehouse::connect(target).await?;
    info!(warehouse = warehouse.name(), dir = %dir.display(), "Starting load");
    Ok(warehouse::load_all(warehouse.as_ref(), dir, &TableName::ALL).await)
}

/// Transform, then load.
pub async fn run(options: &PipelineOptions, target: &WarehouseConfig) -> PipelineResult<RunOutput> {
    let transform = transform(options)?;
    let load = load(target, &options.output_dir).await?;
    Ok(RunOutput { transform, load })
}
