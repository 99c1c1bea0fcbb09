//! BigQuery REST types for load jobs.
//!
//! Only the fields a CSV load job reads or writes are modelled; unknown
//! fields in responses are ignored.

use serde::{Deserialize, Serialize};

// ============================================================================
// Job Resource
// ============================================================================

/// A job resource, as sent on insert and returned by `jobs.get`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_reference: JobReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<JobConfiguration>,
    #[serde(default, skip_serializing)]
    pub status: Option<JobStatus>,
    #[serde(default, skip_serializing)]
    pub statistics: Option<JobStatistics>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobReference {
    pub project_id: String,
    pub job_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobConfiguration {
    pub load: LoadConfiguration,
}

/// `configuration.load` of a load job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadConfiguration {
    pub destination_table: TableReference,
    pub source_format: String,
    pub skip_leading_rows: u32,
    pub autodetect: bool,
    pub write_disposition: String,
}

impl LoadConfiguration {
    /// Truncate-and-load of a CSV with one header row, schema autodetected.
    pub fn csv_truncate(destination_table: TableReference) -> Self {
        Self {
            destination_table,
            source_format: "CSV".to_string(),
            skip_leading_rows: 1,
            autodetect: true,
            write_disposition: "WRITE_TRUNCATE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

// ============================================================================
// Status & Statistics
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    /// PENDING, RUNNING or DONE.
    pub state: String,
    #[serde(default)]
    pub error_result: Option<ErrorProto>,
    #[serde(default)]
    pub errors: Vec<ErrorProto>,
}

impl JobStatus {
    pub fn is_done(&self) -> bool {
        self.state == "DONE"
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorProto {
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub message: String,
}

impl std::fmt::Display for ErrorProto {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{} ({})", self.message, reason),
            None => write!(f, "{}", self.message),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobStatistics {
    #[serde(default)]
    pub load: Option<LoadStatistics>,
}

/// Int64 values are encoded as JSON strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadStatistics {
    #[serde(default)]
    pub output_rows: Option<String>,
}

impl Job {
    /// Rows written by a finished load job.
    pub fn output_rows(&self) -> u64 {
        self.statistics
            .as_ref()
            .and_then(|s| s.load.as_ref())
            .and_then(|l| l.output_rows.as_deref())
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }
}

// ============================================================================
// Errors & Tokens
// ============================================================================

/// Error body returned by Google APIs on a non-2xx status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

/// OAuth token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<i64>,
}
