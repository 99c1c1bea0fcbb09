//! BigQuery warehouse backend.
//!
//! Each table is loaded with a load job created through a resumable
//! upload: the job resource is posted to open an upload session, the CSV
//! bytes are put to the session, and the job is polled until it is DONE.
//! The job uses WRITE_TRUNCATE, so a load replaces the table.

pub mod credentials;
pub mod protocol;

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::LOCATION;
use serde::de::DeserializeOwned;
use tracing::debug;
use uuid::Uuid;

use self::credentials::{ServiceAccount, ServiceAccountKey};
use self::protocol::{
    ApiErrorResponse, Job, JobConfiguration, JobReference, LoadConfiguration, TableReference,
};
use super::{LoadError, LoadResult, LoadSummary, Warehouse};
use crate::config::{split_dataset, WarehouseConfigError};
use crate::model::TableName;

const API_BASE: &str = "https://bigquery.googleapis.com/bigquery/v2";
const UPLOAD_BASE: &str = "https://bigquery.googleapis.com/upload/bigquery/v2";
const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// A dataset, fully qualified with its project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRef {
    pub project_id: String,
    pub dataset_id: String,
}

impl DatasetRef {
    /// Parse `project.dataset`, or a bare `dataset` in `default_project`.
    pub fn parse(dataset: &str, default_project: Option<&str>) -> Result<Self, WarehouseConfigError> {
        let (project, dataset_id) = split_dataset(dataset)?;
        let project = project.or(default_project).ok_or_else(|| {
            WarehouseConfigError::InvalidConfig(format!(
                "dataset '{}' has no project and the key has no project_id",
                dataset
            ))
        })?;

        Ok(Self {
            project_id: project.to_string(),
            dataset_id: dataset_id.to_string(),
        })
    }

    pub fn table(&self, table: TableName) -> TableReference {
        TableReference {
            project_id: self.project_id.clone(),
            dataset_id: self.dataset_id.clone(),
            table_id: table.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for DatasetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.project_id, self.dataset_id)
    }
}

/// Job resource for a truncate-and-load of one table.
pub fn load_job(
    dataset: &DatasetRef,
    table: TableName,
    job_id: &str,
    location: Option<&str>,
) -> Job {
    Job {
        job_reference: JobReference {
            project_id: dataset.project_id.clone(),
            job_id: job_id.to_string(),
            location: location.map(str::to_string),
        },
        configuration: Some(JobConfiguration {
            load: LoadConfiguration::csv_truncate(dataset.table(table)),
        }),
        status: None,
        statistics: None,
    }
}

/// Job ids are unique per run and table.
pub fn new_job_id(table: TableName) -> String {
    format!("tablecheck_{}_{}", table, Uuid::new_v4().simple())
}

pub struct BigQueryWarehouse {
    name: String,
    client: reqwest::Client,
    account: ServiceAccount,
    dataset: DatasetRef,
    location: Option<String>,
}

impl BigQueryWarehouse {
    /// Authenticate with a service-account key file.
    pub async fn from_key_file(
        credentials: &Path,
        dataset: &str,
        location: Option<String>,
    ) -> LoadResult<Self> {
        let key = ServiceAccountKey::from_file(credentials).await?;
        let client = reqwest::Client::new();
        let dataset = DatasetRef::parse(dataset, key.project_id.as_deref())?;
        let account = ServiceAccount::new(key, client.clone())?;

        Ok(Self {
            name: format!("bigquery:{}", dataset),
            client,
            account,
            dataset,
            location,
        })
    }

    /// Open a resumable upload session for a job, returning the session URI.
    async fn start_upload(&self, token: &str, table: TableName, job: &Job) -> LoadResult<String> {
        let url = format!("{}/projects/{}/jobs", UPLOAD_BASE, self.dataset.project_id);
        let response = self
            .client
            .post(&url)
            .query(&[("uploadType", "resumable")])
            .bearer_auth(token)
            .header("X-Upload-Content-Type", "application/octet-stream")
            .json(job)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_failure(table, response).await);
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| LoadError::load_failure(table, "upload session has no Location header"))
    }

    async fn upload(&self, token: &str, session: &str, table: TableName, body: Vec<u8>) -> LoadResult<Job> {
        let response = self
            .client
            .put(session)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .await?;
        read_json(table, response).await
    }

    async fn get_job(&self, token: &str, table: TableName, reference: &JobReference) -> LoadResult<Job> {
        let url = format!(
            "{}/projects/{}/jobs/{}",
            API_BASE, reference.project_id, reference.job_id
        );
        let mut request = self.client.get(&url).bearer_auth(token);
        if let Some(location) = &reference.location {
            request = request.query(&[("location", location.as_str())]);
        }
        read_json(table, request.send().await?).await
    }

    /// Poll until the job is DONE, then turn an `errorResult` into a failure.
    async fn wait_for(&self, table: TableName, mut job: Job) -> LoadResult<Job> {
        loop {
            if let Some(status) = job.status.as_ref().filter(|s| s.is_done()) {
                if let Some(error) = &status.error_result {
                    let details: Vec<String> = status.errors.iter().map(|e| e.to_string()).collect();
                    let message = if details.is_empty() {
                        error.to_string()
                    } else {
                        format!("{}; {}", error, details.join("; "))
                    };
                    return Err(LoadError::load_failure(table, message));
                }
                return Ok(job);
            }

            debug!(
                table = %table,
                job_id = %job.job_reference.job_id,
                state = job.status.as_ref().map(|s| s.state.as_str()).unwrap_or("UNKNOWN"),
                "Waiting for load job"
            );
            tokio::time::sleep(POLL_INTERVAL).await;

            // Tokens can expire during a long job.
            let token = self.account.access_token().await?;
            job = self.get_job(&token, table, &job.job_reference).await?;
        }
    }
}

async fn read_json<T: DeserializeOwned>(table: TableName, response: reqwest::Response) -> LoadResult<T> {
    if !response.status().is_success() {
        return Err(api_failure(table, response).await);
    }
    Ok(response.json().await?)
}

/// Turn a non-2xx response into a `LoadFailure` carrying the API message.
async fn api_failure(table: TableName, response: reqwest::Response) -> LoadError {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => return LoadError::Http(e),
    };
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|r| format!("HTTP {}: {}", r.error.code, r.error.message))
        .unwrap_or_else(|_| format!("HTTP {}: {}", status.as_u16(), body));
    LoadError::load_failure(table, message)
}

#[async_trait]
impl Warehouse for BigQueryWarehouse {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_csv(&self, table: TableName, path: &Path) -> LoadResult<LoadSummary> {
        let body = tokio::fs::read(path).await?;
        let job_id = new_job_id(table);
        let job = load_job(&self.dataset, table, &job_id, self.location.as_deref());
        debug!(table = %table, %job_id, bytes = body.len(), "Starting load job");

        let token = self.account.access_token().await?;
        let session = self.start_upload(&token, table, &job).await?;
        let job = self.upload(&token, &session, table, body).await?;
        let job = self.wait_for(table, job).await?;

        Ok(LoadSummary {
            table,
            output_rows: job.output_rows(),
        })
    }
}
