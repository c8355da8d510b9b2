//! BigQuery REST API v2 client.
//!
//! Implements [`WarehouseClient`] with three endpoints:
//! - `tables.list` (all pages) for table listings
//! - `tables.get` for schemas
//! - `jobs.insert` with `dryRun: true` for cost estimates

use async_trait::async_trait;
use reqwest::{RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, instrument};

use super::{
    DryRunStatus, SchemaField, TokenSource, WarehouseClient, WarehouseError, WarehouseResult,
};
use crate::core::config::WarehouseConfig;

/// Base URL of the public BigQuery REST API.
pub const DEFAULT_ENDPOINT: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// Default location for query jobs.
pub const DEFAULT_LOCATION: &str = "US";

const LIST_TABLES_PAGE_SIZE: u32 = 1000;

// ============================================================================
// Client
// ============================================================================

/// BigQuery client bound to one project and location.
#[derive(Debug)]
pub struct BigQueryClient {
    project: String,
    location: String,
    endpoint: Url,
    http: reqwest::Client,
    tokens: TokenSource,
}

impl BigQueryClient {
    /// Build a client and make sure an access token can be obtained.
    ///
    /// Any failure here is fatal for server startup.
    pub async fn connect(config: &WarehouseConfig) -> WarehouseResult<Self> {
        let client = Self::new(config)?;
        client.tokens.token().await?;

        info!(
            "BigQuery client ready (project: {}, location: {})",
            client.project, client.location
        );
        Ok(client)
    }

    /// Build a client without touching the network or credentials.
    pub fn new(config: &WarehouseConfig) -> WarehouseResult<Self> {
        if config.project.trim().is_empty() {
            return Err(WarehouseError::config("project must not be empty"));
        }

        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            WarehouseError::config(format!("invalid endpoint '{}': {}", config.endpoint, e))
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(WarehouseError::config(format!(
                "endpoint '{}' cannot be used as a base URL",
                config.endpoint
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            project: config.project.clone(),
            location: config.location.clone(),
            endpoint,
            http,
            tokens: TokenSource::from_config(config.access_token.as_deref()),
        })
    }

    /// The project this client is bound to.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The location used for query jobs.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Build `<endpoint>/projects/<project>/<segments...>` with each segment
    /// percent-encoded.
    fn url(&self, segments: &[&str]) -> WarehouseResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| WarehouseError::config("endpoint cannot be used as a base URL"))?
            .pop_if_empty()
            .push("projects")
            .push(&self.project)
            .extend(segments);
        Ok(url)
    }

    /// Authorize and send a request, decoding a JSON success body.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> WarehouseResult<T> {
        let token = self.tokens.token().await?;
        let response = request.bearer_auth(token).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| WarehouseError::invalid_response(e.to_string()))
    }
}

#[async_trait]
impl WarehouseClient for BigQueryClient {
    #[instrument(skip(self))]
    async fn list_tables(&self, dataset: &str) -> WarehouseResult<Vec<String>> {
        let url = self.url(&["datasets", dataset, "tables"])?;
        let mut tables = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self
                .http
                .get(url.clone())
                .query(&[("maxResults", LIST_TABLES_PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let page: TableList = self.send(request).await?;
            tables.extend(page.tables.into_iter().map(|t| t.table_reference.table_id));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!("Listed {} tables in {}", tables.len(), dataset);
        Ok(tables)
    }

    #[instrument(skip(self))]
    async fn get_table_schema(
        &self,
        dataset: &str,
        table: &str,
    ) -> WarehouseResult<Vec<SchemaField>> {
        let url = self.url(&["datasets", dataset, "tables", table])?;
        let resource: TableResource = self.send(self.http.get(url)).await?;

        Ok(resource.into_fields())
    }

    #[instrument(skip(self, query))]
    async fn dry_run_query(&self, query: &str, dataset: &str) -> WarehouseResult<DryRunStatus> {
        let url = self.url(&["jobs"])?;
        let body = json!({
            "jobReference": {
                "projectId": self.project,
                "location": self.location,
            },
            "configuration": {
                "dryRun": true,
                "query": {
                    "query": query,
                    "useLegacySql": false,
                    "defaultDataset": {
                        "projectId": self.project,
                        "datasetId": dataset,
                    },
                },
            },
        });

        let job: JobResource = self.send(self.http.post(url).json(&body)).await?;
        job.into_status()
    }
}

/// Turn an error body into a [`WarehouseError::Api`], preferring the
/// message from Google's error envelope.
fn api_error(status: u16, body: &str) -> WarehouseError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|envelope| envelope.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    WarehouseError::api(status, message)
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableList {
    #[serde(default)]
    tables: Vec<TableListEntry>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableListEntry {
    table_reference: TableReference,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableReference {
    table_id: String,
}

#[derive(Debug, Deserialize)]
struct TableResource {
    schema: Option<TableSchema>,
}

impl TableResource {
    fn into_fields(self) -> Vec<SchemaField> {
        self.schema
            .map(|s| s.fields.into_iter().map(SchemaField::from).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    #[serde(default)]
    fields: Vec<FieldResource>,
}

#[derive(Debug, Deserialize)]
struct FieldResource {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
    mode: Option<String>,
    description: Option<String>,
}

impl From<FieldResource> for SchemaField {
    fn from(field: FieldResource) -> Self {
        let mode = field.mode.as_deref().unwrap_or("NULLABLE");
        Self {
            name: field.name,
            field_type: field.field_type,
            description: field.description.filter(|d| !d.is_empty()),
            repeated: mode.eq_ignore_ascii_case("REPEATED"),
            required: mode.eq_ignore_ascii_case("REQUIRED"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JobResource {
    status: Option<JobStatus>,
    statistics: Option<JobStatistics>,
}

impl JobResource {
    fn into_status(self) -> WarehouseResult<DryRunStatus> {
        let errors = self
            .status
            .map(|s| s.errors.into_iter().map(|e| e.describe()).collect())
            .unwrap_or_default();

        // int64 values are encoded as JSON strings by the REST API.
        let total_bytes_processed = match self.statistics.and_then(|s| s.total_bytes_processed) {
            Some(raw) => raw.parse().map_err(|_| {
                WarehouseError::invalid_response(format!(
                    "totalBytesProcessed is not an unsigned integer: {}",
                    raw
                ))
            })?,
            None => 0,
        };

        Ok(DryRunStatus {
            errors,
            total_bytes_processed,
        })
    }
}

#[derive(Debug, Deserialize)]
struct JobStatus {
    #[serde(default)]
    errors: Vec<ErrorProto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobStatistics {
    total_bytes_processed: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorProto {
    #[serde(default)]
    reason: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    message: String,
}

impl ErrorProto {
    fn describe(self) -> String {
        let mut text = match (self.reason.is_empty(), self.message.is_empty()) {
            (false, false) => format!("{}: {}", self.reason, self.message),
            (true, _) => self.message,
            (false, true) => self.reason,
        };
        if !self.location.is_empty() {
            text.push_str(&format!(" (at {})", self.location));
        }
        text
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

// ============================================================================
// Tests
// ============================================================================
