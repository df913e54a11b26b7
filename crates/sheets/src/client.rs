use std::time::Duration;

use async_trait::async_trait;
use pipeline::errors::truncate_for_error;
use pipeline::{
    ApiService, FormatOperation, Row, SpreadsheetId, SpreadsheetStore, SyncError, TabMetadata,
    TabName,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

use crate::auth::{AccessToken, ServiceAccountAuth};
use crate::range::a1_range;
use crate::requests::batch_update_body;
use crate::wire::{cell_text, SpreadsheetMetadata, ValueRange, METADATA_FIELDS};

/// Public Sheets v4 endpoint.
pub const DEFAULT_API_BASE: &str = "https://sheets.googleapis.com/v4";

/// Cells read and cleared on every run.
pub const READ_RANGE: &str = "A1:ZZ";

const WRITE_ANCHOR: &str = "A1";
const ERROR_BODY_LIMIT: usize = 800;

enum TokenSource {
    Static(AccessToken),
    ServiceAccount(ServiceAccountAuth),
}

/// Reads and rewrites tabs of one spreadsheet through the Sheets REST API.
///
/// With a service account, the access token is exchanged on the first request
/// and reused for the rest of the run.
pub struct SheetsClient {
    http: reqwest::Client,
    api_base: String,
    spreadsheet_id: SpreadsheetId,
    tokens: TokenSource,
    token: OnceCell<AccessToken>,
}

impl SheetsClient {
    /// Builds a client that authorises with a service account.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfiguration`] if the HTTP client cannot be
    /// constructed.
    pub fn with_service_account(
        api_base: &str,
        spreadsheet_id: SpreadsheetId,
        auth: ServiceAccountAuth,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        Self::build(api_base, spreadsheet_id, TokenSource::ServiceAccount(auth), timeout)
    }

    /// Builds a client that sends a fixed bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::InvalidConfiguration`] if the HTTP client cannot be
    /// constructed.
    pub fn with_token(
        api_base: &str,
        spreadsheet_id: SpreadsheetId,
        token: AccessToken,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        Self::build(api_base, spreadsheet_id, TokenSource::Static(token), timeout)
    }

    fn build(
        api_base: &str,
        spreadsheet_id: SpreadsheetId,
        tokens: TokenSource,
        timeout: Duration,
    ) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| SyncError::InvalidConfiguration {
                message: format!("failed to create google sheets client: {error}"),
            })?;
        Ok(Self {
            http,
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            spreadsheet_id,
            tokens,
            token: OnceCell::new(),
        })
    }

    async fn bearer(&self) -> Result<&AccessToken, SyncError> {
        match &self.tokens {
            TokenSource::Static(token) => Ok(token),
            TokenSource::ServiceAccount(auth) => {
                self.token.get_or_try_init(|| auth.access_token()).await
            }
        }
    }

    fn spreadsheet_url(&self) -> String {
        format!("{}/spreadsheets/{}", self.api_base, self.spreadsheet_id)
    }

    fn values_url(&self, range: &str) -> String {
        format!("{}/values/{}", self.spreadsheet_url(), urlencoding::encode(range))
    }

    async fn send(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, SyncError> {
        let token = self.bearer().await?;
        let response = request
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|error| SyncError::Transport {
                service: ApiService::GoogleSheets,
                message: format!("{operation}: {error}"),
            })?;
        let status = response.status();
        if status.is_success() {
            debug!(operation, status = status.as_u16(), "Sheets request succeeded");
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SyncError::ApiStatus {
            service: ApiService::GoogleSheets,
            status: status.as_u16(),
            message: format!("{operation}: {}", truncate_for_error(&body, ERROR_BODY_LIMIT)),
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, SyncError> {
        self.send(operation, request)
            .await?
            .json::<T>()
            .await
            .map_err(|error| SyncError::InvalidResponse {
                service: ApiService::GoogleSheets,
                message: format!("{operation}: {error}"),
            })
    }
}

#[async_trait]
impl SpreadsheetStore for SheetsClient {
    #[instrument(name = "sheets_list_tabs", skip_all)]
    async fn list_tabs(&self) -> Result<Vec<TabMetadata>, SyncError> {
        let request = self
            .http
            .get(self.spreadsheet_url())
            .query(&[("fields", METADATA_FIELDS)]);
        let metadata: SpreadsheetMetadata = self.send_json("read metadata", request).await?;
        Ok(metadata.sheets.into_iter().map(TabMetadata::from).collect())
    }

    #[instrument(name = "sheets_read_grid", skip_all, fields(tab = %tab))]
    async fn read_grid(&self, tab: &TabName) -> Result<Vec<Row>, SyncError> {
        let request = self.http.get(self.values_url(&a1_range(tab, READ_RANGE)));
        let range: ValueRange = self.send_json("read values", request).await?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    #[instrument(name = "sheets_replace_grid", skip_all, fields(tab = %tab, rows = values.len()))]
    async fn replace_grid(&self, tab: &TabName, values: &[Row]) -> Result<(), SyncError> {
        let clear = self
            .http
            .post(format!("{}:clear", self.values_url(&a1_range(tab, READ_RANGE))))
            .json(&json!({}));
        self.send("clear values", clear).await?;

        let update = self
            .http
            .put(self.values_url(&a1_range(tab, WRITE_ANCHOR)))
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "majorDimension": "ROWS", "values": values }));
        self.send("update values", update).await?;
        Ok(())
    }

    #[instrument(name = "sheets_batch_update", skip_all, fields(operations = operations.len()))]
    async fn apply_operations(&self, operations: &[FormatOperation]) -> Result<(), SyncError> {
        if operations.is_empty() {
            return Ok(());
        }
        let request = self
            .http
            .post(format!("{}:batchUpdate", self.spreadsheet_url()))
            .json(&batch_update_body(operations));
        self.send("batch update", request).await?;
        Ok(())
    }
}
