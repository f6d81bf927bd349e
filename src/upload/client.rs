//! HTTP client for the upload API
//!
//! Wraps a `reqwest::Client` bound to one endpoint and token. Every request
//! carries the `fp-api_token` header; only HTTP 200 counts as success.

use crate::core::convert_keys;
use crate::io::filename::display_name;
use crate::io::MarketFileName;
use crate::types::{AccountUploadRequest, WatcherError};
use crate::upload::Uploader;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

/// Header carrying the API token
pub const API_TOKEN_HEADER: &str = "fp-api_token";

/// HTTP client wrapper for one API endpoint
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl ApiClient {
    /// Create a new client with the given request timeout
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Result<Self, WatcherError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WatcherError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(&self) -> RequestBuilder {
        self.client
            .post(&self.endpoint)
            .header(API_TOKEN_HEADER, &self.token)
    }

    /// Send a request and map anything but HTTP 200 to an error
    async fn send(&self, request: RequestBuilder) -> Result<(), WatcherError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
        Err(WatcherError::upload_rejected(status.as_u16(), &body))
    }

    /// Post a liveness ping for `system_name`
    pub async fn ping(&self, system_name: &str) -> Result<(), WatcherError> {
        debug!("Pinging {} as {}", self.endpoint, system_name);
        self.send(self.post().query(&[("systemName", system_name)]))
            .await
    }
}

#[async_trait]
impl Uploader for ApiClient {
    async fn upload_account(
        &self,
        request: &AccountUploadRequest,
        file_name: &str,
    ) -> Result<(), WatcherError> {
        let body = convert_keys(serde_json::to_value(request)?);
        let result = self.send(self.post().json(&body)).await;
        log_outcome(file_name, &result);
        result
    }

    async fn upload_market(
        &self,
        path: &Path,
        market: &MarketFileName,
    ) -> Result<(), WatcherError> {
        let file_name = display_name(path);
        info!("Uploading file: {}", path.display());

        let bytes = tokio::fs::read(path).await.map_err(|e| WatcherError::Io {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        let request = self
            .post()
            .query(&[
                ("symbol", market.symbol.as_str()),
                ("priceInterval", market.interval.as_str()),
            ])
            .multipart(form);

        let result = self.send(request).await;
        log_outcome(&file_name, &result);
        result
    }
}

fn log_outcome(file_name: &str, result: &Result<(), WatcherError>) {
    match result {
        Ok(()) => info!("Successfully uploaded: {}", file_name),
        Err(WatcherError::UploadRejected { status, body }) => error!(
            "Failed to upload {}. Status: {}, Response: {}",
            file_name, status, body
        ),
        Err(e) => error!("Error uploading {}: {}", file_name, e),
    }
}
