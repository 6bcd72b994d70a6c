//! HTTP implementation of the resource client over reqwest.

use crate::client::ResourceClient;
use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use medley_api::{
    DeletionCandidates, DuplicateGroups, DuplicateStats, ErrorBody, FileStatistics,
    GroupingMethod, HealthStatus, LibraryPath, LibraryPathUpdate, Message, NewLibraryPath,
    ScanStatus, StartScan, SystemStatus,
};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Base path shared by every endpoint except the health probe.
const API_PREFIX: &str = "/api/v1";

/// Fixed per-call timeout ceiling.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the HTTP resource client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL, e.g. `http://localhost:8000`.
    pub base_url: String,
    /// Per-call timeout. Every call shares this single ceiling.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Overrides the per-call timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000")
    }
}

/// Resource client speaking HTTP/JSON to the backend.
pub struct HttpResourceClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl HttpResourceClient {
    /// Creates a client from the given configuration.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::transport(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// Backend base URL this client targets.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.config.base_url, API_PREFIX, path)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        url: String,
        body: Option<&(impl Serialize + Sync)>,
    ) -> ClientResult<T> {
        debug!(method = %method, url = %url, "api request");

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        decode_response(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.request(Method::GET, self.url(path), None::<&()>).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&(impl Serialize + Sync)>,
    ) -> ClientResult<T> {
        self.request(Method::POST, self.url(path), body).await
    }
}

/// Maps a reqwest failure (request never produced a response) onto the
/// transport side of the error taxonomy.
fn map_reqwest_error(error: reqwest::Error) -> ClientError {
    if error.is_timeout() {
        ClientError::timeout(error.to_string())
    } else {
        ClientError::transport(error.to_string())
    }
}

/// Decodes a response: non-2xx becomes a server error carrying the
/// structured `{detail}` when the body parses as one, 2xx bodies decode
/// as the expected payload.
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    let bytes = response.bytes().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        return Err(server_error(status, &bytes));
    }

    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

fn server_error(status: StatusCode, body: &[u8]) -> ClientError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .map(|b| b.detail);
    ClientError::Server {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn system_status(&self) -> ClientResult<SystemStatus> {
        self.get("/system/status").await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        // The health probe lives outside the versioned prefix.
        let url = format!("{}/health", self.config.base_url);
        self.request(Method::GET, url, None::<&()>).await
    }

    async fn libraries(&self) -> ClientResult<Vec<LibraryPath>> {
        self.get("/libraries").await
    }

    async fn create_library(&self, library: &NewLibraryPath) -> ClientResult<Message> {
        self.post("/libraries", Some(library)).await
    }

    async fn update_library(&self, id: u64, update: &LibraryPathUpdate) -> ClientResult<Message> {
        self.request(Method::PUT, self.url(&format!("/libraries/{id}")), Some(update))
            .await
    }

    async fn delete_library(&self, id: u64) -> ClientResult<Message> {
        self.request(
            Method::DELETE,
            self.url(&format!("/libraries/{id}")),
            None::<&()>,
        )
        .await
    }

    async fn scan_status(&self) -> ClientResult<ScanStatus> {
        self.get("/scan/status").await
    }

    async fn start_scan(&self, request: &StartScan) -> ClientResult<Message> {
        self.post("/scan/start", Some(request)).await
    }

    async fn stop_scan(&self) -> ClientResult<Message> {
        self.post("/scan/stop", None::<&()>).await
    }

    async fn file_stats(&self) -> ClientResult<FileStatistics> {
        self.get("/stats").await
    }

    async fn duplicate_stats(&self) -> ClientResult<DuplicateStats> {
        self.get("/duplicates/stats").await
    }

    async fn detect_duplicates(&self, auto_mark: bool) -> ClientResult<Message> {
        self.post(&format!("/duplicates/detect?auto_mark={auto_mark}"), None::<&()>)
            .await
    }

    async fn deletion_candidates(&self, limit: u32) -> ClientResult<DeletionCandidates> {
        self.get(&format!("/duplicates/candidates?limit={limit}")).await
    }

    async fn duplicate_groups(
        &self,
        method: GroupingMethod,
        limit: u32,
    ) -> ClientResult<DuplicateGroups> {
        self.get(&format!(
            "/duplicates/groups?method={}&limit={limit}",
            method.as_str()
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_strips_trailing_slashes() {
        let config = ClientConfig::new("http://localhost:8000///");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn url_joins_version_prefix() {
        let client = HttpResourceClient::new(ClientConfig::new("http://host:8000")).unwrap();
        assert_eq!(
            client.url("/scan/status"),
            "http://host:8000/api/v1/scan/status"
        );
    }

    #[test]
    fn server_error_extracts_structured_detail() {
        let err = server_error(StatusCode::NOT_FOUND, br#"{"detail": "path not found"}"#);
        assert_eq!(err, ClientError::server(404, "path not found"));
    }

    #[test]
    fn server_error_without_structured_body() {
        let err = server_error(StatusCode::BAD_GATEWAY, b"upstream fell over");
        assert_eq!(
            err,
            ClientError::Server {
                status: 502,
                detail: None
            }
        );
    }
}
