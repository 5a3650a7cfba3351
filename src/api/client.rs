//! HTTP client for the operadoras backend.
//!
//! All endpoints live under `/api` on the configured server. Responses are
//! decoded straight into the domain types, and every failure is turned into
//! an `ApiError` before it leaves this module.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::types::{Estatisticas, HistoricoDespesas, ListQuery, Operadora, PageResult};

/// Path prefix every endpoint is mounted under.
pub const API_BASE_PATH: &str = "api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The four backend calls the data layer needs.
///
/// `Store` only talks to this trait, so tests can drive it with scripted
/// implementations instead of a server.
#[async_trait]
pub trait OperadorasApi: Send + Sync {
    /// `GET /operadoras?page&limit[&search]`
    async fn get_operadoras(
        &self,
        page: u32,
        limit: u32,
        search: &str,
    ) -> Result<PageResult, ApiError>;

    /// `GET /operadoras/{key}`
    async fn get_operadora(&self, key: &str) -> Result<Operadora, ApiError>;

    /// `GET /operadoras/{key}/despesas`
    async fn get_operadora_despesas(&self, key: &str) -> Result<HistoricoDespesas, ApiError>;

    /// `GET /estatisticas`
    async fn get_estatisticas(&self) -> Result<Estatisticas, ApiError>;
}

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    /// Builds a client for the server at `base_url` (scheme and host, e.g.
    /// `http://localhost:8000`). The `/api` prefix is added per request.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::from_transport(&e))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves `segments` below `{base_url}/api`. Each segment is escaped,
    /// so keys containing `/` or spaces stay a single path component. Keys
    /// must go through `key_segment` first; dot segments are resolved here.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::Unknown(Some(e.to_string())))?;
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::Unknown(Some(format!("invalid API base URL: {}", self.base_url)))
            })?
            .pop_if_empty()
            .push(API_BASE_PATH)
            .extend(segments);
        Ok(url)
    }

    /// Sends the request and hands back only the decoded payload.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            let err = ApiError::from_transport(&e);
            warn!("Request failed before a response arrived: {e}");
            err
        })?;

        let status = response.status();
        debug!("Response {} from {}", status, response.url());

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = ApiError::from_status(status.as_u16(), &body);
            warn!("API error: {} - {}", status.as_u16(), body);
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            warn!("Failed to decode response body: {e}");
            ApiError::from_transport(&e)
        })
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        info!("GET {url}");
        self.execute(self.client.get(url)).await
    }
}

/// Checks that `key` addresses a single operator. An empty key would hit the
/// collection, and `.`/`..` would be resolved away as dot segments.
fn key_segment(key: &str) -> Result<&str, ApiError> {
    match key {
        "" | "." | ".." => {
            warn!("Rejecting operator key {key:?}");
            Err(ApiError::NotFound { detail: None })
        }
        _ => Ok(key),
    }
}

#[async_trait]
impl OperadorasApi for ApiClient {
    async fn get_operadoras(
        &self,
        page: u32,
        limit: u32,
        search: &str,
    ) -> Result<PageResult, ApiError> {
        let url = self.endpoint(&["operadoras"])?;
        let query = ListQuery::new(page, limit, search);
        info!(
            "GET {url} page={} limit={} search={:?}",
            query.page, query.limit, query.search
        );
        self.execute(self.client.get(url).query(&query)).await
    }

    async fn get_operadora(&self, key: &str) -> Result<Operadora, ApiError> {
        self.get(&["operadoras", key_segment(key)?]).await
    }

    async fn get_operadora_despesas(&self, key: &str) -> Result<HistoricoDespesas, ApiError> {
        self.get(&["operadoras", key_segment(key)?, "despesas"]).await
    }

    async fn get_estatisticas(&self) -> Result<Estatisticas, ApiError> {
        self.get(&["estatisticas"]).await
    }
}
