use crate::config::AppConfig;
use anyhow::{Result, anyhow};
use log::debug;
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// Everything that can make a single check fail. Caught at the check's
/// boundary and turned into a failing outcome, never propagated further.
#[derive(Debug)]
pub enum CheckError {
    Network(reqwest::Error),
    UnexpectedStatus(StatusCode),
    InvalidJson(serde_json::Error),
    Assertion(String),
}

impl CheckError {
    pub fn message(&self) -> String {
        match self {
            CheckError::Network(e) => format!("request failed: {e}"),
            CheckError::UnexpectedStatus(status) => {
                format!("unexpected status {status}")
            }
            CheckError::InvalidJson(e) => format!("response is not valid JSON: {e}"),
            CheckError::Assertion(msg) => msg.clone(),
        }
    }
}

/// Raw response of one exchange: status plus the unparsed body,
/// kept as text so diagnostics can echo it even when it isn't JSON
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout_duration())
            .build()
            .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Empty path targets the base URL itself (the root/health endpoint)
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, CheckError> {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CheckError::Network)?;

        Self::into_api_response(response).await
    }

    pub async fn post_json<T: Serialize>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, CheckError> {
        let url = self.url(path);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(CheckError::Network)?;

        Self::into_api_response(response).await
    }

    async fn into_api_response(response: reqwest::Response) -> Result<ApiResponse, CheckError> {
        let status = response.status();
        let body = response.text().await.map_err(CheckError::Network)?;
        Ok(ApiResponse { status, body })
    }
}
