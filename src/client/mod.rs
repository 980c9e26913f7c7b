//! Reqwest-based client for the remote execution service.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// Body sent to the execution endpoint. Built once per submission from the
/// trimmed editor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    pub code: String,
}

impl ExecutionRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Wire shape of a successful response. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExecutionResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub output: Option<String>,
}

impl ExecutionResponse {
    /// `error` wins over `output`; an empty string counts as absent.
    pub fn into_result(self) -> ExecutionResult {
        match (non_empty(self.error), non_empty(self.output)) {
            (Some(message), _) => ExecutionResult::Error(message),
            (None, Some(message)) => ExecutionResult::Output(message),
            (None, None) => ExecutionResult::Empty,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// Execution failed or the service reported a problem.
    Error(String),
    /// Execution succeeded and printed something.
    Output(String),
    /// Execution succeeded without output.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecuteError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("invalid response body: {0}")]
    Parse(String),
}

#[async_trait]
pub trait ExecutionService: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, ExecuteError>;
}

#[derive(Debug, Clone)]
pub struct HttpExecutionService {
    http: reqwest::Client,
    url: String,
}

impl HttpExecutionService {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let base_url = cfg.server_url();
        let url = format!("{}{}", base_url.trim_end_matches('/'), cfg.execute_path());

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = cfg.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self { http, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ExecutionService for HttpExecutionService {
    async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, ExecuteError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(url = %self.url, bytes = request.code.len(), "posting code");
        let resp = self
            .http
            .post(&self.url)
            .headers(headers)
            .json(request)
            .send()
            .await
            .map_err(|e| ExecuteError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "execution service returned an error status");
            return Err(ExecuteError::Status(status.as_u16()));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ExecuteError::Transport(e.to_string()))?;
        let parsed: ExecutionResponse =
            serde_json::from_slice(&body).map_err(|e| ExecuteError::Parse(e.to_string()))?;
        Ok(parsed.into_result())
    }
}
