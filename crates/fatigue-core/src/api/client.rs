//! HTTP client for the prediction API.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::error::{ApiError, ApiResult};
use super::types::{
    AgentStatus, FeedbackRequest, PredictionResponse, QueueResponse, SessionId, SessionRequest,
};
use crate::config::Config;

/// Standard User-Agent header for API requests.
pub const USER_AGENT: &str = concat!("fatigue/", env!("CARGO_PKG_VERSION"));

const PREDICT_PATH: &str = "/predict";
const PREDICTIONS_PATH: &str = "/predictions";
const FEEDBACK_PATH: &str = "/feedback";
const AGENT_STATUS_PATH: &str = "/agent/status";

/// Prediction API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url` with an optional per-request timeout.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Creates a client from configuration, honoring an optional URL override.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn from_config(config: &Config, url_override: Option<&str>) -> Result<Self> {
        let base_url = config.resolve_api_base_url(url_override)?;
        Self::new(base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /predict`: queues a session for scoring.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, non-2xx status or malformed body.
    pub async fn submit_session(&self, request: &SessionRequest) -> ApiResult<QueueResponse> {
        let url = self.url(PREDICT_PATH);
        debug!(%url, player = %request.player_name, "submitting session");
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;
        read_json(response).await
    }

    /// `GET /predictions/{id}`: fetches the current state of a session.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, non-2xx status or malformed body.
    pub async fn get_prediction(&self, session_id: SessionId) -> ApiResult<PredictionResponse> {
        let url = self.url(&format!("{PREDICTIONS_PATH}/{session_id}"));
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;
        read_json(response).await
    }

    /// `POST /feedback`: records a coach's verdict on a prediction.
    ///
    /// The success payload is opaque and returned as-is.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, non-2xx status or malformed body.
    pub async fn submit_feedback(&self, feedback: &FeedbackRequest) -> ApiResult<Value> {
        let url = self.url(FEEDBACK_PATH);
        debug!(%url, session_id = feedback.session_id, correct = feedback.correct, "sending feedback");
        let response = self
            .http
            .post(&url)
            .json(feedback)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;
        read_json(response).await
    }

    /// `GET /agent/status`: backend agent health and learning metrics.
    ///
    /// # Errors
    /// Returns an `ApiError` on network failure, non-2xx status or malformed body.
    pub async fn agent_status(&self) -> ApiResult<AgentStatus> {
        let url = self.url(AGENT_STATUS_PATH);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::network(&e))?;
        read_json(response).await
    }
}

/// Reads the body as text, maps non-2xx to `HttpStatus`, then parses JSON.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await.map_err(|e| ApiError::network(&e))?;

    if !status.is_success() {
        warn!(%url, status = status.as_u16(), body = %body, "request failed");
        return Err(ApiError::http_status(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| {
        let mut err = ApiError::parse(format!("Invalid response from {}: {e}", url.path()));
        err.details = Some(body);
        err
    })
}
