use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use uuid::Uuid;

use crate::job::JobId;

use super::error::{ApiError, GENERIC_FAILURE};
use super::types::{
    EvalAccepted, EvalStatusResponse, EvaluationRequest, ProbeResponse, SummarizeRequest,
    SummarizeResponse,
};

/// HTTP client for the summarization service.
///
/// One instance per base URL; cheap to clone, so poll tasks hold their own
/// copy. No retries and no overall request timeout at this layer — every
/// call produces exactly one outcome.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    base_url: String,
}

impl SummaryClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    // The service echoes x-request-id back; assigning it here keeps one
    // correlation id per call across client and server logs.
    fn request_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Send one synchronous summarize request.
    ///
    /// A call is successful only when the HTTP status indicates success and
    /// the body's `ok` flag is true; otherwise the body's `error` string (or
    /// a generic fallback) is surfaced.
    pub async fn summarize(
        &self,
        request: &SummarizeRequest,
    ) -> Result<SummarizeResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/api/summarize"))
            .header("x-request-id", Self::request_id())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.json::<Value>().await.ok();

        if !status.is_success() {
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: error_message(body.as_ref()),
            });
        }

        let body = body.ok_or_else(|| ApiError::Parse("summarize response was not JSON".into()))?;
        if !body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
            return Err(ApiError::Rejected {
                message: error_message(Some(&body)),
            });
        }

        serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Submit an evaluation job.
    ///
    /// Acceptance carries the job id and initial status; a reachable
    /// response without a job id is a rejection.
    pub async fn submit_evaluation(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvalAccepted, ApiError> {
        let response = self
            .client
            .post(self.url("/api/evaluate/async"))
            .header("x-request-id", Self::request_id())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.json::<Value>().await.ok();

        if !status.is_success() {
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: error_message(body.as_ref()),
            });
        }

        let body = body.ok_or_else(|| ApiError::Parse("acceptance response was not JSON".into()))?;
        if body.get("job_id").and_then(Value::as_str).is_none() {
            return Err(ApiError::Rejected {
                message: error_message(Some(&body)),
            });
        }

        serde_json::from_value(body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// Fetch the current status of an evaluation job. One fetch per call;
    /// cadence and cancellation live in the orchestrator.
    pub async fn evaluation_status(&self, job_id: &JobId) -> Result<EvalStatusResponse, ApiError> {
        let response = self
            .client
            .get(self.url(&format!("/api/evaluate/status/{job_id}")))
            .header("x-request-id", Self::request_id())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: error_message(body.as_ref()),
            });
        }

        response
            .json::<EvalStatusResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `GET /healthz` — liveness probe.
    pub async fn health(&self) -> Result<ProbeResponse, ApiError> {
        self.probe("/healthz").await
    }

    /// `GET /readyz` — readiness probe.
    pub async fn ready(&self) -> Result<ProbeResponse, ApiError> {
        self.probe("/readyz").await
    }

    async fn probe(&self, path: &str) -> Result<ProbeResponse, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: GENERIC_FAILURE.to_string(),
            });
        }
        response
            .json::<ProbeResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

/// Extract the server's `error` string, falling back to a generic message.
fn error_message(body: Option<&Value>) -> String {
    body.and_then(|v| v.get("error"))
        .and_then(Value::as_str)
        .unwrap_or(GENERIC_FAILURE)
        .to_string()
}
