//! Wire types for the summarization service endpoints.
//!
//! Request structs are built by [`SummarySettings`](crate::settings::SummarySettings);
//! optional fields serialize only when present, matching the
//! method-conditional payloads the service expects.

use serde::{Deserialize, Serialize};

use crate::job::{JobId, JobStatus};
use crate::settings::Method;

/// Body for `POST /api/summarize`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub method: Method,
    /// Target summary length as a percentage of the input.
    pub length: u8,
    /// Share kept by the extractive stage; hybrid only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractive_length: Option<u8>,
    /// Overall target for the generative stage; hybrid only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_length: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_num_beams: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_length_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_repetition_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_no_repeat_ngram_size: Option<u8>,
}

/// Body for `POST /api/evaluate/async`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub method: Method,
    pub length: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extractive_length: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_length: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_num_beams: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_length_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_repetition_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abstractive_no_repeat_ngram_size: Option<u8>,
    /// Cap on the number of dataset samples evaluated.
    pub max_samples: u16,
    /// First dataset row to evaluate.
    pub start_index: u32,
    /// Shuffle dataset rows before sampling.
    pub shuffle: bool,
    pub seed: u64,
}

/// Success body from `POST /api/summarize`.
///
/// The service signals application-level success through `ok`, independent
/// of the HTTP status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default)]
    pub ok: bool,
    pub request_id: String,
    pub method: String,
    pub summary: String,
    #[serde(default)]
    pub original_length_chars: Option<u64>,
    #[serde(default)]
    pub original_length_sentences: Option<u64>,
    #[serde(default)]
    pub summary_length_chars: Option<u64>,
    #[serde(default)]
    pub summary_length_sentences: Option<u64>,
    pub processing_time_sec: f64,
    /// Method-specific diagnostics; opaque to the client.
    #[serde(default)]
    pub extra: Option<serde_json::Value>,
}

/// Acceptance body from `POST /api/evaluate/async`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalAccepted {
    pub job_id: JobId,
    /// Initial status as reported by the service; absent means queued.
    #[serde(default)]
    pub status: JobStatus,
}

/// Body from `GET /api/evaluate/status/{job_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalStatusResponse {
    pub status: JobStatus,
    #[serde(default)]
    pub progress: Option<EvalProgress>,
    #[serde(default)]
    pub result: Option<EvalMetrics>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Incremental progress snapshot for an evaluation job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalProgress {
    pub processed: u64,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub percent: Option<f64>,
    /// Samples that produced a usable reference/summary pair.
    #[serde(default)]
    pub samples: Option<u64>,
    #[serde(default)]
    pub skipped: Option<u64>,
}

/// Terminal metrics for a completed evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub rouge1_f1: f64,
    pub rouge2_f1: f64,
    #[serde(rename = "rougeL_f1")]
    pub rouge_l_f1: f64,
    pub avg_gen_len: f64,
    pub avg_ref_len: f64,
    pub compression_ratio: f64,
}

/// Body from the `/healthz` and `/readyz` probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_request_skips_absent_fields() {
        let request = SummarizeRequest {
            text: "متن".into(),
            method: Method::Extractive,
            length: 50,
            extractive_length: None,
            abstractive_length: None,
            abstractive_num_beams: None,
            abstractive_length_penalty: None,
            abstractive_repetition_penalty: None,
            abstractive_no_repeat_ngram_size: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["method"], "extractive");
        assert_eq!(json["length"], 50);
        assert!(json.get("extractive_length").is_none());
        assert!(json.get("abstractive_num_beams").is_none());
    }

    #[test]
    fn summarize_response_deserialize_from_api_format() {
        let api_json = r#"{
            "ok": true,
            "summary": "خلاصه متن",
            "method": "hybrid",
            "original_length_chars": 1200,
            "original_length_sentences": 14,
            "summary_length_chars": 300,
            "summary_length_sentences": 4,
            "processing_time_sec": 1.25,
            "request_id": "req-42",
            "extra": {"metrics": {"requested_abstractive_ratio": 0.5}}
        }"#;
        let response: SummarizeResponse = serde_json::from_str(api_json).unwrap();
        assert!(response.ok);
        assert_eq!(response.request_id, "req-42");
        assert_eq!(response.summary, "خلاصه متن");
        assert_eq!(response.original_length_sentences, Some(14));
        assert_eq!(response.processing_time_sec, 1.25);
        assert!(response.extra.is_some());
    }

    #[test]
    fn eval_accepted_defaults_to_queued() {
        let accepted: EvalAccepted = serde_json::from_str(r#"{"job_id": "9f3a"}"#).unwrap();
        assert_eq!(accepted.job_id, JobId::from("9f3a"));
        assert_eq!(accepted.status, JobStatus::Queued);
    }

    #[test]
    fn eval_status_running_with_progress() {
        let api_json = r#"{
            "status": "running",
            "progress": {"processed": 5, "total": 30, "percent": 16.67, "samples": 4, "skipped": 1}
        }"#;
        let response: EvalStatusResponse = serde_json::from_str(api_json).unwrap();
        assert_eq!(response.status, JobStatus::Running);
        let progress = response.progress.unwrap();
        assert_eq!(progress.processed, 5);
        assert_eq!(progress.total, Some(30));
        assert_eq!(progress.samples, Some(4));
        assert_eq!(progress.skipped, Some(1));
        assert!(response.result.is_none());
    }

    #[test]
    fn eval_status_completed_with_result() {
        let api_json = r#"{
            "status": "completed",
            "result": {
                "rouge1_f1": 0.25, "rouge2_f1": 0.11, "rougeL_f1": 0.21,
                "avg_gen_len": 42.0, "avg_ref_len": 55.5, "compression_ratio": 0.4
            }
        }"#;
        let response: EvalStatusResponse = serde_json::from_str(api_json).unwrap();
        assert_eq!(response.status, JobStatus::Completed);
        let metrics = response.result.unwrap();
        assert_eq!(metrics.rouge_l_f1, 0.21);
        assert_eq!(metrics.compression_ratio, 0.4);
    }

    #[test]
    fn eval_metrics_rouge_l_field_renames_correctly() {
        let metrics = EvalMetrics {
            rouge1_f1: 0.3,
            rouge2_f1: 0.15,
            rouge_l_f1: 0.25,
            avg_gen_len: 40.0,
            avg_ref_len: 50.0,
            compression_ratio: 0.5,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        assert!(json.contains(r#""rougeL_f1""#));
        assert!(!json.contains("rouge_l_f1"));
    }

    #[test]
    fn progress_without_total_or_counts() {
        let progress: EvalProgress = serde_json::from_str(r#"{"processed": 12}"#).unwrap();
        assert_eq!(progress.processed, 12);
        assert!(progress.total.is_none());
        assert!(progress.percent.is_none());
        assert!(progress.samples.is_none());
    }
}
