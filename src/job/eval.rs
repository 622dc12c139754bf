use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::types::{EvalMetrics, EvalProgress};

use super::status::JobStatus;

/// Opaque evaluation-job identifier assigned by the service at submission.
///
/// Compared by value: a poll response is applied only while its id still
/// equals the orchestrator's current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl From<String> for JobId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One asynchronous evaluation run.
///
/// Created at submission and mutated only by the orchestrator when a status
/// response for this id arrives. Superseded the instant a newer job is
/// submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalJob {
    pub id: JobId,
    pub status: JobStatus,
    /// Latest progress snapshot; each poll overwrites the previous one.
    pub progress: Option<EvalProgress>,
    /// Metrics payload, present once the job completes.
    pub result: Option<EvalMetrics>,
    /// Failure message, present once the job fails.
    pub error: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

impl EvalJob {
    pub fn new(id: JobId, status: JobStatus) -> Self {
        Self {
            id,
            status,
            progress: None,
            result: None,
            error: None,
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_starts_clean() {
        let job = EvalJob::new(JobId::from("job-1"), JobStatus::Queued);
        assert_eq!(job.id, JobId::from("job-1"));
        assert_eq!(job.status, JobStatus::Queued);
        assert!(job.progress.is_none());
        assert!(job.result.is_none());
        assert!(job.error.is_none());
    }

    #[test]
    fn job_id_compares_by_value() {
        assert_eq!(JobId::from("abc"), JobId::from("abc".to_string()));
        assert_ne!(JobId::from("abc"), JobId::from("abd"));
    }

    #[test]
    fn job_id_serializes_transparently() {
        let json = serde_json::to_string(&JobId::from("9b2f")).unwrap();
        assert_eq!(json, r#""9b2f""#);
    }

    #[test]
    fn job_serialization_roundtrip() {
        let job = EvalJob::new(JobId::from("job-2"), JobStatus::Running);
        let json = serde_json::to_string(&job).unwrap();
        let parsed: EvalJob = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, job.id);
        assert_eq!(parsed.status, JobStatus::Running);
    }
}
