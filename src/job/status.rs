use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle vocabulary the evaluation worker reports for a job.
///
/// `Completed` and `Failed` are terminal: once a job reaches either, no
/// further transition is possible and late status responses are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted by the service, waiting for a worker.
    #[default]
    Queued,
    /// A worker is processing dataset samples.
    Running,
    /// Finished with a metrics payload.
    Completed,
    /// Finished with an error message.
    Failed,
}

impl JobStatus {
    /// Whether the job can still change state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "queued"),
            JobStatus::Running => write!(f, "running"),
            JobStatus::Completed => write!(f, "completed"),
            JobStatus::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
    }

    #[test]
    fn serializes_to_wire_vocabulary() {
        assert_eq!(serde_json::to_string(&JobStatus::Queued).unwrap(), r#""queued""#);
        assert_eq!(serde_json::to_string(&JobStatus::Running).unwrap(), r#""running""#);
        assert_eq!(serde_json::to_string(&JobStatus::Completed).unwrap(), r#""completed""#);
        assert_eq!(serde_json::to_string(&JobStatus::Failed).unwrap(), r#""failed""#);
    }

    #[test]
    fn deserializes_from_wire_vocabulary() {
        let status: JobStatus = serde_json::from_str(r#""running""#).unwrap();
        assert_eq!(status, JobStatus::Running);
    }

    #[test]
    fn default_is_queued() {
        assert_eq!(JobStatus::default(), JobStatus::Queued);
    }

    #[test]
    fn status_display() {
        assert_eq!(JobStatus::Queued.to_string(), "queued");
        assert_eq!(JobStatus::Failed.to_string(), "failed");
    }
}
