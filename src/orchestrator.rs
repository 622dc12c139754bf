//! Evaluation job orchestration: submission, fixed-cadence status polling,
//! and the last-submitted-job-wins guard.
//!
//! All job state lives in [`EvalOrchestrator`] and is mutated only through
//! its `&mut self` methods; poll responses arrive as messages on a
//! single-consumer channel, so there is exactly one writer. Each scheduled
//! poll is a spawned task behind an abort-on-drop guard, which cancels the
//! pending timer on re-submit and on teardown alike.

use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::api::error::GENERIC_FAILURE;
use crate::api::types::{EvalStatusResponse, EvaluationRequest};
use crate::api::{ApiError, SummaryClient};
use crate::error::ParsumError;
use crate::job::{EvalJob, JobId, JobStatus};

/// One status-poll response, tagged with the job it was scheduled for.
#[derive(Debug)]
struct PollEvent {
    job_id: JobId,
    response: Result<EvalStatusResponse, ApiError>,
}

/// Abort-on-drop handle for the pending poll task.
///
/// Replacing or dropping the guard cancels the sleep before it can fire, so
/// a superseded job stops generating network calls on every exit path.
#[derive(Debug)]
struct PollerGuard {
    handle: JoinHandle<()>,
}

impl Drop for PollerGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// How one poll event affected the current job.
#[derive(Debug)]
enum PollApplied {
    /// The event belonged to a superseded or already-terminal job; nothing
    /// was touched.
    Stale,
    /// The job is still queued or running; the next poll is scheduled.
    InFlight,
    /// The job reached completed or failed.
    Terminal(EvalJob),
    /// A transport or service failure ended polling; the orchestrator is
    /// idle again.
    Aborted(ApiError),
}

/// Drives evaluation jobs against the remote worker.
///
/// At most one job is current. Submitting a new one supersedes the old: its
/// pending timer is cancelled, and any response still in flight for it is
/// discarded by the id check at the top of every poll application.
pub struct EvalOrchestrator {
    client: SummaryClient,
    poll_interval: Duration,
    job: Option<EvalJob>,
    poller: Option<PollerGuard>,
    last_error: Option<String>,
    events_tx: UnboundedSender<PollEvent>,
    events_rx: UnboundedReceiver<PollEvent>,
}

impl EvalOrchestrator {
    pub fn new(client: SummaryClient, poll_interval: Duration) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            client,
            poll_interval,
            job: None,
            poller: None,
            last_error: None,
            events_tx,
            events_rx,
        }
    }

    /// The current job; `None` while idle.
    pub fn job(&self) -> Option<&EvalJob> {
        self.job.as_ref()
    }

    /// Message from the most recent job failure, submission rejection or
    /// polling abort.
    pub fn last_error(&self) -> Option<&str> {
        self.job
            .as_ref()
            .and_then(|job| job.error.as_deref())
            .or(self.last_error.as_deref())
    }

    /// Submit an evaluation job, superseding any job already in flight.
    ///
    /// On acceptance the job becomes current with the server-reported
    /// initial status, residual progress/result/error are gone with the old
    /// job, and the first poll is scheduled. On rejection the orchestrator
    /// returns to idle and the error is surfaced to the caller.
    pub async fn submit(&mut self, request: &EvaluationRequest) -> Result<&EvalJob, ApiError> {
        // Cancel the pending poll before the old job can write again.
        self.poller = None;
        self.job = None;
        self.last_error = None;

        let accepted = match self.client.submit_evaluation(request).await {
            Ok(accepted) => accepted,
            Err(err) => {
                self.last_error = Some(err.user_message());
                return Err(err);
            }
        };

        self.schedule_poll(accepted.job_id.clone());
        Ok(self
            .job
            .insert(EvalJob::new(accepted.job_id, accepted.status)))
    }

    /// Pump poll events until the current job reaches a terminal state.
    ///
    /// `on_update` fires after every applied event so the caller can render
    /// progress. Returns the terminal job — completed or failed — or the
    /// error that stopped polling.
    pub async fn run_until_terminal<F>(&mut self, mut on_update: F) -> Result<EvalJob, ParsumError>
    where
        F: FnMut(&EvalJob),
    {
        if self.job.is_none() {
            return Err(ParsumError::NoActiveJob);
        }
        loop {
            let event = self
                .events_rx
                .recv()
                .await
                .expect("orchestrator holds an event sender");
            match self.apply_poll(event) {
                PollApplied::Stale => continue,
                PollApplied::InFlight => {
                    if let Some(job) = &self.job {
                        on_update(job);
                    }
                }
                PollApplied::Terminal(job) => {
                    on_update(&job);
                    return Ok(job);
                }
                PollApplied::Aborted(err) => return Err(err.into()),
            }
        }
    }

    /// Schedule exactly one status poll for `job_id` after the fixed delay.
    ///
    /// The task sends its tagged response back over the event channel; if
    /// the orchestrator is gone by then the send fails and the response
    /// dies with it.
    fn schedule_poll(&mut self, job_id: JobId) {
        let client = self.client.clone();
        let events_tx = self.events_tx.clone();
        let delay = self.poll_interval;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            let response = client.evaluation_status(&job_id).await;
            let _ = events_tx.send(PollEvent { job_id, response });
        });
        self.poller = Some(PollerGuard { handle });
    }

    /// Apply one poll event to the current job.
    ///
    /// The identity check comes first: an event whose job id no longer
    /// matches the current job is dropped without touching any state, and a
    /// job already in a terminal state ignores even its own late events.
    fn apply_poll(&mut self, event: PollEvent) -> PollApplied {
        let Some(mut job) = self.job.take() else {
            return PollApplied::Stale;
        };
        if job.id != event.job_id || job.status.is_terminal() {
            self.job = Some(job);
            return PollApplied::Stale;
        }

        let body = match event.response {
            Ok(body) => body,
            Err(err) => {
                // Job is torn down: no retry, back to idle.
                self.poller = None;
                self.last_error = Some(err.user_message());
                return PollApplied::Aborted(err);
            }
        };

        match body.status {
            JobStatus::Completed => {
                job.status = JobStatus::Completed;
                job.progress = body.progress;
                job.result = body.result;
                self.job = Some(job.clone());
                self.poller = None;
                PollApplied::Terminal(job)
            }
            JobStatus::Failed => {
                job.status = JobStatus::Failed;
                job.progress = body.progress;
                job.error = Some(body.error.unwrap_or_else(|| GENERIC_FAILURE.to_string()));
                self.job = Some(job.clone());
                self.poller = None;
                PollApplied::Terminal(job)
            }
            status => {
                job.status = status;
                if let Some(progress) = body.progress {
                    job.progress = Some(progress);
                }
                let current = job.id.clone();
                self.job = Some(job);
                self.schedule_poll(current);
                PollApplied::InFlight
            }
        }
    }
}
