//! Terminal output for parsum — spinners and styled result rendering.
//!
//! Uses `indicatif` for the evaluation spinner and `console` for color
//! styling. [`EvalProgressView`] tracks an evaluation job visually while the
//! orchestrator polls it.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::types::{EvalMetrics, EvalProgress, SummarizeResponse};
use crate::job::{EvalJob, JobStatus};

/// Visual indicator for an evaluation job running in the terminal.
///
/// Shows an animated spinner with the job's status and progress counts, a
/// green checkmark on completion and a red cross on failure.
pub struct EvalProgressView {
    pb: ProgressBar,
    green: Style,
    red: Style,
    dim: Style,
}

impl EvalProgressView {
    /// Start the spinner in the pre-submission state.
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("invalid template"),
        );
        pb.set_message("submitting evaluation job...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            pb,
            green: Style::new().green().bold(),
            red: Style::new().red().bold(),
            dim: Style::new().dim(),
        }
    }

    /// Refresh the spinner from the job's current status and progress.
    pub fn update(&self, job: &EvalJob) {
        let label = status_label(job.status);
        match &job.progress {
            Some(progress) => self
                .pb
                .set_message(format!("{label} — {}", format_progress(progress))),
            None => self.pb.set_message(label.to_string()),
        }
    }

    /// Stop the spinner and report success.
    pub fn finish_completed(&self) {
        self.pb.finish_and_clear();
        println!("  {} Evaluation completed", self.green.apply_to("✓"));
    }

    /// Stop the spinner and report a failure or abort with its message.
    pub fn fail(&self, message: &str) {
        self.pb.finish_and_clear();
        println!("  {} {message}", self.red.apply_to("✗"));
    }

    /// Print the metrics block for a completed evaluation.
    pub fn print_metrics(&self, metrics: &EvalMetrics) {
        println!();
        println!("{}", self.dim.apply_to("─── Evaluation Metrics ───"));
        println!("  ROUGE-1 F1:        {:.4}", metrics.rouge1_f1);
        println!("  ROUGE-2 F1:        {:.4}", metrics.rouge2_f1);
        println!("  ROUGE-L F1:        {:.4}", metrics.rouge_l_f1);
        println!("  avg generated len: {:.2}", metrics.avg_gen_len);
        println!("  avg reference len: {:.2}", metrics.avg_ref_len);
        println!("  compression ratio: {:.3}", metrics.compression_ratio);
    }
}

/// Render a synchronous summarize result.
pub fn print_summary(response: &SummarizeResponse, verbose: bool) {
    let accent = Style::new().cyan().bold();
    let dim = Style::new().dim();

    println!();
    println!(
        "{} {}",
        accent.apply_to("Summary"),
        dim.apply_to(format!(
            "(request {}, {})",
            response.request_id, response.method
        ))
    );
    println!();
    println!("{}", response.summary);
    println!();
    if let (Some(original), Some(summary)) = (
        response.original_length_sentences,
        response.summary_length_sentences,
    ) {
        println!(
            "  {} {original} sentences in, {summary} sentences out",
            dim.apply_to("·")
        );
    }
    println!(
        "  {} processed in {:.3}s",
        dim.apply_to("·"),
        response.processing_time_sec
    );
    if verbose {
        if let Some(extra) = &response.extra {
            println!();
            println!("{}", dim.apply_to("─── Extra ───"));
            println!(
                "{}",
                serde_json::to_string_pretty(extra).unwrap_or_default()
            );
        }
    }
}

/// Print one probe line for the health command.
pub fn print_probe(endpoint: &str, outcome: Result<&str, String>) {
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();
    match outcome {
        Ok(status) => println!("  {} {endpoint}: {status}", green.apply_to("✓")),
        Err(message) => println!("  {} {endpoint}: {message}", red.apply_to("✗")),
    }
}

/// Human label for a job status.
fn status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Queued => "waiting in queue",
        JobStatus::Running => "evaluating samples",
        JobStatus::Completed => "completed",
        JobStatus::Failed => "failed",
    }
}

/// `5/30 (17%)` style progress line, with valid/skipped counts when present.
fn format_progress(progress: &EvalProgress) -> String {
    let mut line = match (progress.total, progress.percent) {
        (Some(total), Some(percent)) => {
            format!("{}/{total} ({percent:.0}%)", progress.processed)
        }
        (Some(total), None) => format!("{}/{total}", progress.processed),
        _ => format!("{} processed", progress.processed),
    };
    if let (Some(samples), Some(skipped)) = (progress.samples, progress.skipped) {
        line.push_str(&format!(" — {samples} valid, {skipped} skipped"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(
        processed: u64,
        total: Option<u64>,
        percent: Option<f64>,
        samples: Option<u64>,
        skipped: Option<u64>,
    ) -> EvalProgress {
        EvalProgress {
            processed,
            total,
            percent,
            samples,
            skipped,
        }
    }

    #[test]
    fn progress_with_total_and_percent() {
        let line = format_progress(&progress(5, Some(30), Some(17.0), None, None));
        assert_eq!(line, "5/30 (17%)");
    }

    #[test]
    fn progress_with_sample_counts() {
        let line = format_progress(&progress(12, Some(30), Some(40.0), Some(10), Some(2)));
        assert_eq!(line, "12/30 (40%) — 10 valid, 2 skipped");
    }

    #[test]
    fn progress_without_total() {
        let line = format_progress(&progress(7, None, None, None, None));
        assert_eq!(line, "7 processed");
    }

    #[test]
    fn status_labels() {
        assert_eq!(status_label(JobStatus::Queued), "waiting in queue");
        assert_eq!(status_label(JobStatus::Running), "evaluating samples");
        assert_eq!(status_label(JobStatus::Completed), "completed");
        assert_eq!(status_label(JobStatus::Failed), "failed");
    }
}
