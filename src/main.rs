mod api;
mod cli;
mod config;
mod error;
mod job;
mod orchestrator;
mod settings;
mod ui;

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;

use api::SummaryClient;
use cli::{Cli, Command, LevelArg, MethodArg, ShapeArgs};
use config::ParsumConfig;
use error::ParsumError;
use job::JobStatus;
use orchestrator::EvalOrchestrator;
use settings::{AbstractiveTuning, EvalSampling, Method, SummaryLevel, SummarySettings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = ParsumConfig::load()?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    let client = SummaryClient::new(&config.base_url);

    match &cli.command {
        Command::Summarize { file, shape } => {
            summarize(&client, &config, shape, file.as_deref(), cli.verbose).await
        }
        Command::Evaluate {
            shape,
            samples,
            start_index,
            shuffle,
            seed,
        } => {
            let mut sampling =
                EvalSampling::with_max_samples(samples.unwrap_or(config.default_samples));
            sampling.start_index = *start_index;
            sampling.shuffle = *shuffle;
            sampling.seed = *seed;
            evaluate(&client, &config, shape, &sampling).await
        }
        Command::Health => health(&client).await,
    }
}

async fn summarize(
    client: &SummaryClient,
    config: &ParsumConfig,
    shape: &ShapeArgs,
    file: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let settings = settings_from(shape, config)?;
    let text = read_input(file)?;
    if text.trim().is_empty() {
        bail!("input text is empty");
    }

    let request = settings.summarize_request(&text);
    match client.summarize(&request).await {
        Ok(response) => {
            ui::print_summary(&response, verbose);
            Ok(())
        }
        Err(err) => bail!("{}", err.user_message()),
    }
}

async fn evaluate(
    client: &SummaryClient,
    config: &ParsumConfig,
    shape: &ShapeArgs,
    sampling: &EvalSampling,
) -> Result<()> {
    let settings = settings_from(shape, config)?;
    let request = settings.evaluation_request(sampling);
    let mut orchestrator = EvalOrchestrator::new(
        client.clone(),
        Duration::from_millis(config.poll_interval_ms),
    );

    let view = ui::EvalProgressView::start();
    match orchestrator.submit(&request).await {
        Ok(job) => view.update(job),
        Err(err) => {
            let message = err.user_message();
            view.fail(&message);
            bail!("{message}");
        }
    }

    match orchestrator.run_until_terminal(|job| view.update(job)).await {
        Ok(job) if job.status == JobStatus::Completed => {
            view.finish_completed();
            if let Some(metrics) = &job.result {
                view.print_metrics(metrics);
            }
            Ok(())
        }
        Ok(job) => {
            let message = job
                .error
                .clone()
                .unwrap_or_else(|| "evaluation failed".to_string());
            view.fail(&message);
            bail!("{message}");
        }
        Err(err) => {
            let message = err.user_message();
            view.fail(&message);
            bail!("{message}");
        }
    }
}

async fn health(client: &SummaryClient) -> Result<()> {
    let live = client.health().await;
    let ready = client.ready().await;

    ui::print_probe(
        "/healthz",
        live.as_ref()
            .map(|p| p.status.as_str())
            .map_err(|e| e.user_message()),
    );
    ui::print_probe(
        "/readyz",
        ready
            .as_ref()
            .map(|p| p.status.as_str())
            .map_err(|e| e.user_message()),
    );

    if live.is_err() {
        bail!("service is not reachable at {}", client.base_url());
    }
    Ok(())
}

/// Build the settings snapshot from CLI flags and configured defaults.
/// Out-of-range numeric inputs are clamped here, on the way in.
fn settings_from(shape: &ShapeArgs, config: &ParsumConfig) -> Result<SummarySettings> {
    let method = match shape.method {
        Some(arg) => method_from_arg(arg),
        None => config
            .default_method
            .parse::<Method>()
            .map_err(ParsumError::Config)?,
    };

    let mut settings = SummarySettings::new(method, level_from_arg(shape.level));
    settings.set_hybrid_extractive_ratio(shape.hybrid_ratio);

    let defaults = AbstractiveTuning::default();
    settings.set_tuning(AbstractiveTuning::new(
        shape.num_beams.unwrap_or(defaults.num_beams),
        shape.length_penalty.unwrap_or(defaults.length_penalty),
        shape
            .repetition_penalty
            .unwrap_or(defaults.repetition_penalty),
        shape.no_repeat_ngram.unwrap_or(defaults.no_repeat_ngram_size),
    ));
    settings.advanced_enabled = shape.advanced;
    Ok(settings)
}

fn method_from_arg(arg: MethodArg) -> Method {
    match arg {
        MethodArg::Extractive => Method::Extractive,
        MethodArg::Abstractive => Method::Abstractive,
        MethodArg::Hybrid => Method::Hybrid,
    }
}

fn level_from_arg(arg: LevelArg) -> SummaryLevel {
    match arg {
        LevelArg::VeryShort => SummaryLevel::VeryShort,
        LevelArg::Short => SummaryLevel::Short,
        LevelArg::Medium => SummaryLevel::Medium,
        LevelArg::Long => SummaryLevel::Long,
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(method: Option<MethodArg>) -> ShapeArgs {
        ShapeArgs {
            method,
            level: LevelArg::Medium,
            hybrid_ratio: 50,
            num_beams: None,
            length_penalty: None,
            repetition_penalty: None,
            no_repeat_ngram: None,
            advanced: false,
        }
    }

    #[test]
    fn settings_clamp_out_of_range_beams() {
        let mut args = shape(Some(MethodArg::Abstractive));
        args.num_beams = Some(15);
        let settings = settings_from(&args, &ParsumConfig::default()).unwrap();
        assert_eq!(settings.tuning().num_beams, 8);
    }

    #[test]
    fn settings_fall_back_to_configured_method() {
        let config = ParsumConfig {
            default_method: "hybrid".to_string(),
            ..ParsumConfig::default()
        };
        let settings = settings_from(&shape(None), &config).unwrap();
        assert_eq!(settings.method, Method::Hybrid);
    }

    #[test]
    fn settings_reject_unknown_configured_method() {
        let config = ParsumConfig {
            default_method: "markov".to_string(),
            ..ParsumConfig::default()
        };
        assert!(settings_from(&shape(None), &config).is_err());
    }

    #[test]
    fn level_arg_maps_to_percentage() {
        let mut args = shape(Some(MethodArg::Extractive));
        args.level = LevelArg::VeryShort;
        let settings = settings_from(&args, &ParsumConfig::default()).unwrap();
        assert_eq!(settings.level.percentage(), 20);
    }
}
