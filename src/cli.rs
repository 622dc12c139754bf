//! Command-line interface for parsum, built on clap.
//!
//! Defines the [`Cli`] struct with the [`Command`] subcommands (summarize,
//! evaluate, health) and global flags (--base-url, --verbose).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// parsum — client for the Persian text summarization service.
#[derive(Debug, Parser)]
#[command(name = "parsum", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the summarization service.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enables detailed output.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Summarization method accepted by the CLI, mapped to
/// [`Method`](crate::settings::Method) internally.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    /// TextRank sentence selection; keeps key wording.
    Extractive,
    /// Transformer generation; rewrites the content.
    Abstractive,
    /// Extractive stage followed by a generative pass.
    Hybrid,
}

/// Summary length tier, mapped to a fixed target percentage.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LevelArg {
    /// 20% of the input.
    VeryShort,
    /// 35% of the input.
    Short,
    /// 50% of the input.
    Medium,
    /// 70% of the input.
    Long,
}

/// Method, length and generation tuning shared by summarize and evaluate.
///
/// Out-of-range numeric values are clamped before transmission, never
/// rejected.
#[derive(Debug, Args)]
pub struct ShapeArgs {
    /// Summarization method; falls back to the configured default.
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Summary length tier.
    #[arg(long, value_enum, default_value = "medium")]
    pub level: LevelArg,

    /// Share of sentences kept by the extractive stage (hybrid only, 10-90).
    #[arg(long, default_value_t = 50)]
    pub hybrid_ratio: u8,

    /// Beam count for generative decoding (1-8).
    #[arg(long)]
    pub num_beams: Option<u8>,

    /// Length penalty for generative decoding (0.2-2.0).
    #[arg(long)]
    pub length_penalty: Option<f32>,

    /// Repetition penalty for generative decoding (1.0-2.0).
    #[arg(long)]
    pub repetition_penalty: Option<f32>,

    /// Blocked n-gram size for generative decoding (0-6).
    #[arg(long)]
    pub no_repeat_ngram: Option<u8>,

    /// Marks the tuning values above as deliberately chosen.
    #[arg(long, default_value_t = false)]
    pub advanced: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize a text read from FILE or standard input.
    Summarize {
        /// Input file; reads standard input when omitted.
        file: Option<PathBuf>,

        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Run an evaluation job on the service's test dataset and await the result.
    Evaluate {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Number of dataset samples to evaluate (1-1000).
        #[arg(long)]
        samples: Option<u16>,

        /// First dataset row to evaluate.
        #[arg(long, default_value_t = 0)]
        start_index: u32,

        /// Shuffles dataset rows before sampling.
        #[arg(long, default_value_t = false)]
        shuffle: bool,

        /// Seed for the shuffle.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },

    /// Check the service's liveness and readiness probes.
    Health,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_summarize_subcommand() {
        let cli = Cli::parse_from(["parsum", "summarize", "article.txt", "--method", "hybrid"]);
        match cli.command {
            Command::Summarize { file, shape } => {
                assert_eq!(file.unwrap().to_str().unwrap(), "article.txt");
                assert!(matches!(shape.method, Some(MethodArg::Hybrid)));
                assert!(matches!(shape.level, LevelArg::Medium));
                assert_eq!(shape.hybrid_ratio, 50);
            }
            _ => panic!("expected Summarize command"),
        }
    }

    #[test]
    fn cli_parses_evaluate_flags() {
        let cli = Cli::parse_from([
            "parsum",
            "evaluate",
            "--method",
            "abstractive",
            "--level",
            "very-short",
            "--samples",
            "100",
            "--num-beams",
            "4",
            "--shuffle",
            "--seed",
            "7",
        ]);
        match cli.command {
            Command::Evaluate {
                shape,
                samples,
                start_index,
                shuffle,
                seed,
            } => {
                assert!(matches!(shape.method, Some(MethodArg::Abstractive)));
                assert!(matches!(shape.level, LevelArg::VeryShort));
                assert_eq!(shape.num_beams, Some(4));
                assert_eq!(samples, Some(100));
                assert_eq!(start_index, 0);
                assert!(shuffle);
                assert_eq!(seed, 7);
            }
            _ => panic!("expected Evaluate command"),
        }
    }

    #[test]
    fn cli_parses_global_flags() {
        let cli = Cli::parse_from([
            "parsum",
            "--base-url",
            "http://summarizer:9000",
            "--verbose",
            "health",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.base_url.as_deref(), Some("http://summarizer:9000"));
        assert!(matches!(cli.command, Command::Health));
    }

    #[test]
    fn cli_verify() {
        Cli::command().debug_assert();
    }
}
