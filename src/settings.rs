//! User-tunable summarization settings and request construction.
//!
//! [`SummarySettings`] is pure data; the two builders at the bottom turn a
//! settings snapshot into the wire request structs, applying the
//! method-conditional field rules. Deterministic, no I/O — unit-testable
//! without a network.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::types::{EvaluationRequest, SummarizeRequest};

/// Summarization strategy offered by the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// TextRank sentence selection.
    #[default]
    Extractive,
    /// Transformer generation.
    Abstractive,
    /// Extractive stage followed by a generative pass.
    Hybrid,
}

impl Method {
    /// Whether requests for this method carry the generation tuning fields.
    pub fn uses_generation(&self) -> bool {
        matches!(self, Method::Abstractive | Method::Hybrid)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Extractive => write!(f, "extractive"),
            Method::Abstractive => write!(f, "abstractive"),
            Method::Hybrid => write!(f, "hybrid"),
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extractive" => Ok(Method::Extractive),
            "abstractive" => Ok(Method::Abstractive),
            "hybrid" => Ok(Method::Hybrid),
            other => Err(format!("unknown summarization method: {other}")),
        }
    }
}

/// The four user-facing length tiers and their fixed target percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryLevel {
    VeryShort,
    Short,
    #[default]
    Medium,
    Long,
}

impl SummaryLevel {
    /// Target summary length as a percentage of the input. These are the
    /// only valid values for the service's `length` fields.
    pub fn percentage(&self) -> u8 {
        match self {
            SummaryLevel::VeryShort => 20,
            SummaryLevel::Short => 35,
            SummaryLevel::Medium => 50,
            SummaryLevel::Long => 70,
        }
    }
}

/// Generation tuning for the abstractive stage.
///
/// Values are clamped to the ranges the service accepts, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AbstractiveTuning {
    pub num_beams: u8,
    pub length_penalty: f32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u8,
}

impl Default for AbstractiveTuning {
    fn default() -> Self {
        Self {
            num_beams: 2,
            length_penalty: 1.0,
            repetition_penalty: 1.1,
            no_repeat_ngram_size: 3,
        }
    }
}

impl AbstractiveTuning {
    pub fn new(
        num_beams: u8,
        length_penalty: f32,
        repetition_penalty: f32,
        no_repeat_ngram_size: u8,
    ) -> Self {
        Self {
            num_beams: num_beams.clamp(1, 8),
            length_penalty: length_penalty.clamp(0.2, 2.0),
            repetition_penalty: repetition_penalty.clamp(1.0, 2.0),
            no_repeat_ngram_size: no_repeat_ngram_size.clamp(0, 6),
        }
    }
}

/// Dataset sampling controls for an evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalSampling {
    /// Cap on the number of samples evaluated, within [1, 1000].
    pub max_samples: u16,
    pub start_index: u32,
    pub shuffle: bool,
    pub seed: u64,
}

impl Default for EvalSampling {
    fn default() -> Self {
        Self {
            max_samples: 30,
            start_index: 0,
            shuffle: false,
            seed: 42,
        }
    }
}

impl EvalSampling {
    pub fn with_max_samples(max_samples: u16) -> Self {
        Self {
            max_samples: max_samples.clamp(1, 1000),
            ..Self::default()
        }
    }
}

/// Everything the user chose about a summarization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySettings {
    pub method: Method,
    pub level: SummaryLevel,
    /// Share of sentences the extractive stage keeps; meaningful only for
    /// the hybrid method. Clamped to [10, 90].
    hybrid_extractive_ratio: u8,
    tuning: AbstractiveTuning,
    /// Gates whether the tuning fields are editable in a front end. It never
    /// filters fields out of an outgoing payload.
    pub advanced_enabled: bool,
}

impl Default for SummarySettings {
    fn default() -> Self {
        Self {
            method: Method::default(),
            level: SummaryLevel::default(),
            hybrid_extractive_ratio: 50,
            tuning: AbstractiveTuning::default(),
            advanced_enabled: false,
        }
    }
}

impl SummarySettings {
    pub fn new(method: Method, level: SummaryLevel) -> Self {
        Self {
            method,
            level,
            ..Self::default()
        }
    }

    pub fn hybrid_extractive_ratio(&self) -> u8 {
        self.hybrid_extractive_ratio
    }

    pub fn set_hybrid_extractive_ratio(&mut self, ratio: u8) {
        self.hybrid_extractive_ratio = ratio.clamp(10, 90);
    }

    pub fn tuning(&self) -> AbstractiveTuning {
        self.tuning
    }

    pub fn set_tuning(&mut self, tuning: AbstractiveTuning) {
        self.tuning = AbstractiveTuning::new(
            tuning.num_beams,
            tuning.length_penalty,
            tuning.repetition_penalty,
            tuning.no_repeat_ngram_size,
        );
    }

    /// Build the body for `POST /api/summarize`.
    pub fn summarize_request(&self, text: &str) -> SummarizeRequest {
        let (extractive_length, abstractive_length) = self.stage_lengths();
        let (num_beams, length_penalty, repetition_penalty, no_repeat_ngram_size) =
            self.generation_fields();
        SummarizeRequest {
            text: text.to_string(),
            method: self.method,
            length: self.level.percentage(),
            extractive_length,
            abstractive_length,
            abstractive_num_beams: num_beams,
            abstractive_length_penalty: length_penalty,
            abstractive_repetition_penalty: repetition_penalty,
            abstractive_no_repeat_ngram_size: no_repeat_ngram_size,
        }
    }

    /// Build the body for `POST /api/evaluate/async`.
    pub fn evaluation_request(&self, sampling: &EvalSampling) -> EvaluationRequest {
        let (extractive_length, abstractive_length) = self.stage_lengths();
        let (num_beams, length_penalty, repetition_penalty, no_repeat_ngram_size) =
            self.generation_fields();
        EvaluationRequest {
            method: self.method,
            length: self.level.percentage(),
            extractive_length,
            abstractive_length,
            abstractive_num_beams: num_beams,
            abstractive_length_penalty: length_penalty,
            abstractive_repetition_penalty: repetition_penalty,
            abstractive_no_repeat_ngram_size: no_repeat_ngram_size,
            max_samples: sampling.max_samples.clamp(1, 1000),
            start_index: sampling.start_index,
            shuffle: sampling.shuffle,
            seed: sampling.seed,
        }
    }

    // The two stage lengths are populated differently: the extractive share
    // is the tunable ratio, the abstractive share is the overall target.
    fn stage_lengths(&self) -> (Option<u8>, Option<u8>) {
        match self.method {
            Method::Hybrid => (
                Some(self.hybrid_extractive_ratio),
                Some(self.level.percentage()),
            ),
            _ => (None, None),
        }
    }

    fn generation_fields(&self) -> (Option<u8>, Option<f32>, Option<f32>, Option<u8>) {
        if self.method.uses_generation() {
            (
                Some(self.tuning.num_beams),
                Some(self.tuning.length_penalty),
                Some(self.tuning.repetition_penalty),
                Some(self.tuning.no_repeat_ngram_size),
            )
        } else {
            (None, None, None, None)
        }
    }
}
