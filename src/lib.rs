//! bigram-lm
//!
//! Bigram statistical language model built from tokenized sentence
//! corpora: count collection, Add-k and interpolated smoothing, sentence
//! generation by ancestral sampling, and corpus perplexity evaluation.
//!
//! Sentences arrive as ordered token lists (tokenization is the caller's
//! responsibility); the normalizer wraps them with `<s>`/`</s>` boundary
//! markers and case-folds the tokens. Counting happens once, after which
//! the tables are read-only and every estimator, scorer, or generator call
//! is a pure read.
//!
//! Public API:
//! - `CountTables` - frozen unigram/bigram statistics for one corpus
//! - `Smoothing` / `Lambdas` - estimator choice and parameters
//! - `score_sentence` - log probability of one sentence
//! - `generate_sentence` - sample a sentence from the bigram chain
//! - `evaluate_perplexity` - corpus-level model quality
//! - `Config` - smoothing parameters with TOML round-trip
//! - `Model` - the components behind one handle

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub mod normalize;
pub use normalize::{fold_token, normalize_sentence, END, START};

pub mod counts;
pub use counts::{CountTables, SuccessorRow};

pub mod smoothing;
pub use smoothing::{add_k_log_prob, interpolated_log_prob, Lambdas, Smoothing};

pub mod score;
pub use score::score_sentence;

pub mod generate;
pub use generate::{generate_sentence, generate_sentence_seeded};

pub mod perplexity;
pub use perplexity::evaluate_perplexity;

/// Smoothing parameters and generation settings.
///
/// Carries the tunables compared against each other via perplexity: the
/// add-k constant and the interpolation weights. The zerogram weight is
/// implicit: `1 - bigram_weight - unigram_weight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Additive constant for add-k smoothing; must stay positive.
    pub k: f64,

    /// Interpolation weight on the bigram estimate.
    pub bigram_weight: f64,
    /// Interpolation weight on the unigram estimate.
    pub unigram_weight: f64,

    /// Seed for deterministic generation; `None` uses a fresh thread RNG
    /// per call.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            k: 1.0,
            // Leaves 0.1 of the mass on the vocabulary-uniform fallback.
            bigram_weight: 0.6,
            unigram_weight: 0.3,
            seed: None,
        }
    }
}

impl Config {
    /// Add-k estimator parameterized by this config.
    pub fn add_k(&self) -> Smoothing {
        Smoothing::AddK { k: self.k }
    }

    /// Interpolated estimator parameterized by this config.
    pub fn interpolated(&self) -> Smoothing {
        Smoothing::Interpolated {
            lambdas: Lambdas::new(self.bigram_weight, self.unigram_weight),
        }
    }

    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// High-level model combining frozen count tables with configuration.
///
/// Convenience facade over the free functions for callers that train once
/// and then score, generate, and evaluate against the same tables.
#[derive(Debug, Clone)]
pub struct Model {
    pub tables: CountTables,
    pub config: Config,
}

impl Model {
    /// Collect counts from a training corpus under the given config.
    pub fn train<S: AsRef<str>>(sentences: &[Vec<S>], config: Config) -> Self {
        Self {
            tables: CountTables::collect(sentences),
            config,
        }
    }

    /// Log probability of one sentence under the chosen estimator.
    pub fn score<S: AsRef<str>>(&self, sentence: &[S], smoothing: &Smoothing) -> Result<f64> {
        score_sentence(sentence, &self.tables, smoothing)
    }

    /// Sample one sentence; uses the configured seed when present.
    pub fn generate(&self) -> Result<String> {
        match self.config.seed {
            Some(seed) => generate_sentence_seeded(&self.tables, seed),
            None => generate_sentence(&self.tables, &mut rand::rng()),
        }
    }

    /// Corpus perplexity of a held-out test set under the chosen estimator.
    pub fn perplexity<S: AsRef<str>>(
        &self,
        test_sentences: &[Vec<S>],
        smoothing: &Smoothing,
    ) -> Result<f64> {
        evaluate_perplexity(test_sentences, &self.tables, smoothing)
    }
}
