//! Smoothing estimators: Add-k (Laplace) and three-order interpolation.
//!
//! Both estimators are pure reads over frozen [`CountTables`] and return
//! natural-log probabilities. Parameter validity is checked once, up front,
//! via [`Smoothing::validate`]; after that every per-pair evaluation is
//! infallible. Misconfigured weights (zero residual mass on the zerogram)
//! can still produce `-inf` for unseen events, see
//! [`interpolated_log_prob`].

use crate::counts::CountTables;
use crate::normalize::START;
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Interpolation weights for the bigram and unigram orders.
///
/// The zerogram (vocabulary-uniform) weight is the remainder
/// `1 - bigram - unigram`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lambdas {
    pub bigram: f64,
    pub unigram: f64,
}

impl Lambdas {
    pub fn new(bigram: f64, unigram: f64) -> Self {
        Self { bigram, unigram }
    }

    /// Residual weight assigned to the uniform zerogram estimate.
    pub fn zerogram(&self) -> f64 {
        1.0 - self.bigram - self.unigram
    }
}

/// Estimator choice plus its parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Smoothing {
    /// Add `k` to every bigram count before normalizing.
    AddK { k: f64 },
    /// Weighted mixture of bigram, unigram, and vocabulary-uniform
    /// estimates.
    Interpolated { lambdas: Lambdas },
}

impl Smoothing {
    /// Check the parameters against the tables before any log computation.
    ///
    /// Rejects a non-positive `k`, negative weights or weights summing
    /// above one, and an empty vocabulary. Scoring and evaluation entry
    /// points call this once per sentence or corpus, so a bad parameter
    /// surfaces before the first logarithm is taken.
    pub fn validate(&self, tables: &CountTables) -> Result<()> {
        ensure!(
            tables.vocabulary_size() > 0,
            "empty vocabulary: collect counts from a non-empty corpus first"
        );
        match self {
            Smoothing::AddK { k } => {
                ensure!(*k > 0.0, "add-k smoothing requires k > 0, got {k}");
            }
            Smoothing::Interpolated { lambdas } => {
                ensure!(
                    lambdas.bigram >= 0.0 && lambdas.unigram >= 0.0,
                    "interpolation weights must be non-negative, got ({}, {})",
                    lambdas.bigram,
                    lambdas.unigram
                );
                ensure!(
                    lambdas.bigram + lambdas.unigram <= 1.0,
                    "interpolation weights must sum to at most 1, got ({}, {})",
                    lambdas.bigram,
                    lambdas.unigram
                );
            }
        }
        Ok(())
    }

    /// Natural-log probability of `word` following `prev`.
    ///
    /// Callers are expected to have run [`validate`](Self::validate)
    /// against the same tables first.
    pub fn log_prob(&self, tables: &CountTables, prev: &str, word: &str) -> f64 {
        match self {
            Smoothing::AddK { k } => add_k_log_prob(tables, prev, word, *k),
            Smoothing::Interpolated { lambdas } => {
                interpolated_log_prob(tables, prev, word, *lambdas)
            }
        }
    }
}

/// Add-k log probability:
/// `ln((bigram(prev, word) + k) / (unigram(prev) + k * |V|))`.
///
/// Adding `k` shifts every `(prev, ·)` pair's mass uniformly, so any word
/// gets strictly positive probability for `k > 0`. An absent conditioning
/// row reads as all-zero successor counts, so a wholly unseen `prev`
/// degrades to `ln(1 / |V|)`. With `k = 0` this reduces to unsmoothed MLE
/// and an unseen bigram yields `-inf`; [`Smoothing::validate`] rejects
/// that configuration.
pub fn add_k_log_prob(tables: &CountTables, prev: &str, word: &str, k: f64) -> f64 {
    let smoothed = tables.bigram(prev, word) as f64 + k;
    let denominator = tables.unigram(prev) as f64 + k * tables.vocabulary_size() as f64;
    (smoothed / denominator).ln()
}

/// Interpolated log probability: a weighted mixture of bigram, unigram,
/// and vocabulary-uniform ("zerogram") estimates.
///
/// The bigram term's conditioning count is `start_count` when `prev` is
/// the start marker (its frequency is tracked as the sentence count, not
/// as a unigram), otherwise `unigram(prev)`. A zero raw bigram count or a
/// zero bigram weight contributes exactly zero, skipping the division so a
/// conditioning token with no observed successors cannot fault. With a
/// positive zerogram weight the mixture is strictly positive for any word;
/// with zerogram weight zero an unseen word can drive the mixture to zero
/// and the result to `-inf`.
pub fn interpolated_log_prob(
    tables: &CountTables,
    prev: &str,
    word: &str,
    lambdas: Lambdas,
) -> f64 {
    let raw = tables.bigram(prev, word);
    let bigram_term = if raw == 0 || lambdas.bigram == 0.0 {
        0.0
    } else {
        let conditioning = if prev == START {
            tables.start_count() as f64
        } else {
            tables.unigram(prev) as f64
        };
        raw as f64 * lambdas.bigram / conditioning
    };

    let unigram_term = if tables.token_count() > 0 {
        tables.unigram(word) as f64 / tables.token_count() as f64 * lambdas.unigram
    } else {
        0.0
    };

    let zerogram_term = lambdas.zerogram() / tables.vocabulary_size() as f64;

    (bigram_term + unigram_term + zerogram_term).ln()
}
