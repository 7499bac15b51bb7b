//! Corpus-level perplexity evaluation.

use crate::counts::CountTables;
use crate::score::score_sentence;
use crate::smoothing::Smoothing;
use anyhow::{ensure, Result};
use tracing::debug;

/// Exponentiated average per-token negative log likelihood of the model on
/// a held-out corpus: `exp(-total_log_prob / total_tokens)`.
///
/// Each sentence contributes `len(sentence) + 1` tokens, accounting for
/// the implicit `</s>` marker. Lower is better; this is the single scalar
/// used to compare smoothing strategies and parameter choices.
///
/// Fails on invalid smoothing parameters, an empty vocabulary, or an empty
/// test corpus (zero tokens would divide by zero).
pub fn evaluate_perplexity<S: AsRef<str>>(
    test_sentences: &[Vec<S>],
    tables: &CountTables,
    smoothing: &Smoothing,
) -> Result<f64> {
    smoothing.validate(tables)?;

    let mut total_log_prob = 0.0;
    let mut total_tokens = 0u64;
    for sentence in test_sentences {
        total_log_prob += score_sentence(sentence, tables, smoothing)?;
        total_tokens += sentence.len() as u64 + 1;
    }
    ensure!(
        total_tokens > 0,
        "empty test corpus: perplexity is undefined over zero tokens"
    );

    let perplexity = (-total_log_prob / total_tokens as f64).exp();
    debug!(
        sentences = test_sentences.len(),
        tokens = total_tokens,
        perplexity,
        "evaluated corpus perplexity"
    );
    Ok(perplexity)
}
