//! Log-space sentence scoring.

use crate::counts::CountTables;
use crate::normalize::normalize_sentence;
use crate::smoothing::Smoothing;
use anyhow::Result;

/// Sum the estimator's log probability over a sentence's adjacent pairs.
///
/// The sentence is normalized first, so the score always covers
/// `(<s>, w1), (w1, w2), ..., (wn, </s>)`. Summing in log space rather
/// than multiplying probabilities avoids floating-point underflow on long
/// sentences; `exp` of the result is the sentence probability.
///
/// Fails when the smoothing parameters are invalid or the tables carry an
/// empty vocabulary.
pub fn score_sentence<S: AsRef<str>>(
    sentence: &[S],
    tables: &CountTables,
    smoothing: &Smoothing,
) -> Result<f64> {
    smoothing.validate(tables)?;
    let normalized = normalize_sentence(sentence);
    let mut score = 0.0;
    for pair in normalized.windows(2) {
        score += smoothing.log_prob(tables, &pair[0], &pair[1]);
    }
    Ok(score)
}
