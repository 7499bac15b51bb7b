//! Ancestral sampling from the bigram distribution.

use crate::counts::CountTables;
use crate::normalize::{END, START};
use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sample one sentence by walking the bigram chain from `<s>` until `</s>`
/// is drawn.
///
/// At each step the current token's successor row is treated as a
/// probability distribution (count / row total) and one successor is drawn
/// by a cumulative walk over the token-sorted row, so a seeded `rng`
/// replays the same sentence. The markers are stripped and the sampled
/// tokens are joined by single spaces.
///
/// Fails if the current token has no observed successors. Tables built
/// from a non-empty corpus never trigger this: every conditioning token
/// was, by construction, followed by something (ultimately `</s>`), and
/// `</s>` itself is terminal and never becomes the current token.
pub fn generate_sentence<R: Rng>(tables: &CountTables, rng: &mut R) -> Result<String> {
    let mut current = START.to_string();
    let mut words: Vec<String> = Vec::new();
    loop {
        let row = match tables.successors(&current) {
            Some(row) if row.total() > 0 => row,
            _ => bail!("token {current:?} has no observed successors"),
        };

        let mut draw = rng.random_range(0..row.total());
        let mut chosen: Option<&str> = None;
        for (token, count) in row.items() {
            if draw < *count {
                chosen = Some(token.as_str());
                break;
            }
            draw -= count;
            // Keep the last token as fallback; unreachable while the row
            // total matches the item counts.
            chosen = Some(token.as_str());
        }
        let Some(next) = chosen else {
            bail!("token {current:?} has no observed successors");
        };

        if next == END {
            break;
        }
        words.push(next.to_string());
        current = next.to_string();
    }
    Ok(words.join(" "))
}

/// Deterministic convenience wrapper seeding a [`StdRng`].
pub fn generate_sentence_seeded(tables: &CountTables, seed: u64) -> Result<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_sentence(tables, &mut rng)
}
