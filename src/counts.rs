//! Count collection over a training corpus.
//!
//! [`CountTables`] is built in one pass by [`CountTables::collect`] and is
//! read-only afterwards: scoring, generation, and perplexity evaluation are
//! pure reads against the frozen tables. Absent keys read as zero through
//! the accessors; nothing is ever inserted on lookup.

use crate::normalize::normalize_sentence;
use ahash::AHashMap;
use tracing::debug;

/// One conditioning token's successor distribution.
///
/// Stores the row total alongside a token-sorted vector of
/// `(successor, count)` pairs, so lookups binary-search and the generator
/// walks the row in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuccessorRow {
    total: u64,
    /// Sorted by token ascending, tokens unique.
    items: Vec<(String, u64)>,
}

impl SuccessorRow {
    fn add(&mut self, token: &str) {
        match self.items.binary_search_by(|(t, _)| t.as_str().cmp(token)) {
            Ok(idx) => self.items[idx].1 += 1,
            Err(idx) => self.items.insert(idx, (token.to_string(), 1)),
        }
        self.total += 1;
    }

    /// Total observations in this row: how many times the conditioning
    /// token was followed by anything. Always equals the sum of the item
    /// counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Count for one successor; absent successors read as zero.
    pub fn count(&self, token: &str) -> u64 {
        match self.items.binary_search_by(|(t, _)| t.as_str().cmp(token)) {
            Ok(idx) => self.items[idx].1,
            Err(_) => 0,
        }
    }

    /// Successors as `(token, count)` in ascending token order.
    pub fn items(&self) -> &[(String, u64)] {
        &self.items
    }

    /// Number of distinct successors.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Frozen unigram and bigram statistics for one training corpus.
#[derive(Debug, Clone, Default)]
pub struct CountTables {
    /// Token -> occurrence count. Excludes `<s>` (tracked as
    /// `start_count`), includes `</s>`.
    unigrams: AHashMap<String, u64>,
    /// Conditioning token -> successor distribution.
    bigrams: AHashMap<String, SuccessorRow>,
    /// Number of sentences processed (one `<s>` each).
    start_count: u64,
    /// Sum of all unigram counts, fixed once collection completes.
    token_count: u64,
}

impl CountTables {
    /// Collect counts from a finite corpus of raw (unmarked) sentences.
    ///
    /// Each sentence is normalized first, so `<s>` appears only as a
    /// conditioning token and `</s>` only as a successor. Unigram counting
    /// starts at position 1 (skip the injected `<s>`, count `</s>`); every
    /// adjacent pair of the normalized sentence feeds the bigram rows. An
    /// empty corpus yields all-zero tables and is not an error.
    pub fn collect<S: AsRef<str>>(sentences: &[Vec<S>]) -> Self {
        let mut tables = Self::default();
        for sentence in sentences {
            let normalized = normalize_sentence(sentence);
            tables.start_count += 1;
            for token in &normalized[1..] {
                *tables.unigrams.entry(token.clone()).or_insert(0) += 1;
            }
            for pair in normalized.windows(2) {
                tables
                    .bigrams
                    .entry(pair[0].clone())
                    .or_default()
                    .add(&pair[1]);
            }
        }
        tables.token_count = tables.unigrams.values().sum();
        debug!(
            sentences = tables.start_count,
            vocabulary = tables.unigrams.len(),
            tokens = tables.token_count,
            "collected bigram counts"
        );
        tables
    }

    /// Unigram count for `token`; zero when unseen. `<s>` is never a
    /// unigram key, so it reads as zero here; its frequency is
    /// [`start_count`](Self::start_count).
    pub fn unigram(&self, token: &str) -> u64 {
        self.unigrams.get(token).copied().unwrap_or(0)
    }

    /// Bigram count for the pair `(prev, token)`; zero when unseen.
    pub fn bigram(&self, prev: &str, token: &str) -> u64 {
        self.bigrams.get(prev).map_or(0, |row| row.count(token))
    }

    /// Successor row for a conditioning token, if one was observed.
    pub fn successors(&self, prev: &str) -> Option<&SuccessorRow> {
        self.bigrams.get(prev)
    }

    /// Number of distinct observed unigram tokens (includes `</s>`).
    pub fn vocabulary_size(&self) -> usize {
        self.unigrams.len()
    }

    /// Number of training sentences.
    pub fn start_count(&self) -> u64 {
        self.start_count
    }

    /// Total non-`<s>` unigram occurrences across the corpus.
    pub fn token_count(&self) -> u64 {
        self.token_count
    }
}
