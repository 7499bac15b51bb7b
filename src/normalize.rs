//! Sentence boundary markers and case folding.
//!
//! Every sentence entering the counting, scoring, or evaluation paths goes
//! through [`normalize_sentence`] first, so the rest of the crate only ever
//! sees `[<s>, tokens..., </s>]` with the tokens case-folded.

use unicode_normalization::UnicodeNormalization;

/// Sentence-start marker. Injected at position 0 of every normalized
/// sentence; never case-folded and never counted as a unigram.
pub const START: &str = "<s>";

/// Sentence-end marker. Injected after the last token; counted as a unigram
/// but never used as a conditioning token in a well-formed corpus.
pub const END: &str = "</s>";

/// Case-fold a single token: NFC normalization, then lowercasing.
pub fn fold_token(token: &str) -> String {
    token.nfc().collect::<String>().to_lowercase()
}

/// Wrap a raw token sequence with boundary markers:
/// `[<s>] + fold(tokens) + [</s>]`.
///
/// Total and deterministic; an empty input yields `[<s>, </s>]`. The
/// markers are inserted verbatim, they are not natural-language tokens.
pub fn normalize_sentence<S: AsRef<str>>(tokens: &[S]) -> Vec<String> {
    let mut out = Vec::with_capacity(tokens.len() + 2);
    out.push(START.to_string());
    out.extend(tokens.iter().map(|t| fold_token(t.as_ref())));
    out.push(END.to_string());
    out
}
