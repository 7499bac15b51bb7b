// End-to-end checks over the whole pipeline: counting, scoring,
// generation, and perplexity against hand-derived expectations.

use bigram_lm::{
    evaluate_perplexity, generate_sentence_seeded, score_sentence, CountTables, Smoothing, END,
    START,
};

fn corpus(sentences: &[&[&str]]) -> Vec<Vec<String>> {
    sentences
        .iter()
        .map(|s| s.iter().map(|t| t.to_string()).collect())
        .collect()
}

#[test]
fn count_collection_round_trip() {
    let tables = CountTables::collect(&corpus(&[&["a", "b"]]));

    assert_eq!(tables.unigram("a"), 1);
    assert_eq!(tables.unigram("b"), 1);
    assert_eq!(tables.unigram(END), 1);
    assert_eq!(tables.bigram(START, "a"), 1);
    assert_eq!(tables.bigram("a", "b"), 1);
    assert_eq!(tables.bigram("b", END), 1);
    assert_eq!(tables.start_count(), 1);
    assert_eq!(tables.token_count(), 3);
}

#[test]
fn count_collection_is_idempotent() {
    let train = corpus(&[&["the", "cat", "sat"], &["the", "dog", "ran"]]);
    let first = CountTables::collect(&train);
    let second = CountTables::collect(&train);

    for token in ["the", "cat", "sat", "dog", "ran", END] {
        assert_eq!(
            first.unigram(token),
            second.unigram(token),
            "unigram count for {token} must not drift between runs"
        );
    }
    for prev in [START, "the", "cat", "sat", "dog", "ran"] {
        assert_eq!(
            first.successors(prev).map(|r| r.items()),
            second.successors(prev).map(|r| r.items()),
            "successor row for {prev} must not drift between runs"
        );
    }
    assert_eq!(first.start_count(), second.start_count());
    assert_eq!(first.token_count(), second.token_count());
}

#[test]
fn add_k_perplexity_reproduces_the_analytic_scenario() {
    // Training corpus [["a","b"], ["a","c"]], test corpus [["a","b"]],
    // k = 1, vocabulary {a, b, c, </s>} of size 4:
    //   P(a | <s>)  = 3/4,  P(b | a) = 1/3,  P(</s> | b) = 2/5
    //   perplexity  = exp(-ln(3/4 * 1/3 * 2/5) / 3) = 10^(1/3)
    let train = corpus(&[&["a", "b"], &["a", "c"]]);
    let test = corpus(&[&["a", "b"]]);
    let tables = CountTables::collect(&train);

    let perplexity = evaluate_perplexity(&test, &tables, &Smoothing::AddK { k: 1.0 })
        .expect("valid parameters");
    let expected = 10f64.powf(1.0 / 3.0);
    assert!(
        (perplexity - expected).abs() < 1e-12,
        "expected {expected}, got {perplexity}"
    );
}

#[test]
fn scoring_is_case_insensitive() {
    let train = corpus(&[&["a", "b"], &["a", "c"]]);
    let tables = CountTables::collect(&train);
    let smoothing = Smoothing::AddK { k: 1.0 };

    let lower = score_sentence(&["a", "b"], &tables, &smoothing).unwrap();
    let upper = score_sentence(&["A", "B"], &tables, &smoothing).unwrap();
    assert_eq!(lower, upper);
}

#[test]
fn generation_terminates_and_stays_inside_the_vocabulary() {
    let train = corpus(&[
        &["the", "cat", "sat"],
        &["the", "cat", "ran"],
        &["a", "dog", "sat"],
        &["the", "dog", "chased", "a", "cat"],
    ]);
    let tables = CountTables::collect(&train);

    for seed in 0..64 {
        let sentence = generate_sentence_seeded(&tables, seed).expect("reachable end marker");
        assert!(!sentence.contains(START), "no start marker in output");
        assert!(!sentence.contains(END), "no end marker in output");
        for word in sentence.split_whitespace() {
            assert!(
                tables.unigram(word) > 0,
                "generated word {word:?} must come from the training vocabulary"
            );
        }
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let train = corpus(&[
        &["the", "cat", "sat"],
        &["the", "dog", "ran"],
        &["a", "bird", "sang"],
    ]);
    let tables = CountTables::collect(&train);

    for seed in [0u64, 1, 17, 9001] {
        assert_eq!(
            generate_sentence_seeded(&tables, seed).unwrap(),
            generate_sentence_seeded(&tables, seed).unwrap(),
            "seed {seed} must replay the same sentence"
        );
    }
}

#[test]
fn interpolated_and_add_k_rank_test_corpora_consistently() {
    // A test corpus drawn from the training distribution must not score
    // worse than one made of tokens the model never saw together.
    let train = corpus(&[
        &["the", "cat", "sat"],
        &["the", "cat", "ran"],
        &["the", "dog", "sat"],
    ]);
    let tables = CountTables::collect(&train);
    let in_domain = corpus(&[&["the", "cat", "sat"]]);
    let shuffled = corpus(&[&["sat", "the", "ran", "cat"]]);

    for smoothing in [
        Smoothing::AddK { k: 0.5 },
        Smoothing::Interpolated {
            lambdas: bigram_lm::Lambdas::new(0.6, 0.3),
        },
    ] {
        let good = evaluate_perplexity(&in_domain, &tables, &smoothing).unwrap();
        let bad = evaluate_perplexity(&shuffled, &tables, &smoothing).unwrap();
        assert!(
            good < bad,
            "in-domain perplexity {good} should beat shuffled perplexity {bad}"
        );
    }
}
