//! Algebraic properties of normalization and scoring.

use chanmap_map::{normalize, sequence_ratio, token_similarity, tokenize};
use chanmap_model::{Match, MatchSet, MatchType};
use proptest::prelude::*;

/// Channel-name-like strings: words, separators, units and position codes.
fn channel_name() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            "[A-Za-z]{1,8}",
            "[0-9]{1,3}",
            Just("FL".to_string()),
            Just("RR".to_string()),
            Just("L1".to_string()),
            Just("(deg/s)".to_string()),
            Just("_".to_string()),
            Just("the".to_string()),
        ],
        0..6,
    )
    .prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in ".*") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_text_is_lowercase_alphanumeric(text in ".*") {
        let normalized = normalize(&text);
        prop_assert!(normalized.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()));
    }

    #[test]
    fn tokens_have_no_stopwords_or_blanks(name in channel_name()) {
        for token in tokenize(&name) {
            prop_assert!(!token.is_empty());
            prop_assert!(!chanmap_map::tokenize::is_stopword(&token));
        }
    }

    #[test]
    fn token_similarity_is_symmetric_and_bounded(a in channel_name(), b in channel_name()) {
        let ab = token_similarity(&a, &b);
        let ba = token_similarity(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn sequence_ratio_is_symmetric_and_bounded(a in channel_name(), b in channel_name()) {
        let ab = sequence_ratio(&a, &b);
        let ba = sequence_ratio(&b, &a);
        prop_assert!((ab - ba).abs() < 1e-12);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn raising_threshold_never_keeps_more(
        confidences in prop::collection::vec(0.0f32..=1.0, 0..20),
        targets in prop::collection::vec(0usize..5, 20),
        low in 0.0f32..=1.0,
        bump in 0.0f32..=0.5,
    ) {
        let set: MatchSet = confidences
            .iter()
            .zip(&targets)
            .enumerate()
            .map(|(i, (confidence, target))| {
                Match::new(format!("S{i}"), format!("T{target}"), *confidence, MatchType::Semantic, "")
            })
            .collect();
        let high = (low + bump).min(1.0);
        let loose = set.resolve(low);
        let strict = set.resolve(high);
        prop_assert!(strict.kept.len() <= loose.kept.len());

        let mut seen = std::collections::BTreeSet::new();
        for kept in &strict.kept {
            prop_assert!(kept.confidence >= high);
            prop_assert!(seen.insert(kept.target_name.clone()));
        }
    }
}
