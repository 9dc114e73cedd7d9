//! Property tests for discordance and correctness matching.

use concord_core::models::DiagnosisEntry;
use concord_core::traits::ICorrectnessEvaluator;
use concord_multiagent::{discordance, discordance_from_entries, SimilarityMatcher};
use proptest::prelude::*;

fn label() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "pneumonia",
        "sepsis",
        "congestive heart failure",
        "acute kidney injury",
        "copd exacerbation",
        "atrial fibrillation",
    ])
    .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn discordance_is_symmetric(a in prop::collection::vec(label(), 0..6),
                                b in prop::collection::vec(label(), 0..6)) {
        prop_assert_eq!(discordance(&a, &b), discordance(&b, &a));
    }

    #[test]
    fn discordance_is_bounded(a in prop::collection::vec(label(), 0..6),
                              b in prop::collection::vec(label(), 0..6)) {
        let d = discordance(&a, &b);
        prop_assert!((0.0..=1.0).contains(&d));
    }

    #[test]
    fn self_discordance_is_zero(a in prop::collection::vec(label(), 0..6)) {
        prop_assert_eq!(discordance(&a, &a), 0.0);
    }

    #[test]
    fn order_and_case_are_ignored(a in prop::collection::vec(label(), 1..6)) {
        let mut shuffled: Vec<String> = a.iter().rev().map(|s| s.to_uppercase()).collect();
        shuffled.push(format!("  {}  ", a[0]));
        prop_assert_eq!(discordance(&a, &shuffled), 0.0);
    }

    #[test]
    fn exact_match_is_always_correct(target in label()) {
        let matcher = SimilarityMatcher::default();
        prop_assert!(matcher.is_correct(&[target.clone()], &target));
    }
}

#[test]
fn one_shared_label_of_two_is_half_discordant() {
    let a = vec![DiagnosisEntry::named("Pneumonia")];
    let b = vec![
        DiagnosisEntry::named("pneumonia"),
        DiagnosisEntry::named("CHF"),
    ];
    assert!((discordance_from_entries(&a, &b) - 0.5).abs() < 1e-12);
}

#[test]
fn disjoint_lists_are_fully_discordant() {
    assert_eq!(discordance(&["sepsis"], &["asthma"]), 1.0);
}

#[test]
fn one_empty_side_is_fully_discordant() {
    let empty: [&str; 0] = [];
    assert_eq!(discordance(&empty, &["sepsis"]), 1.0);
}
