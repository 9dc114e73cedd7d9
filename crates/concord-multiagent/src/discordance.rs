//! Discordance between two agents: `1 - Jaccard` over normalized diagnosis names.
//!
//! Only *which* labels appear matters. Rank and stated probability are
//! discarded, so two agents listing the same diagnoses in opposite order
//! with opposite confidence score as fully concordant. A rank-aware metric
//! would need the ordering this one throws away.
//!
//! Normalization trims surrounding whitespace and lowercases; empty names are
//! dropped. When neither side names anything, the agents are taken to agree
//! (discordance `0`), not to disagree.

use std::collections::BTreeSet;

use concord_core::models::DiagnosisEntry;

/// Unique normalized names.
pub fn normalized_names<S: AsRef<str>>(names: &[S]) -> BTreeSet<String> {
    names
        .iter()
        .map(|n| n.as_ref().trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .collect()
}

/// Discordance in `[0, 1]` between two name lists.
///
/// # Examples
///
/// ```
/// use concord_multiagent::discordance;
///
/// let a = ["Pneumonia"];
/// let b = ["pneumonia", "CHF"];
/// assert!((discordance(&a, &b) - 0.5).abs() < 1e-12);
///
/// let empty: [&str; 0] = [];
/// assert_eq!(discordance(&empty, &empty), 0.0);
/// ```
pub fn discordance<A: AsRef<str>, B: AsRef<str>>(a: &[A], b: &[B]) -> f64 {
    let a = normalized_names(a);
    let b = normalized_names(b);

    let union = a.union(&b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(&b).count();
    1.0 - intersection as f64 / union as f64
}

/// Discordance between two agents' diagnosis lists, reading `name` only.
pub fn discordance_from_entries(a: &[DiagnosisEntry], b: &[DiagnosisEntry]) -> f64 {
    let names = |entries: &[DiagnosisEntry]| -> Vec<String> {
        entries.iter().map(|e| e.name.clone()).collect()
    };
    discordance(&names(a), &names(b))
}
