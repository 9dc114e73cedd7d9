//! Fuzzy correctness check of an agent's diagnoses against the ground truth.
//!
//! A prediction is correct when any predicted name is at least `threshold`
//! similar to the reference label. Similarity is the gestalt
//! (Ratcliff/Obershelp) ratio `2·M / (|a| + |b|)`, where `M` counts characters
//! in recursively found longest common blocks. Both sides are trimmed and
//! lowercased first.

use concord_core::config::EvaluationConfig;
use concord_core::traits::ICorrectnessEvaluator;

#[derive(Debug, Clone)]
pub struct SimilarityMatcher {
    threshold: f64,
}

impl SimilarityMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn from_config(config: &EvaluationConfig) -> Self {
        Self::new(config.similarity_threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for SimilarityMatcher {
    fn default() -> Self {
        Self::from_config(&EvaluationConfig::default())
    }
}

impl ICorrectnessEvaluator for SimilarityMatcher {
    fn is_correct(&self, predicted: &[String], ground_truth: &str) -> bool {
        let target = ground_truth.trim().to_lowercase();
        if target.is_empty() {
            return false;
        }
        predicted
            .iter()
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .any(|p| similarity_ratio(&target, &p) >= self.threshold)
    }
}

/// Gestalt similarity in `[0, 1]`. Two empty strings are identical (`1.0`).
///
/// # Examples
///
/// ```
/// use concord_multiagent::correctness::similarity_ratio;
///
/// assert_eq!(similarity_ratio("abcd", "bcde"), 0.75);
/// assert_eq!(similarity_ratio("sepsis", "sepsis"), 1.0);
/// ```
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_chars(&a, &b) as f64 / total as f64
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, k) = longest_common_block(a, b);
    if k == 0 {
        return 0;
    }
    k + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + k..], &b[j + k..])
}

/// `(start_a, start_b, len)` of the longest common run; earliest in `a`, then in `b`.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            let k = curr[j + 1];
            if k > best.2 {
                best = (i + 1 - k, j + 1 - k, k);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}
