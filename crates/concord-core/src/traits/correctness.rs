/// Decides whether any predicted diagnosis matches the reference label.
pub trait ICorrectnessEvaluator {
    fn is_correct(&self, predicted: &[String], ground_truth: &str) -> bool;
}
