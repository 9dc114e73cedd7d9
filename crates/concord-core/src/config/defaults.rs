// Single source of truth for all default values.

// --- Experiment ---
pub const DEFAULT_ITERATIONS: usize = 15;
pub const DEFAULT_ITERATION_BUDGET_SECS: f64 = 60.0; // ~1 iteration per minute

// --- Learning ---
pub const DEFAULT_HIGH_DISCORDANCE_THRESHOLD: f64 = 0.3;

// --- Evaluation ---
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.6;

// --- Storage ---
pub const DEFAULT_CASES_PATH: &str = "data/cases.jsonl";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_REPUTATION_FILE: &str = "reputation.json";
pub const DEFAULT_HISTORY_FILE: &str = "history.csv";

// --- Transport ---
pub const DEFAULT_AGENT_IDS: [&str; 2] = ["A", "B"];

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_LOG_JSON: bool = true;
