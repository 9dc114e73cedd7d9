/// Reputation reported for an agent with no recorded outcomes.
pub const NEUTRAL_REPUTATION: f64 = 0.5;

/// Separator used when a list of diagnosis names is flattened into one history cell.
pub const DIAGNOSIS_DELIMITER: &str = "|";

/// Number of characters of an unparseable payload kept in error messages.
pub const PARSE_EXCERPT_CHARS: usize = 120;

/// Number of agents the discordance pipeline compares.
pub const AGENTS_PER_EXPERIMENT: usize = 2;
