//! # concord-multiagent
//!
//! Everything that compares or scores the agents:
//! - [`discordance`]: set-based disagreement between two agents' diagnoses
//! - [`reputation`]: persisted running accuracy per agent
//! - [`correctness`]: string-similarity match against the ground truth

pub mod correctness;
pub mod discordance;
pub mod reputation;

pub use correctness::SimilarityMatcher;
pub use discordance::{discordance, discordance_from_entries};
pub use reputation::ReputationTracker;
