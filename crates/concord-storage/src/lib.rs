//! # concord-storage
//!
//! File-backed resources that outlive a run:
//! - the reputation store (full-snapshot JSON, replaced atomically),
//! - the history log (CSV, header written once, append-only),
//! - the case loader (JSON Lines).

pub mod cases;
pub mod history;
pub mod reputation_store;

pub use cases::load_cases;
pub use history::HistoryLog;
pub use reputation_store::{InMemoryReputationStore, JsonFileReputationStore};
