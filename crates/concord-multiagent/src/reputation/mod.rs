//! Agent reputation: running accuracy per agent, persisted after every update.
//!
//! ## Modules
//!
//! - [`tracker`]: load, update, query, and persist reputation records

pub mod tracker;

pub use tracker::ReputationTracker;
