//! # concord-runner
//!
//! Drives the experiment: select a case, build its graph, ask each agent,
//! score, persist. Also hosts the HTTP collaborators (feature `http`) and
//! the `concord` binary.

pub mod orchestrator;
pub mod pacing;
pub mod transport;

#[cfg(feature = "http")]
pub mod bootstrap;

pub use orchestrator::{Collaborators, ExperimentReport, Orchestrator};
pub use pacing::{IPacer, RecordingPacer, ThreadSleeper};
