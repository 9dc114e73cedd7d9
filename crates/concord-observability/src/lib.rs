//! # concord-observability
//!
//! Structured logging for Concord: subscriber setup and the spans every
//! iteration runs under.

pub mod tracing_setup;

pub use tracing_setup::init_from_config;
