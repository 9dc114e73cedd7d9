//! # concord-graph
//!
//! Fragmentation signal for externally generated knowledge graphs.
//! The graph is never validated or altered here; it is parsed permissively
//! and its connected components are counted.

pub mod connectivity;
pub mod parse;

pub use connectivity::{analyze, count_components, ConnectivityReport};
pub use parse::{outermost_object, parse_graph};
