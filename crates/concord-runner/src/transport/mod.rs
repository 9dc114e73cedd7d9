//! Collaborator transport.
//!
//! `protocol` holds the wire shapes and the permissive diagnoses parser and
//! is always built. The blocking HTTP clients need the `http` feature.

pub mod protocol;

#[cfg(feature = "http")]
mod http_client;

#[cfg(feature = "http")]
pub use http_client::{HttpDiagnostician, HttpGraphBuilder};
pub use protocol::{parse_diagnoses, DiagnoseRequest, GraphRequest};
