//! Agent identity.
//!
//! # Examples
//!
//! ```
//! use concord_core::models::AgentId;
//!
//! let agent = AgentId::from("A");
//! assert_eq!(agent.to_string(), "A");
//! assert_eq!(agent.as_str(), "A");
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of one diagnostic agent.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl AgentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AgentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AgentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
