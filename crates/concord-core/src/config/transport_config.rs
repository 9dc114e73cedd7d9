use serde::{Deserialize, Serialize};

use super::defaults;

/// One diagnostic agent and where to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentEndpoint {
    pub id: String,
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Endpoints of the external generative service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Graph builder endpoint. Required for `concord run`.
    pub graph_endpoint: Option<String>,
    /// Optional client-side request timeout. `None` means no timeout.
    pub timeout_secs: Option<u64>,
    /// Agents in invocation order. This order is also the reputation tie-break order.
    pub agents: Vec<AgentEndpoint>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            graph_endpoint: None,
            timeout_secs: None,
            agents: defaults::DEFAULT_AGENT_IDS
                .iter()
                .map(|id| AgentEndpoint {
                    id: id.to_string(),
                    endpoint: None,
                })
                .collect(),
        }
    }
}
