//! Blocking HTTP collaborators.
//!
//! One POST per call, no retries. A transport failure or non-success status
//! surfaces as `CollaboratorError::Transport` and ends the run.

use std::time::Duration;

use concord_core::config::TransportConfig;
use concord_core::errors::{CollaboratorError, ConcordError, ConcordResult};
use concord_core::models::{AgentId, DiagnosisEntry, KnowledgeGraph};
use concord_core::traits::{IDiagnostician, IGraphBuilder};
use concord_graph::parse_graph;
use reqwest::blocking::Client;
use serde::Serialize;
use tracing::{debug, instrument};

use super::protocol::{parse_diagnoses, DiagnoseRequest, GraphRequest};

const GRAPH_BUILDER: &str = "graph builder";

fn transport_err(collaborator: &str, reason: String) -> ConcordError {
    CollaboratorError::Transport {
        collaborator: collaborator.to_string(),
        reason,
    }
    .into()
}

fn build_client(timeout: Option<Duration>, collaborator: &str) -> ConcordResult<Client> {
    // `None` disables the blocking client's default 30s timeout.
    let builder = Client::builder().gzip(true).timeout(timeout);
    builder
        .build()
        .map_err(|e| transport_err(collaborator, format!("failed to build HTTP client: {e}")))
}

/// POST `body` as JSON and return the response text.
fn post_json(
    client: &Client,
    url: &str,
    body: &impl Serialize,
    collaborator: &str,
) -> ConcordResult<String> {
    let resp = client
        .post(url)
        .json(body)
        .send()
        .map_err(|e| transport_err(collaborator, format!("request to {url} failed: {e}")))?;

    let status = resp.status();
    let text = resp
        .text()
        .map_err(|e| transport_err(collaborator, format!("failed to read response body: {e}")))?;
    if !status.is_success() {
        return Err(transport_err(
            collaborator,
            format!("{url} returned {status}: {}", text.chars().take(200).collect::<String>()),
        ));
    }
    debug!(%status, body_len = text.len(), "collaborator responded");
    Ok(text)
}

fn timeout_of(config: &TransportConfig) -> Option<Duration> {
    config.timeout_secs.map(Duration::from_secs)
}

/// Graph builder behind an HTTP endpoint.
#[derive(Debug)]
pub struct HttpGraphBuilder {
    client: Client,
    endpoint: String,
}

impl HttpGraphBuilder {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> ConcordResult<Self> {
        Ok(Self {
            client: build_client(timeout, GRAPH_BUILDER)?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &TransportConfig) -> ConcordResult<Self> {
        let endpoint = config.graph_endpoint.as_deref().ok_or_else(|| {
            ConcordError::from(CollaboratorError::NotConfigured {
                collaborator: GRAPH_BUILDER.to_string(),
                reason: "transport.graph_endpoint is not set".to_string(),
            })
        })?;
        Self::new(endpoint, timeout_of(config))
    }
}

impl IGraphBuilder for HttpGraphBuilder {
    #[instrument(skip(self, note), fields(endpoint = %self.endpoint, note_len = note.len()))]
    fn build(&self, note: &str) -> ConcordResult<KnowledgeGraph> {
        let body = post_json(&self.client, &self.endpoint, &GraphRequest { note }, GRAPH_BUILDER)?;
        Ok(parse_graph(&body)?)
    }
}

/// One diagnostic agent behind an HTTP endpoint.
#[derive(Debug)]
pub struct HttpDiagnostician {
    id: AgentId,
    client: Client,
    endpoint: String,
}

impl HttpDiagnostician {
    pub fn new(
        id: AgentId,
        endpoint: impl Into<String>,
        timeout: Option<Duration>,
    ) -> ConcordResult<Self> {
        let collaborator = format!("agent {id}");
        Ok(Self {
            client: build_client(timeout, &collaborator)?,
            endpoint: endpoint.into(),
            id,
        })
    }

    /// One client per configured agent, in configured order.
    pub fn all_from_config(config: &TransportConfig) -> ConcordResult<Vec<Self>> {
        config
            .agents
            .iter()
            .map(|agent| {
                let endpoint = agent.endpoint.as_deref().ok_or_else(|| {
                    ConcordError::from(CollaboratorError::NotConfigured {
                        collaborator: format!("agent {}", agent.id),
                        reason: "endpoint is not set".to_string(),
                    })
                })?;
                Self::new(AgentId::from(agent.id.as_str()), endpoint, timeout_of(config))
            })
            .collect()
    }
}

impl IDiagnostician for HttpDiagnostician {
    fn agent_id(&self) -> &AgentId {
        &self.id
    }

    #[instrument(skip(self, note, graph), fields(agent_id = %self.id, nodes = graph.nodes.len()))]
    fn diagnose(&self, note: &str, graph: &KnowledgeGraph) -> ConcordResult<Vec<DiagnosisEntry>> {
        let request = DiagnoseRequest {
            agent_id: self.id.as_str(),
            note,
            graph,
        };
        let body = post_json(
            &self.client,
            &self.endpoint,
            &request,
            &format!("agent {}", self.id),
        )?;
        Ok(parse_diagnoses(&body))
    }
}
