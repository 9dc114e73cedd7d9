//! Build a ready-to-run orchestrator from configuration.

use concord_core::config::ConcordConfig;
use concord_core::errors::ConcordResult;
use concord_core::models::AgentId;
use concord_core::traits::IDiagnostician;
use concord_learning::selector_from_config;
use concord_multiagent::{ReputationTracker, SimilarityMatcher};
use concord_storage::{load_cases, HistoryLog, JsonFileReputationStore};
use tracing::info;

use crate::orchestrator::{Collaborators, Orchestrator};
use crate::transport::{HttpDiagnostician, HttpGraphBuilder};

/// Reputation tracker over the configured store, registering the configured agents.
pub fn open_reputation(config: &ConcordConfig) -> ConcordResult<ReputationTracker> {
    let agents = config.agent_ids().into_iter().map(AgentId::from);
    let store = JsonFileReputationStore::new(config.storage.reputation_path());
    ReputationTracker::new(agents, Box::new(store))
}

/// Cases, HTTP collaborators, durable stores, and the configured selector.
pub fn build_orchestrator(config: &ConcordConfig) -> ConcordResult<Orchestrator> {
    let cases = load_cases(&config.storage.cases_path)?;

    let agents: Vec<Box<dyn IDiagnostician>> = HttpDiagnostician::all_from_config(&config.transport)?
        .into_iter()
        .map(|agent| Box::new(agent) as Box<dyn IDiagnostician>)
        .collect();
    let collaborators = Collaborators {
        graph_builder: Box::new(HttpGraphBuilder::from_config(&config.transport)?),
        agents,
        evaluator: Box::new(SimilarityMatcher::from_config(&config.evaluation)),
    };

    let agent_ids: Vec<AgentId> = config.agent_ids().into_iter().map(AgentId::from).collect();
    let reputation = open_reputation(config)?;
    let history_log = HistoryLog::open(config.storage.history_path(), &agent_ids)?;

    info!(
        cases = cases.len(),
        selection = ?config.experiment.selection,
        on_graph_error = ?config.experiment.on_graph_error,
        "orchestrator assembled"
    );
    Orchestrator::new(
        cases,
        collaborators,
        reputation,
        history_log,
        selector_from_config(config),
        config.experiment.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use concord_core::errors::{CollaboratorError, ConcordError};

    fn config_in(dir: &std::path::Path, transport: &str) -> ConcordConfig {
        let cases = dir.join("cases.jsonl");
        std::fs::write(&cases, "{\"id\": 1, \"note\": \"cough\", \"ground_truth\": \"pneumonia\"}\n")
            .unwrap();
        let source = format!(
            "[storage]\ncases_path = {:?}\noutput_dir = {:?}\n\n{transport}",
            cases.display().to_string(),
            dir.join("out").display().to_string(),
        );
        ConcordConfig::from_toml(&source).unwrap()
    }

    #[test]
    fn missing_endpoints_are_reported() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), "");
        let err = build_orchestrator(&config).err().unwrap();
        assert!(matches!(
            err,
            ConcordError::Collaborator(CollaboratorError::NotConfigured { .. })
        ));
    }

    #[test]
    fn configured_endpoints_assemble() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(
            dir.path(),
            r#"[transport]
graph_endpoint = "http://127.0.0.1:9/graph"
timeout_secs = 5

[[transport.agents]]
id = "A"
endpoint = "http://127.0.0.1:9/a"

[[transport.agents]]
id = "B"
endpoint = "http://127.0.0.1:9/b"
"#,
        );
        let orchestrator = build_orchestrator(&config).unwrap();
        assert_eq!(orchestrator.reputation().agents().len(), 2);
        assert!(dir.path().join("out").join("history.csv").exists());
        assert!(dir.path().join("out").join("reputation.json").exists());
    }
}
