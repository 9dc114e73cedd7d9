//! End-to-end orchestrator runs against scripted collaborators.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use concord_core::config::{ExperimentConfig, GraphFailurePolicy};
use concord_core::errors::{CollaboratorError, ConcordError, ConcordResult, GraphError};
use concord_core::models::{
    AgentId, Case, DiagnosisEntry, GraphEdge, GraphNode, KnowledgeGraph,
};
use concord_core::traits::{ICaseSelector, IDiagnostician, IGraphBuilder};
use concord_learning::SequentialSelector;
use concord_multiagent::{ReputationTracker, SimilarityMatcher};
use concord_runner::{Collaborators, Orchestrator, RecordingPacer};
use concord_storage::{HistoryLog, InMemoryReputationStore};
use tempfile::TempDir;

type CallLog = Rc<RefCell<Vec<String>>>;

struct ScriptedGraph {
    calls: CallLog,
    responses: RefCell<VecDeque<ConcordResult<KnowledgeGraph>>>,
}

impl IGraphBuilder for ScriptedGraph {
    fn build(&self, note: &str) -> ConcordResult<KnowledgeGraph> {
        self.calls.borrow_mut().push(format!("graph:{note}"));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Ok(two_component_graph()))
    }
}

struct ScriptedAgent {
    id: AgentId,
    calls: CallLog,
    answer: Vec<&'static str>,
}

impl IDiagnostician for ScriptedAgent {
    fn agent_id(&self) -> &AgentId {
        &self.id
    }

    fn diagnose(&self, note: &str, _graph: &KnowledgeGraph) -> ConcordResult<Vec<DiagnosisEntry>> {
        self.calls.borrow_mut().push(format!("agent {}:{note}", self.id));
        Ok(self.answer.iter().map(|n| DiagnosisEntry::named(*n)).collect())
    }
}

struct FailingAgent(AgentId);

impl IDiagnostician for FailingAgent {
    fn agent_id(&self) -> &AgentId {
        &self.0
    }

    fn diagnose(&self, _: &str, _: &KnowledgeGraph) -> ConcordResult<Vec<DiagnosisEntry>> {
        Err(CollaboratorError::Transport {
            collaborator: format!("agent {}", self.0),
            reason: "connection refused".into(),
        }
        .into())
    }
}

fn two_component_graph() -> KnowledgeGraph {
    KnowledgeGraph {
        nodes: vec![
            GraphNode::new("n1", "patient", "patient"),
            GraphNode::new("n2", "cough", "symptom"),
            GraphNode::new("n3", "fever", "symptom"),
        ],
        edges: vec![
            GraphEdge::new("n1", "n2", "has_symptom"),
            GraphEdge::new("n1", "n9", "has_symptom"),
        ],
    }
}

fn case(id: &str, note: &str, ground_truth: Option<&str>) -> Case {
    Case {
        id: id.into(),
        subject_id: format!("s-{id}"),
        hadm_id: format!("h-{id}"),
        note: note.into(),
        ground_truth: ground_truth.map(str::to_string),
    }
}

fn ab() -> Vec<AgentId> {
    vec![AgentId::from("A"), AgentId::from("B")]
}

struct Harness {
    dir: TempDir,
    calls: CallLog,
    pacer: RecordingPacer,
}

impl Harness {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            calls: Rc::new(RefCell::new(Vec::new())),
            pacer: RecordingPacer::new(),
        }
    }

    fn history_path(&self) -> std::path::PathBuf {
        self.dir.path().join("out").join("history.csv")
    }

    fn collaborators(&self, graphs: Vec<ConcordResult<KnowledgeGraph>>) -> Collaborators {
        Collaborators {
            graph_builder: Box::new(ScriptedGraph {
                calls: Rc::clone(&self.calls),
                responses: RefCell::new(graphs.into()),
            }),
            agents: vec![
                Box::new(ScriptedAgent {
                    id: AgentId::from("A"),
                    calls: Rc::clone(&self.calls),
                    answer: vec!["Pneumonia"],
                }),
                Box::new(ScriptedAgent {
                    id: AgentId::from("B"),
                    calls: Rc::clone(&self.calls),
                    answer: vec!["pneumonia", "CHF"],
                }),
            ],
            evaluator: Box::new(SimilarityMatcher::default()),
        }
    }

    fn orchestrator(
        &self,
        cases: Vec<Case>,
        collaborators: Collaborators,
        config: ExperimentConfig,
    ) -> Orchestrator {
        self.orchestrator_with(cases, collaborators, config, Box::new(SequentialSelector))
    }

    fn orchestrator_with(
        &self,
        cases: Vec<Case>,
        collaborators: Collaborators,
        config: ExperimentConfig,
        selector: Box<dyn ICaseSelector>,
    ) -> Orchestrator {
        let tracker =
            ReputationTracker::new(ab(), Box::new(InMemoryReputationStore::new())).unwrap();
        let log = HistoryLog::open(self.history_path(), &ab()).unwrap();
        Orchestrator::new(cases, collaborators, tracker, log, selector, config)
            .unwrap()
            .with_pacer(Box::new(self.pacer.clone()))
    }

    fn rows(&self) -> Vec<csv::StringRecord> {
        let mut reader = csv::Reader::from_path(self.history_path()).unwrap();
        reader.records().map(Result::unwrap).collect()
    }
}

fn config(iterations: usize) -> ExperimentConfig {
    ExperimentConfig {
        iterations,
        iteration_budget_secs: 60.0,
        ..ExperimentConfig::default()
    }
}

#[test]
fn evaluated_case_writes_one_complete_row() {
    let h = Harness::new();
    let cases = vec![case("c1", "cough and fever", Some("Pneumonia"))];
    let mut orch = h.orchestrator(cases, h.collaborators(vec![]), config(5));

    let report = orch.run().unwrap();
    assert_eq!((report.evaluated, report.skipped, report.failed), (1, 0, 0));

    let rows = h.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(&row[0], "1");
    assert_eq!(&row[2], "c1");
    assert_eq!(&row[5], "15");
    assert_eq!(&row[6], "Pneumonia");
    assert_eq!(&row[7], "Pneumonia");
    assert_eq!(&row[8], "pneumonia|CHF");
    assert_eq!(&row[9], "true");
    assert_eq!(&row[10], "true");
    assert_eq!(&row[11], "1");
    assert_eq!(&row[13], "0.5");
    assert_eq!(&row[14], "2");

    let entry = &orch.history()[0];
    assert!((entry.discordance - 0.5).abs() < 1e-12);
    assert_eq!(entry.num_components, 2);
    assert!(entry.timings.total_secs >= entry.timings.graph_secs);
}

#[test]
fn agents_are_called_in_registration_order() {
    let h = Harness::new();
    let cases = vec![case("c1", "note-1", Some("Pneumonia"))];
    let mut orch = h.orchestrator(cases, h.collaborators(vec![]), config(1));
    orch.run().unwrap();

    assert_eq!(
        *h.calls.borrow(),
        vec!["graph:note-1", "agent A:note-1", "agent B:note-1"]
    );
}

#[test]
fn skipped_case_makes_no_calls_no_row_no_pause() {
    let h = Harness::new();
    let cases = vec![
        case("c1", "note-1", None),
        case("c2", "note-2", Some("   ")),
        case("c3", "note-3", Some("Pneumonia")),
    ];
    let mut orch = h.orchestrator(cases, h.collaborators(vec![]), config(3));

    let report = orch.run().unwrap();
    assert_eq!((report.evaluated, report.skipped), (1, 2));
    assert_eq!(h.rows().len(), 1);
    assert!(h.calls.borrow().iter().all(|c| c.ends_with("note-3")));
    // The only evaluated case is the last iteration, so nothing is paced.
    assert!(h.pacer.pauses().is_empty());
}

#[test]
fn pacing_happens_between_iterations_only() {
    let h = Harness::new();
    let cases = vec![
        case("c1", "note-1", Some("Pneumonia")),
        case("c2", "note-2", Some("Pneumonia")),
        case("c3", "note-3", Some("Pneumonia")),
    ];
    let mut orch = h.orchestrator(cases, h.collaborators(vec![]), config(3));
    orch.run().unwrap();

    let pauses = h.pacer.pauses();
    assert_eq!(pauses.len(), 2);
    assert!(pauses
        .iter()
        .all(|p| *p > Duration::from_secs(59) && *p <= Duration::from_secs(60)));
}

#[test]
fn zero_budget_never_pauses() {
    let h = Harness::new();
    let cases = vec![
        case("c1", "note-1", Some("Pneumonia")),
        case("c2", "note-2", Some("Pneumonia")),
    ];
    let mut cfg = config(2);
    cfg.iteration_budget_secs = 0.0;
    let mut orch = h.orchestrator(cases, h.collaborators(vec![]), cfg);
    orch.run().unwrap();
    assert!(h.pacer.pauses().is_empty());
}

#[test]
fn iterations_are_capped_by_case_count() {
    let h = Harness::new();
    let cases = vec![
        case("c1", "note-1", Some("Pneumonia")),
        case("c2", "note-2", Some("Pneumonia")),
    ];
    let mut orch = h.orchestrator(cases, h.collaborators(vec![]), config(15));
    let report = orch.run().unwrap();
    assert_eq!(report.evaluated, 2);
    assert_eq!(h.rows().len(), 2);
}

fn unparseable() -> ConcordResult<KnowledgeGraph> {
    Err(GraphError::Unparseable {
        reason: "no JSON object found".into(),
        excerpt: "sorry".into(),
    }
    .into())
}

#[test]
fn graph_failure_aborts_by_default() {
    let h = Harness::new();
    let cases = vec![
        case("c1", "note-1", Some("Pneumonia")),
        case("c2", "note-2", Some("Pneumonia")),
    ];
    let mut orch = h.orchestrator(cases, h.collaborators(vec![unparseable()]), config(2));

    let err = orch.run().unwrap_err();
    assert!(matches!(err, ConcordError::Graph(GraphError::Unparseable { .. })));
    assert!(h.rows().is_empty());
    assert_eq!(h.calls.borrow().len(), 1);
}

#[test]
fn graph_failure_skip_policy_continues_and_paces() {
    let h = Harness::new();
    let cases = vec![
        case("c1", "note-1", Some("Pneumonia")),
        case("c2", "note-2", Some("Pneumonia")),
    ];
    let mut cfg = config(2);
    cfg.on_graph_error = GraphFailurePolicy::Skip;
    let mut orch = h.orchestrator(cases, h.collaborators(vec![unparseable()]), cfg);

    let report = orch.run().unwrap();
    assert_eq!((report.evaluated, report.failed), (1, 1));
    assert_eq!(h.rows().len(), 1);
    assert_eq!(&h.rows()[0][2], "c2");
    assert_eq!(h.pacer.pauses().len(), 1);
}

#[test]
fn agent_transport_failure_aborts_even_with_skip_policy() {
    let h = Harness::new();
    let mut collaborators = h.collaborators(vec![]);
    collaborators.agents[1] = Box::new(FailingAgent(AgentId::from("B")));
    let mut cfg = config(1);
    cfg.on_graph_error = GraphFailurePolicy::Skip;
    let mut orch = h.orchestrator(
        vec![case("c1", "note-1", Some("Pneumonia"))],
        collaborators,
        cfg,
    );

    let err = orch.run().unwrap_err();
    assert!(matches!(
        err,
        ConcordError::Collaborator(CollaboratorError::Transport { .. })
    ));
    assert!(h.rows().is_empty());
}

#[test]
fn reputation_reflects_correctness() {
    let h = Harness::new();
    let cases = vec![
        case("c1", "note-1", Some("Pneumonia")),
        case("c2", "note-2", Some("Congestive heart failure")),
    ];
    let mut orch = h.orchestrator(cases, h.collaborators(vec![]), config(2));
    let report = orch.run().unwrap();

    // Neither agent names CHF in full; both get 1 of 2.
    assert_eq!(orch.reputation().reputation(&AgentId::from("A")), 0.5);
    assert_eq!(orch.reputation().reputation(&AgentId::from("B")), 0.5);
    assert_eq!(report.best_agent, Some(AgentId::from("A")));
}

#[test]
fn header_is_written_once_across_runs() {
    let h = Harness::new();
    for _ in 0..2 {
        let cases = vec![case("c1", "note-1", Some("Pneumonia"))];
        let mut orch = h.orchestrator(cases, h.collaborators(vec![]), config(1));
        orch.run().unwrap();
    }
    let text = std::fs::read_to_string(h.history_path()).unwrap();
    assert_eq!(text.matches("iteration,case_index").count(), 1);
    assert_eq!(h.rows().len(), 2);
}

#[test]
fn active_learning_consumes_every_case_once() {
    let h = Harness::new();
    let cases: Vec<Case> = (0..6)
        .map(|i| case(&format!("c{i}"), &"x".repeat(10 * (i + 1)), Some("Pneumonia")))
        .collect();
    let selector = concord_learning::ActiveLearningSelector::new(
        concord_learning::NoteLengthStrategy,
        0.3,
        Some(11),
    );
    let mut orch =
        h.orchestrator_with(cases, h.collaborators(vec![]), config(6), Box::new(selector));
    orch.run().unwrap();

    let mut seen: Vec<usize> = orch.history().iter().map(|e| e.case_index).collect();
    seen.sort_unstable();
    assert_eq!(seen, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn wrong_agent_count_is_rejected() {
    let h = Harness::new();
    let mut collaborators = h.collaborators(vec![]);
    collaborators.agents.pop();
    let tracker = ReputationTracker::new(ab(), Box::new(InMemoryReputationStore::new())).unwrap();
    let log = HistoryLog::open(h.history_path(), &ab()).unwrap();
    let result = Orchestrator::new(
        vec![],
        collaborators,
        tracker,
        log,
        Box::new(SequentialSelector),
        config(1),
    );
    assert!(matches!(result, Err(ConcordError::Config(_))));
}

#[test]
fn history_keeps_label_as_loaded_but_matches_trimmed() {
    let h = Harness::new();
    let cases = vec![case("c1", "note-1", Some("  Pneumonia \t"))];
    let mut orch = h.orchestrator(cases, h.collaborators(vec![]), config(1));
    orch.run().unwrap();

    let rows = h.rows();
    assert_eq!(&rows[0][6], "  Pneumonia \t");
    assert_eq!(&rows[0][9], "true");
    assert_eq!(orch.history()[0].ground_truth, "  Pneumonia \t");
}
