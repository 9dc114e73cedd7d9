//! Experiment loop.
//!
//! One iteration per selected case, strictly sequential. Agents run one
//! after another in registration order, so the history log records a
//! reproducible invocation order even though the agents themselves are not
//! deterministic.
//!
//! A case without a usable reference label is skipped outright: no graph, no
//! agent calls, no history row, and no pacing pause, since no collaborator
//! budget was spent on it.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use concord_core::config::{ExperimentConfig, GraphFailurePolicy};
use concord_core::constants::AGENTS_PER_EXPERIMENT;
use concord_core::errors::{ConcordError, ConcordResult, ConfigError, SelectionError};
use concord_core::models::{AgentId, AgentOutcome, Case, HistoryEntry, StageTimings};
use concord_core::traits::{ICaseSelector, ICorrectnessEvaluator, IDiagnostician, IGraphBuilder};
use concord_graph::count_components;
use concord_multiagent::{discordance, ReputationTracker};
use concord_observability::{agent_span, graph_span, iteration_span, run_span};
use concord_storage::HistoryLog;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::pacing::{IPacer, ThreadSleeper};

/// The external services one iteration talks to.
pub struct Collaborators {
    pub graph_builder: Box<dyn IGraphBuilder>,
    /// Invocation order. Must match the tracker's and the history log's agents.
    pub agents: Vec<Box<dyn IDiagnostician>>,
    pub evaluator: Box<dyn ICorrectnessEvaluator>,
}

/// Summary of one `run`.
#[derive(Debug, Clone, Serialize)]
pub struct ExperimentReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Cases that produced a history row.
    pub evaluated: usize,
    /// Cases without a reference label.
    pub skipped: usize,
    /// Cases dropped because the graph could not be parsed (skip policy only).
    pub failed: usize,
    pub best_agent: Option<AgentId>,
}

enum IterationOutcome {
    Evaluated(HistoryEntry),
    GraphFailed,
}

pub struct Orchestrator {
    cases: Vec<Case>,
    collaborators: Collaborators,
    reputation: ReputationTracker,
    history_log: HistoryLog,
    selector: Box<dyn ICaseSelector>,
    config: ExperimentConfig,
    pacer: Box<dyn IPacer>,
    history: Vec<HistoryEntry>,
}

impl Orchestrator {
    /// Wire up a run. Discordance is pairwise, so exactly two agents are
    /// required, and each must be registered with the tracker.
    pub fn new(
        cases: Vec<Case>,
        collaborators: Collaborators,
        reputation: ReputationTracker,
        history_log: HistoryLog,
        selector: Box<dyn ICaseSelector>,
        config: ExperimentConfig,
    ) -> ConcordResult<Self> {
        let agents = &collaborators.agents;
        if agents.len() != AGENTS_PER_EXPERIMENT {
            return Err(ConfigError::Invalid {
                field: "transport.agents".to_string(),
                reason: format!(
                    "exactly {AGENTS_PER_EXPERIMENT} agents are compared, got {}",
                    agents.len()
                ),
            }
            .into());
        }
        if let Some(unknown) = agents
            .iter()
            .find(|a| !reputation.agents().contains(a.agent_id()))
        {
            return Err(ConcordError::AgentNotFound {
                agent_id: unknown.agent_id().to_string(),
            });
        }

        Ok(Self {
            cases,
            collaborators,
            reputation,
            history_log,
            selector,
            config,
            pacer: Box::new(ThreadSleeper),
            history: Vec::new(),
        })
    }

    pub fn with_pacer(mut self, pacer: Box<dyn IPacer>) -> Self {
        self.pacer = pacer;
        self
    }

    /// Entries evaluated so far in this run.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn reputation(&self) -> &ReputationTracker {
        &self.reputation
    }

    /// Run up to `iterations` cases (bounded by the number loaded).
    pub fn run(&mut self) -> ConcordResult<ExperimentReport> {
        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        let span = run_span!(run_id);
        let _run = span.enter();

        let iterations = self.config.iterations.min(self.cases.len());
        let mut remaining: Vec<usize> = (0..self.cases.len()).collect();
        let (mut evaluated, mut skipped, mut failed) = (0, 0, 0);

        info!(
            cases = self.cases.len(),
            iterations,
            history_log = %self.history_log.path().display(),
            "experiment started"
        );

        for iteration in 1..=iterations {
            let index = self.selector.select(&self.cases, &self.history, &remaining)?;
            let position = remaining
                .iter()
                .position(|&i| i == index)
                .ok_or(SelectionError::IndexOutOfRange {
                    index,
                    len: self.cases.len(),
                })?;
            remaining.remove(position);

            let span = iteration_span!(iteration, index);
            let _iteration = span.enter();

            let case = &self.cases[index];
            let Some(ground_truth) = case.ground_truth().map(str::to_string) else {
                info!(
                    case_id = %case.id,
                    subject_id = %case.subject_id,
                    hadm_id = %case.hadm_id,
                    "no reference diagnosis, case skipped"
                );
                skipped += 1;
                continue;
            };

            let started = Instant::now();
            match self.evaluate(iteration, index, ground_truth, started)? {
                IterationOutcome::Evaluated(entry) => {
                    self.history_log.append(&entry)?;
                    info!(
                        case_id = %entry.case_id,
                        discordance = entry.discordance,
                        num_components = entry.num_components,
                        total_secs = entry.timings.total_secs,
                        "case evaluated"
                    );
                    self.history.push(entry);
                    evaluated += 1;
                }
                IterationOutcome::GraphFailed => failed += 1,
            }

            if iteration < iterations {
                let wait = self
                    .config
                    .iteration_budget()
                    .saturating_sub(started.elapsed());
                if wait > Duration::ZERO {
                    info!(wait_secs = wait.as_secs_f64(), "pacing before next iteration");
                    self.pacer.pause(wait);
                }
            }
        }

        let report = ExperimentReport {
            run_id,
            started_at,
            finished_at: Utc::now(),
            evaluated,
            skipped,
            failed,
            best_agent: self.reputation.best_agent().cloned(),
        };
        info!(
            evaluated,
            skipped,
            failed,
            best_agent = ?report.best_agent,
            "experiment finished"
        );
        Ok(report)
    }

    fn evaluate(
        &mut self,
        iteration: usize,
        case_index: usize,
        ground_truth: String,
        started: Instant,
    ) -> ConcordResult<IterationOutcome> {
        let case = &self.cases[case_index];
        let collaborators = &self.collaborators;

        let graph_started = Instant::now();
        let built = {
            let span = graph_span!(case.id);
            let _graph = span.enter();
            collaborators.graph_builder.build(&case.note)
        };
        let graph = match built {
            Ok(graph) => graph,
            Err(ConcordError::Graph(e)) if self.config.on_graph_error == GraphFailurePolicy::Skip => {
                warn!(case_id = %case.id, error = %e, "graph unparseable, case dropped");
                return Ok(IterationOutcome::GraphFailed);
            }
            Err(e) => return Err(e),
        };
        let graph_secs = graph_started.elapsed().as_secs_f64();
        let num_components = count_components(&graph);

        let agents_started = Instant::now();
        let mut outcomes = Vec::with_capacity(collaborators.agents.len());
        for agent in &collaborators.agents {
            let span = agent_span!(agent.agent_id());
            let _agent = span.enter();

            let diagnoses: Vec<String> = agent
                .diagnose(&case.note, &graph)?
                .into_iter()
                .map(|d| d.name)
                .collect();
            let correct = collaborators.evaluator.is_correct(&diagnoses, &ground_truth);
            let record = self.reputation.update(agent.agent_id(), correct)?;

            info!(
                diagnoses = ?diagnoses,
                correct,
                reputation = record.reputation(),
                "agent scored"
            );
            outcomes.push(AgentOutcome {
                agent_id: agent.agent_id().clone(),
                diagnoses,
                correct,
                reputation: record.reputation(),
            });
        }
        let agents_secs = agents_started.elapsed().as_secs_f64();

        let discordance = match outcomes.as_slice() {
            [a, b] => discordance(&a.diagnoses, &b.diagnoses),
            _ => 0.0,
        };

        Ok(IterationOutcome::Evaluated(HistoryEntry {
            iteration,
            case_index,
            case_id: case.id.clone(),
            subject_id: case.subject_id.clone(),
            hadm_id: case.hadm_id.clone(),
            note_len: case.note_len(),
            // The row keeps the label as loaded; matching used the trimmed form.
            ground_truth: case.ground_truth.clone().unwrap_or_default(),
            outcomes,
            discordance,
            num_components,
            timings: StageTimings {
                graph_secs,
                agents_secs,
                total_secs: started.elapsed().as_secs_f64(),
            },
        }))
    }
}
