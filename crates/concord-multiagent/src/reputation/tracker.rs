//! ReputationTracker: per-agent `(accepted, total)` with a neutral prior.
//!
//! Reputation is `accepted / total`, or `0.5` before any outcome is recorded.
//! The tracker loads the store once at construction and writes the full
//! snapshot back after every update. A store that cannot be read is fatal;
//! trust history is never reset behind the operator's back.
//!
//! `best_agent` breaks ties by registration order: the agent registered
//! first wins among equals.

use concord_core::constants::NEUTRAL_REPUTATION;
use concord_core::errors::{ConcordError, ConcordResult, StorageError};
use concord_core::models::{AgentId, ReputationRecord, ReputationSnapshot};
use concord_core::traits::IReputationStore;
use tracing::{debug, info, instrument};

pub struct ReputationTracker {
    /// Registration order. Also the tie-break order.
    agents: Vec<AgentId>,
    /// Includes records for agents not registered in this run; they are kept, not scored.
    snapshot: ReputationSnapshot,
    store: Box<dyn IReputationStore>,
}

impl ReputationTracker {
    /// Load persisted reputation for `agents` from `store`.
    ///
    /// Agents missing from the store start at `(0, 0)`. When the store is
    /// empty, the initial snapshot is written immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use concord_core::models::AgentId;
    /// use concord_multiagent::ReputationTracker;
    /// use concord_storage::InMemoryReputationStore;
    ///
    /// let mut tracker = ReputationTracker::new(
    ///     vec![AgentId::from("A"), AgentId::from("B")],
    ///     Box::new(InMemoryReputationStore::new()),
    /// )
    /// .unwrap();
    ///
    /// tracker.update(&AgentId::from("A"), true).unwrap();
    /// tracker.update(&AgentId::from("A"), false).unwrap();
    /// tracker.update(&AgentId::from("A"), true).unwrap();
    ///
    /// let record = tracker.record(&AgentId::from("A")).unwrap();
    /// assert_eq!((record.accepted, record.total), (2, 3));
    /// assert!((tracker.reputation(&AgentId::from("A")) - 2.0 / 3.0).abs() < 1e-12);
    /// assert!((tracker.reputation(&AgentId::from("B")) - 0.5).abs() < f64::EPSILON);
    /// ```
    pub fn new(
        agents: impl IntoIterator<Item = AgentId>,
        store: Box<dyn IReputationStore>,
    ) -> ConcordResult<Self> {
        let mut registered: Vec<AgentId> = Vec::new();
        for agent in agents {
            if !registered.contains(&agent) {
                registered.push(agent);
            }
        }

        let loaded = store.load()?;
        let fresh = loaded.is_none();
        let mut snapshot = loaded.unwrap_or_default();

        if let Some((agent, record)) = snapshot.iter().find(|(_, r)| !r.is_consistent()) {
            return Err(StorageError::CorruptReputationStore {
                path: store.location(),
                reason: format!(
                    "agent {agent}: accepted {} exceeds total {}",
                    record.accepted, record.total
                ),
            }
            .into());
        }

        for agent in &registered {
            snapshot.entry(agent.0.clone()).or_default();
        }

        let tracker = Self {
            agents: registered,
            snapshot,
            store,
        };
        if fresh {
            tracker.store.save(&tracker.snapshot)?;
        }

        info!(
            agents = tracker.agents.len(),
            stored_records = tracker.snapshot.len(),
            fresh,
            "reputation tracker ready"
        );
        Ok(tracker)
    }

    /// Record one outcome for `agent_id` and persist the full snapshot.
    ///
    /// If persisting fails the in-memory record is rolled back, so memory and
    /// storage never diverge.
    #[instrument(skip(self))]
    pub fn update(&mut self, agent_id: &AgentId, correct: bool) -> ConcordResult<ReputationRecord> {
        if !self.agents.contains(agent_id) {
            return Err(ConcordError::AgentNotFound {
                agent_id: agent_id.to_string(),
            });
        }

        let previous = self.record(agent_id).unwrap_or_default();
        let mut next = previous;
        next.record_outcome(correct);
        self.snapshot.insert(agent_id.0.clone(), next);

        if let Err(e) = self.store.save(&self.snapshot) {
            self.snapshot.insert(agent_id.0.clone(), previous);
            return Err(e);
        }

        debug!(
            accepted = next.accepted,
            total = next.total,
            reputation = next.reputation(),
            "reputation updated"
        );
        Ok(next)
    }

    /// Current reputation; the neutral prior for agents with no record.
    pub fn reputation(&self, agent_id: &AgentId) -> f64 {
        self.record(agent_id)
            .map(|r| r.reputation())
            .unwrap_or(NEUTRAL_REPUTATION)
    }

    pub fn record(&self, agent_id: &AgentId) -> Option<ReputationRecord> {
        self.snapshot.get(agent_id.as_str()).copied()
    }

    /// Registered agent with the highest reputation; earliest registered wins ties.
    pub fn best_agent(&self) -> Option<&AgentId> {
        let mut best: Option<(&AgentId, f64)> = None;
        for agent in &self.agents {
            let score = self.reputation(agent);
            match best {
                Some((_, top)) if score <= top => {}
                _ => best = Some((agent, score)),
            }
        }
        best.map(|(agent, _)| agent)
    }

    /// Registered agents in registration order.
    pub fn agents(&self) -> &[AgentId] {
        &self.agents
    }

    pub fn snapshot(&self) -> &ReputationSnapshot {
        &self.snapshot
    }
}
