//! Layered configuration loaded from TOML.
//!
//! Every section is `#[serde(default)]`, so an empty document yields a fully
//! defaulted config and partial documents override only what they name.

pub mod defaults;
mod evaluation_config;
mod experiment_config;
mod learning_config;
mod observability_config;
mod storage_config;
mod transport_config;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use evaluation_config::EvaluationConfig;
pub use experiment_config::{ExperimentConfig, GraphFailurePolicy, SelectionMode};
pub use learning_config::LearningConfig;
pub use observability_config::ObservabilityConfig;
pub use storage_config::StorageConfig;
pub use transport_config::{AgentEndpoint, TransportConfig};

use crate::constants::AGENTS_PER_EXPERIMENT;
use crate::errors::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcordConfig {
    pub experiment: ExperimentConfig,
    pub learning: LearningConfig,
    pub evaluation: EvaluationConfig,
    pub storage: StorageConfig,
    pub transport: TransportConfig,
    pub observability: ObservabilityConfig,
}

impl ConcordConfig {
    /// Parse a TOML document. Does not validate; call [`ConcordConfig::validate`].
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges and the agent roster.
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval(
            "learning.high_discordance_threshold",
            self.learning.high_discordance_threshold,
        )?;
        unit_interval(
            "evaluation.similarity_threshold",
            self.evaluation.similarity_threshold,
        )?;

        let budget = self.experiment.iteration_budget_secs;
        if !budget.is_finite() || budget < 0.0 {
            return Err(invalid(
                "experiment.iteration_budget_secs",
                format!("must be a finite, non-negative number of seconds, got {budget}"),
            ));
        }

        let agents = &self.transport.agents;
        if agents.len() != AGENTS_PER_EXPERIMENT {
            return Err(invalid(
                "transport.agents",
                format!(
                    "exactly {AGENTS_PER_EXPERIMENT} agents are compared, got {}",
                    agents.len()
                ),
            ));
        }
        let mut seen = HashSet::new();
        for agent in agents {
            if agent.id.trim().is_empty() {
                return Err(invalid("transport.agents", "agent id must be non-empty".into()));
            }
            if !seen.insert(agent.id.as_str()) {
                return Err(invalid(
                    "transport.agents",
                    format!("duplicate agent id {:?}", agent.id),
                ));
            }
        }
        Ok(())
    }

    /// Agent ids in configured (invocation and tie-break) order.
    pub fn agent_ids(&self) -> Vec<String> {
        self.transport.agents.iter().map(|a| a.id.clone()).collect()
    }
}

fn unit_interval(field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("must be within [0, 1], got {value}")))
    }
}

fn invalid(field: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason,
    }
}
