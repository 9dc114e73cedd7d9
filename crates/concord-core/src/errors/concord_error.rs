use super::{CollaboratorError, ConfigError, GraphError, SelectionError, StorageError};

/// Umbrella error for every Concord operation.
#[derive(Debug, thiserror::Error)]
pub enum ConcordError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("agent not registered: {agent_id}")]
    AgentNotFound { agent_id: String },
}

pub type ConcordResult<T> = Result<T, ConcordError>;
