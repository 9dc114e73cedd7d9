mod collaborator_error;
mod concord_error;
mod config_error;
mod graph_error;
mod selection_error;
mod storage_error;

pub use collaborator_error::CollaboratorError;
pub use concord_error::{ConcordError, ConcordResult};
pub use config_error::ConfigError;
pub use graph_error::GraphError;
pub use selection_error::SelectionError;
pub use storage_error::StorageError;
