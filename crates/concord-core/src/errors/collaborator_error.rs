/// Errors reported by external collaborators (graph builder, diagnostic agents).
///
/// Retry and backoff belong to the transport; the core only propagates.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("transport failure talking to {collaborator}: {reason}")]
    Transport { collaborator: String, reason: String },

    #[error("{collaborator} is not configured: {reason}")]
    NotConfigured { collaborator: String, reason: String },
}
