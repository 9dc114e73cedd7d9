use crate::errors::ConcordResult;
use crate::models::ReputationSnapshot;

/// Durable home of the reputation snapshot.
///
/// Single writer. `save` replaces the whole snapshot and must be atomic with
/// respect to a crash of the writing process.
pub trait IReputationStore {
    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> ConcordResult<Option<ReputationSnapshot>>;

    fn save(&self, snapshot: &ReputationSnapshot) -> ConcordResult<()>;

    /// Where the snapshot lives, for error messages (a file path, `<memory>`).
    fn location(&self) -> String;
}

impl<T: IReputationStore + ?Sized> IReputationStore for std::sync::Arc<T> {
    fn load(&self) -> ConcordResult<Option<ReputationSnapshot>> {
        (**self).load()
    }

    fn save(&self, snapshot: &ReputationSnapshot) -> ConcordResult<()> {
        (**self).save(snapshot)
    }

    fn location(&self) -> String {
        (**self).location()
    }
}
