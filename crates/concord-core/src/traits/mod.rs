mod case_selector;
mod correctness;
mod diagnostician;
mod graph_builder;
mod reputation_store;

pub use case_selector::ICaseSelector;
pub use correctness::ICorrectnessEvaluator;
pub use diagnostician::IDiagnostician;
pub use graph_builder::IGraphBuilder;
pub use reputation_store::IReputationStore;
