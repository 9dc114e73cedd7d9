//! Span definitions per operation: experiment run, iteration, graph build, agent call.
//!
//! Each span carries its identifying metadata via the `tracing` crate.

/// Create a span covering a whole experiment run.
#[macro_export]
macro_rules! run_span {
    ($run_id:expr) => {
        tracing::info_span!("concord.run", run_id = %$run_id)
    };
}

/// Create a span for one iteration.
#[macro_export]
macro_rules! iteration_span {
    ($iteration:expr, $case_index:expr) => {
        tracing::info_span!(
            "concord.iteration",
            iteration = $iteration,
            case_index = $case_index
        )
    };
}

/// Create a graph build span.
#[macro_export]
macro_rules! graph_span {
    ($case_id:expr) => {
        tracing::info_span!("concord.graph", case_id = %$case_id)
    };
}

/// Create a span for one agent's diagnosis call.
#[macro_export]
macro_rules! agent_span {
    ($agent_id:expr) => {
        tracing::info_span!("concord.agent", agent_id = %$agent_id)
    };
}
