use thiserror::Error;

/// The only failure mode this crate's public API exposes: the decision
/// worker could not be (re)started.
///
/// Every other operation (`level_changed`, `subscribe`, introspection) is
/// infallible by construction — there is no I/O, no parsing, and no
/// fallible external call anywhere else in the engine. `SpawnError` never
/// crosses the public API either; it is logged and absorbed by
/// `Conference::maybe_start_decision_maker`, which reverts the worker
/// handle so the next `level_changed` retries.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("no async runtime available to host the decision worker")]
    NoRuntime,
}
