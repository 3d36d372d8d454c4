use thiserror::Error;

use crate::store::StateId;

/// Errors that operations on an [`crate::store::AutomatonStore`] can produce. All of them are
/// local to the call that produced them, the store is left untouched whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AutomatonError {
    /// An operation referenced a state that is not in the store.
    #[error("no state with id {0} exists")]
    UnknownId(StateId),
    /// `add_state` was asked for an id that is in use.
    #[error("id {0} is already taken by another state")]
    DuplicateId(StateId),
    /// A second state was about to be marked initial.
    #[error("cannot make {requested} initial, {existing} is already the initial state")]
    MultipleInitialStates {
        /// The state that currently is initial.
        existing: StateId,
        /// The state that should have become initial.
        requested: StateId,
    },
    /// Generation materialized more states than the configured limit allows.
    #[error("generation exceeded the limit of {limit} states")]
    GenerationOverflow {
        /// The configured limit.
        limit: usize,
    },
    /// A simulation was started on a store without initial state.
    #[error("the automaton has no initial state")]
    NoInitialState,
}
