use std::collections::BTreeMap;

use crate::alphabet::Symbol;

use super::StateId;

/// A state in an [`super::AutomatonStore`]. Besides its id and display label, a state knows
/// whether it is initial and/or final and owns its outgoing transitions. The transitions form
/// a map from symbol to target id, so there is at most one successor per symbol.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct State<S: Symbol = char> {
    id: StateId,
    label: String,
    initial: bool,
    is_final: bool,
    transitions: BTreeMap<S, StateId>,
}

impl<S: Symbol> State<S> {
    pub(crate) fn new(id: StateId, label: String, initial: bool, is_final: bool) -> Self {
        Self {
            id,
            label,
            initial,
            is_final,
            transitions: BTreeMap::new(),
        }
    }

    /// The id under which the state is stored.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// The display name of the state.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this is the initial state of its store.
    pub fn is_initial(&self) -> bool {
        self.initial
    }

    /// Whether this state is accepting.
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    /// Returns the target of the transition on `symbol`, if there is one.
    pub fn transition(&self, symbol: S) -> Option<StateId> {
        self.transitions.get(&symbol).copied()
    }

    /// Iterates over all outgoing transitions as `(symbol, target)` pairs, ordered by symbol.
    pub fn transitions(&self) -> impl Iterator<Item = (S, StateId)> + '_ {
        self.transitions.iter().map(|(sym, target)| (*sym, *target))
    }

    /// Number of outgoing transitions.
    pub fn out_degree(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn set_label(&mut self, label: String) {
        self.label = label;
    }

    pub(crate) fn set_initial(&mut self, initial: bool) {
        self.initial = initial;
    }

    pub(crate) fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }

    /// Inserts a transition, returning the target it replaced.
    pub(crate) fn add_out_edge(&mut self, symbol: S, target: StateId) -> Option<StateId> {
        self.transitions.insert(symbol, target)
    }

    pub(crate) fn remove_out_edge(&mut self, symbol: S) -> Option<StateId> {
        self.transitions.remove(&symbol)
    }

    /// Drops every outgoing transition that leads to `target` and returns how many were removed.
    pub(crate) fn remove_outgoing_edges_to(&mut self, target: StateId) -> usize {
        let before = self.transitions.len();
        self.transitions.retain(|_, t| *t != target);
        before - self.transitions.len()
    }
}
