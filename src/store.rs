//! Id-stable storage for the states and transitions of a deterministic finite automaton.
//!
//! An [`AutomatonStore`] maps [`StateId`]s to [`State`] records. Each state owns the table of
//! its outgoing transitions (symbol to target id), which is the single source of truth for
//! the transition relation: incoming transitions are found by looking at the other states
//! rather than by keeping a second copy of every edge around.
//!
//! The store upholds four invariants after every operation:
//! - every transition target is a state of the store,
//! - at most one state is initial,
//! - every state has at most one successor per symbol,
//! - no id is both in use and marked as free.
use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::{alphabet::Symbol, error::AutomatonError};

mod id;
pub use id::StateId;

mod state;
pub use state::State;

mod table;

/// Owns the states of an automaton and hands out their ids, see the [module level
/// documentation](self) for the guarantees it makes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct AutomatonStore<S: Symbol = char> {
    states: BTreeMap<StateId, State<S>>,
    initial: Option<StateId>,
    free_ids: BTreeSet<StateId>,
}

impl<S: Symbol> Default for AutomatonStore<S> {
    fn default() -> Self {
        Self {
            states: BTreeMap::new(),
            initial: None,
            free_ids: BTreeSet::new(),
        }
    }
}

impl<S: Symbol> AutomatonStore<S> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the store contains no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the total number of transitions over all states.
    pub fn transition_count(&self) -> usize {
        self.states.values().map(State::out_degree).sum()
    }

    /// Checks whether a state with the given id exists.
    pub fn contains_state(&self, id: StateId) -> bool {
        self.states.contains_key(&id)
    }

    /// Looks up the state with the given id.
    pub fn node(&self, id: StateId) -> Option<&State<S>> {
        self.states.get(&id)
    }

    /// The id of the initial state, if the store has one.
    pub fn initial(&self) -> Option<StateId> {
        self.initial
    }

    /// Iterates over all states in ascending order of their ids.
    pub fn states(&self) -> impl Iterator<Item = &State<S>> + '_ {
        self.states.values()
    }

    /// Iterates over all ids in use, in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.keys().copied()
    }

    /// Iterates over the ids that were freed by removals and have not been reused yet.
    pub fn free_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.free_ids.iter().copied()
    }

    /// Returns the id the next call to [`Self::add_state`] without an explicit id would assign.
    /// Freed ids are preferred, the smallest one is picked. Otherwise this is the size of the
    /// store, unless explicitly chosen ids left a gap below it, in which case the first gap is
    /// used.
    pub fn next_free_id(&self) -> StateId {
        if let Some(id) = self.free_ids.first() {
            return *id;
        }
        let size = self.states.len();
        match self.states.last_key_value() {
            Some((max, _)) if max.index() + 1 != size => self
                .states
                .keys()
                .enumerate()
                .find_map(|(i, id)| (id.index() != i).then_some(StateId::new(i)))
                .unwrap_or(StateId::new(size)),
            _ => StateId::new(size),
        }
    }

    /// Adds a new state and returns its id.
    ///
    /// If `id` is given, the state is stored under that id and [`AutomatonError::DuplicateId`] is
    /// returned if it is taken. Otherwise the id is chosen by [`Self::next_free_id`]. A state can
    /// only be added as initial if the store has no initial state yet, the existing one has to be
    /// cleared with [`Self::clear_initial`] first, else [`AutomatonError::MultipleInitialStates`]
    /// is returned.
    ///
    /// # Example
    /// ```
    /// use dfa_workbench::prelude::*;
    ///
    /// let mut store = AutomatonStore::<char>::new();
    /// let q0 = store.add_state("q0", true, false, None).unwrap();
    /// let q1 = store.add_state("q1", false, true, None).unwrap();
    /// assert_eq!((q0.index(), q1.index()), (0, 1));
    /// assert!(store.add_state("again", true, false, None).is_err());
    /// assert!(store.add_state("taken", false, false, Some(q1)).is_err());
    /// ```
    pub fn add_state(
        &mut self,
        label: impl Into<String>,
        is_initial: bool,
        is_final: bool,
        id: Option<StateId>,
    ) -> Result<StateId, AutomatonError> {
        let id = match id {
            Some(id) if self.states.contains_key(&id) => {
                return Err(AutomatonError::DuplicateId(id))
            }
            Some(id) => id,
            None => self.next_free_id(),
        };
        if is_initial {
            if let Some(existing) = self.initial {
                return Err(AutomatonError::MultipleInitialStates {
                    existing,
                    requested: id,
                });
            }
            self.initial = Some(id);
        }

        self.free_ids.remove(&id);
        let label = label.into();
        trace!("adding state {id} \"{label}\" (initial: {is_initial}, final: {is_final})");
        self.states
            .insert(id, State::new(id, label, is_initial, is_final));
        Ok(id)
    }

    /// Adds a state that is neither initial nor has an explicit id and names it after the id it
    /// receives, i.e. `q0`, `q1` and so on.
    pub fn add_anonymous_state(&mut self, is_final: bool) -> StateId {
        let id = self.next_free_id();
        self.free_ids.remove(&id);
        self.states
            .insert(id, State::new(id, id.to_string(), false, is_final));
        id
    }

    /// Removes the state with the given id and returns it. All transitions leading into the
    /// removed state are deleted as part of the same call, the id becomes available for reuse
    /// and if the state was initial, the store no longer has an initial state.
    pub fn remove_state(&mut self, id: StateId) -> Result<State<S>, AutomatonError> {
        let removed = self
            .states
            .remove(&id)
            .ok_or(AutomatonError::UnknownId(id))?;

        let dropped: usize = self
            .states
            .values_mut()
            .map(|state| state.remove_outgoing_edges_to(id))
            .sum();
        trace!("removed state {id} along with {dropped} incoming transitions");

        if self.initial == Some(id) {
            self.initial = None;
        }
        self.free_ids.insert(id);
        Ok(removed)
    }

    /// Adds the transition `from --symbol--> to`. A state has at most one transition per symbol,
    /// so an existing transition on `symbol` is replaced. Its previous target is returned.
    pub fn add_transition(
        &mut self,
        from: StateId,
        symbol: S,
        to: StateId,
    ) -> Result<Option<StateId>, AutomatonError> {
        if !self.states.contains_key(&to) {
            return Err(AutomatonError::UnknownId(to));
        }
        let source = self
            .states
            .get_mut(&from)
            .ok_or(AutomatonError::UnknownId(from))?;
        Ok(source.add_out_edge(symbol, to))
    }

    /// Removes the transition on `symbol` leaving `from` and returns its target. Nothing happens
    /// if there is no such transition.
    pub fn remove_transition(&mut self, from: StateId, symbol: S) -> Option<StateId> {
        self.states.get_mut(&from)?.remove_out_edge(symbol)
    }

    /// Returns the target of the transition on `symbol` leaving `from`. Gives back `None` if
    /// `from` does not exist or has no transition on `symbol`.
    pub fn get_transition(&self, from: StateId, symbol: S) -> Option<StateId> {
        self.states.get(&from)?.transition(symbol)
    }

    /// Collects all transitions that lead into `target` as `(source, symbol)` pairs.
    pub fn transitions_into(&self, target: StateId) -> Vec<(StateId, S)> {
        self.states
            .values()
            .flat_map(|state| {
                state
                    .transitions()
                    .filter(move |(_, t)| *t == target)
                    .map(move |(sym, _)| (state.id(), sym))
            })
            .collect()
    }

    /// Marks the given state as accepting or rejecting.
    pub fn set_final(&mut self, id: StateId, is_final: bool) -> Result<(), AutomatonError> {
        self.state_mut(id)?.set_final(is_final);
        Ok(())
    }

    /// Flips whether the given state is accepting and returns the new value.
    pub fn toggle_final(&mut self, id: StateId) -> Result<bool, AutomatonError> {
        let state = self.state_mut(id)?;
        let flipped = !state.is_final();
        state.set_final(flipped);
        Ok(flipped)
    }

    /// Renames the given state.
    pub fn set_label(&mut self, id: StateId, label: impl Into<String>) -> Result<(), AutomatonError> {
        self.state_mut(id)?.set_label(label.into());
        Ok(())
    }

    /// Makes the given state initial. This fails if a different state already is initial, it
    /// has to be unmarked through [`Self::clear_initial`] beforehand.
    pub fn set_initial(&mut self, id: StateId) -> Result<(), AutomatonError> {
        if !self.states.contains_key(&id) {
            return Err(AutomatonError::UnknownId(id));
        }
        match self.initial {
            Some(existing) if existing != id => Err(AutomatonError::MultipleInitialStates {
                existing,
                requested: id,
            }),
            _ => {
                self.state_mut(id)?.set_initial(true);
                self.initial = Some(id);
                Ok(())
            }
        }
    }

    /// Unmarks the initial state and returns its id, if there was one.
    pub fn clear_initial(&mut self) -> Option<StateId> {
        let id = self.initial.take()?;
        if let Some(state) = self.states.get_mut(&id) {
            state.set_initial(false);
        }
        Some(id)
    }

    fn state_mut(&mut self, id: StateId) -> Result<&mut State<S>, AutomatonError> {
        self.states
            .get_mut(&id)
            .ok_or(AutomatonError::UnknownId(id))
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn chain() -> (AutomatonStore, [StateId; 3]) {
        let mut store = AutomatonStore::new();
        let q0 = store.add_state("q0", true, false, None).unwrap();
        let q1 = store.add_state("q1", false, false, None).unwrap();
        let q2 = store.add_state("q2", false, true, None).unwrap();
        store.add_transition(q0, 'a', q1).unwrap();
        store.add_transition(q1, 'b', q2).unwrap();
        (store, [q0, q1, q2])
    }

    fn assert_no_dangling(store: &AutomatonStore) {
        for state in store.states() {
            for (_, target) in state.transitions() {
                assert!(store.contains_state(target), "{target} is dangling");
            }
        }
        assert!(store.free_ids().all(|id| !store.contains_state(id)));
        assert!(store.states().filter(|q| q.is_initial()).count() <= 1);
    }

    #[test_log::test]
    fn removal_cascades_to_incoming_transitions() {
        let (mut store, [q0, q1, q2]) = chain();
        store.add_transition(q2, 'a', q1).unwrap();
        let removed = store.remove_state(q1).unwrap();
        assert_eq!(removed.label(), "q1");

        assert_eq!(store.get_transition(q0, 'a'), None);
        assert_eq!(store.get_transition(q2, 'a'), None);
        assert!(store.node(q2).is_some());
        assert_eq!(store.node(q2).unwrap().id(), q2);
        assert!(store.transitions_into(q2).is_empty());
        assert_eq!(store.free_ids().collect_vec(), vec![q1]);
        assert_no_dangling(&store);
    }

    #[test]
    fn removing_initial_state_clears_it() {
        let (mut store, [q0, ..]) = chain();
        store.remove_state(q0).unwrap();
        assert_eq!(store.initial(), None);
        assert_eq!(
            store.remove_state(q0),
            Err(AutomatonError::UnknownId(q0))
        );
    }

    #[test]
    fn freed_ids_are_reused_smallest_first() {
        let (mut store, [q0, q1, q2]) = chain();
        store.remove_state(q2).unwrap();
        store.remove_state(q1).unwrap();
        assert_eq!(store.next_free_id(), q1);
        assert_eq!(store.add_state("new", false, false, None).unwrap(), q1);
        assert_eq!(store.add_anonymous_state(true), q2);
        assert_eq!(store.node(q2).unwrap().label(), "q2");
        assert_eq!(store.add_state("fresh", false, false, None).unwrap().index(), 3);
        assert_eq!(store.node(q0).unwrap().label(), "q0");
        assert_no_dangling(&store);
    }

    #[test]
    fn explicit_ids() {
        let mut store = AutomatonStore::<char>::new();
        let q1 = store
            .add_state("one", false, false, Some(StateId::new(1)))
            .unwrap();
        assert_eq!(
            store.add_state("dup", false, false, Some(q1)),
            Err(AutomatonError::DuplicateId(q1))
        );
        // 0 was skipped by the explicit id
        assert_eq!(store.add_state("auto", false, false, None).unwrap().index(), 0);
        assert_eq!(store.add_state("auto", false, false, None).unwrap().index(), 2);

        store.remove_state(q1).unwrap();
        store.add_state("back", false, false, Some(q1)).unwrap();
        assert_eq!(store.free_ids().count(), 0);
    }

    #[test]
    fn single_initial_state() {
        let (mut store, [q0, q1, _]) = chain();
        assert_eq!(
            store.add_state("other", true, false, None),
            Err(AutomatonError::MultipleInitialStates {
                existing: q0,
                requested: StateId::new(3)
            })
        );
        assert_eq!(store.len(), 3);
        assert!(matches!(
            store.set_initial(q1),
            Err(AutomatonError::MultipleInitialStates { .. })
        ));
        assert_eq!(store.set_initial(q0), Ok(()));

        assert_eq!(store.clear_initial(), Some(q0));
        assert!(!store.node(q0).unwrap().is_initial());
        store.set_initial(q1).unwrap();
        assert_eq!(store.initial(), Some(q1));
        assert_no_dangling(&store);
    }

    #[test]
    fn add_transition_replaces() {
        let (mut store, [q0, q1, q2]) = chain();
        assert_eq!(store.add_transition(q0, 'a', q1), Ok(Some(q1)));
        assert_eq!(store.node(q0).unwrap().out_degree(), 1);
        assert_eq!(store.get_transition(q0, 'a'), Some(q1));

        assert_eq!(store.add_transition(q0, 'a', q2), Ok(Some(q1)));
        assert_eq!(store.get_transition(q0, 'a'), Some(q2));
        assert_eq!(store.transition_count(), 2);

        let ghost = StateId::new(42);
        assert_eq!(
            store.add_transition(q0, 'b', ghost),
            Err(AutomatonError::UnknownId(ghost))
        );
        assert_eq!(
            store.add_transition(ghost, 'b', q0),
            Err(AutomatonError::UnknownId(ghost))
        );
    }

    #[test]
    fn remove_and_lookup_transitions() {
        let (mut store, [q0, q1, _]) = chain();
        assert_eq!(store.remove_transition(q0, 'b'), None);
        assert_eq!(store.remove_transition(StateId::new(9), 'a'), None);
        assert_eq!(store.remove_transition(q0, 'a'), Some(q1));
        assert_eq!(store.get_transition(q0, 'a'), None);
        assert_eq!(store.get_transition(StateId::new(9), 'a'), None);
        assert_eq!(store.get_transition(q1, 'b'), store.get_transition(q1, 'b'));
    }

    #[test]
    fn editing_flags_and_labels() {
        let (mut store, [q0, _, q2]) = chain();
        assert_eq!(store.toggle_final(q0), Ok(true));
        assert_eq!(store.toggle_final(q0), Ok(false));
        store.set_final(q2, false).unwrap();
        assert!(!store.node(q2).unwrap().is_final());
        store.set_label(q2, "sink").unwrap();
        assert_eq!(store.node(q2).unwrap().label(), "sink");
        assert_eq!(
            store.set_label(StateId::new(7), "x"),
            Err(AutomatonError::UnknownId(StateId::new(7)))
        );
        assert_eq!(store.transitions_into(StateId::new(1)), vec![(q0, 'a')]);
    }
}
