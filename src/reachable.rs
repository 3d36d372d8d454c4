use std::collections::VecDeque;

use crate::{
    alphabet::Symbol,
    math::Set,
    store::{AutomatonStore, StateId},
};

/// Type alias for a minimal representative of a state which is its length-lexicographically minimal
/// access sequence and its state index.
pub type MinimalRepresentative<S> = (Vec<S>, StateId);

/// Iterator over the minimal representatives of the states that are reachable from some origin.
/// A minimal representative for a state `q` is the length-lexicographically minimal word with
/// which `q` can be reached. States are produced in breadth-first order.
#[derive(Debug, Clone)]
pub struct MinimalRepresentatives<'a, S: Symbol> {
    store: &'a AutomatonStore<S>,
    seen: Set<StateId>,
    queue: VecDeque<MinimalRepresentative<S>>,
}

impl<'a, S: Symbol> MinimalRepresentatives<'a, S> {
    /// Starts the exploration in `origin`. Yields nothing if `origin` does not exist.
    pub fn new(store: &'a AutomatonStore<S>, origin: StateId) -> Self {
        let (seen, queue) = if store.contains_state(origin) {
            (
                Set::from_iter([origin]),
                [(vec![], origin)].into_iter().collect(),
            )
        } else {
            (Set::default(), VecDeque::new())
        };
        Self { store, seen, queue }
    }
}

impl<S: Symbol> Iterator for MinimalRepresentatives<'_, S> {
    type Item = MinimalRepresentative<S>;

    fn next(&mut self) -> Option<Self::Item> {
        let (access, q) = self.queue.pop_front()?;
        if let Some(state) = self.store.node(q) {
            for (sym, p) in state.transitions() {
                if self.seen.insert(p) {
                    let mut extended = access.clone();
                    extended.push(sym);
                    self.queue.push_back((extended, p));
                }
            }
        }
        Some((access, q))
    }
}

/// Minimal representatives of all states reachable from the initial state of `store`. This is
/// empty if there is no initial state.
pub fn minimal_representatives<S: Symbol>(store: &AutomatonStore<S>) -> MinimalRepresentatives<'_, S> {
    match store.initial() {
        Some(initial) => MinimalRepresentatives::new(store, initial),
        None => MinimalRepresentatives {
            store,
            seen: Set::default(),
            queue: VecDeque::new(),
        },
    }
}

/// The ids of all states reachable from the initial state of `store`, in breadth-first order.
pub fn reachable_ids<S: Symbol>(store: &AutomatonStore<S>) -> impl Iterator<Item = StateId> + '_ {
    minimal_representatives(store).map(|(_, q)| q)
}

impl<S: Symbol> AutomatonStore<S> {
    /// Returns the ids of all states that cannot be reached from the initial state in
    /// ascending order. After editing, these are the states that no word leads to.
    pub fn unreachable_ids(&self) -> Vec<StateId> {
        let reachable: Set<StateId> = reachable_ids(self).collect();
        self.ids().filter(|q| !reachable.contains(q)).collect()
    }

    /// Returns a length-lexicographically minimal word leading from the initial state to an
    /// accepting state, if the automaton accepts anything.
    pub fn give_word(&self) -> Option<Vec<S>> {
        minimal_representatives(self).find_map(|(word, q)| {
            self.node(q)
                .filter(|state| state.is_final())
                .map(|_| word)
        })
    }
}
