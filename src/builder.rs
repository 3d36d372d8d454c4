use std::{collections::VecDeque, hash::Hash};

use tracing::{debug, trace};

use crate::{
    alphabet::{Alphabet, Symbol},
    error::AutomatonError,
    math::Bijection,
    store::{AutomatonStore, StateId},
    Show,
};

/// Label given to a generated state whose abstract state shows as the empty string, e.g. the
/// empty word.
pub const EMPTY_LABEL: &str = "<empty>";

fn state_label<Q: Show>(q: &Q) -> String {
    let shown = q.show();
    if shown.is_empty() {
        EMPTY_LABEL.to_string()
    } else {
        shown
    }
}

/// Materializes an [`AutomatonStore`] from an abstract description of a deterministic automaton.
///
/// The description consists of the alphabet stored in the builder together with an initial
/// abstract state, a transition function and an accept predicate that are handed to
/// [`Self::generate`]. Abstract states can be of any type that can be hashed and compared, the
/// space they come from may well be infinite. Only the abstract states that are reachable from
/// the initial one are turned into states of the store, each of them exactly once.
///
/// Generation terminates only if finitely many abstract states are reachable. This cannot be
/// checked up front, a state limit can be set with [`Self::with_state_limit`] to make
/// generation fail with [`AutomatonError::GenerationOverflow`] instead of running forever.
///
/// # Example
/// ```
/// use dfa_workbench::prelude::*;
///
/// // counts the number of `a`s modulo 3 and accepts if it is zero
/// let store = AutomatonBuilder::new(alphabet!('a', 'b'))
///     .with_state_limit(16)
///     .generate(0u32, |n, sym| if sym == 'a' { (n + 1) % 3 } else { *n }, |n| *n == 0)
///     .unwrap();
/// assert_eq!(store.len(), 3);
/// assert_eq!(store.simulate("abab".chars()), Ok(SimulationResult::Rejected));
/// assert_eq!(store.simulate("aaab".chars()), Ok(SimulationResult::Accepted));
/// ```
#[derive(Clone, Debug)]
pub struct AutomatonBuilder<S: Symbol = char> {
    alphabet: Alphabet<S>,
    state_limit: Option<usize>,
}

impl<S: Symbol> AutomatonBuilder<S> {
    /// Creates a builder for the given alphabet without a state limit.
    pub fn new(alphabet: Alphabet<S>) -> Self {
        Self {
            alphabet,
            state_limit: None,
        }
    }

    /// Sets the maximal number of states that may be materialized.
    pub fn with_state_limit(mut self, limit: usize) -> Self {
        self.state_limit = Some(limit);
        self
    }

    /// Removes the state limit.
    pub fn without_state_limit(mut self) -> Self {
        self.state_limit = None;
        self
    }

    /// The alphabet over which automata are generated.
    pub fn alphabet(&self) -> &Alphabet<S> {
        &self.alphabet
    }

    /// The configured state limit, if any.
    pub fn state_limit(&self) -> Option<usize> {
        self.state_limit
    }

    /// Generates the automaton whose states are the abstract states reachable from `initial`.
    /// See [`Self::generate_with_bijection`] for the details.
    pub fn generate<Q, T, F>(
        &self,
        initial: Q,
        transition_fn: T,
        accept_fn: F,
    ) -> Result<AutomatonStore<S>, AutomatonError>
    where
        Q: Clone + Eq + Hash + Show,
        T: FnMut(&Q, S) -> Q,
        F: FnMut(&Q) -> bool,
    {
        self.generate_with_bijection(initial, transition_fn, accept_fn)
            .map(|(store, _)| store)
    }

    /// Generates the automaton whose states are the abstract states reachable from `initial` and
    /// returns it together with the [`Bijection`] between abstract states and ids.
    ///
    /// The abstract states are explored breadth-first. The initial one receives id 0 and is
    /// marked initial, every other abstract state receives the next id when it is first
    /// discovered. Successors of an abstract state are computed in the order of the alphabet,
    /// so ids reflect breadth-first discovery order. A state is final if `accept_fn` holds for
    /// its abstract state and its label is the [shown](Show) abstract state, or
    /// [`EMPTY_LABEL`] if that is empty.
    pub fn generate_with_bijection<Q, T, F>(
        &self,
        initial: Q,
        mut transition_fn: T,
        mut accept_fn: F,
    ) -> Result<(AutomatonStore<S>, Bijection<Q, StateId>), AutomatonError>
    where
        Q: Clone + Eq + Hash + Show,
        T: FnMut(&Q, S) -> Q,
        F: FnMut(&Q) -> bool,
    {
        let mut store = AutomatonStore::new();
        let mut seen: Bijection<Q, StateId> = Bijection::new();
        let mut queue = VecDeque::new();

        self.ensure_capacity(&store)?;
        let origin = store.add_state(state_label(&initial), true, accept_fn(&initial), None)?;
        seen.insert(initial.clone(), origin);
        queue.push_back((initial, origin));

        while let Some((q, source)) = queue.pop_front() {
            for sym in self.alphabet.universe() {
                let p = transition_fn(&q, sym);
                let target = match seen.get_by_left(&p) {
                    Some(id) => *id,
                    None => {
                        self.ensure_capacity(&store)?;
                        let id = store.add_state(state_label(&p), false, accept_fn(&p), None)?;
                        trace!("discovered {id} \"{}\" from {source}", p.show());
                        seen.insert(p.clone(), id);
                        queue.push_back((p, id));
                        id
                    }
                };
                store.add_transition(source, sym, target)?;
            }
        }

        debug!(
            "generated automaton with {} states and {} transitions over {:?}",
            store.len(),
            store.transition_count(),
            self.alphabet
        );
        Ok((store, seen))
    }

    fn ensure_capacity(&self, store: &AutomatonStore<S>) -> Result<(), AutomatonError> {
        match self.state_limit {
            Some(limit) if store.len() >= limit => {
                debug!("aborting generation after {} states", store.len());
                Err(AutomatonError::GenerationOverflow { limit })
            }
            _ => Ok(()),
        }
    }
}

/// Generates an automaton over `alphabet` without a state limit, this is a shorthand for
/// [`AutomatonBuilder::generate`].
pub fn generate<S, Q, T, F>(
    alphabet: Alphabet<S>,
    initial: Q,
    transition_fn: T,
    accept_fn: F,
) -> Result<AutomatonStore<S>, AutomatonError>
where
    S: Symbol,
    Q: Clone + Eq + Hash + Show,
    T: FnMut(&Q, S) -> Q,
    F: FnMut(&Q) -> bool,
{
    AutomatonBuilder::new(alphabet).generate(initial, transition_fn, accept_fn)
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use crate::prelude::*;

    fn window(x: &String, a: char) -> String {
        if x.len() < 3 {
            format!("{x}{a}")
        } else {
            format!("{}{a}", &x[1..])
        }
    }

    fn homogeneous(x: &String) -> bool {
        x.len() == 3 && (!x.contains('a') || !x.contains('b'))
    }

    #[test_log::test]
    fn window_automaton_in_bfs_order() {
        let (store, map) = AutomatonBuilder::new(alphabet!('a', 'b'))
            .generate_with_bijection(String::new(), window, homogeneous)
            .unwrap();

        assert_eq!(store.len(), 15);
        assert_eq!(store.transition_count(), 30);
        assert_eq!(store.initial(), Some(StateId::new(0)));

        let labels = store.states().map(|q| q.label().to_string()).collect_vec();
        assert_eq!(
            labels,
            vec![
                EMPTY_LABEL, "a", "b", "aa", "ab", "ba", "bb", "aaa", "aab", "aba", "abb", "baa",
                "bab", "bba", "bbb"
            ]
        );
        let finals = store.states().filter(|q| q.is_final()).map(|q| q.id()).collect_vec();
        assert_eq!(finals, vec![StateId::new(7), StateId::new(14)]);
        assert_eq!(
            store.states().filter(|q| q.is_initial()).count(),
            1,
            "only the origin is initial"
        );

        assert_eq!(map.len(), 15);
        assert_eq!(map.get_by_left("aab"), Some(&StateId::new(8)));
        assert_eq!(map.get_by_right(&StateId::new(0)), Some(&String::new()));

        let aaa = StateId::new(7);
        assert_eq!(store.get_transition(aaa, 'a'), Some(aaa));
        assert_eq!(store.get_transition(aaa, 'b'), Some(StateId::new(8)));
    }

    #[test]
    fn alphabet_order_determines_ids() {
        let store = generate(alphabet!('b', 'a'), String::new(), window, homogeneous).unwrap();
        assert_eq!(store.node(StateId::new(1)).unwrap().label(), "b");
        assert_eq!(store.node(StateId::new(2)).unwrap().label(), "a");
    }

    #[test]
    fn each_abstract_state_once() {
        // every word leads back to the single abstract state
        let store = generate(alphabet!('x', 'y', 'z'), (), |_, _| (), |_| true).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.node(StateId::new(0)).unwrap().label(), "-");
        assert!(store
            .node(StateId::new(0))
            .unwrap()
            .transitions()
            .all(|(_, target)| target == StateId::new(0)));
    }

    #[test]
    fn empty_word_label() {
        let first_symbol = |w: &Vec<char>, a: char| {
            let mut w = w.clone();
            w.push(a);
            w.truncate(1);
            w
        };
        let store = generate(alphabet!('a'), vec![], first_symbol, |w| w.is_empty()).unwrap();
        assert_eq!(store.len(), 2);
        let origin = store.node(StateId::new(0)).unwrap();
        assert_eq!(origin.label(), EMPTY_LABEL);
        assert!(origin.is_final() && origin.is_initial());
        assert_eq!(store.node(StateId::new(1)).unwrap().label(), "a");
    }

    #[test_log::test]
    fn state_limit_guards_unbounded_generation() {
        let counter = AutomatonBuilder::new(alphabet!('a')).with_state_limit(10);
        assert_eq!(counter.state_limit(), Some(10));
        assert_eq!(
            counter.generate(0usize, |n, _| n + 1, |_| false),
            Err(AutomatonError::GenerationOverflow { limit: 10 })
        );

        let bounded = counter.generate(0usize, |n, _| (n + 1) % 10, |n| *n == 9);
        assert_eq!(bounded.map(|store| store.len()), Ok(10));

        assert_eq!(
            AutomatonBuilder::new(alphabet!('a'))
                .with_state_limit(0)
                .generate(0usize, |n, _| *n, |_| true),
            Err(AutomatonError::GenerationOverflow { limit: 0 })
        );
        assert_eq!(
            AutomatonBuilder::new(alphabet!('a'))
                .with_state_limit(0)
                .without_state_limit()
                .state_limit(),
            None
        );
    }
}
