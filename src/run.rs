use std::fmt::Display;

use tracing::trace;

use crate::{
    alphabet::Symbol,
    error::AutomatonError,
    store::{AutomatonStore, StateId},
    Show,
};

/// The outcome of running a word through an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationResult {
    /// The whole word was read and the reached state is final.
    Accepted,
    /// The whole word was read and the reached state is not final.
    Rejected,
    /// The symbol at the contained (0-based) position has no transition from the state that was
    /// reached before it, so the run stopped there.
    Error(usize),
}

impl SimulationResult {
    /// Returns true if the word was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, SimulationResult::Accepted)
    }
}

impl Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationResult::Accepted => write!(f, "accepted"),
            SimulationResult::Rejected => write!(f, "rejected"),
            SimulationResult::Error(position) => write!(f, "no transition at position {position}"),
        }
    }
}

/// A run is the sequence of states visited while reading a word, starting with the initial
/// state, together with the resulting [`SimulationResult`]. If the run stopped early, the last
/// visited state is the one that lacks a transition for the offending symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    visited: Vec<StateId>,
    outcome: SimulationResult,
}

impl Run {
    /// The states in the order in which they were visited.
    pub fn visited(&self) -> &[StateId] {
        &self.visited
    }

    /// The state in which the run ended.
    pub fn reached(&self) -> StateId {
        *self
            .visited
            .last()
            .expect("a run always contains the state it started in")
    }

    /// The number of transitions that were taken.
    pub fn len(&self) -> usize {
        self.visited.len() - 1
    }

    /// Returns true if no transition was taken.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How the run ended.
    pub fn outcome(&self) -> SimulationResult {
        self.outcome
    }
}

/// Runs `input` through `store` starting in its initial state and records every visited
/// state. Fails with [`AutomatonError::NoInitialState`] if the store has no initial state.
///
/// Reading stops at the first symbol for which the current state has no transition, which
/// yields [`SimulationResult::Error`] with the position of that symbol. Symbols that are not
/// part of any alphabet are treated the same way, as they never have a transition.
pub fn run<S, W>(store: &AutomatonStore<S>, input: W) -> Result<Run, AutomatonError>
where
    S: Symbol,
    W: IntoIterator<Item = S>,
{
    let mut current = store.initial().ok_or(AutomatonError::NoInitialState)?;
    let mut visited = vec![current];
    trace!("starting run in {current}");

    for (position, sym) in input.into_iter().enumerate() {
        match store.get_transition(current, sym) {
            Some(next) => {
                trace!("{current} --{}--> {next}", sym.show());
                current = next;
                visited.push(next);
            }
            None => {
                trace!("{current} has no transition on {}", sym.show());
                return Ok(Run {
                    visited,
                    outcome: SimulationResult::Error(position),
                });
            }
        }
    }

    let reached = store
        .node(current)
        .ok_or(AutomatonError::UnknownId(current))?;
    let outcome = if reached.is_final() {
        SimulationResult::Accepted
    } else {
        SimulationResult::Rejected
    };
    trace!("run ended in {current} \"{}\": {outcome}", reached.label());
    Ok(Run { visited, outcome })
}

/// Runs `input` through `store` and returns only the outcome, see [`run`].
pub fn simulate<S, W>(store: &AutomatonStore<S>, input: W) -> Result<SimulationResult, AutomatonError>
where
    S: Symbol,
    W: IntoIterator<Item = S>,
{
    run(store, input).map(|r| r.outcome())
}

impl<S: Symbol> AutomatonStore<S> {
    /// Runs `input` through `self`, see [`run`].
    pub fn run<W: IntoIterator<Item = S>>(&self, input: W) -> Result<Run, AutomatonError> {
        run(self, input)
    }

    /// Runs `input` through `self` and returns the outcome, see [`simulate`].
    pub fn simulate<W: IntoIterator<Item = S>>(
        &self,
        input: W,
    ) -> Result<SimulationResult, AutomatonError> {
        simulate(self, input)
    }

    /// Returns true if `input` is accepted. Words that fall off the automaton and automata
    /// without initial state accept nothing.
    pub fn accepts<W: IntoIterator<Item = S>>(&self, input: W) -> bool {
        matches!(self.simulate(input), Ok(SimulationResult::Accepted))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::window_dfa;

    #[test_log::test]
    fn window_scenario() {
        let store = window_dfa();
        let word = "aaaabbaabbaaa";

        let first = store.run(word.chars()).unwrap();
        assert_eq!(first.len(), 13);
        assert_eq!(first.visited()[0], StateId::new(0));
        assert_eq!(store.node(first.reached()).unwrap().label(), "aaa");
        assert_eq!(first.outcome(), SimulationResult::Accepted);
        assert_eq!(store.run(word.chars()).unwrap(), first);

        assert_eq!(simulate(&store, "aaa".chars()), Ok(SimulationResult::Accepted));
        assert_eq!(simulate(&store, "bbb".chars()), Ok(SimulationResult::Accepted));
        assert_eq!(simulate(&store, "aab".chars()), Ok(SimulationResult::Rejected));
        assert_eq!(simulate(&store, "".chars()), Ok(SimulationResult::Rejected));
        assert!(store.accepts("abbbb".chars()));
        assert!(!store.accepts("bb".chars()));
    }

    #[test]
    fn falling_off_the_automaton() {
        let store = window_dfa();
        assert_eq!(store.simulate("abcab".chars()), Ok(SimulationResult::Error(2)));

        let run = store.run("abcab".chars()).unwrap();
        assert_eq!(run.len(), 2);
        assert_eq!(store.node(run.reached()).unwrap().label(), "ab");
        assert!(!store.accepts("c".chars()));
    }

    #[test]
    fn chain_with_missing_transitions() {
        let mut store = AutomatonStore::new();
        let q0 = store.add_state("q0", true, false, None).unwrap();
        let q1 = store.add_state("q1", false, false, None).unwrap();
        let q2 = store.add_state("q2", false, true, None).unwrap();
        store.add_transition(q0, 'a', q1).unwrap();
        store.add_transition(q1, 'b', q2).unwrap();

        assert_eq!(store.simulate("ab".chars()), Ok(SimulationResult::Accepted));
        assert_eq!(store.simulate("a".chars()), Ok(SimulationResult::Rejected));
        assert_eq!(store.simulate("b".chars()), Ok(SimulationResult::Error(0)));
        assert_eq!(store.simulate("abb".chars()), Ok(SimulationResult::Error(2)));
        assert!(store.run([]).unwrap().is_empty());

        store.remove_state(q1).unwrap();
        assert_eq!(store.simulate("ab".chars()), Ok(SimulationResult::Error(0)));
        store.remove_state(q0).unwrap();
        assert_eq!(
            store.simulate("ab".chars()),
            Err(AutomatonError::NoInitialState)
        );
        assert!(!store.accepts([]));
    }

    #[test]
    fn outcome_display() {
        assert_eq!(SimulationResult::Accepted.to_string(), "accepted");
        assert_eq!(
            SimulationResult::Error(4).to_string(),
            "no transition at position 4"
        );
        assert!(!SimulationResult::Rejected.is_accepted());
    }
}
