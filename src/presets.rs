//! Ready-made automata, mostly useful as a starting point in the editor and for demos.
use itertools::Itertools;

use crate::{
    alphabet::{Alphabet, Symbol},
    builder::AutomatonBuilder,
    error::AutomatonError,
    store::AutomatonStore,
};

/// Builds the automaton that remembers the last `len` symbols it has read and accepts as soon as
/// it has read at least `len` symbols and these are all the same. The abstract states are the
/// windows themselves, which become the labels of the states.
///
/// # Example
/// ```
/// use dfa_workbench::prelude::*;
///
/// let store = presets::homogeneous_window(alphabet!('a', 'b'), 3).unwrap();
/// assert_eq!(store.len(), 15);
/// assert!(store.accepts("abaaa".chars()));
/// assert!(!store.accepts("aa".chars()));
/// ```
pub fn homogeneous_window<S: Symbol>(
    alphabet: Alphabet<S>,
    len: usize,
) -> Result<AutomatonStore<S>, AutomatonError> {
    homogeneous_window_with(&AutomatonBuilder::new(alphabet), len)
}

/// Same as [`homogeneous_window`], but generated with the given builder so that its alphabet
/// and state limit are used.
pub fn homogeneous_window_with<S: Symbol>(
    builder: &AutomatonBuilder<S>,
    len: usize,
) -> Result<AutomatonStore<S>, AutomatonError> {
    builder.generate(
        Vec::new(),
        |window: &Vec<S>, sym| slide(window, sym, len),
        |window| window.len() == len && window.iter().all_equal(),
    )
}

fn slide<S: Symbol>(window: &[S], sym: S, len: usize) -> Vec<S> {
    let skip = (window.len() + 1).saturating_sub(len);
    window
        .iter()
        .copied()
        .chain(std::iter::once(sym))
        .skip(skip)
        .collect()
}
