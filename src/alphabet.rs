use std::{fmt::Debug, hash::Hash};

use itertools::Itertools;

use crate::Show;

/// A symbol is anything that can label a transition. Symbols are small, copyable values and
/// need a total order so that transition tables can be displayed deterministically.
pub trait Symbol: Copy + Eq + Ord + Hash + Debug + Show {}

impl<T: Copy + Eq + Ord + Hash + Debug + Show> Symbol for T {}

/// An ordered collection of distinct [`Symbol`]s. The order is the one in which the symbols
/// were given and it is the order in which [`crate::builder::AutomatonBuilder`] explores
/// successors, which in turn fixes the ids that are handed out during generation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Alphabet<S: Symbol = char>(Vec<S>);

impl<S: Symbol> Alphabet<S> {
    /// Creates a new alphabet from the given symbols. Duplicates are dropped, keeping the first
    /// occurrence of each symbol.
    pub fn new<I: IntoIterator<Item = S>>(symbols: I) -> Self {
        Self(symbols.into_iter().unique().collect())
    }

    /// Returns an iterator over the symbols in the order in which they were given.
    pub fn universe(&self) -> impl Iterator<Item = S> + '_ {
        self.0.iter().copied()
    }

    /// Returns true if the given symbol is present in the alphabet.
    pub fn contains(&self, symbol: S) -> bool {
        self.0.contains(&symbol)
    }

    /// Returns the number of symbols in the alphabet.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the alphabet has no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Alphabet<char> {
    /// Creates an alphabet of the first `size` lowercase letters, i.e. 'a' to 'z'.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self::new(('a'..='z').take(size))
    }
}

impl<S: Symbol> FromIterator<S> for Alphabet<S> {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl From<&str> for Alphabet<char> {
    fn from(value: &str) -> Self {
        Self::new(value.chars())
    }
}

impl<S: Symbol> Debug for Alphabet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0.iter().map(|sym| sym.show()).join(", ")
        )
    }
}

/// Creates an [`Alphabet`] from a list of symbols.
///
/// # Example
/// ```
/// use dfa_workbench::prelude::*;
///
/// let sigma = alphabet!('a', 'b', 'a');
/// assert_eq!(sigma.size(), 2);
/// assert_eq!(sigma.universe().collect::<Vec<_>>(), vec!['a', 'b']);
/// ```
#[macro_export]
macro_rules! alphabet {
    ($($c:expr),* $(,)?) => {
        $crate::alphabet::Alphabet::new([$($c),*])
    };
}
