use std::fmt::{Debug, Display};

/// Identifies a [`super::State`] within an [`super::AutomatonStore`]. Ids are handed out by the
/// store, they stay attached to a state for as long as it exists and are only ever reused after
/// the state that held them has been removed.
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Default)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Creates an id from its numeric value.
    pub const fn new(n: usize) -> Self {
        Self(n)
    }

    /// Returns the numeric value of the id.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Debug for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<usize> for StateId {
    fn from(n: usize) -> Self {
        Self(n)
    }
}

impl From<StateId> for usize {
    fn from(id: StateId) -> Self {
        id.0
    }
}
