//! Core of an interactive editor for deterministic finite automata (DFA).
//!
//! The crate is split into two halves. An [`store::AutomatonStore`] holds states under stable
//! integer ids together with their outgoing transitions and supports the structural edits an
//! editor needs: adding and removing states (removed ids are recycled), adding, replacing and
//! removing transitions and toggling flags. Removing a state also deletes every transition
//! pointing at it, so a store never contains dangling edges.
//!
//! The [`builder::AutomatonBuilder`] materializes a store from an abstract description of an
//! automaton, that is an alphabet, an initial abstract state, a transition function and an
//! accept predicate. It explores the abstract states breadth-first and creates exactly one
//! state for each abstract state that is reachable from the initial one. Stores, whether they
//! were generated or edited by hand, can then be [simulated](run::simulate) on input words.
//!
//! Nothing in here knows about rendering, coordinates or input devices. Whatever sits on top
//! refers to states by their [`StateId`](store::StateId).
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfa_workbench::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet,
        alphabet::{Alphabet, Symbol},
        builder::{generate, AutomatonBuilder, EMPTY_LABEL},
        error::AutomatonError,
        math,
        presets,
        reachable::{minimal_representatives, reachable_ids, MinimalRepresentatives},
        run::{run, simulate, Run, SimulationResult},
        store::{AutomatonStore, State, StateId},
        Show,
    };
}

/// This module contains type aliases for the collections used throughout the crate.
pub mod math;

/// Module that contains definitions for dealing with alphabets.
#[macro_use]
pub mod alphabet;

pub mod store;

/// Defines the error type shared by all fallible operations.
pub mod error;

/// Breadth-first generation of an [`store::AutomatonStore`] from an abstract transition function.
pub mod builder;

/// Running words through an automaton.
pub mod run;

/// Exploration of the states that can be reached from the initial state.
pub mod reachable;

pub mod presets;

use itertools::Itertools;

/// Helper trait which can be used to display states, symbols and such. The builder uses it to
/// derive the labels of generated states from their abstract states.
pub trait Show {
    /// Returns a human readable representation of `self`. For a symbol this should just be
    /// the symbol itself, for a word it should be the concatenation of its symbols.
    fn show(&self) -> String;
}

impl Show for char {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for u8 {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for u32 {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for usize {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl Show for () {
    fn show(&self) -> String {
        "-".into()
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl<S: Show> Show for [S] {
    fn show(&self) -> String {
        self.iter().map(|x| x.show()).join("")
    }
}

impl<S: Show> Show for Vec<S> {
    fn show(&self) -> String {
        self.as_slice().show()
    }
}

impl<S: Show, T: Show> Show for (S, T) {
    fn show(&self) -> String {
        format!("({}, {})", self.0.show(), self.1.show())
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}
