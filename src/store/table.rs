use std::{collections::BTreeSet, fmt::Display};

use itertools::Itertools;

use crate::{alphabet::Symbol, Show};

use super::{AutomatonStore, State};

impl<S: Symbol> AutomatonStore<S> {
    /// Returns a textual dump of the automaton: one row per state holding its id, label and
    /// flags followed by one column per symbol that occurs on some transition. Initial states
    /// are marked with `->`, final states with `*` and missing transitions with `-`.
    ///
    /// # Example
    /// ```
    /// use dfa_workbench::prelude::*;
    ///
    /// let mut store = AutomatonStore::new();
    /// let q0 = store.add_state("even", true, true, None).unwrap();
    /// let q1 = store.add_state("odd", false, false, None).unwrap();
    /// store.add_transition(q0, 'a', q1).unwrap();
    /// store.add_transition(q1, 'a', q0).unwrap();
    /// let table = store.describe();
    /// assert!(table.contains("-> q0 *"));
    /// assert!(table.contains("odd"));
    /// ```
    pub fn describe(&self) -> String {
        let symbols: BTreeSet<S> = self
            .states()
            .flat_map(|state| state.transitions().map(|(sym, _)| sym))
            .collect();

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            ["State".to_string(), "Label".to_string()]
                .into_iter()
                .chain(symbols.iter().map(|sym| sym.show())),
        );
        for state in self.states() {
            let mut row = vec![decorate(state), state.label().to_string()];
            for sym in &symbols {
                row.push(
                    state
                        .transition(*sym)
                        .map(|target| target.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    /// Lists all transitions as `(source, symbol, target)` triples in the form `(q0, a, q1)`.
    pub fn show_transitions(&self) -> String {
        let triples = self.states().flat_map(|state| {
            state
                .transitions()
                .map(move |(sym, target)| format!("({}, {}, {target})", state.id(), sym.show()))
        });
        format!("{{{}}}", triples.format(", "))
    }
}

fn decorate<S: Symbol>(state: &State<S>) -> String {
    format!(
        "{}{}{}",
        if state.is_initial() { "-> " } else { "" },
        state.id(),
        if state.is_final() { " *" } else { "" }
    )
}

impl<S: Symbol> Display for AutomatonStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn describe_does_not_mutate() {
        let mut store = AutomatonStore::new();
        let q0 = store.add_state("start", true, false, None).unwrap();
        let q1 = store.add_state("end", false, true, None).unwrap();
        store.add_transition(q0, 'b', q1).unwrap();
        store.add_transition(q1, 'a', q1).unwrap();

        let before = store.clone();
        let table = store.describe();
        assert_eq!(store, before);

        assert!(table.contains("-> q0"));
        assert!(table.contains("q1 *"));
        assert!(table.contains("start"));
        assert_eq!(table, store.to_string());
        assert_eq!(store.show_transitions(), "{(q0, b, q1), (q1, a, q1)}");
    }

    #[test]
    fn describe_empty_store() {
        let store = AutomatonStore::<char>::new();
        assert!(store.describe().contains("State"));
        assert_eq!(store.show_transitions(), "{}");
    }
}
