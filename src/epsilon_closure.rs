//! Epsilon closure of states.

use crate::{Automaton, StateID};

/// Calculate the epsilon closure of a state.
/// The result is sorted and contains the state itself.
pub fn epsilon_closure(automaton: &Automaton, state: StateID) -> Vec<StateID> {
    epsilon_closure_set(automaton, [state])
}

/// Calculate the epsilon closure of a set of states and return the unique states in ascending
/// order.
///
/// The closure vector doubles as the work list: every state is pushed at most once, so the loop
/// terminates after at most `|states|` iterations.
pub fn epsilon_closure_set<I>(automaton: &Automaton, states: I) -> Vec<StateID>
where
    I: IntoIterator<Item = StateID>,
{
    let mut closure: Vec<StateID> = Vec::new();
    for state in states {
        if !closure.contains(&state) {
            closure.push(state);
        }
    }
    let mut i = 0;
    while i < closure.len() {
        let current_state = closure[i];
        for transition in automaton.transitions_from(current_state) {
            if transition.label().is_epsilon() && !closure.contains(&transition.to()) {
                closure.push(transition.to());
            }
        }
        i += 1;
    }
    closure.sort_unstable();
    closure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AutomatonBuilder;

    fn ids(ids: &[u32]) -> Vec<StateID> {
        ids.iter().map(|i| StateID::new(*i)).collect()
    }

    #[test]
    fn test_epsilon_closure() {
        // q0 -λ-> q1 -λ-> q2 -a-> q3, q2 -λ-> q0
        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1", "q2", "q3"])
            .initial("q0")
            .transition("q0", "", "q1")
            .transition("q1", "", "q2")
            .transition("q2", "", "q0")
            .transition("q2", "a", "q3")
            .build()
            .unwrap();
        assert_eq!(epsilon_closure(&automaton, StateID::new(0)), ids(&[0, 1, 2]));
        assert_eq!(epsilon_closure(&automaton, StateID::new(1)), ids(&[0, 1, 2]));
        assert_eq!(epsilon_closure(&automaton, StateID::new(3)), ids(&[3]));
        assert_eq!(
            epsilon_closure_set(&automaton, ids(&[3, 1])),
            ids(&[0, 1, 2, 3])
        );
    }

    #[test]
    fn test_epsilon_closure_is_idempotent() {
        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1", "q2", "q3", "q4"])
            .transition("q0", "", "q1")
            .transition("q1", "b", "q2")
            .transition("q2", "", "q3")
            .transition("q3", "", "q4")
            .transition("q4", "", "q2")
            .build()
            .unwrap();
        for state in automaton.state_ids() {
            let closure = epsilon_closure(&automaton, state);
            assert!(closure.contains(&state));
            assert_eq!(epsilon_closure_set(&automaton, closure.clone()), closure);
        }
    }

    #[test]
    fn test_epsilon_closure_without_transitions() {
        let mut automaton = Automaton::new();
        let q0 = automaton.add_state();
        assert_eq!(epsilon_closure(&automaton, q0), vec![q0]);
    }
}
