//! This module contains the conversion of a nondeterministic automaton into a deterministic one.
//! The deterministic automaton is generated using the subset construction algorithm.

use std::collections::{BTreeMap, VecDeque};

use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::{
    epsilon_closure, epsilon_closure_set, Automaton, Result, StateID, TransitionLabel,
};

/// The result of a subset construction.
/// Every state of the deterministic automaton represents a set of states of the source automaton.
#[derive(Debug, Clone)]
pub struct SubsetConstructor {
    dfa: Automaton,
    // The sorted source states represented by each state of the DFA.
    subsets: BTreeMap<StateID, Vec<StateID>>,
    // Used to find DFA states by the set of source states they represent.
    state_map: FxHashMap<Vec<StateID>, StateID>,
}

impl SubsetConstructor {
    /// Create a deterministic automaton that accepts the same language as `automaton`.
    ///
    /// If `automaton` is already deterministic, the result is a structural copy of it.
    /// Otherwise multi-character labels are split on a private clone before the construction,
    /// so `automaton` itself is never modified.
    pub fn new(automaton: &Automaton) -> Result<Self> {
        let initial_state = automaton.require_initial_state()?;
        if automaton.is_deterministic() {
            debug!("Automaton is deterministic already, returning a copy");
            return Ok(Self::identity(automaton));
        }

        let mut nfa = automaton.clone();
        let split = nfa.split_labels();
        if split > 0 {
            trace!("Split {} multi-character transitions", split);
        }
        let symbols = nfa.symbols();

        let mut constructor = SubsetConstructor {
            dfa: Automaton::new(),
            subsets: BTreeMap::new(),
            state_map: FxHashMap::default(),
        };

        // The initial state of the DFA is the epsilon closure of the initial state of the NFA.
        let (initial_dfa_state, _) =
            constructor.add_state_if_new(&nfa, epsilon_closure(&nfa, initial_state))?;
        constructor.dfa.set_initial_state(Some(initial_dfa_state))?;
        // The work list holds the DFA states whose transitions are not yet calculated.
        // Each DFA state is pushed exactly once, when it is created. There are at most
        // 2^|NFA states| of them, so the loop terminates.
        let mut work_list = VecDeque::from([initial_dfa_state]);

        while let Some(dfa_state) = work_list.pop_front() {
            let nfa_states = constructor.subsets[&dfa_state].clone();
            for symbol in &symbols {
                let target_states =
                    epsilon_closure_set(&nfa, Self::move_set(&nfa, &nfa_states, symbol));
                if target_states.is_empty() {
                    continue;
                }
                let (target_state, is_new) =
                    constructor.add_state_if_new(&nfa, target_states)?;
                constructor.dfa.add_transition(
                    dfa_state,
                    target_state,
                    TransitionLabel::Literal(symbol.clone()),
                )?;
                if is_new {
                    work_list.push_back(target_state);
                }
            }
        }

        debug!(
            "Subset construction created {} states from {}",
            constructor.dfa.state_count(),
            nfa.state_count()
        );
        trace!("Deterministic automaton:\n{}", constructor.dfa);
        Ok(constructor)
    }

    // Every state represents itself.
    fn identity(automaton: &Automaton) -> Self {
        let subsets = automaton
            .state_ids()
            .into_iter()
            .map(|id| (id, vec![id]))
            .collect::<BTreeMap<_, _>>();
        let state_map = subsets
            .iter()
            .map(|(id, subset)| (subset.clone(), *id))
            .collect();
        SubsetConstructor {
            dfa: automaton.clone(),
            subsets,
            state_map,
        }
    }

    /// Calculate move(T, a) for a set of states T and a symbol a.
    /// This is the set of states that can be reached from T by matching a.
    fn move_set(nfa: &Automaton, states: &[StateID], symbol: &str) -> Vec<StateID> {
        let mut move_set = Vec::new();
        for state in states {
            for transition in nfa.transitions_from(*state) {
                if transition.label().matches_symbol(symbol) {
                    move_set.push(transition.to());
                }
            }
        }
        move_set
    }

    /// Add a state to the DFA if it does not already exist.
    /// The state is identified by the sorted NFA states that constitute the DFA state.
    /// It is accepting if any of its NFA states is accepting.
    /// Returns the state and whether it was newly created.
    fn add_state_if_new(
        &mut self,
        nfa: &Automaton,
        nfa_states: Vec<StateID>,
    ) -> Result<(StateID, bool)> {
        if let Some(state_id) = self.state_map.get(&nfa_states) {
            return Ok((*state_id, false));
        }
        let state_id = self.dfa.add_state();
        let label = nfa_states
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.dfa.set_state_label(state_id, Some(label))?;
        if nfa_states.iter().any(|s| nfa.is_final(*s)) {
            trace!("* State {} is an accepting state.", state_id);
            self.dfa.add_final_state(state_id)?;
        }
        trace!("Add state: {}: {:?}", state_id, nfa_states);
        self.state_map.insert(nfa_states.clone(), state_id);
        self.subsets.insert(state_id, nfa_states);
        Ok((state_id, true))
    }

    /// The deterministic automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.dfa
    }

    /// Consume the constructor and return the deterministic automaton.
    pub fn into_automaton(self) -> Automaton {
        self.dfa
    }

    /// The source states represented by a state of the deterministic automaton.
    pub fn represented_states(&self, dfa_state: StateID) -> Option<&[StateID]> {
        self.subsets.get(&dfa_state).map(Vec::as_slice)
    }

    /// The state of the deterministic automaton that represents exactly the given source states.
    pub fn state_for(&self, nfa_states: &[StateID]) -> Option<StateID> {
        let mut key = nfa_states.to_vec();
        key.sort_unstable();
        key.dedup();
        self.state_map.get(&key).copied()
    }
}

/// Convert `automaton` into an equivalent deterministic automaton.
/// A deterministic `automaton` is returned as a copy.
pub fn determinize(automaton: &Automaton) -> Result<Automaton> {
    Ok(SubsetConstructor::new(automaton)?.into_automaton())
}
