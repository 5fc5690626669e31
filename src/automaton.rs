//! This module contains the automaton data model that is shared by all algorithms of the crate.
//! The automaton owns its states in an arena keyed by [StateID]. States and transitions reference
//! each other only by id.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::trace;

use crate::{FsaError, FsaErrorKind, Result, StateID, StateIDBase, TransitionLabel};

// Distance between two grid cells used for the placement of fresh states.
const GRID_SPACING: i32 = 80;
// Number of grid cells per row.
const GRID_COLUMNS: i32 = 10;

/// A cosmetic placement of a state on a 2-D canvas.
/// It has no influence on any algorithm of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// The horizontal position.
    pub x: i32,
    /// The vertical position.
    pub y: i32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// A state of an automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct State {
    id: StateID,
    name: String,
    // Composite states carry the comma separated ids of the states they represent here.
    #[cfg_attr(feature = "serde", serde(default))]
    label: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    point: Point,
}

impl State {
    /// The unique id of the state.
    #[inline]
    pub fn id(&self) -> StateID {
        self.id
    }

    /// The name of the state.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The display label of the state, if any.
    #[inline]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// The placement of the state.
    #[inline]
    pub fn point(&self) -> Point {
        self.point
    }
}

/// A directed, labeled edge between two states.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    from: StateID,
    to: StateID,
    label: TransitionLabel,
}

impl Transition {
    /// Create a new transition.
    pub fn new(from: StateID, to: StateID, label: TransitionLabel) -> Self {
        Transition { from, to, label }
    }

    /// The source state.
    #[inline]
    pub fn from(&self) -> StateID {
        self.from
    }

    /// The destination state.
    #[inline]
    pub fn to(&self) -> StateID {
        self.to
    }

    /// The label of the transition.
    #[inline]
    pub fn label(&self) -> &TransitionLabel {
        &self.label
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -{}-> {}", self.from, self.label, self.to)
    }
}

/// A finite automaton.
///
/// The automaton has at most one initial state. Without an initial state none of the execution
/// algorithms can be applied.
///
/// Two automata are equal if they have the same states, transitions, initial state and accepting
/// states. The id the next added state will get is not compared.
#[derive(Debug, Clone, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "AutomatonData", try_from = "AutomatonData")
)]
pub struct Automaton {
    states: BTreeMap<StateID, State>,
    // The transitions indexed by their source state.
    transitions: BTreeMap<StateID, Vec<Transition>>,
    initial_state: Option<StateID>,
    final_states: BTreeSet<StateID>,
    // Ids are never reused, even after a state was removed.
    next_state_id: StateIDBase,
}

impl PartialEq for Automaton {
    fn eq(&self, other: &Self) -> bool {
        self.states == other.states
            && self.transitions == other.transitions
            && self.initial_state == other.initial_state
            && self.final_states == other.final_states
    }
}

impl Automaton {
    /// Create an empty automaton.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh state. The state is named `q<id>` and placed on a free grid cell.
    pub fn add_state(&mut self) -> StateID {
        let name = format!("q{}", self.next_state_id);
        self.add_state_named(&name)
    }

    /// Add a fresh state with the given name.
    pub fn add_state_named(&mut self, name: &str) -> StateID {
        let id = StateID::new(self.next_state_id);
        self.next_state_id += 1;
        let point = self.free_point();
        trace!("Add state {} '{}' at {:?}", id, name, point);
        self.states.insert(
            id,
            State {
                id,
                name: name.to_string(),
                label: None,
                point,
            },
        );
        id
    }

    // Find the first grid cell that is not occupied by any state.
    fn free_point(&self) -> Point {
        let occupied = self
            .states
            .values()
            .map(|s| s.point)
            .collect::<BTreeSet<_>>();
        (0..)
            .map(|i| {
                Point::new(
                    (i % GRID_COLUMNS) * GRID_SPACING,
                    (i / GRID_COLUMNS) * GRID_SPACING,
                )
            })
            .find(|p| !occupied.contains(p))
            .unwrap_or_default()
    }

    /// Remove a state together with all its incident transitions.
    /// Returns false if the state does not exist.
    pub fn remove_state(&mut self, id: StateID) -> bool {
        if self.states.remove(&id).is_none() {
            return false;
        }
        trace!("Remove state {}", id);
        self.transitions.remove(&id);
        for transitions in self.transitions.values_mut() {
            transitions.retain(|t| t.to != id);
        }
        if self.initial_state == Some(id) {
            self.initial_state = None;
        }
        self.final_states.remove(&id);
        true
    }

    /// Get a state by id.
    pub fn state(&self, id: StateID) -> Option<&State> {
        self.states.get(&id)
    }

    /// Find a state by name.
    pub fn state_by_name(&self, name: &str) -> Option<&State> {
        self.states.values().find(|s| s.name == name)
    }

    /// Set the display label of a state.
    pub fn set_state_label(&mut self, id: StateID, label: Option<String>) -> Result<()> {
        let state = self
            .states
            .get_mut(&id)
            .ok_or(FsaErrorKind::UnknownState(id))?;
        state.label = label;
        Ok(())
    }

    /// Returns true if the state belongs to the automaton.
    #[inline]
    pub fn contains_state(&self, id: StateID) -> bool {
        self.states.contains_key(&id)
    }

    /// Iterate over the states in ascending id order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// The ids of all states in ascending order.
    pub fn state_ids(&self) -> Vec<StateID> {
        self.states.keys().copied().collect()
    }

    /// The number of states.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Add a transition between two existing states.
    /// Adding an identical transition a second time has no effect.
    pub fn add_transition<L>(&mut self, from: StateID, to: StateID, label: L) -> Result<()>
    where
        L: Into<TransitionLabel>,
    {
        for id in [from, to] {
            if !self.contains_state(id) {
                return Err(FsaErrorKind::UnknownState(id).into());
            }
        }
        let transition = Transition::new(from, to, label.into());
        let transitions = self.transitions.entry(from).or_default();
        if !transitions.contains(&transition) {
            trace!("Add transition {}", transition);
            transitions.push(transition);
        }
        Ok(())
    }

    /// Remove a transition. Returns false if the transition does not exist.
    pub fn remove_transition(&mut self, transition: &Transition) -> bool {
        if let Some(transitions) = self.transitions.get_mut(&transition.from) {
            if let Some(pos) = transitions.iter().position(|t| t == transition) {
                transitions.remove(pos);
                return true;
            }
        }
        false
    }

    /// Iterate over all transitions, ordered by source state.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.values().flatten()
    }

    /// The outgoing transitions of a state.
    pub fn transitions_from(&self, id: StateID) -> &[Transition] {
        self.transitions
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The transitions from one state to another.
    pub fn transitions_between(
        &self,
        from: StateID,
        to: StateID,
    ) -> impl Iterator<Item = &Transition> {
        self.transitions_from(from)
            .iter()
            .filter(move |t| t.to == to)
    }

    /// The number of transitions.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// Set or clear the initial state.
    pub fn set_initial_state(&mut self, id: Option<StateID>) -> Result<()> {
        if let Some(id) = id {
            if !self.contains_state(id) {
                return Err(FsaErrorKind::UnknownState(id).into());
            }
        }
        self.initial_state = id;
        Ok(())
    }

    /// The initial state, if any.
    #[inline]
    pub fn initial_state(&self) -> Option<StateID> {
        self.initial_state
    }

    /// The initial state or an error if there is none.
    pub(crate) fn require_initial_state(&self) -> Result<StateID> {
        self.initial_state
            .ok_or_else(|| FsaError::new(FsaErrorKind::NoInitialState))
    }

    /// Mark a state as accepting.
    pub fn add_final_state(&mut self, id: StateID) -> Result<()> {
        if !self.contains_state(id) {
            return Err(FsaErrorKind::UnknownState(id).into());
        }
        self.final_states.insert(id);
        Ok(())
    }

    /// Remove the accepting mark of a state. Returns false if it was not accepting.
    pub fn remove_final_state(&mut self, id: StateID) -> bool {
        self.final_states.remove(&id)
    }

    /// The accepting states.
    #[inline]
    pub fn final_states(&self) -> &BTreeSet<StateID> {
        &self.final_states
    }

    /// Returns true if the state is accepting.
    #[inline]
    pub fn is_final(&self, id: StateID) -> bool {
        self.final_states.contains(&id)
    }

    /// The alphabet, i.e. the distinct non-epsilon literal labels of all transitions.
    pub fn alphabet(&self) -> BTreeSet<String> {
        self.transitions()
            .filter_map(|t| match &t.label {
                TransitionLabel::Literal(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    /// The alphabet-complete set of single-character symbols. Literal labels contribute their
    /// characters, range labels every character of their interval.
    pub fn symbols(&self) -> BTreeSet<String> {
        self.transitions()
            .flat_map(|t| t.label.symbols())
            .collect()
    }

    /// The states that make the automaton nondeterministic.
    /// A state is nondeterministic if it has an epsilon transition or two outgoing transitions
    /// that can match a common input prefix.
    pub fn nondeterministic_states(&self) -> Vec<StateID> {
        self.states
            .keys()
            .copied()
            .filter(|id| {
                let transitions = self.transitions_from(*id);
                transitions.iter().any(|t| t.label.is_epsilon())
                    || transitions.iter().enumerate().any(|(i, t1)| {
                        transitions[i + 1..]
                            .iter()
                            .any(|t2| t1.label.overlaps(&t2.label))
                    })
            })
            .collect()
    }

    /// Returns true if the automaton is deterministic.
    pub fn is_deterministic(&self) -> bool {
        self.nondeterministic_states().is_empty()
    }

    /// The states reachable from the initial state. Empty if there is no initial state.
    pub fn reachable_states(&self) -> BTreeSet<StateID> {
        let mut reachable = BTreeSet::new();
        let Some(initial_state) = self.initial_state else {
            return reachable;
        };
        let mut work_list = VecDeque::from([initial_state]);
        reachable.insert(initial_state);
        while let Some(state) = work_list.pop_front() {
            for transition in self.transitions_from(state) {
                if reachable.insert(transition.to) {
                    work_list.push_back(transition.to);
                }
            }
        }
        reachable
    }

    /// The states not reachable from the initial state.
    pub fn unreachable_states(&self) -> Vec<StateID> {
        let reachable = self.reachable_states();
        self.states
            .keys()
            .filter(|id| !reachable.contains(id))
            .copied()
            .collect()
    }

    /// Remove all states not reachable from the initial state and return their ids.
    pub fn remove_unreachable_states(&mut self) -> Vec<StateID> {
        let unreachable = self.unreachable_states();
        for id in &unreachable {
            self.remove_state(*id);
        }
        unreachable
    }

    /// The destination of the first transition of `state` that matches the single-character
    /// `symbol`. In a deterministic automaton this is the only one.
    pub fn next_state(&self, state: StateID, symbol: &str) -> Option<StateID> {
        self.transitions_from(state)
            .iter()
            .find(|t| t.label.matches_symbol(symbol))
            .map(|t| t.to)
    }

    /// Replace every transition with a multi-character literal label by a chain of
    /// single-character transitions through fresh intermediate states.
    ///
    /// This mutates the automaton. Clone first if the original must be kept.
    /// Returns the number of transitions that were split.
    pub fn split_labels(&mut self) -> usize {
        let to_split = self
            .transitions()
            .filter(|t| t.label.is_multi_character())
            .cloned()
            .collect::<Vec<_>>();
        for transition in &to_split {
            trace!("Split transition {}", transition);
            self.remove_transition(transition);
            let TransitionLabel::Literal(text) = &transition.label else {
                continue;
            };
            let chars = text.chars().collect::<Vec<_>>();
            let mut current = transition.from;
            for (i, c) in chars.iter().enumerate() {
                let next = if i + 1 == chars.len() {
                    transition.to
                } else {
                    self.add_state()
                };
                self.transitions
                    .entry(current)
                    .or_default()
                    .push(Transition::new(
                        current,
                        next,
                        TransitionLabel::Literal(c.to_string()),
                    ));
                current = next;
            }
        }
        to_split.len()
    }

    /// Make the transition function total over [Automaton::symbols].
    ///
    /// If any state lacks a transition for some symbol, a single trap state with self-loops on
    /// every symbol is added and all missing transitions are directed to it. The id of the trap
    /// state is returned. If the transition function is already total, nothing is changed and
    /// `None` is returned.
    ///
    /// This mutates the automaton. Clone first if the original must be kept.
    pub fn add_trap_state(&mut self) -> Option<StateID> {
        let symbols = self.symbols();
        let automaton: &Automaton = self;
        let missing = automaton
            .states
            .keys()
            .flat_map(|&id| {
                symbols
                    .iter()
                    .filter(move |symbol| automaton.next_state(id, symbol).is_none())
                    .map(move |symbol| (id, symbol.clone()))
            })
            .collect::<Vec<_>>();
        if missing.is_empty() {
            return None;
        }
        let trap = self.add_state();
        trace!("Add trap state {} for {} missing transitions", trap, missing.len());
        let trap_transitions = self.transitions.entry(trap).or_default();
        for symbol in &symbols {
            trap_transitions.push(Transition::new(
                trap,
                trap,
                TransitionLabel::Literal(symbol.clone()),
            ));
        }
        for (state, symbol) in missing {
            self.transitions
                .entry(state)
                .or_default()
                .push(Transition::new(state, trap, TransitionLabel::Literal(symbol)));
        }
        Some(trap)
    }
}

impl std::fmt::Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Automaton")?;
        writeln!(f, "States:")?;
        for state in self.states.values() {
            write!(f, "{}: {}", state.id, state.name)?;
            if let Some(label) = &state.label {
                write!(f, " {{{}}}", label)?;
            }
            if self.initial_state == Some(state.id) {
                write!(f, " (initial)")?;
            }
            if self.is_final(state.id) {
                write!(f, " (final)")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Transitions:")?;
        for transition in self.transitions() {
            writeln!(f, "{}", transition)?;
        }
        Ok(())
    }
}

/// The flat interchange shape of an automaton used for serialization.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct AutomatonData {
    states: Vec<State>,
    #[serde(default)]
    transitions: Vec<Transition>,
    #[serde(default)]
    initial_state: Option<StateID>,
    #[serde(default)]
    final_states: Vec<StateID>,
}

#[cfg(feature = "serde")]
impl From<Automaton> for AutomatonData {
    fn from(automaton: Automaton) -> Self {
        AutomatonData {
            transitions: automaton.transitions().cloned().collect(),
            states: automaton.states.into_values().collect(),
            initial_state: automaton.initial_state,
            final_states: automaton.final_states.into_iter().collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<AutomatonData> for Automaton {
    type Error = FsaError;

    fn try_from(data: AutomatonData) -> Result<Self> {
        let mut automaton = Automaton::new();
        for state in data.states {
            if automaton.contains_state(state.id) {
                return Err(FsaErrorKind::InvalidAutomaton(format!(
                    "duplicate state id {}",
                    state.id
                ))
                .into());
            }
            automaton.next_state_id = automaton.next_state_id.max(state.id.id() + 1);
            automaton.states.insert(state.id, state);
        }
        for transition in data.transitions {
            automaton.add_transition(transition.from, transition.to, transition.label)?;
        }
        automaton.set_initial_state(data.initial_state)?;
        for id in data.final_states {
            automaton.add_final_state(id)?;
        }
        Ok(automaton)
    }
}
