//! This module contains the minimization of deterministic automata.
//!
//! The minimization refines the states of a complete deterministic automaton into groups of
//! indistinguishable states (Moore's algorithm). The refinement is recorded as a tree: the root
//! holds all states, its children the non-accepting and the accepting states, and every split adds
//! the resulting sub-groups as children of the split group. The leaves of the fully refined tree
//! are the states of the minimal automaton.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::{Automaton, FsaErrorKind, GroupID, GroupIDBase, Result, StateID};

/// A set of states that are believed to be indistinguishable at a certain refinement stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishabilityGroup {
    states: BTreeSet<StateID>,
    parent: Option<GroupID>,
    children: Vec<GroupID>,
    // The symbol that split this group, if it was split.
    witness: Option<String>,
}

impl DistinguishabilityGroup {
    fn new(states: BTreeSet<StateID>, parent: Option<GroupID>) -> Self {
        DistinguishabilityGroup {
            states,
            parent,
            children: Vec::new(),
            witness: None,
        }
    }

    /// The states of the group.
    pub fn states(&self) -> &BTreeSet<StateID> {
        &self.states
    }

    /// The group this one was split from.
    pub fn parent(&self) -> Option<GroupID> {
        self.parent
    }

    /// The sub-groups this group was split into.
    pub fn children(&self) -> &[GroupID] {
        &self.children
    }

    /// The symbol on which the group was split.
    pub fn witness(&self) -> Option<&str> {
        self.witness.as_deref()
    }

    /// Returns true if the group was not split (yet).
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The tree of distinguishability groups built during the refinement.
/// Groups are stored in an arena and reference each other by [GroupID].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionTree {
    groups: Vec<DistinguishabilityGroup>,
}

impl PartitionTree {
    fn new(states: BTreeSet<StateID>) -> Self {
        PartitionTree {
            groups: vec![DistinguishabilityGroup::new(states, None)],
        }
    }

    fn add_child(&mut self, parent: GroupID, states: BTreeSet<StateID>) -> GroupID {
        let id = GroupID::new(self.groups.len() as GroupIDBase);
        self.groups
            .push(DistinguishabilityGroup::new(states, Some(parent)));
        self.groups[parent].children.push(id);
        id
    }

    /// The root group that contains all states.
    pub fn root(&self) -> GroupID {
        GroupID::new(0)
    }

    /// Get a group by id.
    pub fn group(&self, id: GroupID) -> Option<&DistinguishabilityGroup> {
        self.groups.get(id.as_usize())
    }

    /// The number of groups in the tree.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// The tree always has a root.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The leaves of the tree in depth-first order.
    pub fn leaves(&self) -> Vec<GroupID> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let group = &self.groups[id];
            if group.is_leaf() {
                leaves.push(id);
            } else {
                stack.extend(group.children.iter().rev());
            }
        }
        leaves
    }
}

/// An automaton that satisfies the preconditions of the minimization: it is deterministic, uses
/// single-character labels only, every state is reachable and the transition function is total.
///
/// It is created by [Minimizer::prepare] from a clone of the caller's automaton.
#[derive(Debug, Clone)]
pub struct PreparedAutomaton {
    automaton: Automaton,
    trap_state: Option<StateID>,
    removed_states: Vec<StateID>,
}

impl PreparedAutomaton {
    /// The prepared automaton.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// The trap state added to make the transition function total.
    pub fn trap_state(&self) -> Option<StateID> {
        self.trap_state
    }

    /// The unreachable states that were removed.
    pub fn removed_states(&self) -> &[StateID] {
        &self.removed_states
    }
}

/// The minimizer refines the states of a prepared automaton and builds the minimal automaton
/// from the refined partition.
#[derive(Debug, Clone)]
pub struct Minimizer {
    dfa: Automaton,
    symbols: Vec<String>,
    trap_state: Option<StateID>,
    tree: PartitionTree,
    // The leaf group every state currently belongs to.
    leaf_of: BTreeMap<StateID, GroupID>,
}

impl Minimizer {
    /// Establish the preconditions of the minimization on a clone of `automaton`:
    /// 1. multi-character labels are split,
    /// 2. the automaton must be deterministic,
    /// 3. unreachable states are removed,
    /// 4. a trap state is added if the transition function is partial.
    pub fn prepare(automaton: &Automaton) -> Result<PreparedAutomaton> {
        automaton.require_initial_state()?;
        let mut dfa = automaton.clone();
        dfa.split_labels();
        let nondeterministic_states = dfa.nondeterministic_states();
        if !nondeterministic_states.is_empty() {
            return Err(FsaErrorKind::Nondeterministic(nondeterministic_states).into());
        }
        let removed_states = dfa.remove_unreachable_states();
        if !removed_states.is_empty() {
            debug!("Removed unreachable states {:?}", removed_states);
        }
        let trap_state = dfa.add_trap_state();
        Ok(PreparedAutomaton {
            automaton: dfa,
            trap_state,
            removed_states,
        })
    }

    /// Create a minimizer with the initial partition into non-accepting and accepting states.
    pub fn new(prepared: PreparedAutomaton) -> Self {
        let PreparedAutomaton {
            automaton: dfa,
            trap_state,
            ..
        } = prepared;
        let all_states = dfa.state_ids().into_iter().collect::<BTreeSet<_>>();
        let (accepting, non_accepting): (BTreeSet<StateID>, BTreeSet<StateID>) =
            all_states.iter().partition(|s| dfa.is_final(**s));
        let mut tree = PartitionTree::new(all_states);
        let mut leaf_of = BTreeMap::new();
        for group in [non_accepting, accepting] {
            if group.is_empty() {
                continue;
            }
            let states = group.iter().copied().collect::<Vec<_>>();
            let id = tree.add_child(tree.root(), group);
            for state in states {
                leaf_of.insert(state, id);
            }
        }
        let symbols = dfa.symbols().into_iter().collect();
        trace!("Minimize automaton:\n{}", dfa);
        Minimizer {
            dfa,
            symbols,
            trap_state,
            tree,
            leaf_of,
        }
    }

    /// The refinement tree in its current stage.
    pub fn tree(&self) -> &PartitionTree {
        &self.tree
    }

    /// The prepared automaton that is minimized.
    pub fn automaton(&self) -> &Automaton {
        &self.dfa
    }

    /// The trap state added during preparation, if any.
    pub fn trap_state(&self) -> Option<StateID> {
        self.trap_state
    }

    // The leaf group the `symbol` transition of `state` leads into.
    fn target_group(&self, state: StateID, symbol: &str) -> Option<GroupID> {
        self.dfa
            .next_state(state, symbol)
            .and_then(|target| self.leaf_of.get(&target).copied())
    }

    // The states of `group` keyed by the leaf group their `symbol` transition leads into.
    fn split_keys(
        &self,
        group: &DistinguishabilityGroup,
        symbol: &str,
    ) -> BTreeMap<Option<GroupID>, BTreeSet<StateID>> {
        let mut keys: BTreeMap<Option<GroupID>, BTreeSet<StateID>> = BTreeMap::new();
        for state in &group.states {
            keys.entry(self.target_group(*state, symbol))
                .or_default()
                .insert(*state);
        }
        keys
    }

    /// Find a leaf group that can be split together with the symbol that splits it.
    /// Returns `None` if the partition is fully refined.
    pub fn splittable_group(&self) -> Option<(GroupID, String)> {
        self.tree.leaves().into_iter().find_map(|id| {
            let group = &self.tree.groups[id];
            if group.states.len() < 2 {
                return None;
            }
            self.symbols
                .iter()
                .find(|symbol| self.split_keys(group, symbol).len() > 1)
                .map(|symbol| (id, symbol.clone()))
        })
    }

    /// Split the leaf `group` by the groups its states move into on `symbol`.
    /// The sub-groups are returned. If the group is no leaf or `symbol` doesn't distinguish its
    /// states, nothing happens and the result is empty.
    pub fn split(&mut self, group: GroupID, symbol: &str) -> Vec<GroupID> {
        let Some(to_split) = self.tree.group(group) else {
            return Vec::new();
        };
        if !to_split.is_leaf() {
            return Vec::new();
        }
        let keys = self.split_keys(to_split, symbol);
        if keys.len() < 2 {
            return Vec::new();
        }
        trace!(
            "Split group {} {:?} on '{}' into {:?}",
            group,
            to_split.states,
            symbol,
            keys.values().collect::<Vec<_>>()
        );
        let children = keys
            .into_values()
            .map(|states| {
                let members = states.iter().copied().collect::<Vec<_>>();
                let child = self.tree.add_child(group, states);
                for state in members {
                    self.leaf_of.insert(state, child);
                }
                child
            })
            .collect::<Vec<_>>();
        self.tree.groups[group].witness = Some(symbol.to_string());
        children
    }

    /// Split groups until no leaf is splittable anymore.
    ///
    /// Every split adds at least one leaf and there can't be more leaves than states, so the loop
    /// ends after at most `|states|` splits.
    pub fn refine(&mut self) {
        while let Some((group, symbol)) = self.splittable_group() {
            self.split(group, &symbol);
        }
        debug!(
            "Refined partition has {} groups",
            self.tree.leaves().len()
        );
    }

    /// Returns true if no leaf group can be split anymore.
    pub fn is_refined(&self) -> bool {
        self.splittable_group().is_none()
    }

    /// Build the automaton from the leaves of the current partition tree.
    /// Each leaf becomes one state, except a leaf that consists of the trap state only. The
    /// transitions are taken from the first state of each group and transitions into the dropped
    /// trap group are omitted. The group of the initial state becomes the first state.
    pub fn build(&self) -> Result<Automaton> {
        let initial_state = self.dfa.require_initial_state()?;
        let mut leaves = self
            .tree
            .leaves()
            .into_iter()
            .filter(|id| {
                let states = &self.tree.groups[*id].states;
                !(states.len() == 1 && self.trap_state.is_some_and(|t| states.contains(&t)))
            })
            .collect::<Vec<_>>();
        if let Some(pos) = leaves
            .iter()
            .position(|id| self.tree.groups[*id].states.contains(&initial_state))
        {
            let initial_group = leaves.remove(pos);
            leaves.insert(0, initial_group);
        }

        let mut minimized = Automaton::new();
        let mut state_of_group = BTreeMap::new();
        for id in &leaves {
            let group = &self.tree.groups[*id];
            let state = minimized.add_state();
            let label = group
                .states
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join(",");
            minimized.set_state_label(state, Some(label))?;
            if group.states.iter().any(|s| self.dfa.is_final(*s)) {
                minimized.add_final_state(state)?;
            }
            if group.states.contains(&initial_state) {
                minimized.set_initial_state(Some(state))?;
            }
            state_of_group.insert(*id, state);
        }
        for id in &leaves {
            let group = &self.tree.groups[*id];
            let Some(representative) = group.states.first() else {
                continue;
            };
            let source = state_of_group[id];
            for transition in self.dfa.transitions_from(*representative) {
                let target = self
                    .leaf_of
                    .get(&transition.to())
                    .and_then(|g| state_of_group.get(g));
                if let Some(target) = target {
                    minimized.add_transition(source, *target, transition.label().clone())?;
                }
            }
        }
        trace!("Minimized automaton:\n{}", minimized);
        Ok(minimized)
    }
}

/// Minimize `automaton`. The automaton must be deterministic.
/// The result has one state per Myhill-Nerode class of the reachable states, without a trap
/// state.
pub fn minimize(automaton: &Automaton) -> Result<Automaton> {
    let mut minimizer = Minimizer::new(Minimizer::prepare(automaton)?);
    minimizer.refine();
    minimizer.build()
}
