//! This module contains the configuration simulator.
//! The simulator explores the configurations reachable from the initial state breadth first, one
//! input consuming step at a time.

use std::rc::Rc;

use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::{epsilon_closure, Automaton, Configuration, Result, StateID};

/// The default frontier size at which the caller is asked for the first time whether the
/// simulation should continue.
pub const DEFAULT_CHECKPOINT_THRESHOLD: usize = 1000;

/// The policy used to step a configuration into its successors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepPolicy {
    /// Every matching transition, epsilon transitions included, produces one successor.
    ByState,
    /// Every matching non-epsilon transition produces one successor per state of the epsilon
    /// closure of its destination.
    #[default]
    WithClosure,
}

/// The options of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatorOptions {
    policy: StepPolicy,
    checkpoint_threshold: usize,
    prune_visited: bool,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        SimulatorOptions {
            policy: StepPolicy::default(),
            checkpoint_threshold: DEFAULT_CHECKPOINT_THRESHOLD,
            prune_visited: true,
        }
    }
}

impl SimulatorOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step policy.
    pub fn policy(mut self, policy: StepPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Sets the frontier size at which the caller is asked for the first time whether to
    /// continue. The threshold doubles every time it is reached.
    pub fn checkpoint_threshold(mut self, threshold: usize) -> Self {
        self.checkpoint_threshold = threshold.max(1);
        self
    }

    /// If set, a configuration with a state and input position that was already produced during
    /// the run is not produced again. This bounds a run by `|states| * (|input| + 1)`
    /// configurations. Without pruning the complete trace tree is explored.
    pub fn prune_visited(mut self, prune: bool) -> Self {
        self.prune_visited = prune;
        self
    }
}

/// The decision of the caller at a checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// Continue the simulation.
    Continue,
    /// Cancel the simulation.
    Stop,
}

/// The outcome of a complete simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationOutcome {
    /// The input was accepted. The accepting configuration links back to the initial one.
    Accepted(Rc<Configuration>),
    /// No configuration is left and none was accepting.
    Rejected,
    /// The caller stopped the simulation at a checkpoint.
    Cancelled {
        /// The frontier size at the time of cancellation.
        frontier_size: usize,
    },
}

impl SimulationOutcome {
    /// Returns true if the input was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, SimulationOutcome::Accepted(_))
    }

    /// The accepting configuration, if the input was accepted.
    pub fn accepting_configuration(&self) -> Option<&Rc<Configuration>> {
        match self {
            SimulationOutcome::Accepted(configuration) => Some(configuration),
            _ => None,
        }
    }
}

/// The outcome of a single step of a simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The frontier contains an accepting configuration.
    Accepted(Rc<Configuration>),
    /// The frontier is empty.
    Rejected,
    /// The frontier was expanded.
    Running,
    /// The frontier was expanded, holds no accepting configuration and its size reached the
    /// current threshold. The caller decides whether to call [Simulator::step] again.
    Checkpoint(usize),
}

/// A stepwise simulation of an automaton on one input.
#[derive(Debug)]
pub struct Simulator<'a> {
    automaton: &'a Automaton,
    options: SimulatorOptions,
    frontier: Vec<Rc<Configuration>>,
    // The (state, position) pairs produced so far, used for pruning.
    visited: FxHashSet<(StateID, usize)>,
    threshold: usize,
    expansions: usize,
}

impl<'a> Simulator<'a> {
    /// Creates a simulation of `automaton` on `input`.
    /// With [StepPolicy::WithClosure] the initial frontier is the epsilon closure of the initial
    /// state.
    pub fn new(automaton: &'a Automaton, input: &str, options: SimulatorOptions) -> Result<Self> {
        let initial_state = automaton.require_initial_state()?;
        let initial_states = match options.policy {
            StepPolicy::ByState => vec![initial_state],
            StepPolicy::WithClosure => epsilon_closure(automaton, initial_state),
        };
        let mut visited = FxHashSet::default();
        let frontier = initial_states
            .into_iter()
            .inspect(|state| {
                visited.insert((*state, 0));
            })
            .map(|state| Rc::new(Configuration::new(state, input)))
            .collect::<Vec<_>>();
        trace!("Initial frontier: {:?}", frontier);
        Ok(Simulator {
            automaton,
            threshold: options.checkpoint_threshold,
            options,
            frontier,
            visited,
            expansions: 0,
        })
    }

    /// The current frontier of live configurations.
    pub fn frontier(&self) -> &[Rc<Configuration>] {
        &self.frontier
    }

    /// The number of frontier expansions done so far.
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Check the frontier for acceptance and, if none is accepting, replace it by the successors
    /// of all its configurations.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(accepting) = self.accepting_configuration() {
            return StepOutcome::Accepted(accepting);
        }
        if self.frontier.is_empty() {
            debug!("Frontier is empty after {} expansions", self.expansions);
            return StepOutcome::Rejected;
        }
        let frontier = std::mem::take(&mut self.frontier);
        for configuration in &frontier {
            let successors = self.step_configuration(configuration);
            self.frontier.extend(successors);
        }
        self.expansions += 1;
        trace!(
            "Expansion {}: {} configurations",
            self.expansions,
            self.frontier.len()
        );
        if self.frontier.len() >= self.threshold {
            // A decided run is reported as such, the caller isn't asked.
            if let Some(accepting) = self.accepting_configuration() {
                return StepOutcome::Accepted(accepting);
            }
            let frontier_size = self.frontier.len();
            self.threshold = self.threshold.saturating_mul(2);
            debug!(
                "Checkpoint at {} configurations, next threshold {}",
                frontier_size, self.threshold
            );
            return StepOutcome::Checkpoint(frontier_size);
        }
        StepOutcome::Running
    }

    fn accepting_configuration(&self) -> Option<Rc<Configuration>> {
        let accepting = self
            .frontier
            .iter()
            .find(|c| c.is_accept(self.automaton))?;
        debug!("Accepting configuration {}", accepting);
        Some(accepting.clone())
    }

    /// Run the simulation to its end. At every checkpoint `checkpoint` is called with the
    /// current frontier size.
    pub fn run<F>(&mut self, mut checkpoint: F) -> SimulationOutcome
    where
        F: FnMut(usize) -> Checkpoint,
    {
        loop {
            match self.step() {
                StepOutcome::Accepted(configuration) => {
                    return SimulationOutcome::Accepted(configuration)
                }
                StepOutcome::Rejected => return SimulationOutcome::Rejected,
                StepOutcome::Running => {}
                StepOutcome::Checkpoint(frontier_size) => {
                    if checkpoint(frontier_size) == Checkpoint::Stop {
                        debug!("Simulation cancelled at {} configurations", frontier_size);
                        return SimulationOutcome::Cancelled { frontier_size };
                    }
                }
            }
        }
    }

    // Produce the successors of one configuration according to the step policy.
    fn step_configuration(&mut self, configuration: &Rc<Configuration>) -> Vec<Rc<Configuration>> {
        let automaton = self.automaton;
        let mut successors = Vec::new();
        for transition in automaton.transitions_from(configuration.state()) {
            if self.options.policy == StepPolicy::WithClosure && transition.label().is_epsilon() {
                continue;
            }
            let Some(consumed) = transition.label().match_prefix(configuration.unconsumed())
            else {
                continue;
            };
            let targets = match self.options.policy {
                StepPolicy::ByState => vec![transition.to()],
                StepPolicy::WithClosure => epsilon_closure(automaton, transition.to()),
            };
            let position = configuration.position() + consumed;
            for target in targets {
                if self.options.prune_visited && !self.visited.insert((target, position)) {
                    continue;
                }
                successors.push(Rc::new(Configuration::successor(
                    configuration,
                    target,
                    consumed,
                )));
            }
        }
        successors
    }
}

/// Simulate `automaton` on `input` with the default options until the input is accepted or
/// rejected.
pub fn simulate(automaton: &Automaton, input: &str) -> Result<SimulationOutcome> {
    let mut simulator = Simulator::new(automaton, input, SimulatorOptions::default())?;
    Ok(simulator.run(|_| Checkpoint::Continue))
}

/// Returns true if `automaton` accepts `input`.
pub fn accepts(automaton: &Automaton, input: &str) -> Result<bool> {
    Ok(simulate(automaton, input)?.is_accepted())
}
