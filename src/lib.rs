#![forbid(missing_docs)]
//! # `fsa_engine`
//! The `fsa_engine` crate is a library for finite-state automata as they are used in teaching
//! tools for formal languages.
//! It provides a data model for automata with epsilon, literal and character range labels and the
//! classic algorithms on top of it:
//! - the breadth first simulation of all configurations of an automaton on an input,
//! - the conversion of a nondeterministic automaton into a deterministic one (subset
//!   construction),
//! - the minimization of a deterministic automaton by partition refinement,
//! - the conversion of an automaton into a regular expression by state elimination.
//!
//! Every algorithm can be run to completion with a single function call or stepwise, so that the
//! intermediate results can be inspected.
//!
//! # Example
//! ```rust
//! use fsa_engine::{accepts, determinize, minimize, to_regular_expression, AutomatonBuilder};
//!
//! // Words over {a, b} that end with "ab"
//! let nfa = AutomatonBuilder::new()
//!     .states(&["q0", "q1", "q2"])
//!     .initial("q0")
//!     .final_state("q2")
//!     .transition("q0", "a", "q0")
//!     .transition("q0", "b", "q0")
//!     .transition("q0", "a", "q1")
//!     .transition("q1", "b", "q2")
//!     .build()
//!     .expect("AutomatonBuilder error");
//!
//! assert!(accepts(&nfa, "aab").unwrap());
//! assert!(!accepts(&nfa, "aba").unwrap());
//!
//! let dfa = determinize(&nfa).unwrap();
//! assert!(dfa.is_deterministic());
//! let minimal = minimize(&dfa).unwrap();
//! assert_eq!(minimal.state_count(), 3);
//!
//! let expression = to_regular_expression(&nfa).unwrap();
//! println!("{}", expression);
//! ```
//!
//! # Regular expressions
//! The expressions created by [to_regular_expression] use `+` for alternation, juxtaposition for
//! concatenation and a postfix `*` for the Kleene star. The empty word is written as `λ` and the
//! empty language as `∅`.
//!
//! # Crate features
//! The crate has the following features:
//! - `dot_writer`: Enabled by default. Render automata and partition trees in the graphviz dot
//!   format with [render_automaton] and [render_partition_tree].
//!
//! - `serde`: Enabled by default. Serialize and deserialize automata.

/// Module that provides the automaton data model
mod automaton;
pub use automaton::{Automaton, Point, State, Transition};

/// The module with the automaton builder.
mod automaton_builder;
pub use automaton_builder::AutomatonBuilder;

/// Module that provides a Configuration type
mod configuration;
pub use configuration::Configuration;

/// Module with the epsilon closure
mod epsilon_closure;
pub use epsilon_closure::{epsilon_closure, epsilon_closure_set};

/// Module with error definitions
mod errors;
pub use errors::{FsaError, FsaErrorKind, Result};

/// The module with internal implementation details.
mod internal;
pub use internal::{GroupID, GroupIDBase, StateID, StateIDBase};

#[cfg(feature = "dot_writer")]
pub use internal::dot::{render_automaton, render_partition_tree};

/// Module that provides the transition labels
mod label;
pub use label::{TransitionLabel, LAMBDA};

/// The module with the minimization of deterministic automata.
mod minimizer;
pub use minimizer::{
    minimize, DistinguishabilityGroup, Minimizer, PartitionTree, PreparedAutomaton,
};

/// The module with the conversion into regular expressions.
mod regex_extractor;
pub use regex_extractor::{to_regular_expression, RegexExtractor};

/// The module with the configuration simulator.
mod simulator;
pub use simulator::{
    accepts, simulate, Checkpoint, SimulationOutcome, Simulator, SimulatorOptions, StepOutcome,
    StepPolicy, DEFAULT_CHECKPOINT_THRESHOLD,
};

/// The module with the subset construction.
mod subset_constructor;
pub use subset_constructor::{determinize, SubsetConstructor};
