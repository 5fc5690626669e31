use thiserror::Error;

use crate::StateID;

/// The result type for the `fsa_engine` crate.
pub type Result<T> = std::result::Result<T, FsaError>;

/// The error type for the `fsa_engine` crate.
#[derive(Error, Debug)]
pub struct FsaError {
    /// The source of the error.
    pub source: Box<FsaErrorKind>,
}

impl FsaError {
    /// Create a new `FsaError`.
    pub fn new(kind: FsaErrorKind) -> Self {
        FsaError {
            source: Box::new(kind),
        }
    }

    /// Get the kind of the error.
    pub fn kind(&self) -> &FsaErrorKind {
        &self.source
    }
}

impl std::fmt::Display for FsaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl From<FsaErrorKind> for FsaError {
    fn from(kind: FsaErrorKind) -> Self {
        FsaError::new(kind)
    }
}

/// The error kind type.
/// Every variant names the structural requirement of the automaton that is violated, so that the
/// message can be shown to the user as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FsaErrorKind {
    /// The automaton has no initial state.
    #[error("The automaton has no initial state")]
    NoInitialState,

    /// The automaton has no accepting state.
    #[error("The automaton has no accepting state")]
    NoFinalStates,

    /// The automaton is not deterministic. The offending states are listed.
    #[error("The automaton is not deterministic, check states {}", format_states(.0))]
    Nondeterministic(Vec<StateID>),

    /// A state id does not belong to the automaton.
    #[error("State {0} does not belong to the automaton")]
    UnknownState(StateID),

    /// A state name used during construction of an automaton is not known.
    #[error("Unknown state name '{0}'")]
    UnknownStateName(String),

    /// The state can't be removed from the generalized transition graph because it is the
    /// initial or the accepting state.
    #[error("State {0} is the initial or the accepting state and can't be eliminated")]
    NotRemovable(StateID),

    /// The automaton data is inconsistent.
    #[error("Invalid automaton: {0}")]
    InvalidAutomaton(String),
}

fn format_states(states: &[StateID]) -> String {
    states
        .iter()
        .map(|s| format!("q{}", s))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = FsaError::new(FsaErrorKind::Nondeterministic(vec![
            StateID::new(0),
            StateID::new(3),
        ]));
        assert_eq!(
            error.to_string(),
            "The automaton is not deterministic, check states q0, q3"
        );
        let error: FsaError = FsaErrorKind::NoInitialState.into();
        assert_eq!(error.kind(), &FsaErrorKind::NoInitialState);
        assert_eq!(error.to_string(), "The automaton has no initial state");
    }
}
