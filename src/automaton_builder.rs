use crate::{Automaton, FsaErrorKind, Result, StateID, TransitionLabel};

/// A builder for creating an automaton from state names.
///
/// States are created in the order they are added, so the first state gets id 0.
/// Names are resolved when [AutomatonBuilder::build] is called.
#[derive(Debug, Clone, Default)]
pub struct AutomatonBuilder {
    states: Vec<String>,
    initial_state: Option<String>,
    final_states: Vec<String>,
    transitions: Vec<(String, TransitionLabel, String)>,
}

impl AutomatonBuilder {
    /// Creates a new automaton builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a state to the automaton builder.
    pub fn state(mut self, name: &str) -> Self {
        self.states.push(name.to_string());
        self
    }

    /// Adds multiple states to the automaton builder.
    pub fn states(mut self, names: &[&str]) -> Self {
        self.states.extend(names.iter().map(|n| n.to_string()));
        self
    }

    /// Sets the initial state.
    pub fn initial(mut self, name: &str) -> Self {
        self.initial_state = Some(name.to_string());
        self
    }

    /// Marks a state as accepting.
    pub fn final_state(mut self, name: &str) -> Self {
        self.final_states.push(name.to_string());
        self
    }

    /// Adds a transition. The label is given in its textual form, see [TransitionLabel::parse].
    pub fn transition(mut self, from: &str, label: &str, to: &str) -> Self {
        self.transitions.push((
            from.to_string(),
            TransitionLabel::parse(label),
            to.to_string(),
        ));
        self
    }

    /// Builds the automaton from the automaton builder.
    pub fn build(self) -> Result<Automaton> {
        let mut automaton = Automaton::new();
        for name in &self.states {
            if automaton.state_by_name(name).is_some() {
                return Err(FsaErrorKind::InvalidAutomaton(format!(
                    "duplicate state name '{}'",
                    name
                ))
                .into());
            }
            automaton.add_state_named(name);
        }
        let resolve = |automaton: &Automaton, name: &str| -> Result<StateID> {
            automaton
                .state_by_name(name)
                .map(|s| s.id())
                .ok_or_else(|| FsaErrorKind::UnknownStateName(name.to_string()).into())
        };
        for (from, label, to) in self.transitions {
            let from = resolve(&automaton, &from)?;
            let to = resolve(&automaton, &to)?;
            automaton.add_transition(from, to, label)?;
        }
        if let Some(name) = &self.initial_state {
            let initial_state = resolve(&automaton, name)?;
            automaton.set_initial_state(Some(initial_state))?;
        }
        for name in &self.final_states {
            let final_state = resolve(&automaton, name)?;
            automaton.add_final_state(final_state)?;
        }
        Ok(automaton)
    }
}
