use std::rc::Rc;

use crate::{Automaton, StateID};

/// An immutable snapshot of a run in progress.
///
/// A configuration knows the current state, the whole input and how much of it has been consumed.
/// The optional parent link forms a trace tree that can be replayed with
/// [Configuration::path].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    state: StateID,
    input: Rc<str>,
    // Byte offset of the unconsumed input.
    position: usize,
    parent: Option<Rc<Configuration>>,
}

impl Configuration {
    /// Create a root configuration that has consumed nothing.
    pub fn new(state: StateID, input: &str) -> Self {
        Configuration {
            state,
            input: Rc::from(input),
            position: 0,
            parent: None,
        }
    }

    /// Create a successor of `parent` in `state` after `consumed` more bytes of input were read.
    pub(crate) fn successor(parent: &Rc<Configuration>, state: StateID, consumed: usize) -> Self {
        Configuration {
            state,
            input: parent.input.clone(),
            position: parent.position + consumed,
            parent: Some(parent.clone()),
        }
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> StateID {
        self.state
    }

    /// The total original input.
    #[inline]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The consumed part of the input.
    #[inline]
    pub fn consumed(&self) -> &str {
        &self.input[..self.position]
    }

    /// The remaining, unconsumed input.
    #[inline]
    pub fn unconsumed(&self) -> &str {
        &self.input[self.position..]
    }

    /// The byte offset of the unconsumed input.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The configuration this one was derived from.
    pub fn parent(&self) -> Option<&Rc<Configuration>> {
        self.parent.as_ref()
    }

    /// A configuration is accepting if the input is consumed completely and the current state is
    /// an accepting state.
    pub fn is_accept(&self, automaton: &Automaton) -> bool {
        self.position == self.input.len() && automaton.is_final(self.state)
    }

    /// The trace from the root configuration to this one.
    pub fn path(&self) -> Vec<&Configuration> {
        let mut path = vec![self];
        let mut current = self;
        while let Some(parent) = current.parent.as_deref() {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

impl std::fmt::Display for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, '{}')", self.state, self.unconsumed().escape_default())
    }
}
