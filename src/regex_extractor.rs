//! This module contains the conversion of an automaton into an equivalent regular expression.
//!
//! The automaton is turned into a generalized transition graph (GTG) with exactly one expression
//! for each ordered pair of states. States other than the initial and the single accepting state
//! are then eliminated one by one until the two-state graph directly yields the expression.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};

use crate::internal::expression::{concat, literal, or, star, EMPTY};
use crate::{Automaton, FsaErrorKind, Result, StateID, TransitionLabel, LAMBDA};

/// The state elimination on a generalized transition graph.
#[derive(Debug, Clone)]
pub struct RegexExtractor {
    states: BTreeSet<StateID>,
    initial_state: StateID,
    final_state: StateID,
    // The expressions of the graph. Pairs without an entry have the expression ∅.
    expressions: BTreeMap<(StateID, StateID), String>,
}

impl RegexExtractor {
    /// Create the generalized transition graph of `automaton`.
    ///
    /// If the automaton doesn't have exactly one accepting state that differs from the initial
    /// state, a fresh accepting state is added to a clone. It is reached by epsilon transitions
    /// from all former accepting states, which then become non-accepting.
    pub fn new(automaton: &Automaton) -> Result<Self> {
        let initial_state = automaton.require_initial_state()?;
        let final_states = automaton.final_states().iter().copied().collect::<Vec<_>>();
        if final_states.is_empty() {
            return Err(FsaErrorKind::NoFinalStates.into());
        }

        let mut gtg = automaton.clone();
        let final_state = match final_states.as_slice() {
            [single] if *single != initial_state => *single,
            _ => {
                let new_final = gtg.add_state();
                for state in &final_states {
                    gtg.add_transition(*state, new_final, TransitionLabel::Epsilon)?;
                    gtg.remove_final_state(*state);
                }
                gtg.add_final_state(new_final)?;
                trace!(
                    "Added single accepting state {} for {:?}",
                    new_final,
                    final_states
                );
                new_final
            }
        };

        let mut expressions: BTreeMap<(StateID, StateID), String> = BTreeMap::new();
        for transition in gtg.transitions() {
            let expression = expressions
                .entry((transition.from(), transition.to()))
                .or_insert_with(|| EMPTY.to_string());
            *expression = or(expression, &label_expression(transition.label()));
        }

        Ok(RegexExtractor {
            states: gtg.state_ids().into_iter().collect(),
            initial_state,
            final_state,
            expressions,
        })
    }

    /// The initial state of the graph.
    pub fn initial_state(&self) -> StateID {
        self.initial_state
    }

    /// The single accepting state of the graph.
    pub fn final_state(&self) -> StateID {
        self.final_state
    }

    /// The states still in the graph.
    pub fn states(&self) -> &BTreeSet<StateID> {
        &self.states
    }

    /// The states that can still be eliminated, in ascending order.
    pub fn removable_states(&self) -> Vec<StateID> {
        self.states
            .iter()
            .copied()
            .filter(|s| *s != self.initial_state && *s != self.final_state)
            .collect()
    }

    /// The expression on the edge from `from` to `to`. `∅` if there is none.
    pub fn expression(&self, from: StateID, to: StateID) -> &str {
        self.expressions
            .get(&(from, to))
            .map(String::as_str)
            .unwrap_or(EMPTY)
    }

    /// Eliminate the state `k` from the graph.
    ///
    /// For every pair of remaining states `p` and `q` the expression becomes
    /// `r(pq) + r(pk) r(kk)* r(kq)`.
    pub fn eliminate(&mut self, k: StateID) -> Result<()> {
        if !self.states.contains(&k) {
            return Err(FsaErrorKind::UnknownState(k).into());
        }
        if k == self.initial_state || k == self.final_state {
            return Err(FsaErrorKind::NotRemovable(k).into());
        }

        let loop_expression = star(self.expression(k, k));
        let others = self
            .states
            .iter()
            .copied()
            .filter(|s| *s != k)
            .collect::<Vec<_>>();
        let mut updates = Vec::new();
        for p in &others {
            let into_k = self.expression(*p, k);
            if into_k == EMPTY {
                continue;
            }
            for q in &others {
                let out_of_k = self.expression(k, *q);
                if out_of_k == EMPTY {
                    continue;
                }
                let through_k = concat(&concat(into_k, &loop_expression), out_of_k);
                updates.push(((*p, *q), or(self.expression(*p, *q), &through_k)));
            }
        }
        for (pair, expression) in updates {
            trace!("r({},{}) := {}", pair.0, pair.1, expression);
            self.expressions.insert(pair, expression);
        }

        self.expressions.retain(|(p, q), _| *p != k && *q != k);
        self.states.remove(&k);
        debug!("Eliminated state {}, {} states left", k, self.states.len());
        Ok(())
    }

    /// Eliminate all removable states in ascending order.
    pub fn eliminate_all(&mut self) -> Result<()> {
        for k in self.removable_states() {
            self.eliminate(k)?;
        }
        Ok(())
    }

    /// Returns true if only the initial and the accepting state are left.
    pub fn is_reduced(&self) -> bool {
        self.removable_states().is_empty()
    }

    /// The regular expression of the reduced graph. `None` as long as the graph is not reduced.
    ///
    /// With `i` the initial and `j` the accepting state the expression is
    /// `(r(ii) + r(ij) r(jj)* r(ji))* r(ii)* r(ij) r(jj)*`.
    pub fn regular_expression(&self) -> Option<String> {
        if !self.is_reduced() {
            return None;
        }
        let (i, j) = (self.initial_state, self.final_state);
        let r_ii = self.expression(i, i);
        let r_ij = self.expression(i, j);
        let r_jj_star = star(self.expression(j, j));
        let r_ji = self.expression(j, i);

        let cycle = star(&or(r_ii, &concat(&concat(r_ij, &r_jj_star), r_ji)));
        let expression = concat(
            &concat(&concat(&cycle, &star(r_ii)), r_ij),
            &r_jj_star,
        );
        Some(expression)
    }
}

fn label_expression(label: &TransitionLabel) -> String {
    match label {
        TransitionLabel::Epsilon => LAMBDA.to_string(),
        TransitionLabel::Literal(text) => literal(text),
        TransitionLabel::Range(..) => label.to_text(),
    }
}

/// Convert `automaton` into an equivalent regular expression.
///
/// The expression uses `+` for alternation, `*` for the Kleene star, `λ` for the empty word and
/// `∅` for the empty language. Any of these characters in a literal label is preceded by a
/// backslash.
pub fn to_regular_expression(automaton: &Automaton) -> Result<String> {
    let mut extractor = RegexExtractor::new(automaton)?;
    extractor.eliminate_all()?;
    let expression = extractor
        .regular_expression()
        .ok_or_else(|| FsaErrorKind::InvalidAutomaton("state elimination incomplete".into()))?;
    debug!("Regular expression: {}", expression);
    Ok(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AutomatonBuilder;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // Translate into the syntax of the regex crate. λ becomes an empty group.
    fn to_regex(expression: &str) -> regex::Regex {
        let pattern = expression.replace('+', "|").replace(LAMBDA, "(?:)");
        regex::Regex::new(&format!("^(?:{})$", pattern)).unwrap()
    }

    #[test]
    fn test_empty_word() {
        init();
        let automaton = AutomatonBuilder::new()
            .state("q0")
            .initial("q0")
            .final_state("q0")
            .build()
            .unwrap();
        assert_eq!(to_regular_expression(&automaton).unwrap(), LAMBDA);
    }

    #[test]
    fn test_single_symbol() {
        init();
        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1"])
            .initial("q0")
            .final_state("q1")
            .transition("q0", "a", "q1")
            .build()
            .unwrap();
        let extractor = RegexExtractor::new(&automaton).unwrap();
        // No state was added
        assert_eq!(extractor.states().len(), 2);
        assert!(extractor.is_reduced());
        assert_eq!(extractor.regular_expression(), Some("a".to_string()));
    }

    #[test]
    fn test_stepwise_elimination() {
        init();
        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1", "q2"])
            .initial("q0")
            .final_state("q2")
            .transition("q0", "a", "q1")
            .transition("q1", "c", "q1")
            .transition("q1", "b", "q2")
            .transition("q1", "d", "q2")
            .build()
            .unwrap();
        let q1 = StateID::new(1);
        let mut extractor = RegexExtractor::new(&automaton).unwrap();
        assert_eq!(extractor.removable_states(), vec![q1]);
        assert_eq!(extractor.expression(q1, StateID::new(2)), "b+d");
        assert_eq!(extractor.expression(StateID::new(2), q1), EMPTY);
        assert_eq!(extractor.regular_expression(), None);

        extractor.eliminate(q1).unwrap();
        assert!(extractor.is_reduced());
        assert_eq!(
            extractor.expression(StateID::new(0), StateID::new(2)),
            "ac*(b+d)"
        );
        assert_eq!(extractor.regular_expression().unwrap(), "ac*(b+d)");
    }

    #[test]
    fn test_several_accepting_states() {
        init();
        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1"])
            .initial("q0")
            .final_state("q0")
            .final_state("q1")
            .transition("q0", "a", "q1")
            .transition("q1", "b", "q0")
            .build()
            .unwrap();
        let expression = to_regular_expression(&automaton).unwrap();
        assert_eq!(expression, "(ab)*(ab)*(λ+a)");
        let regex = to_regex(&expression);
        for (input, expected) in [
            ("", true),
            ("a", true),
            ("ab", true),
            ("aba", true),
            ("b", false),
            ("aa", false),
            ("abb", false),
        ] {
            assert_eq!(regex.is_match(input), expected, "input: {}", input);
        }
    }

    #[test]
    fn test_epsilon_and_range_labels() {
        init();
        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1", "q2"])
            .initial("q0")
            .final_state("q2")
            .transition("q0", "", "q1")
            .transition("q1", "[0-9]", "q1")
            .transition("q1", "x", "q2")
            .build()
            .unwrap();
        let expression = to_regular_expression(&automaton).unwrap();
        assert_eq!(expression, "[0-9]*x");
        let regex = to_regex(&expression);
        assert!(regex.is_match("x"));
        assert!(regex.is_match("123x"));
        assert!(!regex.is_match("12"));
    }

    #[test]
    fn test_operator_characters_in_labels() {
        init();
        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1"])
            .initial("q0")
            .final_state("q1")
            .transition("q0", "(", "q1")
            .transition("q1", "*", "q1")
            .build()
            .unwrap();
        let expression = to_regular_expression(&automaton).unwrap();
        assert_eq!(expression, "\\(\\**");
        let regex = to_regex(&expression);
        assert!(regex.is_match("("));
        assert!(regex.is_match("(**"));
        assert!(!regex.is_match(""));
        assert!(!regex.is_match("*"));
        assert!(!regex.is_match("(()"));
    }

    #[test]
    fn test_errors() {
        let no_initial = AutomatonBuilder::new().state("q0").build().unwrap();
        assert_eq!(
            RegexExtractor::new(&no_initial).unwrap_err().kind(),
            &FsaErrorKind::NoInitialState
        );
        let no_final = AutomatonBuilder::new()
            .state("q0")
            .initial("q0")
            .build()
            .unwrap();
        assert_eq!(
            to_regular_expression(&no_final).unwrap_err().kind(),
            &FsaErrorKind::NoFinalStates
        );

        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1"])
            .initial("q0")
            .final_state("q1")
            .transition("q0", "a", "q1")
            .build()
            .unwrap();
        let mut extractor = RegexExtractor::new(&automaton).unwrap();
        assert_eq!(
            extractor.eliminate(StateID::new(0)).unwrap_err().kind(),
            &FsaErrorKind::NotRemovable(StateID::new(0))
        );
        assert_eq!(
            extractor.eliminate(StateID::new(7)).unwrap_err().kind(),
            &FsaErrorKind::UnknownState(StateID::new(7))
        );
    }

    #[test]
    fn test_unreachable_final_state() {
        let automaton = AutomatonBuilder::new()
            .states(&["q0", "q1"])
            .initial("q0")
            .final_state("q1")
            .transition("q0", "a", "q0")
            .build()
            .unwrap();
        assert_eq!(to_regular_expression(&automaton).unwrap(), EMPTY);
    }
}
