// The concrete scenarios of the four algorithms on small automata.
// Run with `cargo test --test scenario_test`

use fsa_engine::{
    determinize, minimize, simulate, to_regular_expression, Automaton, AutomatonBuilder,
    SubsetConstructor, LAMBDA,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn labels(automaton: &Automaton) -> Vec<String> {
    automaton
        .states()
        .filter_map(|s| s.label().map(str::to_string))
        .collect()
}

#[test]
fn simulate_dfa() {
    init();
    let automaton = AutomatonBuilder::new()
        .states(&["q0", "q1"])
        .initial("q0")
        .final_state("q1")
        .transition("q0", "a", "q0")
        .transition("q0", "b", "q1")
        .transition("q1", "b", "q1")
        .build()
        .unwrap();
    let outcome = simulate(&automaton, "ab").unwrap();
    assert!(outcome.is_accepted());
    let trace = outcome
        .accepting_configuration()
        .unwrap()
        .path()
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>();
    assert_eq!(trace, vec!["(0, 'ab')", "(0, 'b')", "(1, '')"]);
    assert!(!simulate(&automaton, "a").unwrap().is_accepted());
}

#[test]
fn determinize_nfa() {
    init();
    let nfa = AutomatonBuilder::new()
        .states(&["q0", "q1"])
        .initial("q0")
        .final_state("q1")
        .transition("q0", "a", "q0")
        .transition("q0", "a", "q1")
        .transition("q0", "b", "q1")
        .build()
        .unwrap();
    let constructor = SubsetConstructor::new(&nfa).unwrap();
    let dfa = constructor.automaton();
    // {q0} and {q0,q1} are reached by 'a', {q1} by 'b'
    assert_eq!(labels(dfa), vec!["0", "0,1", "1"]);
    // {q0,q1} and {q1} differ on 'a', so nothing can be merged
    assert_eq!(minimize(dfa).unwrap().state_count(), dfa.state_count());
}

#[test]
fn minimize_identical_states() {
    init();
    let dfa = AutomatonBuilder::new()
        .states(&["q0", "q1", "q2", "q3"])
        .initial("q0")
        .final_state("q1")
        .transition("q0", "a", "q2")
        .transition("q0", "b", "q3")
        .transition("q1", "a", "q1")
        .transition("q1", "b", "q1")
        .transition("q2", "a", "q1")
        .transition("q2", "b", "q0")
        .transition("q3", "a", "q1")
        .transition("q3", "b", "q0")
        .build()
        .unwrap();
    let minimal = minimize(&dfa).unwrap();
    assert_eq!(minimal.state_count(), 3);
    assert_eq!(labels(&minimal), vec!["0", "2,3", "1"]);
    // Determinizing a deterministic automaton doesn't change it
    assert_eq!(determinize(&minimal).unwrap(), minimal);
}

#[test]
fn regular_expression_of_empty_word() {
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
fn regular_expression_of_single_symbol() {
    init();
    let automaton = AutomatonBuilder::new()
        .states(&["q0", "q1"])
        .initial("q0")
        .final_state("q1")
        .transition("q0", "a", "q1")
        .build()
        .unwrap();
    assert_eq!(to_regular_expression(&automaton).unwrap(), "a");
}
