// Test complete flow of the library on the automata in the data directory
// Run with `cargo test --test e2e_test`
#![cfg(feature = "serde")]

use std::fs;

use fsa_engine::{accepts, determinize, minimize, to_regular_expression, Automaton, LAMBDA};
use regex::Regex;
use serde::Deserialize;

/// The expected results for one automaton.
#[derive(Debug, Deserialize)]
struct Expected {
    accepted: Vec<String>,
    rejected: Vec<String>,
    minimal_states: usize,
}

// Translate an extracted expression into the syntax of the regex crate.
fn to_regex(expression: &str) -> Regex {
    let pattern = expression.replace('+', "|").replace(LAMBDA, "(?:)");
    Regex::new(&format!("^(?:{})$", pattern))
        .unwrap_or_else(|e| panic!("**** Invalid expression {}: {}", expression, e))
}

#[test]
fn e2e_test() {
    // Initialize the logger
    let _ = env_logger::builder().is_test(true).try_init();

    // Iterate over all json files in the data directory that contain automata
    for entry in fs::read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data")).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.extension().unwrap() != "json" {
            continue;
        }

        println!("--------------------------------------------------");
        println!("Entry: {:?}", entry.file_name());
        println!("--------------------------------------------------");

        // Read the json file
        let file = fs::File::open(&path).unwrap();
        let automaton: Automaton = serde_json::from_reader(file)
            .unwrap_or_else(|e| panic!("**** Failed to read json file {}: {}", path.display(), e));

        // Open the expected results which have the same base name as the json file but with an
        // .expected extension.
        let expected_path = path.with_extension("expected");
        let expected_file = fs::File::open(&expected_path).unwrap();
        let expected: Expected = serde_json::from_reader(expected_file).unwrap();

        let dfa = determinize(&automaton).unwrap();
        assert!(dfa.is_deterministic());
        let minimal = minimize(&dfa).unwrap();
        println!("Minimal automaton:\n{}", minimal);
        assert_eq!(minimal.state_count(), expected.minimal_states);

        let expression = to_regular_expression(&automaton).unwrap();
        println!("Regular expression: {}", expression);
        let regex = to_regex(&expression);

        for (inputs, result) in [(&expected.accepted, true), (&expected.rejected, false)] {
            for input in inputs {
                assert_eq!(accepts(&automaton, input).unwrap(), result, "{}", input);
                assert_eq!(accepts(&dfa, input).unwrap(), result, "{}", input);
                assert_eq!(accepts(&minimal, input).unwrap(), result, "{}", input);
                assert_eq!(regex.is_match(input), result, "{}", input);
            }
        }

        // The automaton survives a serialization round trip unchanged
        let json = serde_json::to_string(&automaton).unwrap();
        let deserialized: Automaton = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, automaton);
    }
}
