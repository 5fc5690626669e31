// Outputs the automata of all json files in the data directory in dot format, together with their
// deterministic and minimal versions and the partition tree of the minimization.
// The files are written into the target directory.
// Run with `cargo test --test render_dot_test`
#![cfg(all(feature = "dot_writer", feature = "serde"))]

use std::fs;

use fsa_engine::{
    determinize, render_automaton, render_partition_tree, Automaton, Minimizer,
};

#[test]
fn render_dot_test() {
    // Initialize the logger
    let _ = env_logger::builder()
        .is_test(true)
        .parse_env(env_logger::Env::default().default_filter_or("fsa_engine::minimizer=trace"))
        .try_init();

    let target = concat!(env!("CARGO_MANIFEST_DIR"), "/target/dot");
    fs::create_dir_all(target).unwrap();

    for entry in fs::read_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data")).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        if path.extension().unwrap() != "json" {
            continue;
        }
        let name = path.file_stem().unwrap().to_str().unwrap().to_string();

        println!("--------------------------------------------------");
        println!("Entry: {:?}", entry.file_name());
        println!("--------------------------------------------------");

        let file = fs::File::open(&path).unwrap();
        let automaton: Automaton = serde_json::from_reader(file).unwrap();
        let dfa = determinize(&automaton).unwrap();
        let mut minimizer = Minimizer::new(Minimizer::prepare(&dfa).unwrap());
        minimizer.refine();
        let minimal = minimizer.build().unwrap();

        for (suffix, automaton) in [("nfa", &automaton), ("dfa", &dfa), ("min", &minimal)] {
            let mut file = fs::File::create(format!("{}/{}_{}.dot", target, name, suffix)).unwrap();
            render_automaton(automaton, &format!("{} ({})", name, suffix), &mut file);
        }
        let mut file = fs::File::create(format!("{}/{}_partition.dot", target, name)).unwrap();
        render_partition_tree(minimizer.tree(), &name, &mut file);

        let mut output = Vec::new();
        render_automaton(&minimal, &name, &mut output);
        let dot = String::from_utf8(output).unwrap();
        for state in minimal.state_ids() {
            assert!(dot.contains(&format!("node_{}", state)), "{}", dot);
        }
    }
}
