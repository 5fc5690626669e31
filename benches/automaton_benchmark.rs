use std::{fs, sync::LazyLock, time::Duration};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fsa_engine::{
    accepts, determinize, minimize, to_regular_expression, Automaton, AutomatonBuilder,
};

// The n-th symbol from the end is an 'a'. The deterministic automaton has 2^N states.
const N: usize = 8;

static NTH_FROM_END: LazyLock<Automaton> = LazyLock::new(|| {
    let names = (0..=N).map(|i| format!("q{}", i)).collect::<Vec<_>>();
    let mut builder = AutomatonBuilder::new()
        .states(&names.iter().map(String::as_str).collect::<Vec<_>>())
        .initial("q0")
        .final_state(&names[N])
        .transition("q0", "a", "q0")
        .transition("q0", "b", "q0")
        .transition("q0", "a", "q1");
    for i in 1..N {
        builder = builder
            .transition(&names[i], "a", &names[i + 1])
            .transition(&names[i], "b", &names[i + 1]);
    }
    builder.build().unwrap()
});

static NTH_FROM_END_DFA: LazyLock<Automaton> =
    LazyLock::new(|| determinize(&NTH_FROM_END).unwrap());

static MULTIPLE_OF_THREE: LazyLock<Automaton> = LazyLock::new(|| {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/multiple_of_three.json");
    let file = fs::File::open(path).unwrap();
    serde_json::from_reader(file).unwrap()
});

const SIMULATION_INPUT: &str = "abbabaabbbabababbbaaabababbbabaaabbbababab";

fn simulation_benchmark(c: &mut Criterion) {
    c.bench_function("simulation_benchmark", |b| {
        b.iter(|| {
            black_box(accepts(&NTH_FROM_END, SIMULATION_INPUT).unwrap());
        });
    });
}

fn determinization_benchmark(c: &mut Criterion) {
    c.bench_function("determinization_benchmark", |b| {
        b.iter(|| {
            black_box(determinize(&NTH_FROM_END).unwrap());
        });
    });
}

fn minimization_benchmark(c: &mut Criterion) {
    c.bench_function("minimization_benchmark", |b| {
        b.iter(|| {
            black_box(minimize(&NTH_FROM_END_DFA).unwrap());
        });
    });
}

fn regex_extraction_benchmark(c: &mut Criterion) {
    c.bench_function("regex_extraction_benchmark", |b| {
        b.iter(|| {
            black_box(to_regular_expression(&MULTIPLE_OF_THREE).unwrap());
        });
    });
}

criterion_group! {
    name = benchesalgorithms;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = determinization_benchmark, minimization_benchmark
}

criterion_group! {
    name = benchessimulation;
    config = Criterion::default();
    targets = simulation_benchmark, regex_extraction_benchmark
}

criterion_main!(benchesalgorithms, benchessimulation);
