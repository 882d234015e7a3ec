//! # Match Benchmarks
//!
//! Performance benchmarks for antler-core matching operations.
//!
//! Run with: `cargo bench -p antler-core`

use antler_core::{
    AtomArg, DependencySet, Fact, FactGraph, MatchNetwork, NodeId, RoleId, Rule, RuleAtom,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// A network with one transitivity-shaped rule over N individuals.
fn transitive_network(size: usize) -> (MatchNetwork, RoleId, Vec<NodeId>) {
    let mut network = MatchNetwork::new();
    let role = network.add_role("r");
    let nodes: Vec<NodeId> = (0..size).map(|_| network.add_individual()).collect();

    network
        .compile(&Rule::new(
            "trans",
            vec![
                RuleAtom::Property {
                    role,
                    subject: AtomArg::var("x"),
                    object: AtomArg::var("y"),
                },
                RuleAtom::Property {
                    role,
                    subject: AtomArg::var("y"),
                    object: AtomArg::var("z"),
                },
            ],
        ))
        .expect("compile");

    (network, role, nodes)
}

/// A graph with N individuals linked in a chain under one role.
fn chain_graph(size: usize) -> (FactGraph, RoleId, Vec<NodeId>) {
    let mut graph = FactGraph::new();
    let role = graph.add_role("r");
    let nodes: Vec<NodeId> = (0..size).map(|_| graph.add_individual()).collect();
    for window in nodes.windows(2) {
        graph
            .add_fact(Fact::independent(window[0], role, window[1]))
            .expect("add");
    }
    (graph, role, nodes)
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_fact_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("fact_insertion");

    for size in [100, 1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let (graph, _, _) = chain_graph(size);
                black_box(graph)
            });
        });
    }

    group.finish();
}

fn bench_chain_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_propagation");

    for size in [100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let (mut network, role, nodes) = transitive_network(size);
                for window in nodes.windows(2) {
                    let produced = network
                        .add_fact(Fact::independent(window[0], role, window[1]))
                        .expect("add");
                    black_box(produced);
                }
            });
        });
    }

    group.finish();
}

fn bench_star_propagation(c: &mut Criterion) {
    let mut group = c.benchmark_group("star_propagation");

    for size in [100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let (mut network, role, nodes) = transitive_network(size);
                for &spoke in &nodes[1..] {
                    let produced = network
                        .add_fact(Fact::independent(nodes[0], role, spoke))
                        .expect("add");
                    black_box(produced);
                }
            });
        });
    }

    group.finish();
}

fn bench_indexed_retrieval(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_retrieval");

    for size in [100, 1000, 10000].iter() {
        let (graph, role, nodes) = chain_graph(*size);
        let middle = nodes[*size / 2];

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(graph.facts_from(middle, role)));
        });
    }

    group.finish();
}

fn bench_dependency_union(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_union");

    for size in [4u32, 16, 64].iter() {
        let a = (0..*size).fold(DependencySet::independent(), |ds, b| {
            ds.with_branch(antler_core::BranchId(b))
        });
        let b_set = (*size..size * 2).fold(DependencySet::independent(), |ds, b| {
            ds.with_branch(antler_core::BranchId(b))
        });

        group.bench_with_input(
            BenchmarkId::from_parameter(size),
            &(a, b_set),
            |bench, (a, b_set)| {
                bench.iter(|| black_box(a.union(b_set, false)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_fact_insertion,
    bench_chain_propagation,
    bench_star_propagation,
    bench_indexed_retrieval,
    bench_dependency_union,
);

criterion_main!(benches);
