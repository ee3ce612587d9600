//! Benchmarks for reachability traversal
//!
//! Measures breadth-first traversal over synthetic import graphs, including
//! graphs where every module imports its parent to force cycles.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use deadscan::analysis::find_reachable;
use deadscan::graph::ImportGraph;

/// Create a tree-shaped import graph with `total_nodes` modules.
///
/// Every module `i > 0` is imported by module `(i - 1) / fan_out`. When
/// `with_back_edges` is set, each module also imports its parent.
fn create_graph(total_nodes: usize, fan_out: usize, with_back_edges: bool) -> ImportGraph {
    let mut graph = ImportGraph::with_capacity(total_nodes, total_nodes * 2);
    let path = |i: usize| format!("/project/src/module_{}.ts", i);

    for i in 0..total_nodes {
        graph.add_module(path(i), 1024);
    }

    for i in 1..total_nodes {
        let parent = (i - 1) / fan_out;
        graph.add_import(path(parent), path(i));
        if with_back_edges {
            graph.add_import(path(i), path(parent));
        }
    }

    graph
}

/// Benchmark traversal of an acyclic graph from a single entry
fn bench_tree_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachability_tree");

    for size in [100, 1000, 10000].iter() {
        let graph = create_graph(*size, 4, false);
        let entries = ["/project/src/module_0.ts"];

        group.bench_with_input(BenchmarkId::new("nodes", size), size, |b, _| {
            b.iter(|| black_box(find_reachable(&graph, &entries)));
        });
    }

    group.finish();
}

/// Benchmark traversal when every edge has a matching back edge
fn bench_cyclic_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachability_cyclic");

    for size in [100, 1000, 10000].iter() {
        let graph = create_graph(*size, 4, true);
        let entries = ["/project/src/module_0.ts"];

        group.bench_with_input(BenchmarkId::new("nodes", size), size, |b, _| {
            b.iter(|| black_box(find_reachable(&graph, &entries)));
        });
    }

    group.finish();
}

/// Benchmark cycle detection on the cyclic graph
fn bench_cycle_detection(c: &mut Criterion) {
    let mut group = c.benchmark_group("detect_cycles");

    for size in [100, 1000, 5000].iter() {
        let graph = create_graph(*size, 4, true);

        group.bench_with_input(BenchmarkId::new("nodes", size), &graph, |b, g| {
            b.iter(|| black_box(g.detect_cycles()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tree_traversal,
    bench_cyclic_traversal,
    bench_cycle_detection
);
criterion_main!(benches);
