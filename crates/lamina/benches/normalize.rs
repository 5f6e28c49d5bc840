use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use lamina::graphlib::{Graph, GraphOptions};
use lamina::normalize;
use lamina::{EdgeLabel, GraphLabel, NodeLabel};
use std::hint::black_box;

/// `fanout` parallel named edges from `src` to `dst`, spanning `span` ranks each.
fn build(span: i32, fanout: usize) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> =
        Graph::new(GraphOptions { multigraph: true });
    g.set_graph(GraphLabel::default());
    g.set_node("src", NodeLabel::with_rank(0));
    g.set_node("dst", NodeLabel::with_rank(span));
    for i in 0..fanout {
        g.set_edge_named(
            "src",
            "dst",
            Some(format!("e{i}")),
            Some(EdgeLabel {
                weight: Some(1.0),
                width: 10.0,
                height: 10.0,
                label_rank: Some(span / 2),
                ..Default::default()
            }),
        );
    }
    g
}

/// `count` unrelated edges, each spanning `span` ranks.
fn build_wide(span: i32, count: usize) -> Graph<NodeLabel, EdgeLabel, GraphLabel> {
    let mut g: Graph<NodeLabel, EdgeLabel, GraphLabel> =
        Graph::new(GraphOptions { multigraph: true });
    g.set_graph(GraphLabel::default());
    for i in 0..count {
        let (v, w) = (format!("s{i}"), format!("t{i}"));
        g.set_node(v.clone(), NodeLabel::with_rank(0));
        g.set_node(w.clone(), NodeLabel::with_rank(span));
        g.set_edge_with_label(v, w, EdgeLabel::with_weight(1.0));
    }
    g
}

fn place_dummies(g: &mut Graph<NodeLabel, EdgeLabel, GraphLabel>) {
    for v in g.node_ids() {
        if let Some(n) = g.node_mut(&v) {
            if n.is_dummy() {
                let rank = f64::from(n.rank.unwrap_or(0));
                n.x = Some(rank);
                n.y = Some(rank * 50.0);
            }
        }
    }
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    for &(span, fanout) in &[(8, 16), (64, 16), (256, 4), (4096, 1), (16384, 1)] {
        let id = format!("span{span}_x{fanout}");

        group.bench_with_input(BenchmarkId::new("run", &id), &(span, fanout), |b, &(s, f)| {
            b.iter_batched(
                || build(s, f),
                |mut g| {
                    normalize::run(&mut g).unwrap();
                    black_box(g)
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("undo", &id), &(span, fanout), |b, &(s, f)| {
            b.iter_batched(
                || {
                    let mut g = build(s, f);
                    normalize::run(&mut g).unwrap();
                    place_dummies(&mut g);
                    g
                },
                |mut g| {
                    normalize::undo(&mut g).unwrap();
                    black_box(g)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_normalize_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_wide");
    group.sample_size(20);
    for &count in &[1_000usize, 4_000, 16_000] {
        group.bench_with_input(BenchmarkId::new("run", count), &count, |b, &n| {
            b.iter_batched(
                || build_wide(3, n),
                |mut g| {
                    normalize::run(&mut g).unwrap();
                    black_box(g)
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("undo", count), &count, |b, &n| {
            b.iter_batched(
                || {
                    let mut g = build_wide(3, n);
                    normalize::run(&mut g).unwrap();
                    place_dummies(&mut g);
                    g
                },
                |mut g| {
                    normalize::undo(&mut g).unwrap();
                    black_box(g)
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_normalize, bench_normalize_wide);
criterion_main!(benches);
