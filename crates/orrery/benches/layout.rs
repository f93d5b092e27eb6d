use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use orrery::{LayoutConfig, LayoutSession, TopicEdge, TopicNode};
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct CurriculumSpec {
    nodes: Vec<TopicNode>,
    edges: Vec<TopicEdge>,
    root: String,
}

impl CurriculumSpec {
    fn session(&self, cfg: &LayoutConfig) -> LayoutSession {
        LayoutSession::new(&self.nodes, &self.edges, &self.root, cfg.clone())
            .expect("synthetic curriculum is well formed")
    }
}

/// A `fanout`-ary topic tree with a prerequisite link back to a cousin, so both relation kinds
/// and crossing pressure show up at every level.
fn build_curriculum(name: &str, node_count: usize, fanout: usize) -> CurriculumSpec {
    let label = |i: usize| format!("{name}_t{i}");
    let mut nodes = Vec::with_capacity(node_count);
    let mut edges = Vec::new();

    for i in 0..node_count {
        let children: Vec<String> = (1..=fanout)
            .map(|k| fanout * i + k)
            .filter(|&c| c < node_count)
            .map(label)
            .collect();
        for c in &children {
            edges.push(TopicEdge::new(label(i), c.clone()));
        }

        let prereqs = match i.checked_sub(fanout + 1) {
            Some(p) if p > 0 => {
                edges.push(TopicEdge::new(label(p), label(i)));
                vec![label(p)]
            }
            _ => Vec::new(),
        };

        nodes.push(
            TopicNode::new(label(i))
                .with_children(children)
                .with_prereqs(prereqs),
        );
    }

    CurriculumSpec {
        nodes,
        edges,
        root: label(0),
    }
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");
    group.measurement_time(Duration::from_secs(10));

    let cfg = LayoutConfig {
        random_seed: 7,
        ..Default::default()
    };
    let cases = [
        ("tree_15_f2", 15usize, 2usize),
        ("tree_60_f3", 60usize, 3usize),
        ("tree_200_f4", 200usize, 4usize),
    ];

    for (name, nodes, fanout) in cases {
        let spec = build_curriculum(name, nodes, fanout);

        group.bench_with_input(BenchmarkId::new("place", name), &spec, |b, spec| {
            b.iter_batched(
                || spec.session(&cfg),
                |mut session| {
                    session.place();
                    black_box(session.warnings().len());
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("step_x50", name), &spec, |b, spec| {
            b.iter_batched(
                || {
                    let mut session = spec.session(&cfg);
                    session.place();
                    session
                },
                |mut session| {
                    for _ in 0..50 {
                        session.step();
                    }
                    black_box(session.iterations());
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
