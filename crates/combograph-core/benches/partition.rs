use combograph_core::{ComboOptions, EmptyAttrAction, Graph, attrs, partition};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

/// `groups` teams of `per_group` members, a ring inside each team plus a few cross-team links.
/// Every tenth node has no team.
fn build_teams(groups: usize, per_group: usize) -> Graph {
    let mut g = Graph::new();
    let n = groups * per_group;
    for i in 0..n {
        let id = format!("n{i}");
        if i % 10 == 9 {
            g.set_node(id, attrs([("score", i as f64)]));
        } else {
            g.set_node(id, attrs([("team", format!("t{}", i / per_group))]));
        }
    }
    for i in 0..n {
        let group_start = (i / per_group) * per_group;
        let next = group_start + (i + 1 - group_start) % per_group;
        g.set_edge(
            format!("n{i}"),
            format!("n{next}"),
            attrs([("weight", 1.0 + (i % 7) as f64)]),
        );
        let far = (i * 31 + 17) % n;
        g.set_edge(format!("n{i}"), format!("n{far}"), attrs([("weight", 0.5)]));
    }
    g
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    group.measurement_time(Duration::from_secs(10));

    let cases = [("g10_x20", 10usize, 20usize), ("g50_x40", 50, 40), ("g200_x50", 200, 50)];
    for (name, groups, per_group) in cases {
        let g = build_teams(groups, per_group);
        for action in [EmptyAttrAction::Group, EmptyAttrAction::Promote] {
            let opts = ComboOptions::new("team")
                .with_weight_attr("weight")
                .with_empty_attr_action(action);
            group.bench_with_input(
                BenchmarkId::new(format!("combo::partition/{action}"), name),
                &g,
                |b, g| {
                    b.iter(|| {
                        let p = partition(black_box(g), &opts).unwrap();
                        black_box(p.inter.edge_count());
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_partition);
criterion_main!(benches);
