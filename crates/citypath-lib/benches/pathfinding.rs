use citypath_lib::{find_shortest_path_with, NodeId, RoadNetwork, SearchHeuristic};
use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;

const GRID: i64 = 60;
const STEP_DEG: f64 = 0.001;

/// Square street grid of two-way blocks, roughly the size of a small
/// downtown core.
static GRID_NETWORK: Lazy<RoadNetwork> = Lazy::new(|| {
    let id = |row: i64, col: i64| -> NodeId { row * GRID + col };
    let mut builder = RoadNetwork::builder();
    for row in 0..GRID {
        for col in 0..GRID {
            builder = builder.node(
                id(row, col),
                45.0 + row as f64 * STEP_DEG,
                -75.0 + col as f64 * STEP_DEG,
            );
        }
    }
    for row in 0..GRID {
        for col in 0..GRID {
            if col + 1 < GRID {
                builder = builder.road(id(row, col), id(row, col + 1), 80.0);
            }
            if row + 1 < GRID {
                builder = builder.road(id(row, col), id(row + 1, col), 112.0);
            }
        }
    }
    builder.build().expect("grid network builds")
});

fn benchmark_pathfinding(c: &mut Criterion) {
    let network = &*GRID_NETWORK;
    let source: NodeId = 0;
    let target: NodeId = GRID * GRID - 1;

    c.bench_function("astar_great_circle_grid", |b| {
        b.iter(|| {
            let path =
                find_shortest_path_with(network, source, target, SearchHeuristic::GreatCircle)
                    .expect("route exists");
            black_box(path.length())
        });
    });

    c.bench_function("astar_zero_heuristic_grid", |b| {
        b.iter(|| {
            let path = find_shortest_path_with(network, source, target, SearchHeuristic::Zero)
                .expect("route exists");
            black_box(path.length())
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
