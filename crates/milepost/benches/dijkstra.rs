use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use geograph::graph::{EdgeRecord, GeoGraph, VertexRecord};
use rand::{rng, seq::index::sample};

/// Square lattice of vertices 0.05 degrees apart, connected to their right
/// and lower neighbors.
fn grid(side: usize) -> GeoGraph {
    let mut vertices = Vec::with_capacity(side * side);
    let mut edges = Vec::new();

    for row in 0..side {
        for col in 0..side {
            vertices.push(VertexRecord::new(
                &format!("n{}_{}", row, col),
                35.0 + row as f64 * 0.05,
                -80.0 + col as f64 * 0.05,
            ));

            let node = row * side + col;
            if col + 1 < side {
                edges.push(EdgeRecord::new(node, node + 1));
            }
            if row + 1 < side {
                edges.push(EdgeRecord::new(node, node + side));
            }
        }
    }

    let vertex_count = vertices.len();
    let edge_count = edges.len();

    GeoGraph::load(vertex_count, edge_count, vertices, edges).unwrap()
}

pub fn route_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("route");

    let graph = grid(50);
    let corner = graph.node_count() - 1;
    let starts = sample(&mut rng(), corner, 10);

    for start in starts {
        group.sample_size(10);
        group.bench_with_input(BenchmarkId::new("route_to_corner", start), &start, |b, s| {
            b.iter(|| graph.route(*s, corner))
        });
    }

    group.finish();
}

criterion_group!(route, route_bench);
criterion_main!(route);
