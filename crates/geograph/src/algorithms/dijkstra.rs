use std::cmp::Reverse;

use log::{debug, trace};
use ordered_float::OrderedFloat;
use priority_queue::PriorityQueue;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::{GraphError, graph::GeoGraph, point::GeoPoint};

impl GeoGraph {
    /// Shortest route between two vertices by total great-circle miles.
    ///
    /// Returns the node ids along the route, `start` and `end` inclusive.
    /// Fails with [`GraphError::NodeNotFound`] for an id outside the graph,
    /// [`GraphError::DegenerateRoute`] when `start == end`, and
    /// [`GraphError::Unreachable`] when the endpoints lie in different
    /// components; the component check makes the search itself total.
    ///
    /// The route minimizes summed edge miles, not hop count. When two
    /// routes tie exactly, which one comes back depends on frontier
    /// ordering.
    pub fn route(&self, start: usize, end: usize) -> Result<Vec<usize>, GraphError> {
        if start >= self.node_count() {
            return Err(GraphError::NodeNotFound(start));
        }
        if end >= self.node_count() {
            return Err(GraphError::NodeNotFound(end));
        }
        if start == end {
            return Err(GraphError::DegenerateRoute(start));
        }
        if !self.connected(start, end) {
            return Err(GraphError::Unreachable(start, end));
        }

        // Entries missing from `distance` read as infinity.
        let mut distance: FxHashMap<usize, f64> = FxHashMap::default();
        let mut previous: FxHashMap<usize, usize> = FxHashMap::default();
        let mut frontier = PriorityQueue::with_hasher(FxBuildHasher);

        distance.insert(start, 0.0);
        frontier.push(start, Reverse(OrderedFloat(0.0)));

        while let Some((node, Reverse(OrderedFloat(cost)))) = frontier.pop() {
            if node == end {
                debug!("Settled route {} -> {} at {} mi", start, end, cost);
                break;
            }

            for neighbor in self.neighbors(node) {
                let next = neighbor.node();
                let candidate = cost + neighbor.miles();

                if distance.get(&next).is_none_or(|&best| candidate < best) {
                    distance.insert(next, candidate);
                    previous.insert(next, node);

                    let priority = Reverse(OrderedFloat(candidate));
                    if frontier.get_priority(&next).is_some() {
                        frontier.change_priority(&next, priority);
                    } else {
                        frontier.push(next, priority);
                    }

                    trace!("relaxed {} -> {} to {} mi", node, next, candidate);
                }
            }
        }

        let mut path = vec![end];
        let mut node = end;
        while let Some(&prev) = previous.get(&node) {
            path.push(prev);
            node = prev;
        }
        if node != start {
            return Err(GraphError::Unreachable(start, end));
        }
        path.reverse();

        Ok(path)
    }
}

/// Total length of a route in miles: the sum over consecutive point pairs.
/// Routes with fewer than two points have length 0.
pub fn route_distance(path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|pair| pair[0].distance(&pair[1]))
        .sum()
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::graph::{EdgeRecord, VertexRecord};

    fn v(name: &str, lat: f64, lon: f64) -> VertexRecord {
        VertexRecord::new(name, lat, lon)
    }

    fn chain() -> GeoGraph {
        let vertices = vec![v("A", 0.0, 0.0), v("B", 0.0, 1.0), v("C", 0.0, 2.0)];
        let edges = vec![EdgeRecord::new(0, 1), EdgeRecord::new(1, 2)];

        GeoGraph::load(3, 2, vertices, edges).unwrap()
    }

    #[test]
    fn route_along_chain() {
        let graph = chain();
        let route = graph.route(0, 2).unwrap();

        assert_eq!(route, vec![0, 1, 2]);

        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let c = GeoPoint::new(0.0, 2.0);
        assert_relative_eq!(
            route_distance(&graph.route_points(&route)),
            a.distance(&b) + b.distance(&c),
            max_relative = 1e-12
        );
    }

    #[test]
    fn route_is_directionless_in_cost() {
        let graph = chain();

        let forward = graph.route(0, 2).unwrap();
        let backward = graph.route(2, 0).unwrap();

        assert_relative_eq!(
            route_distance(&graph.route_points(&forward)),
            route_distance(&graph.route_points(&backward)),
            max_relative = 1e-12
        );
    }

    #[test]
    fn degenerate_route() {
        let graph = chain();

        assert!(matches!(
            graph.route(1, 1),
            Err(GraphError::DegenerateRoute(1))
        ));
    }

    #[test]
    fn unknown_node() {
        let graph = chain();

        assert!(matches!(
            graph.route(0, 99),
            Err(GraphError::NodeNotFound(99))
        ));
        assert!(matches!(
            graph.route(99, 0),
            Err(GraphError::NodeNotFound(99))
        ));
    }

    #[test]
    fn unreachable_across_components() {
        let vertices = vec![
            v("A", 0.0, 0.0),
            v("B", 0.0, 1.0),
            v("C", 10.0, 10.0),
            v("D", 10.0, 11.0),
        ];
        let edges = vec![EdgeRecord::new(0, 1), EdgeRecord::new(2, 3)];
        let graph = GeoGraph::load(4, 2, vertices, edges).unwrap();

        assert!(matches!(
            graph.route(0, 3),
            Err(GraphError::Unreachable(0, 3))
        ));
    }

    #[test]
    fn fewer_hops_does_not_win() {
        // Three short legs along the equator against a two-leg detour
        // through a far-off vertex.
        let vertices = vec![
            v("A", 0.0, 0.0),
            v("B", 0.0, 1.0),
            v("C", 0.0, 2.0),
            v("D", 0.0, 3.0),
            v("E", 2.0, 1.5),
        ];
        let edges = vec![
            EdgeRecord::new(0, 1),
            EdgeRecord::new(1, 2),
            EdgeRecord::new(2, 3),
            EdgeRecord::new(0, 4),
            EdgeRecord::new(4, 3),
        ];
        let graph = GeoGraph::load(5, 5, vertices, edges).unwrap();

        assert_eq!(graph.route(0, 3).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn route_is_optimal() {
        let vertices = vec![
            v("A", 0.0, 0.0),
            v("B", 0.5, 1.0),
            v("C", -0.5, 1.0),
            v("D", 0.5, 2.0),
            v("E", -0.5, 2.0),
            v("F", 0.0, 3.0),
        ];
        let edges = vec![
            EdgeRecord::new(0, 1),
            EdgeRecord::new(0, 2),
            EdgeRecord::new(1, 2),
            EdgeRecord::new(1, 3),
            EdgeRecord::new(2, 4),
            EdgeRecord::new(3, 4),
            EdgeRecord::new(1, 4),
            EdgeRecord::new(3, 5),
            EdgeRecord::new(4, 5),
        ];
        let graph = GeoGraph::load(6, 9, vertices, edges).unwrap();

        let route = graph.route(0, 5).unwrap();
        assert_eq!(route.first(), Some(&0));
        assert_eq!(route.last(), Some(&5));
        for pair in route.windows(2) {
            assert!(
                graph.neighbors(pair[0]).iter().any(|n| n.node() == pair[1]),
                "Route hops over a missing edge {} -> {}.",
                pair[0],
                pair[1]
            );
        }

        let mut best = f64::INFINITY;
        let mut visited = vec![0];
        shortest_simple_path(&graph, 0, 5, &mut visited, 0.0, &mut best);

        assert_relative_eq!(
            route_distance(&graph.route_points(&route)),
            best,
            max_relative = 1e-9
        );
    }

    fn shortest_simple_path(
        graph: &GeoGraph,
        node: usize,
        end: usize,
        visited: &mut Vec<usize>,
        total: f64,
        best: &mut f64,
    ) {
        if node == end {
            *best = best.min(total);
            return;
        }

        for neighbor in graph.neighbors(node) {
            if !visited.contains(&neighbor.node()) {
                visited.push(neighbor.node());
                shortest_simple_path(
                    graph,
                    neighbor.node(),
                    end,
                    visited,
                    total + neighbor.miles(),
                    best,
                );
                visited.pop();
            }
        }
    }

    #[test]
    fn empty_route_has_no_length() {
        assert_eq!(route_distance(&[]), 0.0);
        assert_eq!(route_distance(&[GeoPoint::new(0.0, 0.0)]), 0.0);
    }

    #[test]
    fn repeated_point_adds_nothing() {
        let p = GeoPoint::new(35.0, -79.0);
        let q = GeoPoint::new(36.0, -79.0);

        assert_eq!(
            route_distance(&[p, p, q]),
            route_distance(&[p, q])
        );
    }

    #[test]
    fn concurrent_routes_agree() {
        let graph = chain();
        let expected = graph.route(0, 2).unwrap();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(|| graph.route(0, 2).unwrap()))
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}
