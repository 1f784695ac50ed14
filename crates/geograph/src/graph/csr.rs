use serde::{Deserialize, Serialize};

use crate::graph::Neighbor;

/// Compressed-sparse-row adjacency over directed arcs.
///
/// `offsets[i]..offsets[i + 1]` indexes the neighbor slice of node `i`.
/// Built once from a finished arc list; there is no mutation API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Csr {
    offsets: Vec<usize>,
    neighbors: Vec<Neighbor>,
}

impl Csr {
    /// Build the adjacency structure for `node_count` nodes from
    /// `(source, target, miles)` arcs.
    ///
    /// `node_count` is explicit so trailing nodes without arcs keep their
    /// (empty) neighbor slices. Arc endpoints must be `< node_count`.
    pub fn from_arcs(node_count: usize, arcs: &[(usize, usize, f64)]) -> Csr {
        let mut degrees = vec![0; node_count];
        for (source, _, _) in arcs {
            degrees[*source] += 1;
        }

        let mut offsets = prefix_sum(degrees);
        let mut neighbors = vec![Neighbor::new(0, 0.0); arcs.len()];

        for (source, target, miles) in arcs {
            let slot = offsets[*source];

            // Increment offset by one after inserting the neighbor.
            offsets[*source] = slot + 1;
            neighbors[slot] = Neighbor::new(*target, *miles);
        }

        offsets.rotate_right(1);
        offsets[0] = 0;

        Csr { offsets, neighbors }
    }

    pub fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    pub fn arc_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Neighbor slice of `node`; empty for ids outside the graph.
    pub fn neighbors(&self, node: usize) -> &[Neighbor] {
        if node + 1 >= self.offsets.len() {
            return &[];
        }

        &self.neighbors[self.offsets[node]..self.offsets[node + 1]]
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }
}

fn prefix_sum(degrees: Vec<usize>) -> Vec<usize> {
    let mut sums = Vec::with_capacity(degrees.len() + 1);
    let mut total = 0;

    sums.push(0);
    for degree in degrees {
        total += degree;
        sums.push(total);
    }

    sums
}
