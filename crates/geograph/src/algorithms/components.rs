use std::collections::VecDeque;

use log::debug;

use crate::graph::csr::Csr;

/// Connected-component labels for every node of a finished adjacency
/// structure.
///
/// Labels are computed once, right after the CSR is built, and never
/// change; a reachability check is then two array reads and a comparison.
/// Label values count components up from 0 in discovery order and carry no
/// meaning beyond equality.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentLabels {
    labels: Vec<usize>,
    count: usize,
}

impl ComponentLabels {
    /// Flood-fill every component with a breadth-first traversal.
    ///
    /// Seeds are taken in ascending node-id order; each traversal writes
    /// its component id onto every node it reaches, so all members of a
    /// component share the seed's label.
    pub fn label(csr: &Csr) -> ComponentLabels {
        let node_count = csr.node_count();
        let mut labels: Vec<Option<usize>> = vec![None; node_count];
        let mut queue = VecDeque::new();
        let mut count = 0;

        for seed in 0..node_count {
            if labels[seed].is_some() {
                continue;
            }

            labels[seed] = Some(count);
            queue.push_back(seed);

            while let Some(node) = queue.pop_front() {
                for neighbor in csr.neighbors(node) {
                    let label = &mut labels[neighbor.node()];
                    if label.is_none() {
                        *label = Some(count);
                        queue.push_back(neighbor.node());
                    }
                }
            }

            count += 1;
        }

        debug!("Labeled {} components over {} nodes", count, node_count);

        ComponentLabels {
            labels: labels.into_iter().flatten().collect(),
            count,
        }
    }

    /// Component label of `node`; `None` for ids outside the graph.
    pub fn label_of(&self, node: usize) -> Option<usize> {
        self.labels.get(node).copied()
    }

    pub fn same_component(&self, a: usize, b: usize) -> bool {
        match (self.label_of(a), self.label_of(b)) {
            (Some(label_a), Some(label_b)) => label_a == label_b,
            _ => false,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}
