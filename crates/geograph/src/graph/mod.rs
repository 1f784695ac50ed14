use std::collections::hash_map::Entry;

use log::info;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::{GraphError, algorithms::components::ComponentLabels, point::GeoPoint};

pub mod csr;
pub mod nearest;

use csr::Csr;

/// One outgoing arc: the target node and the arc length in miles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    node: usize,
    miles: f64,
}

impl Neighbor {
    pub fn new(node: usize, miles: f64) -> Neighbor {
        Self { node, miles }
    }

    pub fn node(&self) -> usize {
        self.node
    }

    pub fn miles(&self) -> f64 {
        self.miles
    }
}

/// One `<name> <latitude> <longitude>` record of a vertex section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl VertexRecord {
    pub fn new(name: &str, lat: f64, lon: f64) -> VertexRecord {
        Self {
            name: name.to_string(),
            lat,
            lon,
        }
    }
}

/// One `<index1> <index2> [name]` record of an edge section. Indices refer
/// to positions in the vertex record list, not to deduplicated node ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub from: usize,
    pub to: usize,
    pub name: Option<String>,
}

impl EdgeRecord {
    pub fn new(from: usize, to: usize) -> EdgeRecord {
        Self {
            from,
            to,
            name: None,
        }
    }

    pub fn named(from: usize, to: usize, name: &str) -> EdgeRecord {
        Self {
            from,
            to,
            name: Some(name.to_string()),
        }
    }
}

/// An undirected graph of geographic vertices, frozen after construction.
///
/// [`GeoGraph::load`] validates the raw records, deduplicates vertices by
/// exact coordinate, expands each undirected edge into two weighted arcs of
/// a CSR structure and labels connected components once. Everything is per
/// instance and immutable afterwards, so a loaded graph can serve lookups,
/// nearest-vertex scans and routes from any number of threads at once.
#[derive(Debug)]
pub struct GeoGraph {
    points: Vec<GeoPoint>,
    names: Vec<String>,
    node_map: FxHashMap<GeoPoint, usize>,
    csr: Csr,
    components: ComponentLabels,
    edge_labels: FxHashMap<(usize, usize), String>,
    edge_count: usize,
}

impl GeoGraph {
    /// Build a graph from declared counts and raw vertex/edge records.
    ///
    /// Fails with [`GraphError::MalformedGraph`] when a record list does not
    /// match its declared count or an edge references a vertex index outside
    /// `0..vertex_count`. On failure nothing is constructed.
    ///
    /// Vertex records with identical coordinates collapse into one vertex;
    /// the first record names it and later edge records resolve to it.
    /// Duplicate and reversed edge records are idempotent. A self-loop is
    /// stored as a single zero-length arc and no query observes it.
    pub fn load(
        vertex_count: usize,
        edge_count: usize,
        vertices: Vec<VertexRecord>,
        edges: Vec<EdgeRecord>,
    ) -> Result<GeoGraph, GraphError> {
        if vertices.len() != vertex_count {
            return Err(GraphError::MalformedGraph(format!(
                "expected {} vertex records, found {}",
                vertex_count,
                vertices.len()
            )));
        }
        if edges.len() != edge_count {
            return Err(GraphError::MalformedGraph(format!(
                "expected {} edge records, found {}",
                edge_count,
                edges.len()
            )));
        }

        // Coordinate dedup. `record_ids[i]` maps vertex record i to its
        // node id; the first record at a coordinate names the node.
        let mut points = Vec::with_capacity(vertex_count);
        let mut names = Vec::with_capacity(vertex_count);
        let mut node_map = FxHashMap::with_capacity_and_hasher(vertex_count, FxBuildHasher);
        let mut record_ids = Vec::with_capacity(vertex_count);

        for record in &vertices {
            let point = GeoPoint::new(record.lat, record.lon);
            match node_map.entry(point) {
                Entry::Vacant(e) => {
                    let id = points.len();
                    e.insert(id);
                    points.push(point);
                    names.push(record.name.clone());
                    record_ids.push(id);
                }
                Entry::Occupied(e) => record_ids.push(*e.get()),
            }
        }

        // Undirected set semantics: normalize each record to an unordered
        // node pair and drop records that repeat one.
        let mut pairs = Vec::with_capacity(edge_count);
        let mut seen = FxHashSet::with_capacity_and_hasher(edge_count, FxBuildHasher);
        let mut edge_labels = FxHashMap::default();

        for record in &edges {
            if record.from >= vertex_count || record.to >= vertex_count {
                return Err(GraphError::MalformedGraph(format!(
                    "edge {} -- {} references a vertex outside 0..{}",
                    record.from, record.to, vertex_count
                )));
            }

            let a = record_ids[record.from];
            let b = record_ids[record.to];
            let pair = (a.min(b), a.max(b));
            if seen.insert(pair) {
                pairs.push(pair);
                if let Some(name) = &record.name {
                    edge_labels.insert(pair, name.clone());
                }
            }
        }

        let weighted: Vec<(usize, usize, f64)> = pairs
            .par_iter()
            .map(|&(a, b)| (a, b, points[a].distance(&points[b])))
            .collect();

        let mut arcs = Vec::with_capacity(weighted.len() * 2);
        for (a, b, miles) in weighted {
            arcs.push((a, b, miles));
            if a != b {
                arcs.push((b, a, miles));
            }
        }

        let csr = Csr::from_arcs(points.len(), &arcs);
        let components = ComponentLabels::label(&csr);

        let graph = GeoGraph {
            points,
            names,
            node_map,
            csr,
            components,
            edge_labels,
            edge_count: pairs.len(),
        };

        info!(
            "Loaded graph (node_count: {:?}, edge_count: {:?}, component_count: {:?})",
            graph.node_count(),
            graph.edge_count(),
            graph.component_count()
        );

        Ok(graph)
    }

    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    /// Distinct undirected edges after deduplication, self-loops included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn component_count(&self) -> usize {
        self.components.count()
    }

    /// Node id of the vertex at exactly these coordinates.
    pub fn node_id(&self, point: &GeoPoint) -> Option<usize> {
        self.node_map.get(point).copied()
    }

    pub fn point(&self, node: usize) -> Option<&GeoPoint> {
        self.points.get(node)
    }

    pub fn name(&self, node: usize) -> Option<&str> {
        self.names.get(node).map(String::as_str)
    }

    /// Neighbor slice of `node`; empty for ids outside the graph.
    pub fn neighbors(&self, node: usize) -> &[Neighbor] {
        self.csr.neighbors(node)
    }

    pub fn degree(&self, node: usize) -> usize {
        self.csr.degree(node)
    }

    /// Returns an Iterator over all nodes.
    ///
    /// The Iterator yields pairs `(id, point)` in node-id order.
    pub fn nodes_iter(&self) -> impl Iterator<Item = (usize, &GeoPoint)> {
        self.points.iter().enumerate()
    }

    pub fn component(&self, node: usize) -> Option<usize> {
        self.components.label_of(node)
    }

    /// Whether a path exists between `a` and `b`. Two array reads; ids
    /// outside the graph are connected to nothing.
    pub fn connected(&self, a: usize, b: usize) -> bool {
        self.components.same_component(a, b)
    }

    /// Name of the edge between `a` and `b`, if the record carried one.
    pub fn edge_label(&self, a: usize, b: usize) -> Option<&str> {
        self.edge_labels
            .get(&(a.min(b), a.max(b)))
            .map(String::as_str)
    }

    /// Coordinates for a route of node ids; unknown ids are skipped.
    pub fn route_points(&self, route: &[usize]) -> Vec<GeoPoint> {
        route
            .iter()
            .filter_map(|&node| self.point(node).copied())
            .collect()
    }
}
