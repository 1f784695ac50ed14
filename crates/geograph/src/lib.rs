use std::{error::Error, fmt::Display};

pub mod algorithms;
pub mod graph;
pub mod point;

#[derive(Debug)]
pub enum GraphError {
    /// Vertex or edge records disagree with their declared counts, or an
    /// edge references a vertex index outside the declared range.
    MalformedGraph(String),
    /// The graph has no vertices, so there is no nearest vertex.
    EmptyGraph,
    NodeNotFound(usize),
    /// Route start and end are the same vertex.
    DegenerateRoute(usize),
    /// Route endpoints lie in different connected components.
    Unreachable(usize, usize),
}

impl Error for GraphError {}

impl Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedGraph(reason) => write!(f, "malformed graph data: {}", reason),
            Self::EmptyGraph => write!(f, "graph has no vertices"),
            Self::NodeNotFound(node) => write!(f, "node_id: {} not found in graph", node),
            Self::DegenerateRoute(node) => {
                write!(f, "route starts and ends at node_id: {}", node)
            }
            Self::Unreachable(start, end) => {
                write!(f, "no path from node_id: {} to node_id: {}", start, end)
            }
        }
    }
}
