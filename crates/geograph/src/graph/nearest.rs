use ordered_float::OrderedFloat;

use crate::{GraphError, graph::GeoGraph, point::GeoPoint};

impl GeoGraph {
    /// Id of the vertex closest to `query` by great-circle distance.
    ///
    /// Scans every vertex; with the datasets this serves the flat scan
    /// beats maintaining an index, and unlike a lat/lon R-tree it ranks by
    /// the same geodesic metric the router uses. Exact ties go to the
    /// lowest node id. Fails with [`GraphError::EmptyGraph`] when the graph
    /// has no vertices.
    pub fn nearest_node(&self, query: &GeoPoint) -> Result<usize, GraphError> {
        self.nodes_iter()
            .min_by_key(|(_, point)| OrderedFloat(query.distance(point)))
            .map(|(node, _)| node)
            .ok_or(GraphError::EmptyGraph)
    }

    /// Coordinates of the vertex closest to `query`.
    pub fn nearest_point(&self, query: &GeoPoint) -> Result<GeoPoint, GraphError> {
        let node = self.nearest_node(query)?;

        Ok(self.points[node])
    }
}
