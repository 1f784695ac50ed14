use geograph::graph::GeoGraph;
use milepost::input::{cities::CityIndex, graph_file::GraphFile};

/// A small North Carolina highway net in '.graph' layout. Asheville is
/// declared but has no edges.
pub const NC_GRAPH: &str = "\
7 6
durham 35.9940 -78.8986
raleigh 35.7796 -78.6382
chapelhill 35.9132 -79.0558
greensboro 36.0726 -79.7920
charlotte 35.2271 -80.8431
wilmington 34.2104 -77.8868
asheville 35.5951 -82.5515
0 1 US-70
0 2 NC-54
2 3 I-40
0 3 I-85
3 4 I-85
1 5 I-40
";

pub const NC_CITIES: &str = "\
Durham,NC,35.9940,-78.8986
Charlotte,NC,35.2271,-80.8431
Chapel Hill,NC,35.9132,-79.0558
Wilmington,NC,34.2104,-77.8868
Asheville,NC,35.5951,-82.5515
";

pub fn graph() -> GeoGraph {
    GraphFile::read_from(NC_GRAPH.as_bytes())
        .unwrap()
        .into_graph()
        .unwrap()
}

pub fn cities() -> CityIndex {
    CityIndex::read_from(NC_CITIES.as_bytes()).unwrap()
}
