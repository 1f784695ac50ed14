use std::error::Error;

use geo_types::{Coord, Geometry, LineString, Point};
use geograph::{algorithms::dijkstra::route_distance, graph::GeoGraph};
use geozero::ToJson;
use serde_json::{Value, json};

/// Render a computed route as a GeoJSON FeatureCollection.
///
/// One LineString feature carries the whole route with its total miles and
/// vertex count; the endpoints come along as named Point features. This is
/// the handoff to external viewers, which do the actual drawing.
pub fn route_to_geojson(graph: &GeoGraph, route: &[usize]) -> Result<String, Box<dyn Error>> {
    let points = graph.route_points(route);
    let coords: Vec<Coord> = points.iter().map(|point| Coord::from(*point)).collect();

    // ToJson is only implemented for the Geometry enum, not its variants.
    let line = geometry(&Geometry::LineString(LineString::from(coords)).to_json()?)?;

    let mut features = vec![json!({
        "type": "Feature",
        "geometry": line,
        "properties": {
            "miles": route_distance(&points),
            "vertices": route.len(),
        },
    })];

    for &node in route.first().into_iter().chain(route.last()) {
        let Some(point) = graph.point(node) else {
            continue;
        };
        let marker = geometry(&Geometry::Point(Point::from(*point)).to_json()?)?;

        features.push(json!({
            "type": "Feature",
            "geometry": marker,
            "properties": {
                "name": graph.name(node),
            },
        }));
    }

    let collection = json!({
        "type": "FeatureCollection",
        "features": features,
    });

    Ok(serde_json::to_string_pretty(&collection)?)
}

fn geometry(json: &str) -> Result<Value, Box<dyn Error>> {
    Ok(serde_json::from_str(json)?)
}
