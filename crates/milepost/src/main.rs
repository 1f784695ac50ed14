use std::{
    error::Error,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Parser, Subcommand};
use geograph::{algorithms::dijkstra::route_distance, graph::GeoGraph, point::GeoPoint};
use log::{debug, info};
use milepost::{
    export::route_to_geojson,
    input::{cities::CityIndex, graph_file::GraphFile},
};

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Shortest route between two endpoints of a highway graph
    Route {
        /// Graph in '.graph' format
        graph: PathBuf,

        /// Start as 'City ST' (needs --cities) or 'lat,lon'
        #[arg(short, long)]
        from: String,

        /// Destination, same forms as --from
        #[arg(short, long)]
        to: String,

        /// City table in 'city,state,lat,lon' format
        #[arg(short, long)]
        cities: Option<PathBuf>,

        /// Write the route as GeoJSON to <FILE>
        #[arg(short, long)]
        geojson: Option<PathBuf>,
    },

    /// Nearest graph vertex to a position
    Nearest {
        /// Graph in '.graph' format
        graph: PathBuf,

        /// Query position as 'lat,lon'
        #[arg(short, long)]
        at: String,
    },

    /// Vertex, edge and component counts of a graph
    Info {
        /// Graph in '.graph' format
        graph: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run(cli) {
        eprintln!("milepost: {}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Route {
            graph,
            from,
            to,
            cities,
            geojson,
        } => {
            let graph = load_graph(&graph)?;
            let cities = match cities {
                Some(path) => Some(CityIndex::read_from(BufReader::new(File::open(path)?))?),
                None => None,
            };

            let from_point = resolve_endpoint(&from, cities.as_ref())?;
            let to_point = resolve_endpoint(&to, cities.as_ref())?;

            let timer = Instant::now();
            let start = graph.nearest_node(&from_point)?;
            let end = graph.nearest_node(&to_point)?;
            let route = graph.route(start, end)?;
            let miles = route_distance(&graph.route_points(&route));
            let elapsed = timer.elapsed();

            println!("Nearest vertex to '{}' is {}", from, describe(&graph, start));
            println!("Nearest vertex to '{}' is {}", to, describe(&graph, end));
            println!("Route has {} vertices and {:.1} miles", route.len(), miles);
            println!(
                "Total time to find both nearest vertices and route: {} ms",
                elapsed.as_millis()
            );
            debug!("route: {:?}", route);

            if let Some(path) = geojson {
                let json = route_to_geojson(&graph, &route)?;
                File::create(&path)?.write_all(json.as_bytes())?;
                info!("Wrote GeoJSON route to {:?}", path);
            }
        }

        Commands::Nearest { graph, at } => {
            let graph = load_graph(&graph)?;
            let query =
                parse_lat_lon(&at).ok_or_else(|| format!("'{}' is not a 'lat,lon' position", at))?;

            let node = graph.nearest_node(&query)?;
            if let Some(point) = graph.point(node) {
                println!(
                    "Nearest vertex to {} is {}, {:.2} miles away",
                    query,
                    describe(&graph, node),
                    point.distance(&query)
                );
            }
        }

        Commands::Info { graph } => {
            let graph = load_graph(&graph)?;

            println!("Vertices:          {}", graph.node_count());
            println!("Edges:             {}", graph.edge_count());
            println!("Components:        {}", graph.component_count());
            println!("Largest component: {} vertices", largest_component(&graph));
        }
    }

    Ok(())
}

fn load_graph(path: &Path) -> Result<GeoGraph, Box<dyn Error>> {
    info!("Loading graph from {:?}", path);
    let file = GraphFile::read_from(BufReader::new(File::open(path)?))?;

    Ok(file.into_graph()?)
}

/// A route endpoint is either a raw 'lat,lon' pair or a 'City ST' name
/// resolved through the city table.
fn resolve_endpoint(query: &str, cities: Option<&CityIndex>) -> Result<GeoPoint, Box<dyn Error>> {
    if let Some(point) = parse_lat_lon(query) {
        return Ok(point);
    }

    let Some(cities) = cities else {
        return Err(format!("'{}' is not 'lat,lon' and no --cities table was given", query).into());
    };

    let city = cities
        .resolve(query)
        .ok_or_else(|| format!("city '{}' not found in the table", query))?;

    Ok(city.point())
}

fn parse_lat_lon(text: &str) -> Option<GeoPoint> {
    let (lat, lon) = text.split_once(',')?;

    Some(GeoPoint::new(
        lat.trim().parse().ok()?,
        lon.trim().parse().ok()?,
    ))
}

fn describe(graph: &GeoGraph, node: usize) -> String {
    match (graph.name(node), graph.point(node)) {
        (Some(name), Some(point)) => format!("{} {}", name, point),
        _ => format!("node {}", node),
    }
}

fn largest_component(graph: &GeoGraph) -> usize {
    let mut sizes = vec![0; graph.component_count()];
    for (node, _) in graph.nodes_iter() {
        if let Some(label) = graph.component(node) {
            sizes[label] += 1;
        }
    }

    sizes.into_iter().max().unwrap_or(0)
}
