use std::io::BufRead;

use geograph::{
    GraphError,
    graph::{EdgeRecord, GeoGraph, VertexRecord},
};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{ParseError, parse_number, syntax};

/// The parsed form of a `.graph` file.
///
/// A header `<vertexCount> <edgeCount>`, then one `<name> <lat> <lon>` line
/// per vertex and one `<index1> <index2> [edgeName]` line per edge, all
/// whitespace-delimited. Exactly the declared number of records is read;
/// blank lines are skipped and anything after the last edge is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphFile {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphFile {
    pub fn read_from<R: BufRead>(reader: R) -> Result<GraphFile, ParseError> {
        let mut reader = RecordReader::new(reader);

        let (line, header) = reader.next_record("a '<vertexCount> <edgeCount>' header")?;
        let (vertex_count, edge_count) = parse_header(&header, line)?;

        // Declared counts are untrusted until the records back them up, so
        // cap what they can reserve up front.
        let mut vertices = Vec::with_capacity(vertex_count.min(1 << 20));
        for _ in 0..vertex_count {
            let (line, text) = reader.next_record("a vertex record")?;
            vertices.push(parse_vertex(&text, line)?);
        }

        let mut edges = Vec::with_capacity(edge_count.min(1 << 20));
        for _ in 0..edge_count {
            let (line, text) = reader.next_record("an edge record")?;
            edges.push(parse_edge(&text, line)?);
        }

        debug!(
            "Parsed {} vertex and {} edge records",
            vertices.len(),
            edges.len()
        );

        Ok(GraphFile {
            vertex_count,
            edge_count,
            vertices,
            edges,
        })
    }

    /// Hand the records over to the graph store.
    pub fn into_graph(self) -> Result<GeoGraph, GraphError> {
        GeoGraph::load(self.vertex_count, self.edge_count, self.vertices, self.edges)
    }
}

struct RecordReader<R> {
    lines: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> RecordReader<R> {
    fn new(reader: R) -> RecordReader<R> {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    /// Next non-blank line and its 1-based number.
    fn next_record(&mut self, expected: &str) -> Result<(usize, String), ParseError> {
        for line in self.lines.by_ref() {
            self.line += 1;
            let line = line?;
            if !line.trim().is_empty() {
                return Ok((self.line, line));
            }
        }

        Err(syntax(
            self.line + 1,
            format!("expected {}, found end of input", expected),
        ))
    }
}

fn parse_header(text: &str, line: usize) -> Result<(usize, usize), ParseError> {
    let mut tokens = text.split_whitespace();
    let vertex_count = parse_required(tokens.next(), line, "vertex count")?;
    let edge_count = parse_required(tokens.next(), line, "edge count")?;
    reject_extra(tokens.next(), line)?;

    Ok((vertex_count, edge_count))
}

fn parse_vertex(text: &str, line: usize) -> Result<VertexRecord, ParseError> {
    let mut tokens = text.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| syntax(line, "vertex record is missing a name".to_string()))?;
    let lat = parse_required(tokens.next(), line, "latitude")?;
    let lon = parse_required(tokens.next(), line, "longitude")?;
    reject_extra(tokens.next(), line)?;

    Ok(VertexRecord::new(name, lat, lon))
}

fn parse_edge(text: &str, line: usize) -> Result<EdgeRecord, ParseError> {
    let mut tokens = text.split_whitespace();
    let from = parse_required(tokens.next(), line, "vertex index")?;
    let to = parse_required(tokens.next(), line, "vertex index")?;
    let name = tokens.next();
    reject_extra(tokens.next(), line)?;

    Ok(match name {
        Some(name) => EdgeRecord::named(from, to, name),
        None => EdgeRecord::new(from, to),
    })
}

fn parse_required<T: std::str::FromStr>(
    token: Option<&str>,
    line: usize,
    what: &str,
) -> Result<T, ParseError> {
    let token = token.ok_or_else(|| syntax(line, format!("missing {}", what)))?;

    parse_number(token, line, what)
}

fn reject_extra(token: Option<&str>, line: usize) -> Result<(), ParseError> {
    match token {
        Some(extra) => Err(syntax(line, format!("unexpected token '{}'", extra))),
        None => Ok(()),
    }
}
