//! Plain-text edge list format
//!
//! The first line holds the node count. Every following line is one link
//! occurrence `source<TAB>destination`; a link with multiplicity 3 is written
//! as three identical lines. URLs and aliases are not stored.

use crate::graph::LinkGraph;
use crate::storage::{GraphCodec, StorageError, StorageResult};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};

/// Largest node count an edge-list header may declare
pub const MAX_NODE_COUNT: usize = 1 << 24;

/// Portable edge-list serialization of a [`LinkGraph`]
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeListCodec;

impl GraphCodec for EdgeListCodec {
    fn encode(&self, graph: &LinkGraph, writer: &mut dyn Write) -> StorageResult<()> {
        let mut writer = BufWriter::new(writer);

        writeln!(writer, "{}", graph.len())?;
        for (from, to, weight) in graph.edges() {
            for _ in 0..weight {
                writeln!(writer, "{}\t{}", from, to)?;
            }
        }

        writer.flush()?;
        Ok(())
    }

    fn decode(&self, reader: &mut dyn Read) -> StorageResult<LinkGraph> {
        let mut lines = BufReader::new(reader).lines();

        let header = lines.next().ok_or(StorageError::MissingHeader)??;
        let node_count: usize = header
            .trim()
            .parse()
            .map_err(|_| StorageError::InvalidHeader(header.clone()))?;
        if node_count > MAX_NODE_COUNT {
            return Err(StorageError::TooManyNodes {
                declared: node_count,
                limit: MAX_NODE_COUNT,
            });
        }

        let mut edges = Vec::new();
        for (offset, line) in lines.enumerate() {
            let line = line?;
            let number = offset + 2;

            if line.trim().is_empty() {
                continue;
            }

            edges.push(parse_edge(&line, number, node_count)?);
        }

        tracing::debug!(
            "Parsed edge list with {} nodes and {} links",
            node_count,
            edges.len()
        );
        Ok(LinkGraph::from_edges(node_count, edges))
    }
}

/// Parses one `source destination` line
fn parse_edge(line: &str, number: usize, node_count: usize) -> StorageResult<(usize, usize)> {
    let invalid = || StorageError::InvalidLine {
        line: number,
        content: line.to_string(),
    };

    let mut tokens = line.split_whitespace();
    let (from, to) = match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(from), Some(to), None) => (from, to),
        _ => return Err(invalid()),
    };

    let from: usize = from.parse().map_err(|_| invalid())?;
    let to: usize = to.parse().map_err(|_| invalid())?;

    for index in [from, to] {
        if index >= node_count {
            return Err(StorageError::IndexOutOfRange {
                line: number,
                index,
                node_count,
            });
        }
    }

    Ok((from, to))
}
