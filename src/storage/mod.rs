//! Storage module for persisting link graphs
//!
//! Two formats are supported:
//! - Snapshot: binary, exact round trip including the alias table
//! - Edge list: text, keeps structure and multiplicities but not URLs
//!
//! Loading either format yields a graph that can be ranked without crawling.

mod edge_list;
mod snapshot;
mod traits;

pub use edge_list::{EdgeListCodec, MAX_NODE_COUNT};
pub use snapshot::{SnapshotCodec, SnapshotHeader};
pub use traits::{GraphCodec, StorageError, StorageResult};

use crate::graph::LinkGraph;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Persisted graph format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GraphFormat {
    /// Binary snapshot of the whole graph
    #[default]
    #[serde(alias = "bin")]
    #[value(alias = "bin")]
    Snapshot,

    /// Text edge list, one line per link occurrence
    #[serde(alias = "text")]
    #[value(alias = "text")]
    EdgeList,
}

impl GraphFormat {
    /// Returns the codec implementing this format
    pub fn codec(self) -> Box<dyn GraphCodec> {
        match self {
            Self::Snapshot => Box::new(SnapshotCodec),
            Self::EdgeList => Box::new(EdgeListCodec),
        }
    }
}

/// Writes `graph` to the file at `path`, replacing it if it exists
pub fn save_graph(path: &Path, graph: &LinkGraph, format: GraphFormat) -> StorageResult<()> {
    let mut file = File::create(path)?;
    format.codec().encode(graph, &mut file)?;
    file.sync_all()?;

    tracing::info!(
        "Saved {} nodes to {} ({:?})",
        graph.len(),
        path.display(),
        format
    );
    Ok(())
}

/// Reads a graph from the file at `path`
pub fn load_graph(path: &Path, format: GraphFormat) -> StorageResult<LinkGraph> {
    let mut file = File::open(path)?;
    let graph = format.codec().decode(&mut file)?;

    tracing::info!(
        "Loaded {} nodes and {} links from {}",
        graph.len(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}
