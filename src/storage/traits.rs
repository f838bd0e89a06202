//! Graph codec trait and error types
//!
//! This module defines the interface shared by the persisted graph formats
//! and the errors they report.

use crate::graph::LinkGraph;
use std::io::{Read, Write};
use thiserror::Error;

/// Errors that can occur while saving or loading a graph
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("Not a linkrank snapshot")]
    BadMagic,

    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("Edge list is missing its node count header")]
    MissingHeader,

    #[error("Invalid node count header: {0:?}")]
    InvalidHeader(String),

    #[error("Edge list declares {declared} nodes, more than the limit of {limit}")]
    TooManyNodes { declared: usize, limit: usize },

    #[error("Invalid edge on line {line}: {content:?}")]
    InvalidLine { line: usize, content: String },

    #[error("Node index {index} on line {line} is out of range for {node_count} nodes")]
    IndexOutOfRange {
        line: usize,
        index: usize,
        node_count: usize,
    },

    #[error("Inconsistent graph: {0}")]
    Inconsistent(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A persisted representation of a [`LinkGraph`]
///
/// `decode` either returns a complete, consistent graph or an error; it never
/// hands back a partially loaded graph.
pub trait GraphCodec {
    /// Writes `graph` to `writer`
    fn encode(&self, graph: &LinkGraph, writer: &mut dyn Write) -> StorageResult<()>;

    /// Reads a graph from `reader`
    fn decode(&self, reader: &mut dyn Read) -> StorageResult<LinkGraph>;
}
