//! Binary snapshot format
//!
//! Layout: 8 magic bytes, a bincode [`SnapshotHeader`], then the bincode
//! encoded [`LinkGraph`] including its alias table.

use crate::graph::LinkGraph;
use crate::storage::{GraphCodec, StorageError, StorageResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};

const SNAPSHOT_MAGIC: &[u8; 8] = b"LINKRANK";
const SNAPSHOT_VERSION: u32 = 1;

/// Metadata stored ahead of the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub node_count: usize,
    pub edge_count: u64,
}

/// Exact round-trip serialization of a [`LinkGraph`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotCodec;

impl SnapshotCodec {
    /// Reads and checks the magic bytes and header, leaving the graph unread
    pub fn read_header(reader: &mut dyn Read) -> StorageResult<SnapshotHeader> {
        let mut magic = [0u8; 8];
        reader.read_exact(&mut magic)?;
        if &magic != SNAPSHOT_MAGIC {
            return Err(StorageError::BadMagic);
        }

        let header: SnapshotHeader = bincode::deserialize_from(&mut *reader)?;
        if header.version != SNAPSHOT_VERSION {
            return Err(StorageError::UnsupportedVersion(header.version));
        }

        Ok(header)
    }
}

impl GraphCodec for SnapshotCodec {
    fn encode(&self, graph: &LinkGraph, writer: &mut dyn Write) -> StorageResult<()> {
        let mut writer = BufWriter::new(writer);
        let header = SnapshotHeader {
            version: SNAPSHOT_VERSION,
            created_at: Utc::now(),
            node_count: graph.len(),
            edge_count: graph.edge_count(),
        };

        writer.write_all(SNAPSHOT_MAGIC)?;
        bincode::serialize_into(&mut writer, &header)?;
        bincode::serialize_into(&mut writer, graph)?;
        writer.flush()?;

        tracing::debug!(
            "Wrote snapshot with {} nodes and {} links",
            header.node_count,
            header.edge_count
        );
        Ok(())
    }

    fn decode(&self, reader: &mut dyn Read) -> StorageResult<LinkGraph> {
        let mut reader = BufReader::new(reader);
        let header = Self::read_header(&mut reader)?;
        let graph: LinkGraph = bincode::deserialize_from(&mut reader)?;

        graph.validate().map_err(StorageError::Inconsistent)?;

        if graph.len() != header.node_count || graph.edge_count() != header.edge_count {
            return Err(StorageError::Inconsistent(format!(
                "header declares {} nodes and {} links, body has {} and {}",
                header.node_count,
                header.edge_count,
                graph.len(),
                graph.edge_count()
            )));
        }

        tracing::info!(
            "Loaded snapshot from {} with {} nodes",
            header.created_at.to_rfc3339(),
            header.node_count
        );
        Ok(graph)
    }
}
