//! Ranking output
//!
//! One `label rank` line per node in index order, followed by the sum of all
//! ranks so callers can check normalization at a glance.

use crate::graph::LinkGraph;
use crate::rank::{PageRank, Ranking};
use crate::RankError;
use std::io::{self, Write};

/// Writes a ranking in node-index order followed by its sum
pub fn write_ranking(writer: &mut dyn Write, ranking: &Ranking) -> io::Result<()> {
    for entry in &ranking.entries {
        writeln!(writer, "{} {}", entry.label, entry.rank)?;
    }
    writeln!(writer, "{}", ranking.sum)
}

/// Writes the `n` best ranked nodes as an aligned table
pub fn write_top(writer: &mut dyn Write, ranking: &Ranking, n: usize) -> io::Result<()> {
    writeln!(writer, "=== Top {} of {} pages ===", n.min(ranking.len()), ranking.len())?;
    for (position, entry) in ranking.top(n).iter().enumerate() {
        writeln!(
            writer,
            "{:>4}. {:.6}  [{}] {}",
            position + 1,
            entry.rank,
            entry.index,
            entry.label
        )?;
    }
    Ok(())
}

/// Ranks `graph` with `solver` and writes the result
///
/// A graph without nodes (nothing could be crawled) is not an error here:
/// it is written as an empty ranking with a sum of 0.
///
/// # Arguments
///
/// * `writer` - Destination of the ranking lines
/// * `graph` - The graph to rank
/// * `solver` - PageRank parameters
/// * `top` - Write only the `n` best ranked nodes instead of every node
pub fn rank_and_write(
    writer: &mut dyn Write,
    graph: &LinkGraph,
    solver: &PageRank,
    top: Option<usize>,
) -> crate::Result<Ranking> {
    let ranking = match solver.rank(graph) {
        Ok(ranking) => ranking,
        Err(RankError::EmptyGraph) => {
            tracing::warn!("No pages to rank");
            Ranking::empty()
        }
        Err(e) => return Err(e.into()),
    };

    match top {
        Some(n) => write_top(writer, &ranking, n)?,
        None => write_ranking(writer, &ranking)?,
    }
    Ok(ranking)
}
