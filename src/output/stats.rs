//! Crawl and graph statistics

use crate::crawler::CrawlStats;
use crate::graph::LinkGraph;
use std::io::{self, Write};

/// Summary of a link graph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStatistics {
    pub nodes: usize,
    /// Link occurrences, counting multiplicity
    pub links: u64,
    /// Distinct (source, destination) pairs
    pub distinct_edges: usize,
    pub dangling_nodes: usize,
    pub aliases: usize,
}

impl GraphStatistics {
    pub fn from_graph(graph: &LinkGraph) -> Self {
        Self {
            nodes: graph.len(),
            links: graph.edge_count(),
            distinct_edges: graph.edges().count(),
            dangling_nodes: graph.dangling_nodes().len(),
            aliases: graph.aliases().len(),
        }
    }
}

/// Writes graph statistics, plus crawl counters when the graph was crawled
pub fn write_statistics(
    writer: &mut dyn Write,
    graph: &GraphStatistics,
    crawl: Option<&CrawlStats>,
) -> io::Result<()> {
    writeln!(writer, "=== Graph Statistics ===")?;
    writeln!(writer, "  Nodes: {}", graph.nodes)?;
    writeln!(writer, "  Links (with multiplicity): {}", graph.links)?;
    writeln!(writer, "  Distinct edges: {}", graph.distinct_edges)?;
    writeln!(writer, "  Dangling nodes: {}", graph.dangling_nodes)?;
    writeln!(writer, "  Aliases: {}", graph.aliases)?;

    if let Some(crawl) = crawl {
        writeln!(writer)?;
        writeln!(writer, "=== Crawl Statistics ===")?;
        writeln!(writer, "  Pages visited: {}", crawl.pages_visited)?;
        writeln!(writer, "  Links recorded: {}", crawl.edges_recorded)?;
        writeln!(writer, "  Resolved from aliases: {}", crawl.alias_hits)?;
        writeln!(writer, "  Redirects to known pages: {}", crawl.redirect_aliases)?;
        writeln!(writer, "  Dropped by visit cap: {}", crawl.cap_drops)?;
        writeln!(writer, "  Fetch failures: {}", crawl.fetch_failures)?;
        writeln!(writer, "  Non-HTML pages: {}", crawl.non_html_pages)?;
        writeln!(writer, "  Rejected links: {}", crawl.links_rejected)?;
    }

    Ok(())
}

/// Prints statistics to stderr so they never mix with ranking output
pub fn print_statistics(graph: &GraphStatistics, crawl: Option<&CrawlStats>) -> io::Result<()> {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    write_statistics(&mut handle, graph, crawl)
}
