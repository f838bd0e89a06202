//! Linkrank main entry point
//!
//! This is the command-line interface for the Linkrank crawler and ranker.

use anyhow::Context;
use clap::Parser;
use linkrank::config::{load_config, validate, Config};
use linkrank::crawler::crawl;
use linkrank::output::{print_statistics, rank_and_write, GraphStatistics};
use linkrank::storage::{load_graph, save_graph};
use linkrank::{GraphFormat, LinkGraph, PageRank};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linkrank: crawl a site and rank its pages
///
/// Crawls breadth-first from URL and prints the PageRank of every page
/// discovered, or saves the link graph with --output. A saved graph can be
/// ranked later with --input, without crawling again.
#[derive(Parser, Debug)]
#[command(name = "linkrank")]
#[command(version)]
#[command(about = "Crawl a link graph and rank it with PageRank", long_about = None)]
struct Cli {
    /// Seed URL to start crawling from
    #[arg(value_name = "URL", required_unless_present = "input")]
    url: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Rank a previously saved graph instead of crawling
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["url", "output"])]
    input: Option<PathBuf>,

    /// Save the crawled graph instead of ranking it
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Graph file format (overrides the config file)
    #[arg(short, long, value_enum)]
    format: Option<GraphFormat>,

    /// Compute PageRank iterations in parallel
    #[arg(long)]
    parallel: bool,

    /// Maximum number of distinct pages to visit (0 = unbounded)
    #[arg(long, value_name = "N")]
    max_visits: Option<usize>,

    /// Follow links to other hosts
    #[arg(long)]
    all_hosts: bool,

    /// Print only the N best ranked pages
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Print graph and crawl statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;

    if let Some(input) = &cli.input {
        let graph = load_graph(input, config.output.format)
            .with_context(|| format!("Failed to load graph from {}", input.display()))?;
        if cli.stats {
            print_statistics(&GraphStatistics::from_graph(&graph), None)?;
        }
        return rank_and_print(&graph, &config, cli.top);
    }

    let seed = cli
        .url
        .as_deref()
        .context("URL or input file required")?;

    let result = crawl(&config, seed).await?;
    if cli.stats {
        print_statistics(
            &GraphStatistics::from_graph(&result.graph),
            Some(&result.stats),
        )?;
    }

    match &cli.output {
        Some(output) => {
            tracing::info!("Saving to a file...");
            save_graph(output, &result.graph, config.output.format)
                .with_context(|| format!("Failed to save graph to {}", output.display()))?;
            Ok(())
        }
        None => rank_and_print(&result.graph, &config, cli.top),
    }
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if let Some(max_visits) = cli.max_visits {
        config.crawl.max_visits = max_visits;
    }
    if cli.parallel {
        config.rank.parallel = true;
    }
    if cli.all_hosts {
        config.crawl.same_host_only = false;
    }

    validate(&config)?;
    Ok(config)
}

fn rank_and_print(graph: &LinkGraph, config: &Config, top: Option<usize>) -> anyhow::Result<()> {
    let solver = PageRank::from(&config.rank);
    rank_and_write(&mut std::io::stdout().lock(), graph, &solver, top)?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkrank=info,warn"),
            1 => EnvFilter::new("linkrank=debug,info"),
            2 => EnvFilter::new("linkrank=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
