//! Crawler module for web page fetching and link discovery
//!
//! This module contains the crawl logic, including:
//! - The page-fetch contract and its HTTP implementation
//! - HTML href extraction
//! - The FIFO work queue
//! - The breadth-first crawl engine that builds the link graph

mod engine;
mod fetcher;
mod parser;
mod queue;

pub use engine::{CrawlOptions, CrawlResult, CrawlStats, Crawler, Visit};
pub use fetcher::{build_http_client, is_html, HttpFetcher, PageFetch, PageFetcher};
pub use parser::extract_hrefs;
pub use queue::{Job, WorkQueue};

use crate::config::{validate, Config};

/// Runs a complete crawl over HTTP
///
/// This is the main entry point for crawling. It will:
/// 1. Validate the configuration and build the HTTP client
/// 2. Fetch the seed page
/// 3. Follow in-scope links breadth-first until the worklist is empty
///
/// # Arguments
///
/// * `config` - The run configuration
/// * `seed` - URL of the first page
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed (possibly with zero pages)
/// * `Err(LinkRankError)` - Invalid configuration, or the HTTP client could
///   not be built
pub async fn crawl(config: &Config, seed: &str) -> crate::Result<CrawlResult> {
    validate(config)?;
    let fetcher = HttpFetcher::new(&config.fetch)?;
    let crawler = Crawler::new(fetcher, CrawlOptions::from(&config.crawl));
    Ok(crawler.run(seed).await)
}
