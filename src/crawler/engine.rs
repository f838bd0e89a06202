//! Crawl engine - breadth-first link discovery
//!
//! The engine drains a FIFO worklist one job at a time. Each distinct
//! canonical page gets the next node index the first time it is fetched as
//! HTML; every raw or redirected URL seen for it is registered as an alias so
//! later jobs resolve without another fetch.

use crate::config::CrawlConfig;
use crate::crawler::queue::{Job, WorkQueue};
use crate::crawler::{PageFetch, PageFetcher};
use crate::graph::LinkGraph;
use crate::url::{canonicalize_link, LinkScope};
use std::collections::HashSet;
use url::Url;

/// Limits applied to one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CrawlOptions {
    /// Which links are followed
    pub scope: LinkScope,
    /// Maximum number of distinct pages (0 = unbounded)
    pub max_visits: usize,
}

impl From<&CrawlConfig> for CrawlOptions {
    fn from(config: &CrawlConfig) -> Self {
        Self {
            scope: LinkScope {
                same_host_only: config.same_host_only,
            },
            max_visits: config.max_visits,
        }
    }
}

/// A page that became a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// URL as it was requested
    pub raw_url: String,
    /// URL after redirects, fragment removed
    pub canonical_url: String,
    /// Canonical outbound links in document order, duplicates included
    pub outbound_links: Vec<String>,
    /// Position in the node list
    pub index: usize,
}

/// Counters collected during a crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Distinct pages recorded as nodes
    pub pages_visited: u64,
    /// Link occurrences recorded in the graph
    pub edges_recorded: u64,
    /// Jobs resolved from the alias table without fetching
    pub alias_hits: u64,
    /// Fetches whose redirect landed on an already known page
    pub redirect_aliases: u64,
    /// Jobs dropped because the visit cap was reached
    pub cap_drops: u64,
    /// Fetches that failed
    pub fetch_failures: u64,
    /// Responses that were not HTML
    pub non_html_pages: u64,
    /// Hrefs rejected by the canonicalizer
    pub links_rejected: u64,
}

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlResult {
    pub graph: LinkGraph,
    /// One record per node, in index order
    pub visits: Vec<Visit>,
    pub stats: CrawlStats,
}

/// Single-threaded crawl engine
///
/// Each instance runs exactly one crawl; [`Crawler::run`] consumes it.
pub struct Crawler<F> {
    fetcher: F,
    options: CrawlOptions,
    graph: LinkGraph,
    visits: Vec<Visit>,
    queue: WorkQueue,
    non_html: HashSet<String>,
    stats: CrawlStats,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            options,
            graph: LinkGraph::new(),
            visits: Vec::new(),
            queue: WorkQueue::new(),
            non_html: HashSet::new(),
            stats: CrawlStats::default(),
        }
    }

    /// Crawls breadth-first from `seed` until the worklist is empty
    ///
    /// A seed that cannot be fetched yields an empty graph; per-job failures
    /// are logged and skipped.
    pub async fn run(mut self, seed: &str) -> CrawlResult {
        tracing::info!("Starting crawl from {}", seed);

        match self.fetcher.fetch(seed).await {
            Ok(page) => {
                self.admit(seed, page);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.stats.fetch_failures += 1;
            }
        }

        while let Some(job) = self.queue.pop() {
            self.process(job).await;
        }

        tracing::info!(
            "Crawl finished: {} pages, {} links recorded, {} jobs processed",
            self.stats.pages_visited,
            self.stats.edges_recorded,
            self.queue.total_enqueued()
        );

        CrawlResult {
            graph: self.graph,
            visits: self.visits,
            stats: self.stats,
        }
    }

    /// Resolves one job: from the alias table, or by fetching it
    async fn process(&mut self, job: Job) {
        if let Some(index) = self.graph.resolve(&job.url) {
            self.stats.alias_hits += 1;
            self.record_edge(job.referer, index);
            return;
        }

        if self.non_html.contains(&job.url) {
            tracing::debug!("Skipping known non-HTML page {}", job.url);
            return;
        }

        if self.cap_reached() {
            tracing::debug!("Visit cap reached, dropping {}", job.url);
            self.stats.cap_drops += 1;
            return;
        }

        match self.fetcher.fetch(&job.url).await {
            Ok(page) => {
                tracing::debug!("Fetched {} (final URL {})", job.url, page.final_url());
                if let Some(index) = self.admit(&job.url, page) {
                    self.record_edge(job.referer, index);
                }
            }
            Err(e) => {
                tracing::warn!(
                    "{} (Referer: {})",
                    e,
                    self.graph.node(job.referer).unwrap_or_default()
                );
                self.stats.fetch_failures += 1;
            }
        }
    }

    /// Turns a fetched page into a node index, creating the node if needed
    ///
    /// Returns `None` when the page is not a node (non-HTML or unusable URL).
    fn admit(&mut self, raw_url: &str, page: PageFetch) -> Option<usize> {
        let (final_url, hrefs) = match page {
            PageFetch::NonHtml { final_url } => {
                tracing::debug!("{} is not HTML page", final_url);
                self.stats.non_html_pages += 1;
                self.non_html.insert(raw_url.to_string());
                self.non_html.insert(final_url);
                return None;
            }
            PageFetch::Html { final_url, hrefs } => (final_url, hrefs),
        };

        let mut base = match Url::parse(&final_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Failed to crawl \"{}\": bad final URL {}: {}", raw_url, final_url, e);
                self.stats.fetch_failures += 1;
                return None;
            }
        };
        base.set_fragment(None);
        let canonical = base.to_string();

        if let Some(existing) = self.graph.resolve(&canonical) {
            tracing::debug!("{} redirects to known page {}", raw_url, canonical);
            self.graph.register_alias(raw_url, existing);
            self.stats.redirect_aliases += 1;
            return Some(existing);
        }

        let outbound_links = self.canonicalize_all(&hrefs, &base);

        let index = self.graph.add_node(&canonical);
        self.graph.register_alias(raw_url, index);
        self.stats.pages_visited += 1;
        tracing::info!("{} — New link: {}", self.graph.len(), canonical);

        self.queue
            .push_links(index, outbound_links.iter().map(String::as_str));
        self.visits.push(Visit {
            raw_url: raw_url.to_string(),
            canonical_url: canonical,
            outbound_links,
            index,
        });

        Some(index)
    }

    fn canonicalize_all(&mut self, hrefs: &[String], base: &Url) -> Vec<String> {
        let mut links = Vec::with_capacity(hrefs.len());

        for href in hrefs {
            match canonicalize_link(href, base, self.options.scope) {
                Ok(link) => links.push(link.to_string()),
                Err(e) => {
                    tracing::debug!("Skipping link on {}: {}", base, e);
                    self.stats.links_rejected += 1;
                }
            }
        }

        links
    }

    fn record_edge(&mut self, from: usize, to: usize) {
        self.graph.record_edge(from, to);
        self.stats.edges_recorded += 1;
    }

    fn cap_reached(&self) -> bool {
        self.options.max_visits > 0 && self.graph.len() >= self.options.max_visits
    }
}
