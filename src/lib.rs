//! Linkrank: crawl a link graph and rank it
//!
//! This crate discovers a directed link graph by crawling breadth-first from a
//! seed page, computes PageRank over the discovered graph, and persists the
//! graph so a ranking can be re-derived later without re-crawling.

pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod rank;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Linkrank operations
#[derive(Debug, Error)]
pub enum LinkRankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Ranking error: {0}")]
    Rank(#[from] RankError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Reasons a discovered href is not turned into an outbound link
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("Failed to parse link: {0}")]
    Unparsable(String),

    #[error("Unsupported link scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Link leaves host {expected}: {found}")]
    ForeignHost { expected: String, found: String },
}

/// A single page could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to crawl \"{url}\": {cause}")]
pub struct FetchError {
    /// The URL as it was requested
    pub url: String,
    /// Human-readable cause
    pub cause: String,
}

impl FetchError {
    pub fn new(url: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            cause: cause.into(),
        }
    }
}

/// Ranking errors
#[derive(Debug, Error)]
pub enum RankError {
    #[error("Cannot rank an empty graph")]
    EmptyGraph,

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias for Linkrank operations
pub type Result<T> = std::result::Result<T, LinkRankError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for link canonicalization
pub type LinkResult<T> = std::result::Result<T, LinkError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlResult, Crawler, HttpFetcher, PageFetch, PageFetcher};
pub use graph::LinkGraph;
pub use rank::{PageRank, Ranking};
pub use storage::GraphFormat;
pub use url::{canonicalize_link, LinkScope};
