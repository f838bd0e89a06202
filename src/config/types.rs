use crate::storage::GraphFormat;
use serde::Deserialize;

/// Main configuration structure for Linkrank
///
/// Every section and key is optional; missing values take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub rank: RankConfig,
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// Crawl scope configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// Only follow links that stay on the host of the page they were found on
    pub same_host_only: bool,

    /// Maximum number of distinct pages to visit (0 = unbounded)
    pub max_visits: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            same_host_only: true,
            max_visits: 0,
        }
    }
}

/// PageRank solver configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RankConfig {
    /// Probability of following an outbound link rather than jumping
    pub damping: f64,

    /// Convergence threshold on the L1 change between iterations
    pub tolerance: f64,

    /// Compute each iteration in parallel
    pub parallel: bool,

    /// Worker threads for parallel mode (0 = one per CPU)
    pub threads: usize,

    /// Stop after this many iterations even if not converged (0 = unbounded)
    pub max_iterations: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 0.0001,
            parallel: false,
            threads: 0,
            max_iterations: 0,
        }
    }
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Total request timeout in seconds
    pub timeout_secs: u64,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("linkrank/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Format used when saving or loading a graph
    pub format: GraphFormat,
}
