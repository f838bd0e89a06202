//! URL handling module for Linkrank
//!
//! This module turns hrefs discovered on a page into canonical absolute links
//! and decides whether a link is in scope for the crawl.

mod canonicalize;
mod host;

pub use canonicalize::canonicalize_link;
pub use host::{host_authority, is_same_host};

/// Which discovered links a crawl is allowed to follow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkScope {
    /// Only follow links whose host matches the page they were found on
    pub same_host_only: bool,
}

impl LinkScope {
    /// Scope restricted to the host of the containing page
    pub fn same_host() -> Self {
        Self {
            same_host_only: true,
        }
    }

    /// Scope that accepts any http(s) host
    pub fn any_host() -> Self {
        Self {
            same_host_only: false,
        }
    }
}

impl Default for LinkScope {
    fn default() -> Self {
        Self::same_host()
    }
}
