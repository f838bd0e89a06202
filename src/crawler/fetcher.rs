//! Page fetching
//!
//! The crawl engine talks to the network only through [`PageFetcher`].
//! [`HttpFetcher`] is the reqwest-backed implementation:
//! - HEAD request to check status and Content-Type
//! - GET request to read the page body
//! - Redirects are followed by the client
//! - Anchor hrefs are extracted from the body

use crate::config::FetchConfig;
use crate::crawler::parser::extract_hrefs;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of a successful fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageFetch {
    /// The response is not an HTML page; nothing to follow
    NonHtml {
        /// Final URL after redirects
        final_url: String,
    },

    /// An HTML page and the raw hrefs found on it
    Html {
        /// Final URL after redirects
        final_url: String,
        /// Raw href values in document order, duplicates included
        hrefs: Vec<String>,
    },
}

impl PageFetch {
    /// Final URL after redirects
    pub fn final_url(&self) -> &str {
        match self {
            Self::NonHtml { final_url } | Self::Html { final_url, .. } => final_url,
        }
    }
}

/// Source of pages for the crawl engine
///
/// Implementations follow redirects and perform any transport-level retries
/// themselves; the engine never retries.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and reports where it ended up and what it links to
    async fn fetch(&self, url: &str) -> Result<PageFetch, FetchError>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<PageFetch, FetchError> {
        (**self).fetch(url).await
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Returns true if a Content-Type header value names `text/html`
///
/// The header may carry several comma-separated media types; parameters such
/// as `charset` are ignored.
pub fn is_html(content_type: &str) -> bool {
    content_type
        .split(',')
        .filter_map(|value| value.split(';').next())
        .any(|media_type| media_type.trim().eq_ignore_ascii_case("text/html"))
}

/// reqwest-backed [`PageFetcher`]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from `config`
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(build_http_client(config)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<PageFetch, FetchError> {
        let head = self
            .client
            .head(url)
            .send()
            .await
            .map_err(|e| FetchError::new(url, describe_error(&e)))?;
        check_status(url, &head)?;

        if !is_html(content_type(&head)) {
            return Ok(PageFetch::NonHtml {
                final_url: head.url().to_string(),
            });
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::new(url, describe_error(&e)))?;

        check_status(url, &response)?;

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::new(url, describe_error(&e)))?;

        Ok(PageFetch::Html {
            final_url,
            hrefs: extract_hrefs(&body),
        })
    }
}

/// Fails unless the response status is 2xx or 3xx
fn check_status(url: &str, response: &Response) -> Result<(), FetchError> {
    let status = response.status().as_u16();
    if (200..400).contains(&status) {
        Ok(())
    } else {
        Err(FetchError::new(url, format!("code {}", status)))
    }
}

fn content_type(response: &Response) -> &str {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

/// Classifies a transport error into a short message
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection refused".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&FetchConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_is_html_plain() {
        assert!(is_html("text/html"));
    }

    #[test]
    fn test_is_html_with_charset() {
        assert!(is_html("text/html; charset=utf-8"));
    }

    #[test]
    fn test_is_html_case_insensitive() {
        assert!(is_html("Text/HTML"));
    }

    #[test]
    fn test_is_html_in_list() {
        assert!(is_html("application/xhtml+xml, text/html"));
    }

    #[test]
    fn test_not_html() {
        assert!(!is_html("application/pdf"));
        assert!(!is_html("image/png"));
        assert!(!is_html(""));
    }

    #[test]
    fn test_final_url_accessor() {
        let page = PageFetch::Html {
            final_url: "http://x.com/".to_string(),
            hrefs: vec![],
        };
        assert_eq!(page.final_url(), "http://x.com/");

        let page = PageFetch::NonHtml {
            final_url: "http://x.com/file.pdf".to_string(),
        };
        assert_eq!(page.final_url(), "http://x.com/file.pdf");
    }
}
