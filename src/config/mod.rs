//! Configuration module for Linkrank
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use linkrank::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linkrank.toml")).unwrap();
//! println!("Visit cap: {}", config.crawl.max_visits);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, FetchConfig, OutputConfig, RankConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
