//! Output module for rankings and statistics
//!
//! Rankings go to stdout in node-index order; statistics go to stderr.

mod ranking;
mod stats;

pub use ranking::{rank_and_write, write_ranking, write_top};
pub use stats::{print_statistics, write_statistics, GraphStatistics};
