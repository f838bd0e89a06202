//! FIFO work queue for the crawl engine

use std::collections::VecDeque;

/// A discovered link waiting to be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Node index of the page the link was found on
    pub referer: usize,
    /// Canonical link as discovered (may still redirect)
    pub url: String,
}

/// Breadth-first worklist
///
/// Jobs come out in exactly the order they went in, which is what makes
/// node indices follow discovery order.
#[derive(Debug, Default)]
pub struct WorkQueue {
    jobs: VecDeque<Job>,
    enqueued: u64,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one job per link, all with the same referer
    pub fn push_links<'a, I>(&mut self, referer: usize, links: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for url in links {
            self.push(Job {
                referer,
                url: url.to_string(),
            });
        }
    }

    pub fn push(&mut self, job: Job) {
        self.enqueued += 1;
        self.jobs.push_back(job);
    }

    /// Removes the oldest job
    pub fn pop(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Number of jobs ever pushed
    pub fn total_enqueued(&self) -> u64 {
        self.enqueued
    }
}
