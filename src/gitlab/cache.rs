//! Per-run memoization store for API reads.
//!
//! One typed slot per operation, keyed by the operation's arguments.
//! Unbounded by design: the cache lives for a single report run and is
//! dropped with the client. `clear` exists for tests and for callers
//! that reuse a client across runs.

use crate::models::{Branch, Commit, Identity, Issue, MergeRequest, Note, Project};
use std::collections::HashMap;

/// Hit/miss counters, readable after a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

/// Memoized results of every read operation.
#[derive(Debug, Default)]
pub struct ApiCache {
    pub(crate) user: Option<Identity>,
    pub(crate) projects: Option<Vec<Project>>,
    pub(crate) branches: HashMap<u64, Vec<Branch>>,
    pub(crate) commits: HashMap<(u64, String), Commit>,
    pub(crate) issues: HashMap<u64, Vec<Issue>>,
    pub(crate) issue_notes: HashMap<(u64, u64), Vec<Note>>,
    pub(crate) merge_requests: HashMap<u64, Vec<MergeRequest>>,
    pub(crate) merge_request_notes: HashMap<(u64, u64), Vec<Note>>,
    stats: CacheStats,
}

impl ApiCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every cached entry and reset the counters.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub(crate) fn record_hit(&mut self) {
        self.stats.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.stats.misses += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_entries_and_stats() {
        let mut cache = ApiCache::new();
        cache.projects = Some(vec![Project {
            id: 1,
            name: "demo".to_string(),
        }]);
        cache.record_hit();
        cache.record_miss();

        cache.clear();

        assert!(cache.projects.is_none());
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn test_stats_counters() {
        let mut cache = ApiCache::new();
        cache.record_miss();
        cache.record_hit();
        cache.record_hit();

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 1);
    }
}
