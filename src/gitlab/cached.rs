//! Caching decorator over any [`GitLabApi`] implementation.
//!
//! Lookup-or-fetch-and-store per operation: a hit returns the cached
//! value without touching the inner client, a miss delegates and then
//! stores the result. A failed fetch stores nothing.
//!
//! The cache lock is never held across an await; each operation takes
//! it once for the lookup and once for the insert.

use crate::gitlab::{ApiCache, CacheStats, GitLabApi, Result};
use crate::models::{Branch, Commit, Identity, Issue, MergeRequest, Note, Project};
use async_trait::async_trait;
use std::sync::Mutex;

/// A [`GitLabApi`] that memoizes every read for the life of the client.
pub struct CachedClient<C> {
    inner: C,
    cache: Mutex<ApiCache>,
}

impl<C> CachedClient<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            cache: Mutex::new(ApiCache::new()),
        }
    }

    /// Drop all memoized results, e.g. between runs on a reused client.
    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// The wrapped client.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.lock().stats()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ApiCache> {
        self.cache.lock().expect("cache mutex poisoned")
    }
}

#[async_trait]
impl<C: GitLabApi> GitLabApi for CachedClient<C> {
    async fn current_user(&self) -> Result<Identity> {
        {
            let mut cache = self.lock();
            if let Some(user) = cache.user.clone() {
                cache.record_hit();
                return Ok(user);
            }
        }

        let user = self.inner.current_user().await?;
        let mut cache = self.lock();
        cache.record_miss();
        cache.user = Some(user.clone());
        Ok(user)
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        {
            let mut cache = self.lock();
            if let Some(projects) = cache.projects.clone() {
                cache.record_hit();
                return Ok(projects);
            }
        }

        let projects = self.inner.list_projects().await?;
        let mut cache = self.lock();
        cache.record_miss();
        cache.projects = Some(projects.clone());
        Ok(projects)
    }

    async fn list_branches(&self, project_id: u64) -> Result<Vec<Branch>> {
        {
            let mut cache = self.lock();
            if let Some(branches) = cache.branches.get(&project_id).cloned() {
                cache.record_hit();
                return Ok(branches);
            }
        }

        let branches = self.inner.list_branches(project_id).await?;
        let mut cache = self.lock();
        cache.record_miss();
        cache.branches.insert(project_id, branches.clone());
        Ok(branches)
    }

    async fn get_commit(&self, project_id: u64, sha: &str) -> Result<Commit> {
        let key = (project_id, sha.to_string());
        {
            let mut cache = self.lock();
            if let Some(commit) = cache.commits.get(&key).cloned() {
                cache.record_hit();
                return Ok(commit);
            }
        }

        let commit = self.inner.get_commit(project_id, sha).await?;
        let mut cache = self.lock();
        cache.record_miss();
        cache.commits.insert(key, commit.clone());
        Ok(commit)
    }

    async fn list_issues(&self, project_id: u64) -> Result<Vec<Issue>> {
        {
            let mut cache = self.lock();
            if let Some(issues) = cache.issues.get(&project_id).cloned() {
                cache.record_hit();
                return Ok(issues);
            }
        }

        let issues = self.inner.list_issues(project_id).await?;
        let mut cache = self.lock();
        cache.record_miss();
        cache.issues.insert(project_id, issues.clone());
        Ok(issues)
    }

    async fn list_issue_notes(&self, project_id: u64, issue_iid: u64) -> Result<Vec<Note>> {
        let key = (project_id, issue_iid);
        {
            let mut cache = self.lock();
            if let Some(notes) = cache.issue_notes.get(&key).cloned() {
                cache.record_hit();
                return Ok(notes);
            }
        }

        let notes = self.inner.list_issue_notes(project_id, issue_iid).await?;
        let mut cache = self.lock();
        cache.record_miss();
        cache.issue_notes.insert(key, notes.clone());
        Ok(notes)
    }

    async fn list_merge_requests(&self, project_id: u64) -> Result<Vec<MergeRequest>> {
        {
            let mut cache = self.lock();
            if let Some(mrs) = cache.merge_requests.get(&project_id).cloned() {
                cache.record_hit();
                return Ok(mrs);
            }
        }

        let mrs = self.inner.list_merge_requests(project_id).await?;
        let mut cache = self.lock();
        cache.record_miss();
        cache.merge_requests.insert(project_id, mrs.clone());
        Ok(mrs)
    }

    async fn list_merge_request_notes(&self, project_id: u64, mr_iid: u64) -> Result<Vec<Note>> {
        let key = (project_id, mr_iid);
        {
            let mut cache = self.lock();
            if let Some(notes) = cache.merge_request_notes.get(&key).cloned() {
                cache.record_hit();
                return Ok(notes);
            }
        }

        let notes = self
            .inner
            .list_merge_request_notes(project_id, mr_iid)
            .await?;
        let mut cache = self.lock();
        cache.record_miss();
        cache.merge_request_notes.insert(key, notes.clone());
        Ok(notes)
    }
}
