//! GitLab API boundary.
//!
//! [`GitLabApi`] is the trait the aggregator talks to: one method per
//! read operation, nothing more. [`HttpClient`] implements it against
//! the REST v4 API; [`CachedClient`] wraps any implementation with the
//! per-run [`ApiCache`] so repeated lookups within a single report do
//! not hit the network twice.

pub mod cache;
pub mod cached;
pub mod http;

use crate::models::{Branch, Commit, Identity, Issue, MergeRequest, Note, Project};
use async_trait::async_trait;
use thiserror::Error;

pub use cache::{ApiCache, CacheStats};
pub use cached::CachedClient;
pub use http::HttpClient;

/// Errors surfaced by the API boundary.
///
/// Provider errors pass through unmodified: no retry, no translation.
/// Any of these aborts the whole aggregation run.
#[derive(Debug, Error)]
pub enum GitLabError {
    /// Transport-level failure (connection, timeout, TLS).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("GitLab returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

pub type Result<T> = std::result::Result<T, GitLabError>;

/// The read operations the reporter needs from a GitLab instance.
///
/// Identifiers (project id, commit SHA, issue/MR iid) are opaque to
/// callers; they come out of one listing and go back into the next
/// lookup unchanged.
#[async_trait]
pub trait GitLabApi: Send + Sync {
    /// The identity of the authenticated user (token owner).
    async fn current_user(&self) -> Result<Identity>;

    /// All projects visible to the authenticated user.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    /// Branches of a project, each with its head-commit summary.
    async fn list_branches(&self, project_id: u64) -> Result<Vec<Branch>>;

    /// One commit by SHA, including its parent list.
    async fn get_commit(&self, project_id: u64, sha: &str) -> Result<Commit>;

    /// Issues of a project.
    async fn list_issues(&self, project_id: u64) -> Result<Vec<Issue>>;

    /// Notes on one issue.
    async fn list_issue_notes(&self, project_id: u64, issue_iid: u64) -> Result<Vec<Note>>;

    /// Merge requests of a project.
    async fn list_merge_requests(&self, project_id: u64) -> Result<Vec<MergeRequest>>;

    /// Notes on one merge request.
    async fn list_merge_request_notes(&self, project_id: u64, mr_iid: u64) -> Result<Vec<Note>>;
}
