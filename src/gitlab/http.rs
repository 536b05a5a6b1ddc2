//! Reqwest-backed GitLab client.
//!
//! Talks to the REST v4 API with `PRIVATE-TOKEN` authentication. Each
//! method maps to exactly one GET; pagination and retries are left to
//! the server defaults.

use crate::gitlab::{GitLabApi, GitLabError, Result};
use crate::models::{Branch, Commit, Identity, Issue, MergeRequest, Note, Project};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Direct (uncached) GitLab REST client.
pub struct HttpClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

/// Payload of `GET /user`. The email field is always present for the
/// token owner, unlike the author stubs on other resources.
#[derive(Debug, Deserialize)]
struct CurrentUser {
    name: String,
    email: String,
}

impl HttpClient {
    /// Create a client for the given instance URL and private token.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http,
        })
    }

    /// GET an API path and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/api/v4/{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GitLabError::Status {
                status: response.status(),
                url,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl GitLabApi for HttpClient {
    async fn current_user(&self) -> Result<Identity> {
        let user: CurrentUser = self.get("user").await?;
        Ok(Identity {
            name: user.name,
            email: user.email,
        })
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get("projects?membership=true").await
    }

    async fn list_branches(&self, project_id: u64) -> Result<Vec<Branch>> {
        self.get(&format!("projects/{}/repository/branches", project_id))
            .await
    }

    async fn get_commit(&self, project_id: u64, sha: &str) -> Result<Commit> {
        self.get(&format!("projects/{}/repository/commits/{}", project_id, sha))
            .await
    }

    async fn list_issues(&self, project_id: u64) -> Result<Vec<Issue>> {
        self.get(&format!("projects/{}/issues", project_id)).await
    }

    async fn list_issue_notes(&self, project_id: u64, issue_iid: u64) -> Result<Vec<Note>> {
        self.get(&format!("projects/{}/issues/{}/notes", project_id, issue_iid))
            .await
    }

    async fn list_merge_requests(&self, project_id: u64) -> Result<Vec<MergeRequest>> {
        self.get(&format!("projects/{}/merge_requests", project_id))
            .await
    }

    async fn list_merge_request_notes(&self, project_id: u64, mr_iid: u64) -> Result<Vec<Note>> {
        self.get(&format!(
            "projects/{}/merge_requests/{}/notes",
            project_id, mr_iid
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            HttpClient::new("https://gitlab.example.com/", "tok", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url, "https://gitlab.example.com");
    }

    #[test]
    fn test_parse_commit_payload() {
        let json = r#"{
            "id": "6104942438c14ec7bd21c6cd5bd995272b3faff6",
            "author_name": "Alice",
            "author_email": "alice@example.com",
            "committed_date": "2024-01-05T09:44:42.000+03:00",
            "parent_ids": ["ae1d9fb46aa2b07ee9836d49862ec4e2c46fbbba"]
        }"#;

        let commit: Commit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.author_name, "Alice");
        assert_eq!(commit.parent_ids.len(), 1);
        assert_eq!(
            commit.committed_on(),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_parse_branch_payload() {
        let json = r#"[{
            "name": "feature/search",
            "commit": {
                "id": "7b5c3cc8be40ee161ae89a06bba6229da1032a0c",
                "author_name": "Alice",
                "author_email": "alice@example.com",
                "committed_date": "2024-01-05T09:44:42.000Z"
            }
        }]"#;

        let branches: Vec<Branch> = serde_json::from_str(json).unwrap();
        assert_eq!(branches[0].name, "feature/search");
        assert_eq!(branches[0].commit.author_name, "Alice");
    }

    #[test]
    fn test_parse_note_without_author_email() {
        let json = r#"[{
            "author": {"name": "Alice"},
            "created_at": "2024-01-03T12:00:00.000Z"
        }]"#;

        let notes: Vec<Note> = serde_json::from_str(json).unwrap();
        assert_eq!(notes[0].author.name, "Alice");
        assert!(notes[0].author.email.is_none());
    }
}
