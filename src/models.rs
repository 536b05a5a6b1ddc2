//! Data models for the contribution reporter.
//!
//! This module contains the typed records parsed at the GitLab API
//! boundary and the aggregate structures the renderer consumes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The (name, email) pair used to match authorship across commits,
/// issues, merge requests and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name as reported by GitLab.
    pub name: String,
    /// Primary email of the account.
    pub email: String,
}

impl Identity {
    /// Returns true when either the name or the email matches.
    ///
    /// This is an intentional OR: commits frequently carry a work email
    /// while issues carry the display name, and both should count.
    pub fn matches(&self, name: &str, email: &str) -> bool {
        self.name == name || self.email == email
    }

    /// Matches against an [`Author`], whose email may be absent.
    pub fn matches_author(&self, author: &Author) -> bool {
        self.name == author.name
            || author
                .email
                .as_deref()
                .map(|e| e == self.email)
                .unwrap_or(false)
    }
}

/// Author record attached to issues, merge requests and notes.
///
/// GitLab omits the email on most author payloads, so it is optional
/// here and only participates in matching when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// A project visible to the authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

/// A single commit, fetched on demand during the ancestry walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit SHA.
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub committed_date: DateTime<Utc>,
    /// Parent SHAs in order. One parent means the walk continues;
    /// zero or several terminate it.
    pub parent_ids: Vec<String>,
}

impl Commit {
    /// The committed date truncated to a calendar date.
    ///
    /// All cutoff comparisons operate on dates, never on times.
    pub fn committed_on(&self) -> NaiveDate {
        self.committed_date.date_naive()
    }
}

/// A branch and its head commit as returned by the branch listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: BranchHead,
}

/// The head-commit summary embedded in a branch payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchHead {
    pub id: String,
    pub author_name: String,
    pub author_email: String,
    pub committed_date: DateTime<Utc>,
}

impl BranchHead {
    pub fn committed_on(&self) -> NaiveDate {
        self.committed_date.date_naive()
    }
}

/// An issue of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Project-scoped issue number.
    pub iid: u64,
    pub title: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    pub fn updated_on(&self) -> NaiveDate {
        self.updated_at.date_naive()
    }
}

/// A merge request of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeRequest {
    /// Project-scoped merge request number.
    pub iid: u64,
    pub title: String,
    pub author: Author,
    pub created_at: DateTime<Utc>,
}

impl MergeRequest {
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// A comment on an issue or merge request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub author: Author,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn created_on(&self) -> NaiveDate {
        self.created_at.date_naive()
    }
}

/// Commits attributed to the user on one branch, newest first.
#[derive(Debug, Clone, Default)]
pub struct BranchActivity {
    pub branch: String,
    pub commits: Vec<Commit>,
}

/// Issue buckets for one project.
///
/// `created` and `updated` are mutually exclusive for a given issue;
/// `noted` is independent and may overlap with either.
#[derive(Debug, Clone, Default)]
pub struct IssueActivity {
    pub created: Vec<Issue>,
    pub updated: Vec<Issue>,
    pub noted: Vec<Issue>,
}

impl IssueActivity {
    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.noted.is_empty()
    }
}

/// Merge request buckets for one project.
#[derive(Debug, Clone, Default)]
pub struct MergeRequestActivity {
    pub opened: Vec<MergeRequest>,
    pub noted: Vec<MergeRequest>,
}

impl MergeRequestActivity {
    pub fn is_empty(&self) -> bool {
        self.opened.is_empty() && self.noted.is_empty()
    }
}

/// Everything the user did in one project within the window.
#[derive(Debug, Clone, Default)]
pub struct ProjectActivity {
    pub name: String,
    pub codes: Vec<BranchActivity>,
    pub issues: IssueActivity,
    pub merge_requests: MergeRequestActivity,
}

impl ProjectActivity {
    /// A project with nothing in any bucket is dropped from the report.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty() && self.issues.is_empty() && self.merge_requests.is_empty()
    }
}

/// The complete aggregation result, in provider listing order.
#[derive(Debug, Clone, Default)]
pub struct ContributionReport {
    pub projects: Vec<ProjectActivity>,
}

impl ContributionReport {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn alice() -> Identity {
        Identity {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        }
    }

    #[test]
    fn test_identity_matches_name_or_email() {
        let id = alice();
        assert!(id.matches("Alice", "other@example.com"));
        assert!(id.matches("Somebody", "alice@example.com"));
        assert!(!id.matches("Somebody", "other@example.com"));
    }

    #[test]
    fn test_identity_matches_author_without_email() {
        let id = alice();
        let by_name = Author {
            name: "Alice".to_string(),
            email: None,
        };
        let stranger = Author {
            name: "Bob".to_string(),
            email: None,
        };
        assert!(id.matches_author(&by_name));
        assert!(!id.matches_author(&stranger));
    }

    #[test]
    fn test_identity_matches_author_by_email() {
        let id = alice();
        let author = Author {
            name: "A. Liddell".to_string(),
            email: Some("alice@example.com".to_string()),
        };
        assert!(id.matches_author(&author));
    }

    #[test]
    fn test_commit_date_truncation() {
        let commit = Commit {
            id: "abc".to_string(),
            author_name: "Alice".to_string(),
            author_email: "alice@example.com".to_string(),
            committed_date: Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap(),
            parent_ids: vec![],
        };
        assert_eq!(
            commit.committed_on(),
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }

    #[test]
    fn test_project_activity_empty() {
        let mut activity = ProjectActivity {
            name: "demo".to_string(),
            ..Default::default()
        };
        assert!(activity.is_empty());

        activity.issues.noted.push(Issue {
            iid: 1,
            title: "something".to_string(),
            author: Author {
                name: "Alice".to_string(),
                email: None,
            },
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        });
        assert!(!activity.is_empty());
    }
}
