//! Contribution aggregation.
//!
//! Walks every project visible to the API client and sorts the user's
//! activity into buckets: commits reachable from branch heads, issues
//! created/updated/commented, merge requests opened/commented. All
//! comparisons against the cutoff truncate timestamps to dates.

use crate::gitlab::{GitLabApi, Result};
use crate::models::{
    BranchActivity, ContributionReport, Identity, IssueActivity, MergeRequestActivity, Note,
    ProjectActivity,
};
use chrono::NaiveDate;
use tracing::debug;

/// Aggregates one user's activity through a [`GitLabApi`] client.
pub struct Gatherer<'a, C: GitLabApi> {
    api: &'a C,
}

impl<'a, C: GitLabApi> Gatherer<'a, C> {
    pub fn new(api: &'a C) -> Self {
        Self { api }
    }

    /// Commits on branches whose head the user authored within the window.
    ///
    /// A branch qualifies when its head commit matches the identity and
    /// its committed date is on or after the cutoff. From the head, the
    /// walk follows single-parent ancestry: it stops before the first
    /// commit older than the cutoff and at any commit with zero or
    /// several parents, collecting matching commits newest first.
    pub async fn collect_codes(
        &self,
        project_id: u64,
        identity: &Identity,
        cutoff: NaiveDate,
    ) -> Result<Vec<BranchActivity>> {
        let mut activities = Vec::new();

        for branch in self.api.list_branches(project_id).await? {
            let head = &branch.commit;
            if !identity.matches(&head.author_name, &head.author_email)
                || head.committed_on() < cutoff
            {
                continue;
            }

            let mut commits = Vec::new();
            let mut sha = head.id.clone();
            loop {
                let commit = self.api.get_commit(project_id, &sha).await?;
                if commit.committed_on() < cutoff {
                    break;
                }

                // Merge commits terminate the walk.
                let next = match commit.parent_ids.as_slice() {
                    [parent] => Some(parent.clone()),
                    _ => None,
                };

                if identity.matches(&commit.author_name, &commit.author_email) {
                    commits.push(commit);
                }

                match next {
                    Some(parent) => sha = parent,
                    None => break,
                }
            }

            activities.push(BranchActivity {
                branch: branch.name,
                commits,
            });
        }

        Ok(activities)
    }

    /// Issues sorted into created/updated/noted buckets.
    ///
    /// Created in-window takes precedence over updated in-window; an
    /// issue lands in at most one of those two. The noted bucket is
    /// checked independently for every issue.
    pub async fn collect_issues(
        &self,
        project_id: u64,
        identity: &Identity,
        cutoff: NaiveDate,
    ) -> Result<IssueActivity> {
        let mut issues = self.api.list_issues(project_id).await?;
        issues.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let mut activity = IssueActivity::default();

        for issue in issues {
            if issue.created_on() >= cutoff {
                if identity.matches_author(&issue.author) {
                    activity.created.push(issue.clone());
                }
            } else if issue.updated_on() >= cutoff && identity.matches_author(&issue.author) {
                activity.updated.push(issue.clone());
            }

            let notes = self.api.list_issue_notes(project_id, issue.iid).await?;
            if has_follow_up(&notes, identity, cutoff) {
                activity.noted.push(issue);
            }
        }

        Ok(activity)
    }

    /// Merge requests sorted into opened/noted buckets.
    pub async fn collect_merge_requests(
        &self,
        project_id: u64,
        identity: &Identity,
        cutoff: NaiveDate,
    ) -> Result<MergeRequestActivity> {
        let mut mrs = self.api.list_merge_requests(project_id).await?;
        mrs.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut activity = MergeRequestActivity::default();

        for mr in mrs {
            if identity.matches_author(&mr.author) && mr.created_on() >= cutoff {
                activity.opened.push(mr.clone());
            }

            let notes = self.api.list_merge_request_notes(project_id, mr.iid).await?;
            if has_follow_up(&notes, identity, cutoff) {
                activity.noted.push(mr);
            }
        }

        Ok(activity)
    }

    /// The complete report: every visible project with at least one
    /// non-empty bucket, in the provider's listing order.
    ///
    /// Any provider error aborts the whole run; there is no
    /// partial-result mode.
    pub async fn aggregate(
        &self,
        identity: &Identity,
        cutoff: NaiveDate,
    ) -> Result<ContributionReport> {
        let mut report = ContributionReport::default();

        for project in self.api.list_projects().await? {
            let activity = ProjectActivity {
                name: project.name.clone(),
                codes: self.collect_codes(project.id, identity, cutoff).await?,
                issues: self.collect_issues(project.id, identity, cutoff).await?,
                merge_requests: self
                    .collect_merge_requests(project.id, identity, cutoff)
                    .await?,
            };

            if activity.is_empty() {
                debug!("no activity in {}", project.name);
                continue;
            }

            debug!(
                "{}: {} branches, {} issue entries, {} merge request entries",
                project.name,
                activity.codes.len(),
                activity.issues.created.len()
                    + activity.issues.updated.len()
                    + activity.issues.noted.len(),
                activity.merge_requests.opened.len() + activity.merge_requests.noted.len(),
            );
            report.projects.push(activity);
        }

        Ok(report)
    }
}

/// Notes dated before the cutoff and authored by the user mark an item
/// as followed up.
fn has_follow_up(notes: &[Note], identity: &Identity, cutoff: NaiveDate) -> bool {
    notes
        .iter()
        .any(|note| note.created_on() < cutoff && identity.matches_author(&note.author))
}
