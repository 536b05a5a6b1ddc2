//! Text rendering of the contribution report.
//!
//! One block per project: the project name, then a single running
//! counter across every line of that project. Branch and merge request
//! titles follow the `kind/description` naming convention; the kind
//! translates through a fixed label table and underscores in the
//! description become spaces.

use crate::models::{ContributionReport, ProjectActivity};

/// Label table for the `kind/` prefix of branch and MR titles.
fn kind_label(kind: &str) -> Option<&'static str> {
    match kind {
        "feature" => Some("feature"),
        "fix" => Some("bug"),
        "refactor" => Some("refactor"),
        _ => None,
    }
}

/// Split a `kind/description` title, defaulting the kind to `feature`
/// when there is no separator.
fn split_title(title: &str) -> (&str, &str) {
    match title.split_once('/') {
        Some((kind, description)) => (kind, description),
        None => ("feature", title),
    }
}

/// Human form of a branch or MR title: translated kind label plus the
/// description with underscores replaced by spaces.
fn describe(title: &str) -> String {
    let (kind, description) = split_title(title);
    let description = description.replace('_', " ");

    match kind_label(kind) {
        Some(label) => format!("{} {}", label, description),
        None => description,
    }
}

/// Render the full report under the given heading.
pub fn render(report: &ContributionReport, heading: &str) -> String {
    let mut text = format!("{}\n\n", heading);

    for project in &report.projects {
        if project.is_empty() {
            continue;
        }
        text.push_str(&render_project(project));
    }

    text
}

fn render_project(project: &ProjectActivity) -> String {
    let mut text = format!("{}:\n", project.name);
    let mut index = 1;

    for code in &project.codes {
        text.push_str(&format!(
            "{}. Progress on {}\n",
            index,
            describe(&code.branch)
        ));
        index += 1;
    }

    let issues = &project.issues;
    if !issues.created.is_empty() {
        text.push_str(&format!(
            "{}. Opened issues ({}) to be resolved\n",
            index,
            join_titles(issues.created.iter().map(|i| i.title.as_str()))
        ));
        index += 1;
    }
    if !issues.updated.is_empty() {
        text.push_str(&format!(
            "{}. Updated issues ({})\n",
            index,
            join_titles(issues.updated.iter().map(|i| i.title.as_str()))
        ));
        index += 1;
    }
    if !issues.noted.is_empty() {
        text.push_str(&format!(
            "{}. Followed up on ({})\n",
            index,
            join_titles(issues.noted.iter().map(|i| i.title.as_str()))
        ));
        index += 1;
    }

    let mrs = &project.merge_requests;
    for mr in &mrs.opened {
        text.push_str(&format!(
            "{}. Finished {} and submitted it for release\n",
            index,
            describe(&mr.title)
        ));
        index += 1;
    }
    if !mrs.noted.is_empty() {
        text.push_str(&format!(
            "{}. Followed up on the review of ({})\n",
            index,
            mrs.noted
                .iter()
                .map(|mr| describe(&mr.title))
                .collect::<Vec<_>>()
                .join(",")
        ));
    }

    text
}

fn join_titles<'a>(titles: impl Iterator<Item = &'a str>) -> String {
    titles.collect::<Vec<_>>().join(",")
}
