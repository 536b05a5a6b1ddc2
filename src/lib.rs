//! # Standup
//!
//! `standup` aggregates a single user's GitLab activity (commits,
//! issues, merge requests) over a daily or weekly window and renders a
//! numbered text summary.
//!
//! The crate is organized around four pieces:
//!
//! - [`gitlab`] — the API boundary: a [`gitlab::GitLabApi`] trait, a
//!   reqwest implementation and a caching decorator that memoizes every
//!   read for the life of a run.
//! - [`activity`] — the aggregator that walks projects, branch commit
//!   ancestry, issues and merge requests and buckets them by what the
//!   user did.
//! - [`report`] — the renderer that turns the aggregate into the text
//!   report.
//! - [`models`] — the typed records shared by all of the above.

pub mod activity;
pub mod cli;
pub mod config;
pub mod gitlab;
pub mod models;
pub mod report;
