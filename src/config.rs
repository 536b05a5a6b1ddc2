//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.standup.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::ReportMode;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// GitLab connection settings.
    #[serde(default)]
    pub gitlab: GitLabConfig,

    /// Report wording settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// GitLab connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLabConfig {
    /// Base URL of the GitLab instance.
    #[serde(default = "default_url")]
    pub url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "https://gitlab.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Report wording settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Heading for the daily report.
    #[serde(default = "default_daily_heading")]
    pub daily_heading: String,

    /// Heading for the weekly report.
    #[serde(default = "default_weekly_heading")]
    pub weekly_heading: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            daily_heading: default_daily_heading(),
            weekly_heading: default_weekly_heading(),
        }
    }
}

fn default_daily_heading() -> String {
    "Today's work:".to_string()
}

fn default_weekly_heading() -> String {
    "This week's work:".to_string()
}

impl ReportConfig {
    /// The heading for the selected report mode.
    pub fn heading(&self, mode: ReportMode) -> &str {
        match mode {
            ReportMode::Daily => &self.daily_heading,
            ReportMode::Weekly => &self.weekly_heading,
        }
    }
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".standup.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref url) = args.gitlab_url {
            self.gitlab.url = url.clone();
        }

        if let Some(timeout) = args.timeout {
            self.gitlab.timeout_seconds = timeout;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.gitlab.url, "https://gitlab.com");
        assert_eq!(config.gitlab.timeout_seconds, 30);
        assert_eq!(config.report.daily_heading, "Today's work:");
    }

    #[test]
    fn test_parse_config() {
        let toml_content = r#"
[gitlab]
url = "https://gitlab.example.com"
timeout_seconds = 10

[report]
daily_heading = "Done today:"
"#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.gitlab.url, "https://gitlab.example.com");
        assert_eq!(config.gitlab.timeout_seconds, 10);
        assert_eq!(config.report.daily_heading, "Done today:");
        // Unset fields fall back to defaults.
        assert_eq!(config.report.weekly_heading, "This week's work:");
    }

    #[test]
    fn test_heading_per_mode() {
        let config = Config::default();
        assert_eq!(config.report.heading(ReportMode::Daily), "Today's work:");
        assert_eq!(
            config.report.heading(ReportMode::Weekly),
            "This week's work:"
        );
    }

    #[test]
    fn test_default_toml_generation() {
        let toml_str = Config::default_toml();
        assert!(!toml_str.is_empty());
        assert!(toml_str.contains("[gitlab]"));
        assert!(toml_str.contains("[report]"));
    }
}
