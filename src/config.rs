use crate::error::{Error, Result};
use crate::models::Repository;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

const DEFAULT_API_URL: &str = "https://api.github.com";

/// Connection settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub github_api_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        if github_token.is_none() {
            tracing::warn!("GITHUB_TOKEN not set, using unauthenticated requests");
        }

        let github_api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            github_token,
            github_api_url,
        })
    }
}

/// How the milestone argument passed on the command line is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MilestoneReference {
    #[default]
    Title,
    Id,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSort {
    /// Keep the order the issues were retrieved in.
    #[default]
    None,
    /// Case-insensitive by title.
    Title,
}

/// Rules for building the changelog, usually loaded from `changelog.yml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ChangelogConfig {
    pub repository: Option<Repository>,
    pub milestone_reference: MilestoneReference,
    pub issues: IssuesConfig,
    pub sections: Vec<SectionConfig>,
    pub contributors: ContributorsConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IssuesConfig {
    pub sort: IssueSort,
    pub excludes: IssueExcludes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IssueExcludes {
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SectionConfig {
    pub title: String,
    pub labels: Vec<String>,
    pub group: Option<String>,
    pub sort: Option<IssueSort>,
    pub catch_all: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContributorsConfig {
    pub exclude: ContributorExcludes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContributorExcludes {
    pub names: Vec<String>,
}

impl ChangelogConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::Config(format!("Invalid changelog configuration: {}", e)))?;

        for section in &config.sections {
            if section.title.trim().is_empty() {
                return Err(Error::Config("Section title must not be empty".to_string()));
            }
            if section.labels.is_empty() && !section.catch_all {
                return Err(Error::Config(format!(
                    "Section '{}' has no labels and is not a catch-all",
                    section.title
                )));
            }
        }

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        tracing::debug!("Loaded changelog configuration from {}", path.display());
        Self::from_yaml(&yaml)
    }

    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn repository(&self) -> Result<&Repository> {
        self.repository
            .as_ref()
            .ok_or_else(|| Error::Config("No repository configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
repository: acme/widgets
milestone-reference: id
issues:
  sort: title
  excludes:
    labels: ["wontfix", "duplicate"]
sections:
  - title: "Bug Fixes"
    labels: ["bug"]
  - title: "Enhancements"
    labels: ["enhancement"]
    sort: none
  - title: "Other"
    catch-all: true
contributors:
  exclude:
    names: ["dependabot[bot]"]
"#;

    #[test]
    fn test_parse_changelog_config() {
        let config = ChangelogConfig::from_yaml(SAMPLE).unwrap();
        assert_eq!(config.repository().unwrap(), &Repository::new("acme", "widgets"));
        assert_eq!(config.milestone_reference, MilestoneReference::Id);
        assert_eq!(config.issues.sort, IssueSort::Title);
        assert_eq!(config.issues.excludes.labels, vec!["wontfix", "duplicate"]);
        assert_eq!(config.sections.len(), 3);
        assert_eq!(config.sections[1].sort, Some(IssueSort::None));
        assert!(config.sections[2].catch_all);
        assert_eq!(config.contributors.exclude.names, vec!["dependabot[bot]"]);
    }

    #[test]
    fn test_defaults() {
        let config = ChangelogConfig::from_yaml("repository: acme/widgets").unwrap();
        assert_eq!(config.milestone_reference, MilestoneReference::Title);
        assert_eq!(config.issues.sort, IssueSort::None);
        assert!(config.sections.is_empty());
        assert!(config.issues.excludes.labels.is_empty());
    }

    #[test]
    fn test_unknown_milestone_reference_is_rejected() {
        let err = ChangelogConfig::from_yaml("milestone-reference: number").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_bad_repository_is_rejected() {
        let err = ChangelogConfig::from_yaml("repository: widgets").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_section_without_labels_is_rejected() {
        let yaml = "sections:\n  - title: Empty\n";
        assert!(ChangelogConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_missing_repository() {
        let config = ChangelogConfig::default();
        assert!(config.repository().is_err());
        let config = config.with_repository(Repository::new("acme", "widgets"));
        assert!(config.repository().is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = ChangelogConfig::from_file("/nonexistent/changelog.yml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
