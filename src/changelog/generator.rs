use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::changelog::formatter;
use crate::changelog::sections::{sort_issues, ChangelogSections};
use crate::config::{ChangelogConfig, IssueSort, MilestoneReference};
use crate::error::{Error, Result};
use crate::github::IssueTracker;
use crate::models::{Issue, Repository, User};

/// Builds a markdown changelog listing the fixes, enhancements and
/// contributors of a milestone.
pub struct ChangelogGenerator {
    tracker: Arc<dyn IssueTracker>,
    repository: Repository,
    milestone_reference: MilestoneReference,
    sort: IssueSort,
    exclude_labels: HashSet<String>,
    exclude_contributors: HashSet<String>,
    sections: ChangelogSections,
}

impl ChangelogGenerator {
    pub fn new(tracker: impl IssueTracker + 'static, config: &ChangelogConfig) -> Result<Self> {
        Ok(Self {
            tracker: Arc::new(tracker),
            repository: config.repository()?.clone(),
            milestone_reference: config.milestone_reference,
            sort: config.issues.sort,
            exclude_labels: config.issues.excludes.labels.iter().cloned().collect(),
            exclude_contributors: config.contributors.exclude.names.iter().cloned().collect(),
            sections: ChangelogSections::new(&config.sections),
        })
    }

    /// Generates the changelog for `milestone` and writes it to `path`,
    /// replacing any existing file.
    pub async fn generate(&self, milestone: &str, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.generate_content(milestone).await?;
        tokio::fs::write(path, content).await?;
        tracing::info!("Changelog written to: {}", path.display());
        Ok(())
    }

    pub async fn generate_content(&self, milestone: &str) -> Result<String> {
        let milestone_number = self.resolve_milestone(milestone).await?;
        let issues = self.get_issues(milestone_number).await?;

        let mut collated = self.sections.collate(&issues);
        for (section, issues) in collated.iter_mut() {
            sort_issues(section.sort().unwrap_or(self.sort), issues);
        }

        let contributors = self.get_contributors(&issues);
        tracing::info!(
            "{} issues in {} sections, {} contributors",
            issues.len(),
            collated.len(),
            contributors.len()
        );

        Ok(formatter::render(&collated, &contributors))
    }

    async fn resolve_milestone(&self, milestone: &str) -> Result<u64> {
        let number = match self.milestone_reference {
            MilestoneReference::Title => {
                self.tracker
                    .milestone_number(milestone, &self.repository)
                    .await?
            }
            MilestoneReference::Id => milestone
                .trim()
                .parse()
                .map_err(|_| Error::InvalidMilestoneId(milestone.to_string()))?,
        };
        tracing::info!("Resolved milestone '{}' to #{}", milestone, number);
        Ok(number)
    }

    async fn get_issues(&self, milestone_number: u64) -> Result<Vec<Issue>> {
        let mut issues = self
            .tracker
            .issues_for_milestone(milestone_number, &self.repository)
            .await?;
        issues.retain(|issue| {
            let excluded = self.is_excluded(issue);
            if excluded {
                tracing::debug!("Excluding issue #{}", issue.number);
            }
            !excluded
        });
        Ok(issues)
    }

    fn is_excluded(&self, issue: &Issue) -> bool {
        issue
            .labels
            .iter()
            .any(|label| self.exclude_labels.contains(&label.name))
    }

    fn get_contributors(&self, issues: &[Issue]) -> IndexSet<User> {
        issues
            .iter()
            .filter_map(Issue::author)
            .filter(|user| !self.exclude_contributors.contains(&user.name))
            .cloned()
            .collect()
    }
}
