use std::collections::HashSet;
use std::fmt;

use crate::config::{IssueSort, SectionConfig};
use crate::models::Issue;

/// A heading in the changelog together with the labels that select issues
/// for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSection {
    title: String,
    labels: Vec<String>,
    group: Option<String>,
    sort: Option<IssueSort>,
    catch_all: bool,
}

impl ChangelogSection {
    pub fn new(title: impl Into<String>, labels: &[&str]) -> Self {
        Self {
            title: title.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            group: None,
            sort: None,
            catch_all: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Sort override for this section, if any.
    pub fn sort(&self) -> Option<IssueSort> {
        self.sort
    }

    pub fn is_catch_all(&self) -> bool {
        self.catch_all
    }

    fn matches(&self, issue: &Issue) -> bool {
        issue
            .labels
            .iter()
            .any(|label| self.labels.iter().any(|l| *l == label.name))
    }
}

impl From<&SectionConfig> for ChangelogSection {
    fn from(config: &SectionConfig) -> Self {
        Self {
            title: config.title.clone(),
            labels: config.labels.clone(),
            group: config.group.clone(),
            sort: config.sort,
            catch_all: config.catch_all,
        }
    }
}

impl fmt::Display for ChangelogSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Ordered section rules. Within a group the first matching section claims
/// an issue; sections without a group all share one implicit group.
#[derive(Debug, Clone)]
pub struct ChangelogSections {
    sections: Vec<ChangelogSection>,
}

impl ChangelogSections {
    pub fn new(configs: &[SectionConfig]) -> Self {
        let sections = if configs.is_empty() {
            default_sections()
        } else {
            configs.iter().map(ChangelogSection::from).collect()
        };
        Self { sections }
    }

    pub fn sections(&self) -> &[ChangelogSection] {
        &self.sections
    }

    /// Assigns issues to sections, keeping configuration order and
    /// retrieval order. Sections that end up empty are left out.
    pub fn collate(&self, issues: &[Issue]) -> Vec<(&ChangelogSection, Vec<Issue>)> {
        let mut collated: Vec<Vec<Issue>> = vec![Vec::new(); self.sections.len()];

        for issue in issues {
            let mut claimed_groups: HashSet<Option<&str>> = HashSet::new();

            for (index, section) in self.sections.iter().enumerate() {
                if !claimed_groups.contains(&section.group()) && section.matches(issue) {
                    claimed_groups.insert(section.group());
                    collated[index].push(issue.clone());
                }
            }

            for (index, section) in self.sections.iter().enumerate() {
                if section.is_catch_all() && claimed_groups.insert(section.group()) {
                    collated[index].push(issue.clone());
                }
            }

            if claimed_groups.is_empty() {
                tracing::debug!("Issue #{} matched no section", issue.number);
            }
        }

        self.sections
            .iter()
            .zip(collated)
            .filter(|(_, issues)| !issues.is_empty())
            .collect()
    }
}

impl Default for ChangelogSections {
    fn default() -> Self {
        Self::new(&[])
    }
}

fn default_sections() -> Vec<ChangelogSection> {
    vec![
        ChangelogSection::new(":star: New Features", &["enhancement"]),
        ChangelogSection::new(":beetle: Bug Fixes", &["regression", "bug"]),
        ChangelogSection::new(":notebook_with_decorative_cover: Documentation", &["documentation"]),
        ChangelogSection::new(":hammer: Dependency Upgrades", &["dependency-upgrade"]),
    ]
}

/// Sorts in place. The title sort is case-insensitive and stable.
pub fn sort_issues(sort: IssueSort, issues: &mut [Issue]) {
    match sort {
        IssueSort::Title => issues.sort_by_cached_key(|issue| issue.title.to_lowercase()),
        IssueSort::None => {}
    }
}
