use async_trait::async_trait;
use crate::error::Result;
use crate::models::{Issue, Repository};

/// Read-only queries the changelog needs from an issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Number of the milestone whose title is exactly `title`.
    async fn milestone_number(&self, title: &str, repository: &Repository) -> Result<u64>;

    /// Every issue and pull request on the milestone, in any state.
    async fn issues_for_milestone(&self, milestone: u64, repository: &Repository)
        -> Result<Vec<Issue>>;
}
