use async_trait::async_trait;
use reqwest::{header, Client, Response};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::RateLimiter;
use crate::github::tracker::IssueTracker;
use crate::models::{Issue, Milestone, Repository};

const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_base_url(config.github_token.as_deref(), &config.github_api_url)
    }

    pub fn with_base_url(token: Option<&str>, base_url: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("github-changelog/0.1"),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn get_milestones(&self, repository: &Repository) -> Result<Vec<Milestone>> {
        let url = format!(
            "{}/repos/{}/{}/milestones?state=all",
            self.base_url, repository.owner, repository.name
        );
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::debug!("Fetching milestones for: {}", repository);
        paginator.fetch_all(&url, PER_PAGE).await
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl IssueTracker for GitHubClient {
    async fn milestone_number(&self, title: &str, repository: &Repository) -> Result<u64> {
        let milestones = self.get_milestones(repository).await?;
        milestones
            .into_iter()
            .find(|m| m.title == title)
            .map(|m| m.number)
            .ok_or_else(|| Error::MilestoneNotFound(title.to_string()))
    }

    async fn issues_for_milestone(
        &self,
        milestone: u64,
        repository: &Repository,
    ) -> Result<Vec<Issue>> {
        let url = format!(
            "{}/repos/{}/{}/issues?milestone={}&state=all",
            self.base_url, repository.owner, repository.name, milestone
        );
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching issues for milestone {} in {}", milestone, repository);
        let issues: Vec<Issue> = paginator.fetch_all(&url, PER_PAGE).await?;
        tracing::debug!(
            "Fetched {} issues, rate limit remaining: {:?}",
            issues.len(),
            self.rate_limiter.remaining().await
        );
        Ok(issues)
    }
}

pub(crate) async fn ensure_success(response: Response, url: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "Request to {} failed: {} - {}",
        url, status, body
    )))
}
