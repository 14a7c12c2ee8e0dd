pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod changelog;

pub use config::{ChangelogConfig, Config, IssueSort, MilestoneReference};
pub use error::{Error, Result};
pub use github::{GitHubClient, IssueTracker};
pub use changelog::ChangelogGenerator;
