use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Milestone not found: {0}")]
    MilestoneNotFound(String),

    #[error("Invalid milestone id: {0}")]
    InvalidMilestoneId(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors caused by what the user asked for rather than by the service.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::MilestoneNotFound(_) | Error::InvalidMilestoneId(_) | Error::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors() {
        assert!(Error::MilestoneNotFound("2.1.0".to_string()).is_user_error());
        assert!(Error::InvalidMilestoneId("abc".to_string()).is_user_error());
        assert!(!Error::GitHubApi("500".to_string()).is_user_error());
    }
}
