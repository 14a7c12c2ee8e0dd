use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use github_changelog::models::Repository;
use github_changelog::{ChangelogConfig, ChangelogGenerator, Config, GitHubClient};

#[derive(Parser, Debug)]
#[command(name = "github-changelog")]
#[command(version)]
#[command(about = "Generate a markdown changelog from the issues on a GitHub milestone")]
struct Args {
    /// Milestone title, or number when `milestone-reference: id` is configured
    milestone: String,

    /// File to write the changelog to
    output: PathBuf,

    /// Changelog configuration file
    #[arg(short, long, default_value = "changelog.yml")]
    config: PathBuf,

    /// Repository as owner/name, overrides the configuration file
    #[arg(short, long)]
    repository: Option<Repository>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("github_changelog=info".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = Config::from_env()?;

    let mut changelog_config = ChangelogConfig::from_file(&args.config)?;
    if let Some(repository) = args.repository {
        changelog_config = changelog_config.with_repository(repository);
    }

    let github = GitHubClient::from_config(&config)?;
    let generator = ChangelogGenerator::new(github, &changelog_config)?;

    tracing::info!("Generating changelog for milestone: {}", args.milestone);
    if let Err(e) = generator.generate(&args.milestone, &args.output).await {
        if e.is_user_error() {
            tracing::error!("{}", e);
            std::process::exit(2);
        }
        return Err(e.into());
    }

    Ok(())
}
