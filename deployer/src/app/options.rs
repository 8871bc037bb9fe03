//! Application configuration options

use std::path::PathBuf;

use clap::Parser;
use secrecy::SecretString;

use crate::errors::DeployerError;
use crate::utils;

/// Deploy a GitHub Actions build artifact and report deployment status
#[derive(Debug, Parser)]
#[command(name = "ghdeploy", version, about)]
pub struct Cli {
    /// Github repository (owner/name)
    pub repo: String,

    /// Deployment ID
    pub deployment_id: u64,

    /// Deployment directory
    pub deploy_dir: PathBuf,

    /// Deployment environment
    #[arg(short, long, default_value = "production")]
    pub environment: String,

    /// Github token
    #[arg(short, long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Github API base URL
    #[arg(long, default_value = "https://api.github.com")]
    pub api_url: String,
}

/// Main application options
///
/// Immutable for the process lifetime; constructed once at startup and
/// passed explicitly to the orchestrator.
#[derive(Debug)]
pub struct AppOptions {
    /// Repository owner
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Deployment to drive
    pub deployment_id: u64,

    /// Local directory the build is staged into
    pub deploy_dir: PathBuf,

    /// Environment label reported with each status
    pub environment: String,

    /// API token
    pub token: SecretString,

    /// API base URL
    pub api_base_url: String,

    /// Local hostname, reported in status descriptions
    pub server: String,
}

impl AppOptions {
    /// Build options from parsed CLI arguments
    pub fn from_cli(cli: Cli) -> Result<Self, DeployerError> {
        let (owner, repo) = parse_repo(&cli.repo)?;

        Ok(Self {
            owner,
            repo,
            deployment_id: cli.deployment_id,
            deploy_dir: cli.deploy_dir,
            environment: cli.environment,
            token: SecretString::from(cli.token),
            api_base_url: cli.api_url,
            server: utils::hostname(),
        })
    }
}

fn parse_repo(input: &str) -> Result<(String, String), DeployerError> {
    match input.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(DeployerError::Config(format!(
            "Invalid repository {:?}, expected owner/name",
            input
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo() {
        assert_eq!(
            parse_repo("myorg/myrepo").unwrap(),
            ("myorg".to_string(), "myrepo".to_string())
        );
    }

    #[test]
    fn test_parse_repo_rejects_bad_input() {
        assert!(parse_repo("myrepo").is_err());
        assert!(parse_repo("myorg/").is_err());
        assert!(parse_repo("/myrepo").is_err());
        assert!(parse_repo("a/b/c").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from([
            "ghdeploy", "myorg/myrepo", "12345", "/srv/app", "--token", "t0ken",
        ])
        .unwrap();

        assert_eq!(cli.environment, "production");
        assert_eq!(cli.api_url, "https://api.github.com");

        let options = AppOptions::from_cli(cli).unwrap();
        assert_eq!(options.owner, "myorg");
        assert_eq!(options.repo, "myrepo");
        assert_eq!(options.deployment_id, 12345);
        assert_eq!(options.deploy_dir, PathBuf::from("/srv/app"));
    }

    #[test]
    fn test_cli_environment_flag() {
        let cli = Cli::try_parse_from([
            "ghdeploy", "myorg/myrepo", "12345", "/srv/app", "-t", "t0ken", "-e", "staging",
        ])
        .unwrap();

        assert_eq!(cli.environment, "staging");
    }

    #[test]
    fn test_cli_requires_positional_args() {
        assert!(Cli::try_parse_from(["ghdeploy", "myorg/myrepo", "-t", "t0ken"]).is_err());
    }
}
