//! Deployment orchestration sequence
//!
//! Drives the whole call sequence against the deployment API: fetch the
//! deployment, report in_progress, poll the originating run for artifacts,
//! resolve and download the `dist` archive, reset and repopulate the target
//! directory, report success. Any error aborts the remaining steps; the
//! caller owns the failure-status side effect.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::app::options::AppOptions;
use crate::deploy::process::ArtifactStager;
use crate::errors::DeployerError;
use crate::http::client::GithubClient;
use crate::models::artifact::{Artifact, ArtifactList};
use crate::models::deployment::{Deployment, NewDeploymentStatus};
use crate::retry::{poll_until, RetryOptions};

/// Artifact name the build pipeline must upload
pub const DIST_ARTIFACT: &str = "dist";

/// Filename the archive is staged under inside the target directory
pub const ARCHIVE_NAME: &str = "build.zip";

/// Subdirectories replaced by each deployment
pub const RESET_SUBDIRS: &[&str] = &["ui", "api"];

/// Artifact listing poll: the run may still be uploading when the
/// deployment is created
pub const ARTIFACT_POLL: RetryOptions = RetryOptions {
    max_attempts: 5,
    delay: Duration::from_millis(1500),
};

/// Remote deployment API consumed by the orchestrator.
///
/// `GithubClient` is the real implementation; tests drive the sequence
/// with a recording fake.
#[async_trait]
pub trait DeploymentApi {
    async fn get_deployment(&self, deployment_id: u64) -> Result<Deployment, DeployerError>;

    async fn create_deployment_status(
        &self,
        deployment_id: u64,
        status: &NewDeploymentStatus,
    ) -> Result<(), DeployerError>;

    async fn list_run_artifacts(&self, run_id: u64) -> Result<ArtifactList, DeployerError>;

    async fn artifact_location(&self, artifact_id: u64) -> Result<Option<String>, DeployerError>;
}

#[async_trait]
impl DeploymentApi for GithubClient {
    async fn get_deployment(&self, deployment_id: u64) -> Result<Deployment, DeployerError> {
        GithubClient::get_deployment(self, deployment_id).await
    }

    async fn create_deployment_status(
        &self,
        deployment_id: u64,
        status: &NewDeploymentStatus,
    ) -> Result<(), DeployerError> {
        GithubClient::create_deployment_status(self, deployment_id, status).await
    }

    async fn list_run_artifacts(&self, run_id: u64) -> Result<ArtifactList, DeployerError> {
        GithubClient::list_run_artifacts(self, run_id).await
    }

    async fn artifact_location(&self, artifact_id: u64) -> Result<Option<String>, DeployerError> {
        GithubClient::artifact_location(self, artifact_id).await
    }
}

/// Run the deployment sequence once.
///
/// Strictly sequential; the artifact poll is the only bounded-retry
/// construct. The sleep is injected so tests run without real delays.
pub async fn orchestrate<A, St, S, SFut>(
    api: &A,
    stager: &St,
    options: &AppOptions,
    sleep_fn: S,
) -> Result<(), DeployerError>
where
    A: DeploymentApi + Sync,
    St: ArtifactStager + Sync,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    info!("Getting deployment data (id: {})", options.deployment_id);
    let deployment = api.get_deployment(options.deployment_id).await?;

    info!("Setting deployment status to in_progress");
    let started = NewDeploymentStatus::in_progress(
        format!(
            "Started {} deployment on {}",
            options.environment, options.server
        ),
        options.environment.clone(),
    );
    api.create_deployment_status(deployment.id, &started).await?;

    let run_id = deployment.run_id()?;
    info!("Getting artifacts for run {}", run_id);
    let artifacts = fetch_artifacts(api, run_id, sleep_fn)
        .await?
        .ok_or(DeployerError::NoArtifacts)?;

    let artifact = artifacts
        .into_iter()
        .find(|a| a.name == DIST_ARTIFACT)
        .ok_or_else(|| DeployerError::ArtifactNotFound(DIST_ARTIFACT.to_string()))?;

    info!("Getting download URL for artifact {}", artifact.id);
    let download_url = api
        .artifact_location(artifact.id)
        .await?
        .ok_or(DeployerError::MissingLocation)?;

    let archive = options.deploy_dir.join(ARCHIVE_NAME);
    info!("Downloading artifact from {}", download_url);
    stager.fetch(&download_url, &archive).await?;

    info!("Cleaning deployment directory");
    for subdir in RESET_SUBDIRS {
        stager
            .remove_if_exists(&options.deploy_dir.join(subdir))
            .await?;
    }

    info!("Extracting build");
    stager.extract(&archive, &options.deploy_dir).await?;

    info!("Setting deployment status to success");
    api.create_deployment_status(
        deployment.id,
        &NewDeploymentStatus::success(options.environment.clone()),
    )
    .await?;

    Ok(())
}

/// Poll the run's artifact listing until it is non-empty
async fn fetch_artifacts<A, S, SFut>(
    api: &A,
    run_id: u64,
    sleep_fn: S,
) -> Result<Option<Vec<Artifact>>, DeployerError>
where
    A: DeploymentApi + Sync,
    S: Fn(Duration) -> SFut,
    SFut: Future<Output = ()>,
{
    poll_until(&ARTIFACT_POLL, sleep_fn, move || async move {
        api.list_run_artifacts(run_id).await.map(|listing| {
            if listing.total_count > 0 {
                Some(listing.artifacts)
            } else {
                None
            }
        })
    })
    .await
}
