//! Top-level run: wiring and failure reporting
//!
//! The orchestrator never posts the `failure` status itself; mapping an
//! error to that side effect happens here, so the sequencing logic stays
//! testable without it.

use std::future::Future;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::app::options::AppOptions;
use crate::deploy::orchestrator::{orchestrate, DeploymentApi};
use crate::deploy::process::{ArtifactStager, ShellStager};
use crate::errors::DeployerError;
use crate::http::client::GithubClient;
use crate::models::deployment::NewDeploymentStatus;

/// Run one deployment against the real API client and stager
pub async fn run(options: AppOptions) -> Result<(), DeployerError> {
    let client = GithubClient::new(
        &options.api_base_url,
        &options.owner,
        &options.repo,
        options.token.clone(),
    )?;

    run_with(&client, &ShellStager, &options, tokio::time::sleep).await
}

/// Run one deployment; on error, post a best-effort `failure` status.
///
/// A failure of the failure report itself is logged and swallowed so it
/// cannot mask the primary error; the caller still sees the original
/// failure and exits non-zero.
pub async fn run_with<A, St, S, SFut>(
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
    match orchestrate(api, stager, options, sleep_fn).await {
        Ok(()) => {
            info!("Deployment complete");
            Ok(())
        }
        Err(e) => {
            error!("Deployment failed: {}", e);

            info!("Setting deployment status to failure");
            let status =
                NewDeploymentStatus::failure(e.to_string(), options.environment.clone());
            if let Err(report_err) = api
                .create_deployment_status(options.deployment_id, &status)
                .await
            {
                warn!("Failed to report failure status: {}", report_err);
            }

            Err(e)
        }
    }
}
