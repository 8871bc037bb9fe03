//! Deployment API endpoints

use http::StatusCode;

use crate::errors::DeployerError;
use crate::http::client::GithubClient;
use crate::models::deployment::{Deployment, NewDeploymentStatus};

impl GithubClient {
    /// Fetch one deployment record
    pub async fn get_deployment(&self, deployment_id: u64) -> Result<Deployment, DeployerError> {
        let path = format!("/deployments/{}", deployment_id);
        match self.get(&path).await {
            Err(DeployerError::Api { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(DeployerError::DeploymentNotFound(deployment_id))
            }
            other => other,
        }
    }

    /// Append a status entry to the deployment's history
    pub async fn create_deployment_status(
        &self,
        deployment_id: u64,
        status: &NewDeploymentStatus,
    ) -> Result<(), DeployerError> {
        let path = format!("/deployments/{}/statuses", deployment_id);
        let _: serde_json::Value = self.post(&path, status).await?;
        Ok(())
    }
}
