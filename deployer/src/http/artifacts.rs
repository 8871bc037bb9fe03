//! Actions artifact endpoints

use http::header;
use tracing::warn;
use url::Url;

use crate::errors::DeployerError;
use crate::http::client::GithubClient;
use crate::models::artifact::ArtifactList;

impl GithubClient {
    /// List the artifacts attached to one Actions run
    pub async fn list_run_artifacts(&self, run_id: u64) -> Result<ArtifactList, DeployerError> {
        let path = format!("/actions/runs/{}/artifacts", run_id);
        self.get(&path).await
    }

    /// Resolve the real download URL for an artifact's zip archive.
    ///
    /// The archive endpoint answers with a redirect to short-lived blob
    /// storage; with redirect following disabled the `Location` header is
    /// the download URL. Returns `None` when the header is absent.
    pub async fn artifact_location(
        &self,
        artifact_id: u64,
    ) -> Result<Option<String>, DeployerError> {
        let path = format!("/actions/artifacts/{}/zip", artifact_id);
        let response = self.head(&path).await?;

        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        match location {
            Some(url) if Url::parse(&url).is_err() => {
                warn!("Ignoring malformed artifact location: {}", url);
                Ok(None)
            }
            other => Ok(other),
        }
    }
}
