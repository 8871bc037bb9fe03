//! Error types for ghdeploy

use http::StatusCode;
use thiserror::Error;

/// Main error type for the deployment orchestrator
#[derive(Error, Debug)]
pub enum DeployerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Deployment {0} not found")]
    DeploymentNotFound(u64),

    #[error("Deployment payload does not name a run id: {0}")]
    InvalidPayload(String),

    #[error("No artifacts found")]
    NoArtifacts,

    #[error("No artifact named {0}")]
    ArtifactNotFound(String),

    #[error("Artifact download location missing")]
    MissingLocation,

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Extraction failed: {0}")]
    ExtractFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<anyhow::Error> for DeployerError {
    fn from(err: anyhow::Error) -> Self {
        DeployerError::Config(err.to_string())
    }
}
