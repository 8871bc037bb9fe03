//! External process staging

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use crate::errors::DeployerError;

/// Local staging operations for a build archive.
///
/// The orchestrator only talks to this trait; tests substitute a fake
/// instead of spawning real processes.
#[async_trait]
pub trait ArtifactStager {
    /// Download `url` into `dest`
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), DeployerError>;

    /// Delete a directory tree; a missing directory is not an error
    async fn remove_if_exists(&self, path: &Path) -> Result<(), DeployerError>;

    /// Unpack `archive` into `dest`
    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), DeployerError>;
}

/// Stager backed by the host's `wget` and `unzip` binaries
pub struct ShellStager;

#[async_trait]
impl ArtifactStager for ShellStager {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<(), DeployerError> {
        debug!("wget {} -O {}", url, dest.display());
        let status = Command::new("wget")
            .arg(url)
            .arg("-O")
            .arg(dest)
            .status()
            .await
            .map_err(|e| DeployerError::DownloadFailed(format!("Failed to run wget: {}", e)))?;

        if !status.success() {
            return Err(DeployerError::DownloadFailed(format!(
                "wget exited with {}",
                status
            )));
        }
        Ok(())
    }

    async fn remove_if_exists(&self, path: &Path) -> Result<(), DeployerError> {
        debug!("Removing {}", path.display());
        match tokio::fs::remove_dir_all(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn extract(&self, archive: &Path, dest: &Path) -> Result<(), DeployerError> {
        // -o keeps the run non-interactive if stray files collide
        debug!("unzip -o {} -d {}", archive.display(), dest.display());
        let status = Command::new("unzip")
            .arg("-o")
            .arg(archive)
            .arg("-d")
            .arg(dest)
            .status()
            .await
            .map_err(|e| DeployerError::ExtractFailed(format!("Failed to run unzip: {}", e)))?;

        if !status.success() {
            return Err(DeployerError::ExtractFailed(format!(
                "unzip exited with {}",
                status
            )));
        }
        Ok(())
    }
}
