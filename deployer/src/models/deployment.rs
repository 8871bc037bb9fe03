//! Deployment models

use serde::{Deserialize, Serialize};

use crate::errors::DeployerError;

/// A deployment record fetched from the platform
///
/// Read-only to this tool; the record is owned by the remote platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Deployment {
    /// Unique deployment ID
    pub id: u64,

    /// Opaque payload attached at deployment creation; here it names the
    /// CI run that produced the build artifacts
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl Deployment {
    /// The CI run id carried in the payload.
    ///
    /// The platform serves the payload as whatever JSON the creator attached,
    /// a bare number or a string in practice.
    pub fn run_id(&self) -> Result<u64, DeployerError> {
        match &self.payload {
            serde_json::Value::Number(n) => n
                .as_u64()
                .ok_or_else(|| DeployerError::InvalidPayload(self.payload.to_string())),
            serde_json::Value::String(s) => s
                .parse()
                .map_err(|_| DeployerError::InvalidPayload(self.payload.to_string())),
            other => Err(DeployerError::InvalidPayload(other.to_string())),
        }
    }
}

/// Deployment status state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentState {
    /// Deployment work has started
    InProgress,

    /// Build staged into the target directory
    Success,

    /// Aborted; the description carries the error
    Failure,
}

/// Status entry to append to the deployment's history
///
/// Write-only: this tool only creates status entries, it never reads them
/// back.
#[derive(Debug, Clone, Serialize)]
pub struct NewDeploymentStatus {
    /// New state
    pub state: DeploymentState,

    /// Optional human-readable description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Environment label
    pub environment: String,
}

impl NewDeploymentStatus {
    pub fn in_progress(description: String, environment: String) -> Self {
        Self {
            state: DeploymentState::InProgress,
            description: Some(description),
            environment,
        }
    }

    pub fn success(environment: String) -> Self {
        Self {
            state: DeploymentState::Success,
            description: None,
            environment,
        }
    }

    pub fn failure(description: String, environment: String) -> Self {
        Self {
            state: DeploymentState::Failure,
            description: Some(description),
            environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_from_string_payload() {
        let deployment: Deployment =
            serde_json::from_value(serde_json::json!({"id": 12345, "payload": "67890"})).unwrap();
        assert_eq!(deployment.run_id().unwrap(), 67890);
    }

    #[test]
    fn test_run_id_from_numeric_payload() {
        let deployment: Deployment =
            serde_json::from_value(serde_json::json!({"id": 12345, "payload": 67890})).unwrap();
        assert_eq!(deployment.run_id().unwrap(), 67890);
    }

    #[test]
    fn test_run_id_rejects_other_payloads() {
        let deployment: Deployment =
            serde_json::from_value(serde_json::json!({"id": 12345, "payload": {"a": 1}})).unwrap();
        assert!(matches!(
            deployment.run_id(),
            Err(DeployerError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_status_serialization() {
        let status =
            NewDeploymentStatus::in_progress("Started production deployment on web1".into(), "production".into());
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["state"], "in_progress");
        assert_eq!(value["description"], "Started production deployment on web1");
        assert_eq!(value["environment"], "production");
    }

    #[test]
    fn test_success_omits_description() {
        let status = NewDeploymentStatus::success("production".into());
        let value = serde_json::to_value(&status).unwrap();
        assert_eq!(value["state"], "success");
        assert!(value.get("description").is_none());
    }
}
