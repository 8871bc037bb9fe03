//! CI artifact models

use serde::Deserialize;

/// A named build artifact attached to a CI run
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
    /// Unique artifact ID
    pub id: u64,

    /// Artifact name as uploaded by the build
    pub name: String,
}

/// Artifact listing for one CI run
///
/// Fetched fresh on each poll attempt, never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactList {
    pub total_count: u64,
    pub artifacts: Vec<Artifact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserialization() {
        let listing: ArtifactList = serde_json::from_value(serde_json::json!({
            "total_count": 2,
            "artifacts": [
                {"id": 1, "name": "dist", "size_in_bytes": 1024},
                {"id": 2, "name": "coverage"},
            ],
        }))
        .unwrap();

        assert_eq!(listing.total_count, 2);
        assert_eq!(listing.artifacts[0].name, "dist");
        assert_eq!(listing.artifacts[1].id, 2);
    }
}
