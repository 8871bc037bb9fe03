//! Authenticated GitHub API client

pub mod artifacts;
pub mod client;
pub mod deployments;
