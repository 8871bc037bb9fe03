//! HTTP client implementation

use reqwest::{header, redirect, Client};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error};

use crate::errors::DeployerError;

/// HTTP client for the GitHub REST API, scoped to one repository
pub struct GithubClient {
    client: Client,
    base_url: String,
    owner: String,
    repo: String,
    token: SecretString,
}

impl GithubClient {
    /// Create a new client scoped to `owner/repo`.
    ///
    /// Redirect following is disabled on the whole client: the artifact
    /// archive endpoint answers with a redirect whose `Location` header is
    /// the real download URL, and it must be surfaced rather than followed.
    pub fn new(
        base_url: &str,
        owner: &str,
        repo: &str,
        token: SecretString,
    ) -> Result<Self, DeployerError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .redirect(redirect::Policy::none())
            .user_agent(concat!("ghdeploy/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token,
        })
    }

    /// Build a repository-scoped URL
    pub(crate) fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.base_url, self.owner, self.repo, path
        )
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.token.expose_secret())
    }

    /// Make a GET request against a repository-scoped path
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DeployerError> {
        let url = self.repo_url(path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP GET failed: {} - {}", status, body);
            return Err(DeployerError::Api { status, body });
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a POST request against a repository-scoped path
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DeployerError> {
        let url = self.repo_url(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("HTTP POST failed: {} - {}", status, body);
            return Err(DeployerError::Api { status, body });
        }

        let body = response.json().await?;
        Ok(body)
    }

    /// Make a HEAD request and hand back the raw response.
    ///
    /// Redirect statuses are not treated as errors here; callers inspect
    /// the response headers themselves.
    pub(crate) async fn head(&self, path: &str) -> Result<reqwest::Response, DeployerError> {
        let url = self.repo_url(path);
        debug!("HEAD {}", url);

        let response = self
            .client
            .head(&url)
            .header(header::AUTHORIZATION, self.auth_header())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() && !status.is_redirection() {
            error!("HTTP HEAD failed: {}", status);
            return Err(DeployerError::Api {
                status,
                body: String::new(),
            });
        }

        Ok(response)
    }
}
