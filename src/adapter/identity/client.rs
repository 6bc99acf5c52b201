//! Identity Toolkit Client
//!
//! Thin wrapper over the Firebase Auth admin REST API

use anyhow::{bail, Context, Result};
use google_cloud_auth::credentials::{CacheableResource, Credentials};
use http::{Extensions, HeaderMap};

use super::models::BatchGetAccountsResponse;

pub const IDENTITY_TOOLKIT_ENDPOINT: &str = "https://identitytoolkit.googleapis.com/v1";

pub struct IdentityToolkitClient {
    http: reqwest::Client,
    credentials: Credentials,
    project_id: String,
}

impl IdentityToolkitClient {
    pub fn new(credentials: Credentials, project_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            credentials,
            project_id: project_id.into(),
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// URL of the `accounts:batchGet` method for this project
    pub fn batch_get_url(&self) -> String {
        format!(
            "{}/projects/{}/accounts:batchGet",
            IDENTITY_TOOLKIT_ENDPOINT, self.project_id
        )
    }

    async fn auth_headers(&self) -> Result<HeaderMap> {
        let headers = self
            .credentials
            .headers(Extensions::new())
            .await
            .context("Failed to obtain access token for Identity Toolkit")?;

        match headers {
            CacheableResource::New { data, .. } => Ok(data),
            CacheableResource::NotModified => {
                bail!("Credentials returned no authorization headers")
            }
        }
    }

    /// Fetches one page of users
    pub async fn batch_get(
        &self,
        max_results: u32,
        page_token: Option<&str>,
    ) -> Result<BatchGetAccountsResponse> {
        let mut query = vec![("maxResults", max_results.to_string())];
        if let Some(token) = page_token {
            query.push(("nextPageToken", token.to_string()));
        }

        let response = self
            .http
            .get(self.batch_get_url())
            .headers(self.auth_headers().await?)
            .query(&query)
            .send()
            .await
            .context("Identity Toolkit request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Identity Toolkit accounts:batchGet returned {}: {}", status, body);
        }

        response
            .json::<BatchGetAccountsResponse>()
            .await
            .context("Failed to parse accounts:batchGet response")
    }
}
