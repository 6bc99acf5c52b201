//! GCP Authentication
//!
//! Service account keys and authenticated client construction

use anyhow::{Context, Result};
use google_cloud_auth::credentials::{service_account, Credentials};
use google_cloud_bigquery::client::google_cloud_auth::credentials::CredentialsFile;
use google_cloud_bigquery::client::{Client, ClientConfig};
use std::fs;

/// Expands tilde in path and returns the full path
pub fn expand_key_path(key_path: &str) -> String {
    shellexpand::tilde(key_path).to_string()
}

/// A service account key document.
///
/// The document is otherwise opaque; only `project_id` is read from it.
#[derive(Debug, Clone)]
pub struct ServiceAccountKey {
    raw: serde_json::Value,
    project_id: String,
}

impl ServiceAccountKey {
    pub fn from_json(content: &str) -> Result<Self> {
        let raw: serde_json::Value =
            serde_json::from_str(content).context("Service account key is not valid JSON")?;
        Self::from_value(raw)
    }

    pub fn from_value(raw: serde_json::Value) -> Result<Self> {
        let project_id = raw
            .get("project_id")
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
            .context("Service account key has no project_id")?
            .to_string();
        Ok(Self { raw, project_id })
    }

    /// Reads a key file, expanding `~` in the path
    pub fn load(key_path: &str) -> Result<Self> {
        let expanded_path = expand_key_path(key_path);
        let content = fs::read_to_string(&expanded_path)
            .with_context(|| format!("Failed to read service account key: {}", expanded_path))?;
        Self::from_json(&content)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.raw
    }
}

/// Creates a BigQuery client authenticated with the given service account key
pub async fn create_bigquery_client(key: &ServiceAccountKey) -> Result<Client> {
    let credentials = CredentialsFile::new_from_str(&key.as_value().to_string())
        .await
        .context("Failed to load service account key")?;

    let (config, _project_id) = ClientConfig::new_with_credentials(credentials)
        .await
        .context("Failed to authenticate with service account")?;

    let client = Client::new(config)
        .await
        .context("Failed to create BigQuery client")?;

    Ok(client)
}

/// Creates credentials for calling the Identity Toolkit API
pub fn create_identity_credentials(key: &ServiceAccountKey) -> Result<Credentials> {
    service_account::Builder::new(key.as_value().clone())
        .build()
        .context("Failed to build service account credentials")
}
