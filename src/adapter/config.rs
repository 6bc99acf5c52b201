//! Configuration
//!
//! JSON設定ファイルの読み込み

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::application::dto::export_options::DEFAULT_MAX_CONCURRENT_INSERTS;

fn default_max_concurrent_inserts() -> usize {
    DEFAULT_MAX_CONCURRENT_INSERTS
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Service account key for the Firebase project (Identity Toolkit)
    pub identity_key_path: String,
    /// Service account key for the BigQuery project
    pub warehouse_key_path: String,
    /// Upper bound on concurrently running insert requests
    #[serde(default = "default_max_concurrent_inserts")]
    pub max_concurrent_inserts: usize,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config JSON")
    }
}
