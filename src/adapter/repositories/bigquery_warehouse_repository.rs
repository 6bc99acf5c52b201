//! BigQuery Warehouse Repository Implementation
//!
//! WarehouseRepositoryのBigQuery実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use google_cloud_bigquery::client::Client;
use google_cloud_bigquery::http::error::Error as BigQueryError;
use log::debug;

use crate::adapter::bigquery::errors::is_not_found;
use crate::adapter::bigquery::models::{
    build_dataset, build_insert_request, build_table, to_row_insert_errors,
};
use crate::domain::entities::table_schema::ColumnSpec;
use crate::domain::entities::upload_batch::UploadBatch;
use crate::domain::repositories::warehouse_repository::{RowInsertError, WarehouseRepository};

/// Maps a `get` result to existence, treating a 404 response as "absent"
fn exists_from<T>(result: std::result::Result<T, BigQueryError>, what: &str) -> Result<bool> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if is_not_found(&e) => {
            debug!("{} not found", what);
            Ok(false)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to look up {}", what)),
    }
}

/// BigQueryウェアハウスリポジトリ
pub struct BigQueryWarehouseRepository {
    client: Client,
    project_id: String,
}

impl BigQueryWarehouseRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: Client, project_id: impl Into<String>) -> Self {
        Self {
            client,
            project_id: project_id.into(),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl WarehouseRepository for BigQueryWarehouseRepository {
    async fn dataset_exists(&self, dataset_id: &str) -> Result<bool> {
        let result = self.client.dataset().get(&self.project_id, dataset_id).await;
        exists_from(result, &format!("dataset {}", dataset_id))
    }

    async fn create_dataset(&self, dataset_id: &str) -> Result<()> {
        self.client
            .dataset()
            .create(&build_dataset(&self.project_id, dataset_id))
            .await
            .with_context(|| format!("Failed to create dataset {}", dataset_id))?;
        Ok(())
    }

    async fn table_exists(&self, dataset_id: &str, table_id: &str) -> Result<bool> {
        let result = self
            .client
            .table()
            .get(&self.project_id, dataset_id, table_id)
            .await;
        exists_from(result, &format!("table {}.{}", dataset_id, table_id))
    }

    async fn create_table(
        &self,
        dataset_id: &str,
        table_id: &str,
        schema: &[ColumnSpec],
    ) -> Result<()> {
        self.client
            .table()
            .create(&build_table(&self.project_id, dataset_id, table_id, schema))
            .await
            .with_context(|| format!("Failed to create table {}.{}", dataset_id, table_id))?;
        Ok(())
    }

    async fn delete_table(&self, dataset_id: &str, table_id: &str) -> Result<()> {
        self.client
            .table()
            .delete(&self.project_id, dataset_id, table_id)
            .await
            .with_context(|| format!("Failed to delete table {}.{}", dataset_id, table_id))
    }

    async fn insert_batch(
        &self,
        dataset_id: &str,
        table_id: &str,
        batch: &UploadBatch,
    ) -> Result<Vec<RowInsertError>> {
        let request = build_insert_request(batch);

        let response = self
            .client
            .tabledata()
            .insert(&self.project_id, dataset_id, table_id, &request)
            .await
            .context("BigQuery insert failed")?;

        Ok(response
            .insert_errors
            .map(|errors| to_row_insert_errors(&errors))
            .unwrap_or_default())
    }
}
