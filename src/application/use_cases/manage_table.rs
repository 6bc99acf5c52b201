//! # Manage Table Use Case
//!
//! 認証テーブルの作成・削除ユースケース

use std::sync::Arc;
use anyhow::Result;
use log::info;

use crate::domain::entities::table_schema::{AUTH_TABLE_SCHEMA, DATASET_ID, TABLE_ID};
use crate::domain::repositories::warehouse_repository::WarehouseRepository;

/// テーブル作成の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateTableOutcome {
    pub dataset_created: bool,
    pub table_created: bool,
}

/// テーブル削除の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTableOutcome {
    Deleted,
    DatasetNotFound,
    TableNotFound,
}

/// テーブル管理ユースケース
///
/// データセットとテーブルを「あるべき状態」にする。どちらの操作も冪等
pub struct ManageTableUseCase<W: WarehouseRepository + ?Sized> {
    warehouse_repository: Arc<W>,
}

impl<W: WarehouseRepository + ?Sized> ManageTableUseCase<W> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `warehouse_repository` - ウェアハウスリポジトリ
    pub fn new(warehouse_repository: Arc<W>) -> Self {
        Self {
            warehouse_repository,
        }
    }

    /// データセットとテーブルが無ければ作成する
    ///
    /// テーブルが既に存在する場合は何もしない（スキーマも変更しない）
    ///
    /// # Errors
    ///
    /// ウェアハウスへのリクエストに失敗した場合にエラーを返す
    pub async fn create_table(&self) -> Result<CreateTableOutcome> {
        let repo = &self.warehouse_repository;

        let dataset_created = if repo.dataset_exists(DATASET_ID).await? {
            false
        } else {
            repo.create_dataset(DATASET_ID).await?;
            info!("Created dataset: {}", DATASET_ID);
            true
        };

        let table_created = if repo.table_exists(DATASET_ID, TABLE_ID).await? {
            info!("Table already exists: {}.{}", DATASET_ID, TABLE_ID);
            false
        } else {
            repo.create_table(DATASET_ID, TABLE_ID, AUTH_TABLE_SCHEMA)
                .await?;
            info!("Created table: {}.{}", DATASET_ID, TABLE_ID);
            true
        };

        Ok(CreateTableOutcome {
            dataset_created,
            table_created,
        })
    }

    /// テーブルが存在すれば削除する
    ///
    /// データセットまたはテーブルが無い場合はログを出力して正常終了する
    ///
    /// # Errors
    ///
    /// ウェアハウスへのリクエストに失敗した場合にエラーを返す
    pub async fn delete_table(&self) -> Result<DeleteTableOutcome> {
        let repo = &self.warehouse_repository;

        if !repo.dataset_exists(DATASET_ID).await? {
            info!("Not found Dataset: {}", DATASET_ID);
            return Ok(DeleteTableOutcome::DatasetNotFound);
        }

        if !repo.table_exists(DATASET_ID, TABLE_ID).await? {
            info!("Not found table: {}", TABLE_ID);
            return Ok(DeleteTableOutcome::TableNotFound);
        }

        repo.delete_table(DATASET_ID, TABLE_ID).await?;
        info!("Deleted table: {}.{}", DATASET_ID, TABLE_ID);

        Ok(DeleteTableOutcome::Deleted)
    }
}
