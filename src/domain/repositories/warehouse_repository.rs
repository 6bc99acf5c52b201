//! # Warehouse Repository Trait
//!
//! データセット・テーブルの管理と行の挿入を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::table_schema::ColumnSpec;
use crate::domain::entities::upload_batch::UploadBatch;

/// 行単位の挿入エラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowInsertError {
    /// バッチ内の行インデックス
    pub index: usize,
    pub reason: Option<String>,
    pub message: String,
}

impl std::fmt::Display for RowInsertError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) if self.message.is_empty() => {
                write!(f, "row {}: {}", self.index, reason)
            }
            Some(reason) => write!(f, "row {}: {}: {}", self.index, reason, self.message),
            None => write!(f, "row {}: {}", self.index, self.message),
        }
    }
}

/// ウェアハウスリポジトリ
///
/// データセットとテーブルのライフサイクル、および行の挿入を担当する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WarehouseRepository: Send + Sync {
    /// データセットが存在するか
    async fn dataset_exists(&self, dataset_id: &str) -> Result<bool>;

    /// データセットを作成
    async fn create_dataset(&self, dataset_id: &str) -> Result<()>;

    /// テーブルが存在するか
    async fn table_exists(&self, dataset_id: &str, table_id: &str) -> Result<bool>;

    /// スキーマを指定してテーブルを作成
    async fn create_table(
        &self,
        dataset_id: &str,
        table_id: &str,
        schema: &[ColumnSpec],
    ) -> Result<()>;

    /// テーブルを削除
    async fn delete_table(&self, dataset_id: &str, table_id: &str) -> Result<()>;

    /// バッチを挿入
    ///
    /// # Returns
    ///
    /// 行単位のエラー（全行成功した場合は空）
    ///
    /// # Errors
    ///
    /// リクエスト自体が失敗した場合にエラーを返す
    async fn insert_batch(
        &self,
        dataset_id: &str,
        table_id: &str,
        batch: &UploadBatch,
    ) -> Result<Vec<RowInsertError>>;
}
