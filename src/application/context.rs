//! # Export Context
//!
//! 2つのクライアントを保持するコンテキストと、各操作のエントリポイント

use std::sync::Arc;
use log::error;

use crate::application::dto::export_options::ExportOptions;
use crate::application::use_cases::export_users::{ExportSummary, ExportUsersUseCase};
use crate::application::use_cases::manage_table::{
    CreateTableOutcome, DeleteTableOutcome, ManageTableUseCase,
};
use crate::domain::errors::{ClientKind, ExportError, ExportResult};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::warehouse_repository::WarehouseRepository;

/// エクスポートコンテキスト
///
/// 呼び出し側が一度だけ組み立て、全ての操作に渡す。
/// 未設定のクライアントを必要とする操作は何もせずに [`ExportError::NotConfigured`] を返す
#[derive(Clone, Default)]
pub struct ExportContext {
    identity: Option<Arc<dyn UserRepository>>,
    warehouse: Option<Arc<dyn WarehouseRepository>>,
}

impl ExportContext {
    /// クライアント未設定のコンテキストを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 認証プロバイダのクライアントを設定
    pub fn set_identity(&mut self, repository: Arc<dyn UserRepository>) {
        self.identity = Some(repository);
    }

    /// ウェアハウスのクライアントを設定
    pub fn set_warehouse(&mut self, repository: Arc<dyn WarehouseRepository>) {
        self.warehouse = Some(repository);
    }

    pub fn with_identity(mut self, repository: Arc<dyn UserRepository>) -> Self {
        self.set_identity(repository);
        self
    }

    pub fn with_warehouse(mut self, repository: Arc<dyn WarehouseRepository>) -> Self {
        self.set_warehouse(repository);
        self
    }

    pub fn is_identity_configured(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_warehouse_configured(&self) -> bool {
        self.warehouse.is_some()
    }

    fn identity(&self) -> ExportResult<Arc<dyn UserRepository>> {
        self.identity.clone().ok_or_else(|| not_configured(ClientKind::Identity))
    }

    fn warehouse(&self) -> ExportResult<Arc<dyn WarehouseRepository>> {
        self.warehouse.clone().ok_or_else(|| not_configured(ClientKind::Warehouse))
    }

    /// データセットとテーブルが無ければ作成
    ///
    /// # Errors
    ///
    /// ウェアハウス未設定、またはリクエスト失敗時にエラーを返す
    pub async fn create_table(&self) -> ExportResult<CreateTableOutcome> {
        let use_case = ManageTableUseCase::new(self.warehouse()?);
        Ok(use_case.create_table().await?)
    }

    /// テーブルが存在すれば削除
    ///
    /// # Errors
    ///
    /// ウェアハウス未設定、またはリクエスト失敗時にエラーを返す
    pub async fn delete_table(&self) -> ExportResult<DeleteTableOutcome> {
        let use_case = ManageTableUseCase::new(self.warehouse()?);
        Ok(use_case.delete_table().await?)
    }

    /// 全ユーザーを認証テーブルにコピー
    ///
    /// # Errors
    ///
    /// いずれかのクライアントが未設定、または取得・挿入に失敗した場合にエラーを返す
    pub async fn export_users(&self, options: &ExportOptions) -> ExportResult<ExportSummary> {
        let warehouse = self.warehouse()?;
        let identity = self.identity()?;
        ExportUsersUseCase::new(identity, warehouse)
            .execute(options)
            .await
    }
}

fn not_configured(kind: ClientKind) -> ExportError {
    error!("please configure the {} client before running this operation", kind);
    ExportError::NotConfigured(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::auth_user::UserPage;
    use crate::domain::repositories::user_repository::MockUserRepository;
    use crate::domain::repositories::warehouse_repository::MockWarehouseRepository;

    #[tokio::test]
    async fn test_create_table_requires_warehouse() {
        let context = ExportContext::new();

        let result = context.create_table().await;

        assert!(matches!(
            result,
            Err(ExportError::NotConfigured(ClientKind::Warehouse))
        ));
    }

    #[tokio::test]
    async fn test_delete_table_requires_warehouse() {
        let context = ExportContext::new().with_identity(Arc::new(MockUserRepository::new()));

        let result = context.delete_table().await;

        assert!(matches!(
            result,
            Err(ExportError::NotConfigured(ClientKind::Warehouse))
        ));
    }

    #[tokio::test]
    async fn test_export_requires_identity() {
        let mut warehouse = MockWarehouseRepository::new();
        warehouse.expect_insert_batch().times(0);
        let context = ExportContext::new().with_warehouse(Arc::new(warehouse));

        let result = context.export_users(&ExportOptions::default()).await;

        assert!(matches!(
            result,
            Err(ExportError::NotConfigured(ClientKind::Identity))
        ));
    }

    #[tokio::test]
    async fn test_create_table_twice_is_idempotent() {
        let created = Arc::new(std::sync::atomic::AtomicBool::new(false));
        let created_check = Arc::clone(&created);
        let created_set = Arc::clone(&created);

        let mut warehouse = MockWarehouseRepository::new();
        warehouse.expect_dataset_exists().returning(|_| Ok(true));
        warehouse
            .expect_table_exists()
            .returning(move |_, _| Ok(created_check.load(std::sync::atomic::Ordering::SeqCst)));
        warehouse.expect_create_table().times(1).returning(move |_, _, _| {
            created_set.store(true, std::sync::atomic::Ordering::SeqCst);
            Ok(())
        });
        let context = ExportContext::new().with_warehouse(Arc::new(warehouse));

        let first = context.create_table().await.unwrap();
        let second = context.create_table().await.unwrap();

        assert!(first.table_created);
        assert!(!second.table_created);
    }

    #[tokio::test]
    async fn test_export_with_both_clients() {
        let mut users = MockUserRepository::new();
        users
            .expect_list_users()
            .returning(|_, _| Ok(UserPage::new(vec![Default::default()], None)));
        let mut warehouse = MockWarehouseRepository::new();
        warehouse
            .expect_insert_batch()
            .times(1)
            .returning(|_, _, _| Ok(vec![]));

        let context = ExportContext::new()
            .with_identity(Arc::new(users))
            .with_warehouse(Arc::new(warehouse));

        assert!(context.is_identity_configured());
        assert!(context.is_warehouse_configured());

        let summary = context.export_users(&ExportOptions::default()).await.unwrap();
        assert_eq!(summary.inserted_rows, 1);
    }
}
