//! # Export Users Use Case
//!
//! 全ユーザーを認証テーブルへコピーするユースケース

use std::sync::Arc;
use anyhow::{anyhow, Context};
use log::{debug, error, info, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::application::dto::export_options::ExportOptions;
use crate::application::use_cases::fetch_users::FetchUsersUseCase;
use crate::domain::entities::table_schema::{DATASET_ID, TABLE_ID};
use crate::domain::entities::upload_batch::{UploadBatch, MAX_BATCH_SIZE};
use crate::domain::errors::{ExportError, ExportResult, MAX_ERROR_SAMPLES};
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::repositories::warehouse_repository::{RowInsertError, WarehouseRepository};
use crate::domain::services::row_transformer::RowTransformer;

/// エクスポート結果のサマリー
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// 取得したユーザー数
    pub fetched_users: usize,
    /// 挿入リクエストを発行したバッチ数（dry-run では発行予定数）
    pub batches: usize,
    /// 挿入に成功した行数
    pub inserted_rows: usize,
}

/// 1バッチ分の挿入結果
struct BatchOutcome {
    index: usize,
    rows: usize,
    result: anyhow::Result<Vec<RowInsertError>>,
}

/// ユーザーエクスポートユースケース
///
/// 全ユーザーを取得して行に変換し、1000行ずつのバッチに分割して並行に挿入する
pub struct ExportUsersUseCase<U, W>
where
    U: UserRepository + ?Sized,
    W: WarehouseRepository + ?Sized + 'static,
{
    fetch_users: FetchUsersUseCase<U>,
    warehouse_repository: Arc<W>,
}

impl<U, W> ExportUsersUseCase<U, W>
where
    U: UserRepository + ?Sized,
    W: WarehouseRepository + ?Sized + 'static,
{
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `user_repository` - ユーザーリポジトリ
    /// * `warehouse_repository` - ウェアハウスリポジトリ
    pub fn new(user_repository: Arc<U>, warehouse_repository: Arc<W>) -> Self {
        Self {
            fetch_users: FetchUsersUseCase::new(user_repository),
            warehouse_repository,
        }
    }

    /// 全ユーザーをエクスポート
    ///
    /// # Arguments
    ///
    /// * `options` - エクスポートオプション
    ///
    /// # Returns
    ///
    /// エクスポート結果のサマリー
    ///
    /// # Errors
    ///
    /// - ユーザー取得や挿入リクエストが失敗した場合は下位のエラーをそのまま返す
    /// - 行単位のエラーがあった場合は [`ExportError::InsertFailed`] を返す。
    ///   一部のバッチが既にコミットされていても成功扱いにはしない
    pub async fn execute(&self, options: &ExportOptions) -> ExportResult<ExportSummary> {
        let users = self.fetch_users.execute().await?;
        if options.verbose {
            println!("Done: fetch user data");
        }

        let rows = RowTransformer::transform_all(&users);
        let batches: Vec<UploadBatch> = UploadBatch::new(rows)
            .split_by_size(MAX_BATCH_SIZE)
            .into_iter()
            .filter(|batch| !batch.is_empty())
            .collect();

        let mut summary = ExportSummary {
            fetched_users: users.len(),
            batches: batches.len(),
            inserted_rows: 0,
        };

        if batches.is_empty() {
            info!("No users to export");
            return Ok(summary);
        }

        if options.dry_run {
            println!(
                "✓ Dry-run mode: would insert {} rows in {} batches into {}.{}",
                summary.fetched_users, summary.batches, DATASET_ID, TABLE_ID
            );
            for (i, batch) in batches.iter().enumerate() {
                println!("    - Batch {}: {} rows", i + 1, batch.len());
            }
            return Ok(summary);
        }

        if options.verbose {
            println!("inserting data ...");
        }

        summary.inserted_rows = self.insert_batches(batches, options.concurrency()).await?;

        if options.verbose {
            println!("Successfully copied authentication to BigQuery.");
        }

        Ok(summary)
    }

    /// 全バッチを最大 `concurrency` 件ずつ並行に挿入し、全ての完了を待つ
    async fn insert_batches(
        &self,
        batches: Vec<UploadBatch>,
        concurrency: usize,
    ) -> ExportResult<usize> {
        let total_batches = batches.len();
        let semaphore = Arc::new(Semaphore::new(concurrency));
        let mut tasks = JoinSet::new();

        for (index, batch) in batches.into_iter().enumerate() {
            let warehouse = Arc::clone(&self.warehouse_repository);
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        debug!(
                            "Inserting batch {}/{} ({} rows)",
                            index + 1,
                            total_batches,
                            batch.len()
                        );
                        warehouse.insert_batch(DATASET_ID, TABLE_ID, &batch).await
                    }
                    Err(e) => Err(anyhow!(e)),
                };
                BatchOutcome {
                    index,
                    rows: batch.len(),
                    result,
                }
            });
        }

        let mut outcomes = Vec::with_capacity(total_batches);
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined.context("Insert task panicked")?);
        }
        outcomes.sort_by_key(|outcome| outcome.index);

        let mut inserted_rows = 0;
        let mut row_errors = Vec::new();
        let mut first_failure = None;

        for outcome in outcomes {
            match outcome.result {
                Ok(errors) if errors.is_empty() => {
                    debug!("Batch {} inserted successfully", outcome.index + 1);
                    inserted_rows += outcome.rows;
                }
                Ok(errors) => {
                    warn!("Batch {} had {} row errors", outcome.index + 1, errors.len());
                    row_errors.extend(errors);
                }
                Err(e) => {
                    error!("Failed to insert batch {}: {:#}", outcome.index + 1, e);
                    first_failure.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_failure {
            return Err(ExportError::Client(e));
        }

        if !row_errors.is_empty() {
            return Err(summarize_row_errors(&row_errors));
        }

        Ok(inserted_rows)
    }
}

/// 行単位のエラーを集約する
///
/// 件数と先頭3件をログに出力し、同じ内容を持つ [`ExportError::InsertFailed`] を返す
pub fn summarize_row_errors(errors: &[RowInsertError]) -> ExportError {
    let count = errors.len();
    error!("{} errors. Here are the first three:", count);

    let samples: Vec<String> = errors
        .iter()
        .take(MAX_ERROR_SAMPLES)
        .map(|e| e.to_string())
        .collect();
    for sample in &samples {
        error!("{}", sample);
    }

    ExportError::InsertFailed { count, samples }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::auth_user::{AuthUser, UserPage};
    use crate::domain::repositories::user_repository::MockUserRepository;
    use crate::domain::repositories::warehouse_repository::MockWarehouseRepository;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn create_users(count: usize) -> Vec<AuthUser> {
        (0..count)
            .map(|i| AuthUser::new(format!("uid-{}", i)))
            .collect()
    }

    fn single_page_users(count: usize) -> MockUserRepository {
        let mut mock = MockUserRepository::new();
        mock.expect_list_users()
            .times(1)
            .returning(move |_, _| Ok(UserPage::new(create_users(count), None)));
        mock
    }

    fn row_errors(count: usize) -> Vec<RowInsertError> {
        (0..count)
            .map(|i| RowInsertError {
                index: i,
                reason: Some("invalid".to_string()),
                message: format!("bad row {}", i),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_export_inserts_all_rows() {
        let mut warehouse = MockWarehouseRepository::new();
        warehouse
            .expect_insert_batch()
            .times(3)
            .returning(|_, _, _| Ok(vec![]));

        let use_case =
            ExportUsersUseCase::new(Arc::new(single_page_users(2500)), Arc::new(warehouse));
        let summary = use_case.execute(&ExportOptions::default()).await.unwrap();

        assert_eq!(
            summary,
            ExportSummary {
                fetched_users: 2500,
                batches: 3,
                inserted_rows: 2500,
            }
        );
    }

    #[tokio::test]
    async fn test_export_batch_sizes() {
        let sizes = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sizes_clone = Arc::clone(&sizes);

        let mut warehouse = MockWarehouseRepository::new();
        warehouse.expect_insert_batch().returning(move |_, _, batch| {
            sizes_clone.lock().unwrap().push(batch.len());
            Ok(vec![])
        });

        let use_case =
            ExportUsersUseCase::new(Arc::new(single_page_users(2500)), Arc::new(warehouse));
        use_case.execute(&ExportOptions::new(false, false, 1)).await.unwrap();

        let mut sizes = sizes.lock().unwrap().clone();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![500, 1000, 1000]);
    }

    #[tokio::test]
    async fn test_export_no_users_skips_insert() {
        let mut warehouse = MockWarehouseRepository::new();
        warehouse.expect_insert_batch().times(0);

        let use_case =
            ExportUsersUseCase::new(Arc::new(single_page_users(0)), Arc::new(warehouse));
        let summary = use_case.execute(&ExportOptions::default()).await.unwrap();

        assert_eq!(summary, ExportSummary::default());
    }

    #[tokio::test]
    async fn test_export_dry_run_does_not_insert() {
        let mut warehouse = MockWarehouseRepository::new();
        warehouse.expect_insert_batch().times(0);

        let use_case =
            ExportUsersUseCase::new(Arc::new(single_page_users(1500)), Arc::new(warehouse));
        let summary = use_case
            .execute(&ExportOptions::new(true, true, 4))
            .await
            .unwrap();

        assert_eq!(summary.fetched_users, 1500);
        assert_eq!(summary.batches, 2);
        assert_eq!(summary.inserted_rows, 0);
    }

    #[tokio::test]
    async fn test_export_row_errors_reported() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let mut warehouse = MockWarehouseRepository::new();
        warehouse.expect_insert_batch().returning(move |_, _, batch| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            if batch.rows()[0].user_id == "uid-1000" {
                Ok(row_errors(5))
            } else {
                Ok(vec![])
            }
        });

        let use_case =
            ExportUsersUseCase::new(Arc::new(single_page_users(2500)), Arc::new(warehouse));
        let err = use_case.execute(&ExportOptions::default()).await.unwrap_err();

        // 失敗したバッチがあっても全バッチの完了を待つ
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(err.to_string(), "5 errors.");
        match err {
            ExportError::InsertFailed { count, samples } => {
                assert_eq!(count, 5);
                assert_eq!(
                    samples,
                    vec![
                        "row 0: invalid: bad row 0",
                        "row 1: invalid: bad row 1",
                        "row 2: invalid: bad row 2",
                    ]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_export_request_error_propagated_as_is() {
        let mut warehouse = MockWarehouseRepository::new();
        warehouse
            .expect_insert_batch()
            .returning(|_, _, _| Err(anyhow::anyhow!("429 Too Many Requests")));

        let use_case =
            ExportUsersUseCase::new(Arc::new(single_page_users(10)), Arc::new(warehouse));
        let err = use_case.execute(&ExportOptions::default()).await.unwrap_err();

        assert!(matches!(err, ExportError::Client(_)));
        assert_eq!(err.to_string(), "429 Too Many Requests");
    }

    #[tokio::test]
    async fn test_export_request_error_takes_priority_over_row_errors() {
        let mut warehouse = MockWarehouseRepository::new();
        warehouse
            .expect_insert_batch()
            .times(3)
            .returning(|_, _, batch| match batch.rows()[0].user_id.as_str() {
                "uid-0" => Ok(row_errors(5)),
                "uid-1000" => Err(anyhow::anyhow!("503 Service Unavailable")),
                _ => Err(anyhow::anyhow!("500 Internal Server Error")),
            });

        let use_case =
            ExportUsersUseCase::new(Arc::new(single_page_users(2500)), Arc::new(warehouse));
        let err = use_case.execute(&ExportOptions::default()).await.unwrap_err();

        // バッチ順で最初のリクエストエラーが返る
        assert!(matches!(err, ExportError::Client(_)));
        assert_eq!(err.to_string(), "503 Service Unavailable");
    }

    #[tokio::test]
    async fn test_export_row_errors_aggregated_across_batches() {
        let mut warehouse = MockWarehouseRepository::new();
        warehouse
            .expect_insert_batch()
            .times(3)
            .returning(|_, _, batch| match batch.rows()[0].user_id.as_str() {
                "uid-0" => Ok(row_errors(2)),
                "uid-1000" => Ok(row_errors(4)),
                _ => Ok(vec![]),
            });

        let use_case =
            ExportUsersUseCase::new(Arc::new(single_page_users(2500)), Arc::new(warehouse));
        let err = use_case.execute(&ExportOptions::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "6 errors.");
        match err {
            ExportError::InsertFailed { count, samples } => {
                assert_eq!(count, 6);
                assert_eq!(
                    samples,
                    vec![
                        "row 0: invalid: bad row 0",
                        "row 1: invalid: bad row 1",
                        "row 0: invalid: bad row 0",
                    ]
                );
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_export_fetch_error_skips_insert() {
        let mut users = MockUserRepository::new();
        users
            .expect_list_users()
            .returning(|_, _| Err(anyhow::anyhow!("invalid credentials")));
        let mut warehouse = MockWarehouseRepository::new();
        warehouse.expect_insert_batch().times(0);

        let use_case = ExportUsersUseCase::new(Arc::new(users), Arc::new(warehouse));
        let result = use_case.execute(&ExportOptions::default()).await;

        assert!(matches!(result, Err(ExportError::Client(_))));
    }

    #[test]
    fn test_summarize_row_errors_fewer_than_three() {
        let err = summarize_row_errors(&row_errors(2));

        match err {
            ExportError::InsertFailed { count, samples } => {
                assert_eq!(count, 2);
                assert_eq!(samples.len(), 2);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
