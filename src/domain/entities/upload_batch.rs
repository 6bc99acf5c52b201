//! # UploadBatch Value Object
//!
//! アップロードバッチのバリューオブジェクト

use super::user_row::UserRow;

/// 1回の挿入リクエストで送る最大行数
pub const MAX_BATCH_SIZE: usize = 1000;

/// アップロードバッチ
///
/// 一度にテーブルへ挿入する `UserRow` のまとまり
#[derive(Debug, Clone, Default)]
pub struct UploadBatch {
    rows: Vec<UserRow>,
}

impl UploadBatch {
    /// 新しいアップロードバッチを作成
    ///
    /// # Arguments
    ///
    /// * `rows` - 行のベクター
    pub fn new(rows: Vec<UserRow>) -> Self {
        Self { rows }
    }

    /// バッチ内の行数を返す
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// バッチが空かどうかを返す
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 行への参照を返す
    pub fn rows(&self) -> &[UserRow] {
        &self.rows
    }

    /// 行の所有権を移動して返す
    pub fn into_rows(self) -> Vec<UserRow> {
        self.rows
    }

    /// バッチをサイズで分割
    ///
    /// 順序を保ったまま `batch_size` 行ずつに分割する。最後のバッチのみ短くなりうる。
    /// 空のバッチは空のバッチ1つになる
    ///
    /// # Arguments
    ///
    /// * `batch_size` - 分割後の各バッチの最大サイズ（0 の場合は分割しない）
    ///
    /// # Returns
    ///
    /// 分割されたバッチのベクター
    pub fn split_by_size(self, batch_size: usize) -> Vec<UploadBatch> {
        if batch_size == 0 || self.rows.len() <= batch_size {
            return vec![self];
        }

        let mut batches = Vec::with_capacity(self.rows.len().div_ceil(batch_size));
        let mut rows = self.rows.into_iter().peekable();
        while rows.peek().is_some() {
            batches.push(UploadBatch::new(rows.by_ref().take(batch_size).collect()));
        }
        batches
    }
}

impl From<Vec<UserRow>> for UploadBatch {
    fn from(rows: Vec<UserRow>) -> Self {
        Self::new(rows)
    }
}

impl From<UploadBatch> for Vec<UserRow> {
    fn from(batch: UploadBatch) -> Self {
        batch.into_rows()
    }
}
