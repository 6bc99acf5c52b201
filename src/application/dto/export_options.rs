//! # Export Options DTO
//!
//! エクスポート実行時オプションのData Transfer Object

/// 同時に発行する挿入リクエスト数の既定値
pub const DEFAULT_MAX_CONCURRENT_INSERTS: usize = 8;

/// エクスポートオプション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// 進捗を表示するかどうか
    pub verbose: bool,
    /// 挿入を行わずに件数のみ表示する
    pub dry_run: bool,
    /// 同時に発行する挿入リクエストの上限（0 は 1 として扱う）
    pub max_concurrent_inserts: usize,
}

impl ExportOptions {
    /// 新しいエクスポートオプションを作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use authsync::application::dto::export_options::ExportOptions;
    ///
    /// let options = ExportOptions::new(true, false, 4);
    ///
    /// assert!(options.verbose);
    /// assert_eq!(options.concurrency(), 4);
    /// ```
    pub fn new(verbose: bool, dry_run: bool, max_concurrent_inserts: usize) -> Self {
        Self {
            verbose,
            dry_run,
            max_concurrent_inserts,
        }
    }

    /// 実際に使用する同時実行数
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_inserts.max(1)
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new(false, false, DEFAULT_MAX_CONCURRENT_INSERTS)
    }
}
