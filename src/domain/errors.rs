//! # Domain Errors
//!
//! 呼び出し側が分岐できるエラー型

use thiserror::Error;

/// 行挿入エラーのサンプルとして保持する最大件数
pub const MAX_ERROR_SAMPLES: usize = 3;

/// 未設定のクライアント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientKind {
    Identity,
    Warehouse,
}

impl std::fmt::Display for ClientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientKind::Identity => write!(f, "identity"),
            ClientKind::Warehouse => write!(f, "warehouse"),
        }
    }
}

/// エクスポート処理のエラー
#[derive(Debug, Error)]
pub enum ExportError {
    /// 必要なクライアントが設定される前に操作が呼ばれた
    #[error("{0} client is not configured")]
    NotConfigured(ClientKind),

    /// 1つ以上のバッチで行の挿入に失敗した
    ///
    /// `samples` には先頭から最大 [`MAX_ERROR_SAMPLES`] 件のエラーを保持する
    #[error("{count} errors.")]
    InsertFailed { count: usize, samples: Vec<String> },

    /// 下位クライアントのエラー（そのまま伝播）
    #[error(transparent)]
    Client(#[from] anyhow::Error),
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_failed_message() {
        let err = ExportError::InsertFailed {
            count: 5,
            samples: vec![],
        };
        assert_eq!(err.to_string(), "5 errors.");
    }

    #[test]
    fn test_not_configured_message() {
        let err = ExportError::NotConfigured(ClientKind::Warehouse);
        assert_eq!(err.to_string(), "warehouse client is not configured");
    }

    #[test]
    fn test_client_error_is_transparent() {
        let err: ExportError = anyhow::anyhow!("quota exceeded").into();
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
