//! # Table Schema
//!
//! 認証テーブルの固定スキーマ定義

/// エクスポート先データセット名
pub const DATASET_ID: &str = "authentication";

/// エクスポート先テーブル名
pub const TABLE_ID: &str = "authentication";

/// テーブルのフレンドリー名
pub const TABLE_FRIENDLY_NAME: &str = "auth";

/// カラムの型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    String,
    Integer,
    Boolean,
}

/// カラムのモード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnMode {
    Required,
    Nullable,
}

/// カラム定義 (name, type, mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub mode: ColumnMode,
}

impl ColumnSpec {
    const fn required(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            mode: ColumnMode::Required,
        }
    }

    const fn nullable(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            mode: ColumnMode::Nullable,
        }
    }
}

/// 認証テーブルのスキーマ
///
/// テーブル作成時にのみ使用し、挿入する行に対しては検証しない
pub const AUTH_TABLE_SCHEMA: &[ColumnSpec] = &[
    ColumnSpec::required("userId", ColumnType::String),
    ColumnSpec::nullable("mail", ColumnType::String),
    ColumnSpec::nullable("creationTime", ColumnType::Integer),
    ColumnSpec::nullable("lastSignInTime", ColumnType::Integer),
    ColumnSpec::nullable("displayName", ColumnType::String),
    ColumnSpec::nullable("photoURL", ColumnType::String),
    ColumnSpec::nullable("phoneNumber", ColumnType::String),
    ColumnSpec::nullable("tokensValidAfterTime", ColumnType::Integer),
    ColumnSpec::nullable("emailVerified", ColumnType::Boolean),
    ColumnSpec::nullable("disabled", ColumnType::Boolean),
];
