//! # UserRow Entity
//!
//! BigQueryテーブルの1行を表すエンティティ

use serde::{Deserialize, Serialize};

/// 認証テーブルの1行
///
/// カラム名はテーブルスキーマと一致させる。`None` は JSON の `null` として送信される
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRow {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub mail: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// エポック秒
    #[serde(rename = "creationTime")]
    pub creation_time: Option<i64>,
    /// エポック秒
    #[serde(rename = "lastSignInTime")]
    pub last_sign_in_time: Option<i64>,
    /// エポック秒
    #[serde(rename = "tokensValidAfterTime")]
    pub tokens_valid_after_time: Option<i64>,
    #[serde(rename = "emailVerified")]
    pub email_verified: bool,
    pub disabled: bool,
}
