//! # User Repository Trait
//!
//! 認証プロバイダのユーザー一覧取得を抽象化

use anyhow::Result;
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::domain::entities::auth_user::UserPage;

/// 1ページあたりに取得するユーザー数
pub const USER_PAGE_SIZE: u32 = 1000;

/// ユーザーリポジトリ
///
/// ページトークンによるカーソルでユーザーを列挙する
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// ユーザーを1ページ取得
    ///
    /// # Arguments
    ///
    /// * `max_results` - 1ページの最大件数
    /// * `page_token` - 前ページで返されたカーソル（最初のページでは `None`）
    ///
    /// # Errors
    ///
    /// プロバイダへのリクエストに失敗した場合にエラーを返す
    async fn list_users(&self, max_results: u32, page_token: Option<String>) -> Result<UserPage>;
}
