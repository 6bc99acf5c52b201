//! # Fetch Users Use Case
//!
//! 全ユーザー取得ユースケース

use std::sync::Arc;
use anyhow::Result;
use log::debug;

use crate::domain::entities::auth_user::AuthUser;
use crate::domain::repositories::user_repository::{UserRepository, USER_PAGE_SIZE};

/// 全ユーザー取得ユースケース
///
/// ページカーソルをたどって全ユーザーを取得する。ページは1つずつ順番に取得する
pub struct FetchUsersUseCase<U: UserRepository + ?Sized> {
    user_repository: Arc<U>,
}

impl<U: UserRepository + ?Sized> FetchUsersUseCase<U> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `user_repository` - ユーザーリポジトリ
    pub fn new(user_repository: Arc<U>) -> Self {
        Self { user_repository }
    }

    /// 全ユーザーを取得
    ///
    /// # Returns
    ///
    /// プロバイダが返した順序のままのユーザー一覧
    ///
    /// # Errors
    ///
    /// いずれかのページ取得に失敗した場合にエラーを返す
    pub async fn execute(&self) -> Result<Vec<AuthUser>> {
        let mut page = self.user_repository.list_users(USER_PAGE_SIZE, None).await?;
        let mut pages = 1;
        let mut users = std::mem::take(&mut page.users);

        while page.has_next() {
            let token = page.next_page_token.take();
            page = self.user_repository.list_users(USER_PAGE_SIZE, token).await?;
            pages += 1;
            users.append(&mut page.users);
            debug!("Fetched page {} ({} users so far)", pages, users.len());
        }

        debug!("Fetched {} users in {} pages", users.len(), pages);

        Ok(users)
    }
}
