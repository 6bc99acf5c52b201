//! Identity Toolkit User Repository Implementation
//!
//! UserRepositoryのFirebase Authentication実装

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::adapter::identity::client::IdentityToolkitClient;
use crate::domain::entities::auth_user::UserPage;
use crate::domain::repositories::user_repository::UserRepository;

/// Firebase Authenticationユーザーリポジトリ
pub struct IdentityUserRepository {
    client: IdentityToolkitClient,
}

impl IdentityUserRepository {
    /// 新しいリポジトリを作成
    pub fn new(client: IdentityToolkitClient) -> Self {
        Self { client }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl UserRepository for IdentityUserRepository {
    async fn list_users(&self, max_results: u32, page_token: Option<String>) -> Result<UserPage> {
        let response = self
            .client
            .batch_get(max_results, page_token.as_deref())
            .await
            .with_context(|| {
                format!(
                    "Failed to list users of project {}",
                    self.client.project_id()
                )
            })?;

        Ok(UserPage::from(response))
    }
}
