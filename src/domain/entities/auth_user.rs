//! # AuthUser Entity
//!
//! 認証プロバイダから取得したユーザーのドメインエンティティ

use chrono::{DateTime, Utc};

/// 認証ユーザー
///
/// Identity Provider から読み取った時点のスナップショット。読み取り専用として扱う
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthUser {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    pub disabled: bool,
    pub email_verified: bool,
    /// アカウント作成日時
    pub creation_time: Option<DateTime<Utc>>,
    /// 最終サインイン日時（一度もサインインしていない場合は `None`）
    pub last_sign_in_time: Option<DateTime<Utc>>,
    /// この時刻より前に発行されたトークンは無効
    pub tokens_valid_after_time: Option<DateTime<Utc>>,
}

impl AuthUser {
    /// UIDのみを持つユーザーを作成
    ///
    /// # Arguments
    ///
    /// * `uid` - ユーザーの一意識別子
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            ..Default::default()
        }
    }
}

/// ユーザー一覧の1ページ
#[derive(Debug, Clone, Default)]
pub struct UserPage {
    pub users: Vec<AuthUser>,
    /// 次ページのカーソル。最終ページでは `None`
    pub next_page_token: Option<String>,
}

impl UserPage {
    pub fn new(users: Vec<AuthUser>, next_page_token: Option<String>) -> Self {
        Self {
            users,
            next_page_token,
        }
    }

    /// 続きのページがあるかどうか
    ///
    /// 空文字のトークンは最終ページとして扱う
    pub fn has_next(&self) -> bool {
        self.next_page_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}
