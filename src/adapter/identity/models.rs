//! Identity Toolkit Models
//!
//! `accounts:batchGet` response payloads

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::auth_user::{AuthUser, UserPage};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetAccountsResponse {
    // Omitted by the API when the project has no users
    #[serde(default)]
    pub users: Vec<UserInfo>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub local_id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub email_verified: bool,
    /// Epoch milliseconds, as a decimal string
    pub created_at: Option<String>,
    /// Epoch milliseconds, as a decimal string
    pub last_login_at: Option<String>,
    /// Epoch seconds, as a decimal string
    pub valid_since: Option<String>,
}

fn parse_millis(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(DateTime::from_timestamp_millis)
}

fn parse_seconds(value: Option<&str>) -> Option<DateTime<Utc>> {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

impl From<UserInfo> for AuthUser {
    fn from(info: UserInfo) -> Self {
        AuthUser {
            creation_time: parse_millis(info.created_at.as_deref()),
            last_sign_in_time: parse_millis(info.last_login_at.as_deref()),
            tokens_valid_after_time: parse_seconds(info.valid_since.as_deref()),
            uid: info.local_id,
            email: info.email,
            display_name: info.display_name,
            phone_number: info.phone_number,
            photo_url: info.photo_url,
            disabled: info.disabled,
            email_verified: info.email_verified,
        }
    }
}

impl From<BatchGetAccountsResponse> for UserPage {
    fn from(response: BatchGetAccountsResponse) -> Self {
        UserPage::new(
            response.users.into_iter().map(AuthUser::from).collect(),
            response.next_page_token,
        )
    }
}
