//! # Row Transformer Service
//!
//! 認証ユーザーをテーブル行に変換するビジネスロジック

use chrono::{DateTime, Utc};

use crate::domain::entities::auth_user::AuthUser;
use crate::domain::entities::user_row::UserRow;

/// 行変換サービス
pub struct RowTransformer;

impl RowTransformer {
    /// 1ユーザーを1行に変換
    ///
    /// どのような `AuthUser` に対しても失敗しない。
    /// 空文字の文字列フィールドは `None` に、日時はエポック秒に変換される
    ///
    /// # Arguments
    ///
    /// * `user` - 変換元のユーザー
    pub fn transform(user: &AuthUser) -> UserRow {
        UserRow {
            user_id: user.uid.clone(),
            mail: non_empty(&user.email),
            display_name: non_empty(&user.display_name),
            phone_number: non_empty(&user.phone_number),
            photo_url: non_empty(&user.photo_url),
            creation_time: user.creation_time.map(epoch_seconds),
            last_sign_in_time: user.last_sign_in_time.map(epoch_seconds),
            tokens_valid_after_time: user.tokens_valid_after_time.map(epoch_seconds),
            email_verified: user.email_verified,
            disabled: user.disabled,
        }
    }

    /// 全ユーザーを順序を保って変換
    pub fn transform_all(users: &[AuthUser]) -> Vec<UserRow> {
        users.iter().map(Self::transform).collect()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

// ミリ秒は切り捨て
fn epoch_seconds(time: DateTime<Utc>) -> i64 {
    time.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_full_user() -> AuthUser {
        AuthUser {
            uid: "uid-full".to_string(),
            email: Some("alice@example.com".to_string()),
            display_name: Some("Alice".to_string()),
            phone_number: Some("+81900000000".to_string()),
            photo_url: Some("https://example.com/alice.png".to_string()),
            disabled: true,
            email_verified: true,
            creation_time: Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            last_sign_in_time: Some(Utc.with_ymd_and_hms(2024, 12, 25, 10, 0, 0).unwrap()),
            tokens_valid_after_time: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn test_transform_full_user() {
        let row = RowTransformer::transform(&create_full_user());

        assert_eq!(row.user_id, "uid-full");
        assert_eq!(row.mail.as_deref(), Some("alice@example.com"));
        assert_eq!(row.display_name.as_deref(), Some("Alice"));
        assert_eq!(row.phone_number.as_deref(), Some("+81900000000"));
        assert_eq!(row.photo_url.as_deref(), Some("https://example.com/alice.png"));
        assert_eq!(row.creation_time, Some(1_704_067_200));
        assert_eq!(row.last_sign_in_time, Some(1_735_120_800));
        assert_eq!(row.tokens_valid_after_time, Some(1_717_200_000));
        assert!(row.email_verified);
        assert!(row.disabled);
    }

    #[test]
    fn test_transform_minimal_user_all_optional_null() {
        let row = RowTransformer::transform(&AuthUser::new("uid-min"));

        assert_eq!(row.user_id, "uid-min");
        assert!(row.mail.is_none());
        assert!(row.display_name.is_none());
        assert!(row.phone_number.is_none());
        assert!(row.photo_url.is_none());
        assert!(row.creation_time.is_none());
        assert!(row.last_sign_in_time.is_none());
        assert!(row.tokens_valid_after_time.is_none());

        let json = serde_json::to_value(&row).unwrap();
        assert!(json["mail"].is_null());
        assert!(json["tokensValidAfterTime"].is_null());
    }

    #[test]
    fn test_transform_empty_strings_become_null() {
        let user = AuthUser {
            email: Some(String::new()),
            display_name: Some(String::new()),
            phone_number: Some(String::new()),
            photo_url: Some(String::new()),
            ..AuthUser::new("uid-empty")
        };

        let row = RowTransformer::transform(&user);

        assert!(row.mail.is_none());
        assert!(row.display_name.is_none());
        assert!(row.phone_number.is_none());
        assert!(row.photo_url.is_none());
    }

    #[test]
    fn test_transform_truncates_milliseconds() {
        let user = AuthUser {
            creation_time: DateTime::from_timestamp_millis(1_700_000_000_999),
            ..AuthUser::new("uid-ms")
        };

        let row = RowTransformer::transform(&user);

        assert_eq!(row.creation_time, Some(1_700_000_000));
    }

    #[test]
    fn test_transform_all_preserves_order() {
        let users = vec![AuthUser::new("b"), AuthUser::new("a"), AuthUser::new("c")];

        let rows = RowTransformer::transform_all(&users);

        let ids: Vec<&str> = rows.iter().map(|r| r.user_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }
}
