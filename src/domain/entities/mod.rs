//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **AuthUser**: 認証プロバイダのユーザー
//! - **UserRow**: 認証テーブルの1行
//! - **UploadBatch**: アップロードバッチのバリューオブジェクト
//! - **table_schema**: 認証テーブルの固定スキーマ

pub mod auth_user;
pub mod table_schema;
pub mod upload_batch;
pub mod user_row;
