//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ManageTableUseCase**: 認証テーブルの作成・削除
//! - **FetchUsersUseCase**: 全ユーザーの取得
//! - **ExportUsersUseCase**: ユーザーの変換とバッチ挿入

pub mod export_users;
pub mod fetch_users;
pub mod manage_table;
