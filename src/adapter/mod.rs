//! Adapter Layer
//!
//! 外部システム（Firebase Authentication, BigQuery, 設定ファイル）との統合

pub mod auth;
pub mod bigquery;
pub mod config;
pub mod identity;
pub mod repositories;
