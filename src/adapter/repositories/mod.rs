//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod bigquery_warehouse_repository;
pub mod identity_user_repository;
