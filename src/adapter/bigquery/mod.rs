//! BigQuery Adapter Modules
//!
//! BigQuery統合のためのアダプターモジュール

pub mod errors;
pub mod models;
