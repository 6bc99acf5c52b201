//! Identity Provider Adapter Modules
//!
//! Firebase Authentication (Identity Toolkit) 統合のためのアダプターモジュール

pub mod client;
pub mod models;
