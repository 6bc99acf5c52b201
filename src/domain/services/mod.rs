//! # Domain Services
//!
//! エンティティをまたぐビジネスルール

pub mod row_transformer;
