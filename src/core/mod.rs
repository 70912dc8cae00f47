// Core Domain
// 接続設定、エラー型、スキーマ差分モデル

pub mod config;
pub mod error;
pub mod schema_diff;
