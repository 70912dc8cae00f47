// エラー型定義
//
// アプリケーション全体で使用されるカスタムエラー型を提供します。
// thiserrorを使用して、ConfigError, DatabaseError を定義します。

use thiserror::Error;

/// 設定エラー
///
/// 引数の解釈や接続設定の検証時に発生するエラーを表現します。
/// いずれも致命的で、比較処理の開始前に報告されます。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 引数が一つも指定されていない
    #[error("No program arguments provided")]
    NoArguments,

    /// データベース種別フラグがない
    #[error("No database type found: missing flag -t_{id}/--type_{id}")]
    MissingType {
        /// 接続識別子
        id: String,
    },

    /// 未対応のデータベース種別
    #[error("Unknown database type: {value:?}")]
    UnknownType {
        /// 指定された値
        value: String,
    },

    /// 必須フィールドが指定されていない
    #[error("Failed to parse args for database {id}: no {field} provided (flags: {flags})")]
    MissingField {
        /// フィールド名
        field: &'static str,
        /// 接続識別子
        id: String,
        /// 受け付けるフラグ（識別子付き）
        flags: String,
    },

    /// 2つの接続先が同一
    #[error("The databases are the same")]
    IdenticalConnections,
}

/// データベースエラー
///
/// 接続やスキーマ取得時に発生するエラーを表現します。
#[derive(Debug, Clone, Error)]
pub enum DatabaseError {
    /// Connection error (open / ping)
    #[error("Database n°{id} ({target}): {message}: {cause}")]
    Connection {
        /// 接続識別子
        id: String,
        /// 接続先（パスワードは伏せ字）
        target: String,
        /// エラーメッセージ
        message: String,
        /// 原因
        cause: String,
    },

    /// Query error (listing tables or columns)
    #[error("{}: {cause}", describe_query_target(.id, .table))]
    Query {
        /// 接続識別子
        id: String,
        /// カラム取得時の対象テーブル
        table: Option<String>,
        /// 原因
        cause: String,
    },
}

fn describe_query_target(id: &str, table: &Option<String>) -> String {
    match table {
        Some(table) => format!(
            "failed to list columns of the table {:?} in database n°{}",
            table, id
        ),
        None => format!("failed to list tables of database n°{}", id),
    }
}
