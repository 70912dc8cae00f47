// 接続設定
//
// 比較対象となる2つのデータベースの接続設定と、
// 比較処理全体の挙動を切り替えるオプションを定義します。

use crate::adapters::catalog_scripts;
use crate::adapters::connection_string;
use crate::core::error::ConfigError;
use std::str::FromStr;

/// データベース方言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    PostgreSQL,
    MySQL,
}

impl Dialect {
    /// 対応している全方言
    pub const ALL: [Dialect; 2] = [Dialect::PostgreSQL, Dialect::MySQL];

    /// ドライバー名（`-t_<id>` フラグに指定する値でもある）
    pub fn driver_name(&self) -> &'static str {
        match self {
            Dialect::PostgreSQL => "postgres",
            Dialect::MySQL => "mysql",
        }
    }

    /// テーブル一覧を取得するSQL
    pub fn list_tables_query(&self) -> &'static str {
        catalog_scripts::list_tables(*self)
    }

    /// 単一テーブルのカラム構成を取得するSQL
    ///
    /// テーブル名はプレースホルダーとしてバインドされます。
    pub fn describe_columns_query(&self) -> &'static str {
        catalog_scripts::describe_columns(*self)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.driver_name())
    }
}

/// 大文字小文字を区別せずに方言名を解釈する
impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|dialect| dialect.driver_name().eq_ignore_ascii_case(value))
            .ok_or_else(|| ConfigError::UnknownType {
                value: value.to_string(),
            })
    }
}

/// データベース接続設定
///
/// `ConnectionResolver` によって引数リストから構築されます。
/// 構築後は必須フィールドが埋まっており、ポートも確定しています。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// データベース方言
    pub dialect: Dialect,
    /// データベース名
    pub database: String,
    /// ユーザー名
    pub user: String,
    /// パスワード
    pub password: Option<String>,
    /// ホスト名
    pub host: String,
    /// ポート番号
    pub port: u16,
}

impl ConnectionConfig {
    /// 接続文字列を生成
    pub fn connection_string(&self) -> String {
        connection_string::build_connection_string(self)
    }

    /// パスワードを伏せた接続文字列を生成（ログ・画面表示用）
    pub fn redacted_connection_string(&self) -> String {
        connection_string::build_redacted_connection_string(self)
    }

    /// 同一のデータベースを指しているかどうか
    ///
    /// ドライバー、ホスト、ポート、データベース名、ユーザーが一致すれば同一とみなす。
    /// パスワードは比較対象に含めない。
    pub fn targets_same_database(&self, other: &ConnectionConfig) -> bool {
        self.dialect == other.dialect
            && self.host == other.host
            && self.port == other.port
            && self.database == other.database
            && self.user == other.user
    }
}

/// 比較オプション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompareOptions {
    /// カラムを名前順に並べ替えてから比較する
    pub sort_columns: bool,
    /// ANSIカラーで出力する
    pub colors: bool,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            sort_columns: true,
            colors: true,
        }
    }
}
