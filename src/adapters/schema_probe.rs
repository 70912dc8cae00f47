// スキーマ取得インターフェース
//
// テーブル一覧とカラム構成の取得を抽象化します。
// 実装はライブなデータベース接続（DatabaseHandle）ですが、
// 比較処理はこのトレイトにのみ依存します。

use crate::core::error::DatabaseError;
use crate::core::schema_diff::ColumnDescriptor;
use async_trait::async_trait;
use sqlx::any::AnyRow;
use sqlx::Row;

/// スキーマ取得元
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// 接続識別子（"1" または "2"）
    fn id(&self) -> &str;

    /// テーブル名一覧を取得（カタログが返す順序のまま）
    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError>;

    /// 指定テーブルのカラム情報を取得（カタログ上の定義順）
    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DatabaseError>;
}

/// テーブル一覧クエリの行からテーブル名を取り出す
pub(crate) fn table_name_from_row(row: &AnyRow) -> Result<String, sqlx::Error> {
    row.try_get::<String, _>(0)
}

/// カラム構成クエリの行をカラム記述子に変換する
///
/// 列の並びは name, type, character_maximum_length, is_nullable。
pub(crate) fn column_from_row(row: &AnyRow) -> Result<ColumnDescriptor, sqlx::Error> {
    let name: String = row.try_get(0)?;
    let type_name: String = row.try_get(1)?;
    let length: Option<i64> = row.try_get(2)?;
    let is_nullable: Option<String> = row.try_get(3)?;

    Ok(ColumnDescriptor {
        name,
        type_name,
        length,
        nullable: is_nullable.as_deref().and_then(parse_nullable),
    })
}

/// information_schema の is_nullable 値を解釈する
fn parse_nullable(value: &str) -> Option<bool> {
    match value.trim().to_uppercase().as_str() {
        "YES" => Some(true),
        "NO" => Some(false),
        _ => None,
    }
}
