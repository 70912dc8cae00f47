// カタログ参照SQL
//
// 方言ごとのシステムカタログ参照クエリを静的リソースとして埋め込む。

use crate::core::config::Dialect;

const POSTGRES_LIST_TABLES: &str = include_str!("../../sql/postgres/list_tables.sql");
const POSTGRES_DESCRIBE_COLUMNS: &str = include_str!("../../sql/postgres/describe_columns.sql");
const MYSQL_LIST_TABLES: &str = include_str!("../../sql/mysql/list_tables.sql");
const MYSQL_DESCRIBE_COLUMNS: &str = include_str!("../../sql/mysql/describe_columns.sql");

/// テーブル一覧を取得するSQL
pub fn list_tables(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::PostgreSQL => POSTGRES_LIST_TABLES,
        Dialect::MySQL => MYSQL_LIST_TABLES,
    }
}

/// テーブルのカラム構成を取得するSQL（テーブル名を1つバインドする）
pub fn describe_columns(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::PostgreSQL => POSTGRES_DESCRIBE_COLUMNS,
        Dialect::MySQL => MYSQL_DESCRIBE_COLUMNS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_tables_scripts_are_vendor_specific() {
        assert!(list_tables(Dialect::PostgreSQL).contains("current_schema()"));
        assert!(list_tables(Dialect::MySQL).contains("DATABASE()"));
    }

    #[test]
    fn test_describe_columns_placeholders() {
        assert!(describe_columns(Dialect::PostgreSQL).contains("$1"));
        assert!(describe_columns(Dialect::MySQL).contains("table_name = ?"));
    }

    #[test]
    fn test_describe_columns_keeps_catalog_order() {
        for dialect in Dialect::ALL {
            assert!(describe_columns(dialect).contains("ORDER BY ordinal_position"));
        }
    }
}
