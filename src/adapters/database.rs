// データベース接続アダプター
//
// SQLxを使用したデータベース接続の管理を行います。
// PostgreSQL、MySQLに対応した統一されたインターフェースを提供します。

use crate::adapters::schema_probe::{self, SchemaSource};
use crate::core::config::ConnectionConfig;
use crate::core::error::DatabaseError;
use crate::core::schema_diff::ColumnDescriptor;
use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use tracing::{debug, info};

/// データベース接続サービス
///
/// 接続の確立・疎通確認・解放を行います。
#[derive(Debug, Clone)]
pub struct DatabaseConnectionService {}

impl DatabaseConnectionService {
    /// 新しいDatabaseConnectionServiceを作成
    pub fn new() -> Self {
        Self {}
    }

    /// 接続を開いて疎通を確認する
    ///
    /// # Arguments
    ///
    /// * `config` - 接続設定
    /// * `id` - 接続識別子
    ///
    /// # Returns
    ///
    /// 接続ハンドルまたはエラー
    pub async fn open(
        &self,
        config: &ConnectionConfig,
        id: &str,
    ) -> Result<DatabaseHandle, DatabaseError> {
        info!(
            id,
            connection = %config.redacted_connection_string(),
            "opening connection"
        );

        // 比較は逐次処理のため、接続は1本で足りる
        let pool = AnyPoolOptions::new()
            .max_connections(1)
            .connect(&config.connection_string())
            .await
            .map_err(|e| connection_error(id, config, "failed to open the connection", e))?;

        let handle = DatabaseHandle {
            id: id.to_string(),
            config: config.clone(),
            pool,
        };

        if let Err(e) = self.ping(&handle).await {
            self.close(handle).await;
            return Err(e);
        }

        Ok(handle)
    }

    /// 接続テストを実行
    pub async fn ping(&self, handle: &DatabaseHandle) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1")
            .execute(&handle.pool)
            .await
            .map(|_| ())
            .map_err(|e| {
                connection_error(
                    &handle.id,
                    &handle.config,
                    "failed to connect to the database",
                    e,
                )
            })
    }

    /// 接続を閉じる
    pub async fn close(&self, handle: DatabaseHandle) {
        debug!(id = %handle.id, "closing connection");
        handle.pool.close().await;
    }
}

impl Default for DatabaseConnectionService {
    fn default() -> Self {
        Self::new()
    }
}

/// 確立済みのデータベース接続
#[derive(Debug)]
pub struct DatabaseHandle {
    id: String,
    config: ConnectionConfig,
    pool: AnyPool,
}

/// 接続エラーを生成（接続先はパスワードを伏せて含める）
fn connection_error(
    id: &str,
    config: &ConnectionConfig,
    message: &str,
    cause: sqlx::Error,
) -> DatabaseError {
    DatabaseError::Connection {
        id: id.to_string(),
        target: config.redacted_connection_string(),
        message: message.to_string(),
        cause: cause.to_string(),
    }
}

impl DatabaseHandle {
    fn query_error(&self, table: Option<&str>, cause: sqlx::Error) -> DatabaseError {
        DatabaseError::Query {
            id: self.id.clone(),
            table: table.map(str::to_string),
            cause: cause.to_string(),
        }
    }
}

#[async_trait]
impl SchemaSource for DatabaseHandle {
    fn id(&self) -> &str {
        &self.id
    }

    async fn list_tables(&self) -> Result<Vec<String>, DatabaseError> {
        let rows = sqlx::query(self.config.dialect.list_tables_query())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| self.query_error(None, e))?;

        rows.iter()
            .map(schema_probe::table_name_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.query_error(None, e))
    }

    async fn describe_columns(&self, table: &str) -> Result<Vec<ColumnDescriptor>, DatabaseError> {
        let rows = sqlx::query(self.config.dialect.describe_columns_query())
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| self.query_error(Some(table), e))?;

        rows.iter()
            .map(schema_probe::column_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| self.query_error(Some(table), e))
    }
}
