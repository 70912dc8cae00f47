// compareコマンドハンドラー
//
// 2つのデータベースのスキーマ比較を実装します。
// - 引数からの接続設定の解決（接続1 → 接続2 の順）
// - 同一接続先の検出
// - 接続の確立と解放
// - テーブル一覧の比較と、共通テーブルごとのカラム比較

use crate::adapters::database::DatabaseConnectionService;
use crate::adapters::schema_probe::SchemaSource;
use crate::cli::commands::report_formatter::ReportFormatter;
use crate::core::config::{CompareOptions, ConnectionConfig};
use crate::core::error::{ConfigError, DatabaseError};
use crate::core::schema_diff::{TableColumnsDiff, TableListDiff};
use crate::services::arg_extractor::ArgumentList;
use crate::services::connection_resolver::ConnectionResolver;
use crate::services::schema_diff_detector::SchemaDiffDetector;
use anyhow::Result;
use tracing::{debug, info};

/// 1つ目の接続の識別子
pub const FIRST_ID: &str = "1";
/// 2つ目の接続の識別子
pub const SECOND_ID: &str = "2";

/// compareコマンドの入力パラメータ
#[derive(Debug, Clone)]
pub struct CompareCommand {
    /// 接続フラグ（`-t_1 postgres -db_1 ...`）
    pub connection_args: Vec<String>,
    /// 比較オプション
    pub options: CompareOptions,
}

/// スキーマ比較結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonReport {
    /// テーブル一覧の差分
    pub tables: TableListDiff,
    /// 共通テーブルごとのカラム差分（テーブル一覧の順）
    pub columns: Vec<TableColumnsDiff>,
}

/// compareコマンドハンドラー
#[derive(Debug, Clone)]
pub struct CompareCommandHandler {
    resolver: ConnectionResolver,
    db_service: DatabaseConnectionService,
}

impl CompareCommandHandler {
    /// 新しいCompareCommandHandlerを作成
    pub fn new() -> Self {
        Self {
            resolver: ConnectionResolver::new(),
            db_service: DatabaseConnectionService::new(),
        }
    }

    /// compareコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `command` - compareコマンドのパラメータ
    ///
    /// # Returns
    ///
    /// 成功時は比較レポート、失敗時はエラー
    pub async fn execute(&self, command: &CompareCommand) -> Result<String> {
        // 設定エラーはすべて接続前に検出する
        let (first, second) = self.resolve_connections(&command.connection_args)?;
        let formatter = ReportFormatter::new(command.options.colors);

        // 接続失敗時は接続先がエラーメッセージに含まれる
        let mut output = String::from("\n");
        output.push_str(
            &formatter.format_connecting(FIRST_ID, &first.redacted_connection_string()),
        );
        let db1 = self.db_service.open(&first, FIRST_ID).await?;

        output.push_str(
            &formatter.format_connecting(SECOND_ID, &second.redacted_connection_string()),
        );
        let db2 = match self.db_service.open(&second, SECOND_ID).await {
            Ok(db2) => db2,
            Err(e) => {
                self.db_service.close(db1).await;
                return Err(e.into());
            }
        };

        let result = self
            .compare_sources(&db1, &db2, command.options.sort_columns)
            .await;

        self.db_service.close(db2).await;
        self.db_service.close(db1).await;

        let report = result?;
        output.push_str(&self.format_report(&report, &formatter));
        Ok(output)
    }

    /// 引数リストから2つの接続設定を解決する
    ///
    /// 接続1の解決で消費されたトークンは、接続2の解決時には残っていない。
    /// 認識されなかった引数は無視する。
    pub fn resolve_connections(
        &self,
        args: &[String],
    ) -> Result<(ConnectionConfig, ConnectionConfig), ConfigError> {
        if args.is_empty() {
            return Err(ConfigError::NoArguments);
        }

        let mut list = ArgumentList::new(args.iter().cloned());
        let first = self.resolver.resolve(&mut list, FIRST_ID)?;
        let second = self.resolver.resolve(&mut list, SECOND_ID)?;

        if !list.is_empty() {
            debug!(remaining = ?list.remaining(), "ignoring unrecognized arguments");
        }

        if first.targets_same_database(&second) {
            return Err(ConfigError::IdenticalConnections);
        }

        Ok((first, second))
    }

    /// 2つのスキーマ取得元を比較する
    ///
    /// テーブル一覧を比較した後、共通テーブルごとにカラム構成を比較する。
    /// 途中でクエリが失敗した場合はその時点で中断する。
    pub async fn compare_sources(
        &self,
        first: &dyn SchemaSource,
        second: &dyn SchemaSource,
        sort_columns: bool,
    ) -> Result<ComparisonReport, DatabaseError> {
        let detector = SchemaDiffDetector::new(sort_columns);

        let tables1 = first.list_tables().await?;
        info!(id = first.id(), count = tables1.len(), "listed tables");
        let tables2 = second.list_tables().await?;
        info!(id = second.id(), count = tables2.len(), "listed tables");

        let tables = detector.detect_table_diff(&tables1, &tables2);

        let mut columns = Vec::with_capacity(tables.common.len());
        for table in &tables.common {
            debug!(table = %table, "comparing columns");
            let columns1 = first.describe_columns(table).await?;
            let columns2 = second.describe_columns(table).await?;
            columns.push(TableColumnsDiff {
                table: table.clone(),
                columns: detector.detect_column_diff(&columns1, &columns2),
            });
        }

        Ok(ComparisonReport { tables, columns })
    }

    /// 比較結果をレポートに整形
    pub fn format_report(&self, report: &ComparisonReport, formatter: &ReportFormatter) -> String {
        let mut output = String::from("\n");
        output.push_str(&formatter.format_table_diff(&report.tables));

        if !report.columns.is_empty() {
            output.push('\n');
        }
        for table in &report.columns {
            output.push_str(&formatter.format_column_diff(&table.table, &table.columns));
        }

        output
    }
}

impl Default for CompareCommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Dialect;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_resolve_connections() {
        let handler = CompareCommandHandler::new();
        let tokens = args(&[
            "-t_1", "postgres", "-db_1", "shop", "-u_1", "alice", "-h_1", "pg", "-t_2", "mysql",
            "-db_2", "shop", "-u_2", "root", "-h_2", "my",
        ]);

        let (first, second) = handler.resolve_connections(&tokens).unwrap();

        assert_eq!(first.dialect, Dialect::PostgreSQL);
        assert_eq!(second.dialect, Dialect::MySQL);
        assert_eq!(second.port, 3306);
    }

    #[test]
    fn test_no_arguments() {
        let handler = CompareCommandHandler::new();

        let err = handler.resolve_connections(&[]).unwrap_err();

        assert_eq!(err, ConfigError::NoArguments);
    }

    #[test]
    fn test_identical_connections_are_rejected() {
        let handler = CompareCommandHandler::new();
        let tokens = args(&[
            "-t_1", "postgres", "-db_1", "shop", "-u_1", "alice", "-h_1", "pg", "--password_1",
            "a", "-t_2", "POSTGRES", "-db_2", "shop", "-u_2", "alice", "-h_2", "pg", "-p_2",
            "5432", "--password_2", "b",
        ]);

        let err = handler.resolve_connections(&tokens).unwrap_err();

        assert_eq!(err, ConfigError::IdenticalConnections);
    }

    #[test]
    fn test_second_connection_error_is_reported() {
        let handler = CompareCommandHandler::new();
        let tokens = args(&["-t_1", "postgres", "-db_1", "shop", "-u_1", "alice", "-h_1", "pg"]);

        let err = handler.resolve_connections(&tokens).unwrap_err();

        assert_eq!(
            err,
            ConfigError::MissingType {
                id: SECOND_ID.to_string()
            }
        );
    }
}
