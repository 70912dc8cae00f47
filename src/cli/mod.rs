// CLI Layer
// ユーザー入力の受付とコマンドの実行

pub mod commands;

use crate::core::config::CompareOptions;
use clap::{ArgAction, Parser};

/// 接続フラグの使い方
pub const CONNECTION_USAGE: &str = "dbcomparator [OPTIONS] -t_1 <db 1 type> -db_1 <db 1 name> -u_1 <user 1> [--password_1 <password 1>] -h_1 <host 1> [-p_1 <port 1>] -t_2 <db 2 type> -db_2 <db 2 name> -u_2 <user 2> [--password_2 <password 2>] -h_2 <host 2> [-p_2 <port 2>]";

/// DbComparator - Database Schema Comparison CLI
///
/// Compare the tables and columns of two PostgreSQL/MySQL databases.
#[derive(Parser, Debug)]
#[command(name = "dbcomparator")]
#[command(author = "DbComparator Contributors")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Database schema comparison CLI tool")]
#[command(override_usage = CONNECTION_USAGE)]
#[command(disable_help_flag = true)]
#[command(after_help = "CONNECTION FLAGS:
  Every flag is suffixed with _1 or _2 to select the database it configures.
  Values may be given as a separate word (-h_1 localhost) or inline (--host_1=localhost).

  -t_<id>,  --type_<id>       Database type: postgres | mysql (required)
  -db_<id>, --database_<id>   Database name (required)
  -u_<id>,  --user_<id>       User name (required)
            --password_<id>   Password
  -h_<id>,  --host_<id>       Host name (required)
  -p_<id>,  --port_<id>       Port (default: 5432 for postgres, 3306 for mysql)

EXAMPLES:
  dbcomparator -t_1 postgres -db_1 shop -u_1 admin -h_1 localhost \\
               -t_2 mysql -db_2 shop -u_2 root -h_2 localhost --password_2=secret")]
pub struct Cli {
    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Compare columns in their catalog order instead of sorting them by name
    #[arg(long)]
    pub ignore_column_order: bool,

    /// Connection flags for both databases
    #[arg(
        value_name = "CONNECTION FLAGS",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub connection_args: Vec<String>,
}

impl Cli {
    /// 比較オプションを組み立てる
    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            sort_columns: !self.ignore_column_order,
            colors: !self.no_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_connection_flags() {
        let cli = Cli::try_parse_from([
            "dbcomparator",
            "-t_1",
            "postgres",
            "-h_1",
            "localhost",
            "--port_2=3307",
        ])
        .unwrap();

        assert_eq!(
            cli.connection_args,
            vec!["-t_1", "postgres", "-h_1", "localhost", "--port_2=3307"]
        );
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_options_before_connection_flags() {
        let cli = Cli::try_parse_from([
            "dbcomparator",
            "--no-color",
            "--ignore-column-order",
            "--verbose",
            "-t_1",
            "mysql",
        ])
        .unwrap();

        assert!(cli.verbose);
        let options = cli.compare_options();
        assert!(!options.colors);
        assert!(!options.sort_columns);
        assert_eq!(cli.connection_args, vec!["-t_1", "mysql"]);
    }

    #[test]
    fn test_default_options() {
        let cli = Cli::try_parse_from(["dbcomparator", "-t_1", "mysql"]).unwrap();

        assert_eq!(cli.compare_options(), CompareOptions::default());
    }

    #[test]
    fn test_no_arguments_is_an_error() {
        let result = Cli::try_parse_from(["dbcomparator"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_help_and_version() {
        assert!(Cli::try_parse_from(["dbcomparator", "--help"]).is_err());
        assert!(Cli::try_parse_from(["dbcomparator", "--version"]).is_err());
    }
}
