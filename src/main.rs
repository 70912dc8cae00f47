use anyhow::{Context, Result};
use clap::Parser;
use colored::control as color_control;
use dbcomparator::cli::commands::compare::{CompareCommand, CompareCommandHandler};
use dbcomparator::cli::Cli;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    sqlx::any::install_default_drivers();

    // CLIをパース（引数なしの場合は使い方を表示して終了）
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // 比較は逐次処理のため、単一スレッドのランタイムで実行する
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create Tokio runtime")
        .unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        });

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(output) => {
            if !output.is_empty() {
                print!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

/// コマンドを実行する
async fn run_command(cli: Cli) -> Result<String> {
    // --no-color フラグの処理
    if cli.no_color {
        color_control::set_override(false);
    }

    let handler = CompareCommandHandler::new();
    let command = CompareCommand {
        options: cli.compare_options(),
        connection_args: cli.connection_args,
    };
    handler.execute(&command).await
}

/// ログ出力を初期化する（RUST_LOG が指定されていればそちらを優先）
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
