// DbComparatorライブラリのエントリーポイント
//
// モジュール構造:
// - cli: CLIレイヤー（引数の受付と比較コマンドの実行）
// - core: コアドメイン（接続設定、エラー、差分モデル）
// - services: 引数抽出、接続設定の解決、スキーマ差分検出
// - adapters: データベース接続とカタログ参照SQL

pub mod adapters;
pub mod cli;
pub mod core;
pub mod services;
