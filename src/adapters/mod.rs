// Adapters
// データベースへのアクセスとベンダー固有のSQLを抽象化

pub mod catalog_scripts;
pub mod connection_string;
pub mod database;
pub mod schema_probe;
