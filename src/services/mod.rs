// Services Layer
// ドメインロジックを実行するサービス層

pub mod arg_extractor;
pub mod connection_resolver;
pub mod schema_diff_detector;
