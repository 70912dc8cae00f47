// コマンドハンドラー層

pub mod compare;
pub mod report_formatter;
