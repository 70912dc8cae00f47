// 比較レポートのフォーマッター
//
// テーブル差分・カラム差分を人が読むためのテキストに整形します。
// 色付けは CompareOptions::colors で明示的に切り替えます。

use crate::core::schema_diff::{ColumnListDiff, TableListDiff};
use colored::Colorize;
use std::fmt::Write;

/// セクション区切り
pub const SPACER: &str = "- - - - - - - - - - - - - - - - - - - -";

/// 表示の調子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// 一致（緑）
    Same,
    /// 欠落（赤）
    Missing,
    /// 相違（青）
    Different,
    /// 片側が他方を包含（シアン）
    PartiallySame,
    /// 共通（白）
    Common,
}

/// レポートフォーマッター
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter {
    colors: bool,
}

impl ReportFormatter {
    /// 新しいReportFormatterを作成
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }

    /// 文字列に色を付ける（無効時はそのまま）
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.colors {
            return text.to_string();
        }
        match tone {
            Tone::Same => text.green().to_string(),
            Tone::Missing => text.red().to_string(),
            Tone::Different => text.blue().to_string(),
            Tone::PartiallySame => text.cyan().to_string(),
            Tone::Common => text.white().to_string(),
        }
    }

    /// 接続開始の行
    pub fn format_connecting(&self, id: &str, connection: &str) -> String {
        format!("Database {}: connecting with {}\n", id, connection)
    }

    /// テーブル差分を整形
    pub fn format_table_diff(&self, diff: &TableListDiff) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "Comparison of the tables of the two databases:");
        let _ = writeln!(output, "{}", SPACER);
        if diff.is_identical() {
            let _ = writeln!(
                output,
                "{}",
                self.paint("Both databases have the same tables.", Tone::Same)
            );
        } else {
            self.append_category(
                &mut output,
                &diff.common,
                "Tables in common between the two databases:",
                Tone::Common,
                Some("They are no tables in common between the two databases."),
            );
            self.append_missing(
                &mut output,
                &diff.missing_from_first,
                "Tables missing from the first database:",
                "The first database contains all the tables of the second database.",
            );
            self.append_missing(
                &mut output,
                &diff.missing_from_second,
                "Tables missing from the second database:",
                "The second database contains all the tables of the first database.",
            );
        }
        let _ = writeln!(output, "{}", SPACER);

        output
    }

    /// カラム差分を整形
    pub fn format_column_diff(&self, table: &str, diff: &ColumnListDiff) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "\nComparison of the columns of the table {:?}:", table);
        let _ = writeln!(output, "{}", SPACER);
        if diff.has_same_columns() {
            let _ = writeln!(
                output,
                "{}",
                self.paint("Both tables have the same columns.", Tone::Same)
            );
            self.append_mismatches(&mut output, diff);
        } else {
            self.append_category(
                &mut output,
                &diff.common,
                "Columns in common between the two tables:",
                Tone::Common,
                Some("They are no columns in common between the two tables."),
            );
            self.append_mismatches(&mut output, diff);
            self.append_missing(
                &mut output,
                &diff.missing_from_first,
                "Columns missing from the first table:",
                "The first table contains all the columns of the second table.",
            );
            self.append_missing(
                &mut output,
                &diff.missing_from_second,
                "Columns missing from the second table:",
                "The second table contains all the columns of the first table.",
            );
        }
        let _ = writeln!(output, "{}", SPACER);

        output
    }

    fn append_mismatches(&self, output: &mut String, diff: &ColumnListDiff) {
        let sections = [
            (
                &diff.different_type,
                "Columns having the same name but not the same type:",
            ),
            (
                &diff.different_length,
                "Columns having the same name but not the same length:",
            ),
            (
                &diff.different_nullability,
                "Columns having the same name but not the same nullability:",
            ),
        ];
        for (names, title) in sections {
            self.append_category(output, names, title, Tone::Different, None);
        }
    }

    /// 見出しとタブ字下げの一覧を追加する（空の場合は empty_message を表示）
    fn append_category(
        &self,
        output: &mut String,
        names: &[String],
        title: &str,
        tone: Tone,
        empty_message: Option<&str>,
    ) {
        if names.is_empty() {
            if let Some(message) = empty_message {
                let _ = writeln!(output, "{}", self.paint(message, Tone::Missing));
            }
            return;
        }
        let _ = writeln!(output, "{}\n\t{}", title, self.paint(&names.join(", "), tone));
    }

    fn append_missing(
        &self,
        output: &mut String,
        names: &[String],
        title: &str,
        contains_all_message: &str,
    ) {
        if names.is_empty() {
            let _ = writeln!(
                output,
                "{}",
                self.paint(contains_all_message, Tone::PartiallySame)
            );
        } else {
            let _ = writeln!(
                output,
                "{}\n\t{}",
                title,
                self.paint(&names.join(", "), Tone::Missing)
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_paint_without_colors() {
        let formatter = ReportFormatter::new(false);
        assert_eq!(formatter.paint("users", Tone::Missing), "users");
    }

    #[test]
    fn test_paint_with_colors() {
        colored::control::set_override(true);
        let formatter = ReportFormatter::new(true);

        let painted = formatter.paint("users", Tone::Missing);

        assert!(painted.contains("\u{1b}["));
        assert!(painted.contains("users"));
    }

    #[test]
    fn test_identical_tables() {
        let formatter = ReportFormatter::new(false);
        let diff = TableListDiff {
            common: names(&["users"]),
            ..Default::default()
        };

        let output = formatter.format_table_diff(&diff);

        assert!(output.starts_with("Comparison of the tables of the two databases:\n"));
        assert!(output.contains("Both databases have the same tables."));
        assert_eq!(output.matches(SPACER).count(), 2);
    }

    #[test]
    fn test_table_differences() {
        let formatter = ReportFormatter::new(false);
        let diff = TableListDiff {
            common: names(&["B", "C"]),
            missing_from_first: names(&["D"]),
            missing_from_second: names(&["A"]),
        };

        let output = formatter.format_table_diff(&diff);

        assert!(output.contains("Tables in common between the two databases:\n\tB, C\n"));
        assert!(output.contains("Tables missing from the first database:\n\tD\n"));
        assert!(output.contains("Tables missing from the second database:\n\tA\n"));
    }

    #[test]
    fn test_no_common_tables() {
        let formatter = ReportFormatter::new(false);
        let diff = TableListDiff {
            common: Vec::new(),
            missing_from_first: names(&["x"]),
            missing_from_second: Vec::new(),
        };

        let output = formatter.format_table_diff(&diff);

        assert!(output.contains("They are no tables in common between the two databases."));
        assert!(output
            .contains("The second database contains all the tables of the first database."));
    }

    #[test]
    fn test_column_mismatch_sections() {
        let formatter = ReportFormatter::new(false);
        let diff = ColumnListDiff {
            common: names(&["id"]),
            different_type: names(&["price"]),
            different_length: names(&["name"]),
            missing_from_second: names(&["legacy"]),
            ..Default::default()
        };

        let output = formatter.format_column_diff("products", &diff);

        assert!(output.contains("Comparison of the columns of the table \"products\":"));
        assert!(output.contains("Columns in common between the two tables:\n\tid\n"));
        assert!(output.contains("Columns having the same name but not the same type:\n\tprice\n"));
        assert!(output.contains("Columns having the same name but not the same length:\n\tname\n"));
        assert!(!output.contains("not the same nullability"));
        assert!(output.contains("The first table contains all the columns of the second table."));
        assert!(output.contains("Columns missing from the second table:\n\tlegacy\n"));
    }

    #[test]
    fn test_same_columns_still_reports_mismatches() {
        let formatter = ReportFormatter::new(false);
        let diff = ColumnListDiff {
            common: names(&["id"]),
            different_nullability: names(&["email"]),
            ..Default::default()
        };

        let output = formatter.format_column_diff("users", &diff);

        assert!(output.contains("Both tables have the same columns."));
        assert!(output.contains("not the same nullability:\n\temail\n"));
    }
}
