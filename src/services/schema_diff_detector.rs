// スキーマ差分検出サービス
//
// 2つのデータベースのテーブル一覧、および共通テーブルのカラム構成の差分を検出する。

use crate::core::schema_diff::{ColumnDescriptor, ColumnListDiff, TableListDiff};

/// スキーマ差分検出サービス
#[derive(Debug, Clone)]
pub struct SchemaDiffDetector {
    sort_columns: bool,
}

impl SchemaDiffDetector {
    /// 新しいSchemaDiffDetectorを作成
    ///
    /// # Arguments
    ///
    /// * `sort_columns` - カラムを名前順に並べ替えてから比較するかどうか
    pub fn new(sort_columns: bool) -> Self {
        Self { sort_columns }
    }

    /// テーブル一覧の差分を検出
    ///
    /// 入力の順序はカタログが返した順序のまま扱い、結果もその順序を保つ。
    pub fn detect_table_diff(&self, first: &[String], second: &[String]) -> TableListDiff {
        let mut diff = TableListDiff::default();

        for table in first {
            if second.contains(table) {
                diff.common.push(table.clone());
            } else {
                diff.missing_from_second.push(table.clone());
            }
        }

        for table in second {
            if !first.contains(table) {
                diff.missing_from_first.push(table.clone());
            }
        }

        diff
    }

    /// カラム構成の差分を検出
    ///
    /// 同じ位置にあるカラム同士を比較する。名前が一致した場合は
    /// 型 → 長さ → NULL許可 の順に比較し、最初に見つかった相違のみを記録する。
    /// 名前が一致しない位置のカラムは、相手側に存在しないものとして扱う。
    pub fn detect_column_diff(
        &self,
        first: &[ColumnDescriptor],
        second: &[ColumnDescriptor],
    ) -> ColumnListDiff {
        let first = self.ordered(first);
        let second = self.ordered(second);
        let mut diff = ColumnListDiff::default();

        for (index, column) in first.iter().enumerate() {
            match second.get(index) {
                Some(other) if other.name == column.name => {
                    let bucket = if column.type_name != other.type_name {
                        &mut diff.different_type
                    } else if column.length != other.length {
                        &mut diff.different_length
                    } else if column.nullable != other.nullable {
                        &mut diff.different_nullability
                    } else {
                        &mut diff.common
                    };
                    bucket.push(column.name.clone());
                }
                _ => diff.missing_from_second.push(column.name.clone()),
            }
        }

        for (index, column) in second.iter().enumerate() {
            let matched = first
                .get(index)
                .is_some_and(|other| other.name == column.name);
            if !matched {
                diff.missing_from_first.push(column.name.clone());
            }
        }

        diff
    }

    fn ordered<'a>(&self, columns: &'a [ColumnDescriptor]) -> Vec<&'a ColumnDescriptor> {
        let mut ordered: Vec<&ColumnDescriptor> = columns.iter().collect();
        if self.sort_columns {
            // バイト単位の辞書順（安定ソート）
            ordered.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));
        }
        ordered
    }
}

impl Default for SchemaDiffDetector {
    fn default() -> Self {
        Self::new(true)
    }
}
