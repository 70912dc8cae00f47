// スキーマ差分ドメインモデル
//
// 2つのデータベース間のテーブル差分、およびテーブル内のカラム差分を表現します。

/// カラム記述子
///
/// スキーマ取得によって得られる、ベンダー非依存のカラム情報。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDescriptor {
    /// カラム名
    pub name: String,
    /// データベースが報告する型名
    pub type_name: String,
    /// 宣言された長さ（None = 長さの概念がない型）
    pub length: Option<i64>,
    /// NULL許可（None = 不明）
    pub nullable: Option<bool>,
}

impl ColumnDescriptor {
    /// 新しいカラム記述子を作成
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length: None,
            nullable: None,
        }
    }

    /// 長さを指定
    pub fn with_length(mut self, length: i64) -> Self {
        self.length = Some(length);
        self
    }

    /// NULL許可を指定
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }
}

/// テーブル一覧の差分
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableListDiff {
    /// 両方に存在するテーブル
    pub common: Vec<String>,
    /// 1つ目のデータベースに存在しないテーブル
    pub missing_from_first: Vec<String>,
    /// 2つ目のデータベースに存在しないテーブル
    pub missing_from_second: Vec<String>,
}

impl TableListDiff {
    /// 両方のテーブル構成が一致しているかどうか
    pub fn is_identical(&self) -> bool {
        self.missing_from_first.is_empty() && self.missing_from_second.is_empty()
    }
}

/// カラム一覧の差分
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnListDiff {
    /// 完全に一致するカラム
    pub common: Vec<String>,
    /// 名前は同じだが型が異なるカラム
    pub different_type: Vec<String>,
    /// 名前と型は同じだが長さが異なるカラム
    pub different_length: Vec<String>,
    /// 名前・型・長さは同じだがNULL許可が異なるカラム
    pub different_nullability: Vec<String>,
    /// 1つ目のテーブルに存在しないカラム
    pub missing_from_first: Vec<String>,
    /// 2つ目のテーブルに存在しないカラム
    pub missing_from_second: Vec<String>,
}

impl ColumnListDiff {
    /// 両方のカラム構成（名前の並び）が一致しているかどうか
    ///
    /// 型・長さ・NULL許可の違いはここでは考慮しない。
    pub fn has_same_columns(&self) -> bool {
        self.missing_from_first.is_empty() && self.missing_from_second.is_empty()
    }
}

/// テーブル単位のカラム比較結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumnsDiff {
    /// テーブル名
    pub table: String,
    /// カラム差分
    pub columns: ColumnListDiff,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_descriptor_builder() {
        let column = ColumnDescriptor::new("email", "VARCHAR")
            .with_length(255)
            .with_nullable(false);

        assert_eq!(column.name, "email");
        assert_eq!(column.type_name, "VARCHAR");
        assert_eq!(column.length, Some(255));
        assert_eq!(column.nullable, Some(false));
    }

    #[test]
    fn test_table_list_diff_identical() {
        let diff = TableListDiff {
            common: vec!["users".to_string()],
            ..Default::default()
        };
        assert!(diff.is_identical());

        let diff = TableListDiff {
            missing_from_first: vec!["orders".to_string()],
            ..Default::default()
        };
        assert!(!diff.is_identical());
    }

    #[test]
    fn test_column_list_diff_mismatch_keeps_same_columns() {
        let diff = ColumnListDiff {
            common: vec!["id".to_string()],
            different_length: vec!["name".to_string()],
            ..Default::default()
        };
        assert!(diff.has_same_columns());

        let diff = ColumnListDiff {
            missing_from_second: vec!["name".to_string()],
            ..Default::default()
        };
        assert!(!diff.has_same_columns());
    }
}
