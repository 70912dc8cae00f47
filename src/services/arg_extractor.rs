// 引数抽出サービス
//
// 未消費のコマンドライン引数リストから、接続識別子付きのフラグを探して取り除く。
// 抽出したトークンはリストから削除されるため、2つ目の接続を解決する際に
// 1つ目の接続向けのトークンへ再び一致することはない。

use tracing::debug;

/// フラグの照合方法
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRole {
    /// `name=value` 形式と、`name value` の2トークン形式の両方を受け付ける
    Value,
    /// `name value` の2トークン形式のみを受け付ける
    Marker,
}

/// フラグ指定
///
/// エイリアスの集合と接続識別子の組。
/// 実際に照合されるフラグ名は `<alias>_<id>`（例: `-t_1`, `--type_2`）。
#[derive(Debug, Clone, Copy)]
pub struct FlagSpec<'a> {
    /// エイリアス（例: `-t`, `--type`）
    pub aliases: &'a [&'a str],
    /// 接続識別子（例: `1`）
    pub id: &'a str,
}

impl<'a> FlagSpec<'a> {
    /// 新しいフラグ指定を作成
    pub fn new(aliases: &'a [&'a str], id: &'a str) -> Self {
        Self { aliases, id }
    }

    /// 識別子付きのフラグ名一覧
    pub fn qualified_names(&self) -> Vec<String> {
        self.aliases
            .iter()
            .map(|alias| format!("{}_{}", alias, self.id))
            .collect()
    }

    /// エラーメッセージ用の表記（例: `-h_1/--host_1`）
    pub fn display(&self) -> String {
        self.qualified_names().join("/")
    }
}

/// 未消費の引数リスト
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentList {
    tokens: Vec<String>,
}

impl ArgumentList {
    /// 新しい引数リストを作成
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// 引数が残っていないかどうか
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// 残っている引数の数
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// 残っている引数
    pub fn remaining(&self) -> &[String] {
        &self.tokens
    }

    /// フラグを探し、見つかった場合は値を返してトークンを取り除く
    ///
    /// 引数を先頭から走査し、最初に一致したものを採用する。
    /// `name=value` 形式ではそのトークンのみを、2トークン形式では
    /// フラグと直後の値の両方を取り除く。
    /// 値を伴わない末尾のフラグは一致とみなさず、リストにも残す。
    pub fn extract(&mut self, role: MatchRole, spec: &FlagSpec<'_>) -> Option<String> {
        let names = spec.qualified_names();

        for index in 0..self.tokens.len() {
            let token = &self.tokens[index];

            for name in &names {
                if role == MatchRole::Value {
                    if let Some(value) = inline_value(token, name) {
                        let value = value.to_string();
                        self.tokens.remove(index);
                        debug!(flag = %name, "consumed inline flag");
                        return Some(value);
                    }
                }

                if token == name && index + 1 < self.tokens.len() {
                    let value = self.tokens.remove(index + 1);
                    self.tokens.remove(index);
                    debug!(flag = %name, "consumed flag and its value");
                    return Some(value);
                }
            }
        }

        None
    }
}

impl From<Vec<String>> for ArgumentList {
    fn from(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

/// `name=value` 形式のトークンから値を取り出す
fn inline_value<'t>(token: &'t str, name: &str) -> Option<&'t str> {
    token.strip_prefix(name)?.strip_prefix('=')
}
