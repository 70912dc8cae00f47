// 接続設定解決サービス
//
// 引数リストから接続識別子ごとの接続設定を組み立てる。
// 方言ごとに宣言的なフィールド表を持ち、汎用の populate 処理がそれを走査して
// 引数抽出サービスを呼び出す。

use crate::core::config::{ConnectionConfig, Dialect};
use crate::core::error::ConfigError;
use crate::services::arg_extractor::{ArgumentList, FlagSpec, MatchRole};
use std::collections::HashMap;
use tracing::{debug, warn};

/// 種別フラグのエイリアス
pub const TYPE_FLAG_ALIASES: &[&str] = &["-t", "--type"];

/// フィールドの値の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 文字列（そのまま使用）
    Text,
    /// 符号付き整数（10進数）
    Signed,
    /// 符号なし整数（10進数）
    Unsigned,
}

/// 型変換済みのフィールド値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl FieldKind {
    /// 文字列を期待される種類に変換する
    ///
    /// 変換に失敗した場合は None（未設定扱い）。
    pub fn coerce(&self, raw: &str) -> Option<FieldValue> {
        match self {
            FieldKind::Text => Some(FieldValue::Text(raw.to_string())),
            FieldKind::Signed => raw.parse::<i64>().ok().map(FieldValue::Signed),
            FieldKind::Unsigned => raw.parse::<u64>().ok().map(FieldValue::Unsigned),
        }
    }
}

/// 接続設定のフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionField {
    DbName,
    User,
    Password,
    Host,
    Port,
}

impl ConnectionField {
    /// エラーメッセージ等に使う名前
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionField::DbName => "database name",
            ConnectionField::User => "user",
            ConnectionField::Password => "password",
            ConnectionField::Host => "host",
            ConnectionField::Port => "port",
        }
    }
}

/// フィールド定義
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// 対象フィールド
    pub field: ConnectionField,
    /// フラグのエイリアス
    pub aliases: &'static [&'static str],
    /// 値の種類
    pub kind: FieldKind,
    /// 必須かどうか
    pub required: bool,
    /// 未設定（または数値の0）の場合に使う値
    pub default: Option<&'static str>,
}

impl FieldSpec {
    const fn with_default(self, default: &'static str) -> Self {
        FieldSpec {
            default: Some(default),
            ..self
        }
    }
}

const DB_NAME: FieldSpec = FieldSpec {
    field: ConnectionField::DbName,
    aliases: &["-db", "--database"],
    kind: FieldKind::Text,
    required: true,
    default: None,
};

const USER: FieldSpec = FieldSpec {
    field: ConnectionField::User,
    aliases: &["-u", "--user"],
    kind: FieldKind::Text,
    required: true,
    default: None,
};

const PASSWORD: FieldSpec = FieldSpec {
    field: ConnectionField::Password,
    aliases: &["--password"],
    kind: FieldKind::Text,
    required: false,
    default: None,
};

const HOST: FieldSpec = FieldSpec {
    field: ConnectionField::Host,
    aliases: &["-h", "--host"],
    kind: FieldKind::Text,
    required: true,
    default: None,
};

const PORT: FieldSpec = FieldSpec {
    field: ConnectionField::Port,
    aliases: &["-p", "--port"],
    kind: FieldKind::Unsigned,
    required: false,
    default: None,
};

const POSTGRES_FIELDS: &[FieldSpec] = &[DB_NAME, USER, PASSWORD, HOST, PORT.with_default("5432")];
const MYSQL_FIELDS: &[FieldSpec] = &[DB_NAME, USER, PASSWORD, HOST, PORT.with_default("3306")];

/// 方言ごとのフィールド表（宣言順に解決される）
pub fn field_table(dialect: Dialect) -> &'static [FieldSpec] {
    match dialect {
        Dialect::PostgreSQL => POSTGRES_FIELDS,
        Dialect::MySQL => MYSQL_FIELDS,
    }
}

/// 必須チェックの順序
const REQUIRED_CHECK_ORDER: [ConnectionField; 3] = [
    ConnectionField::DbName,
    ConnectionField::Host,
    ConnectionField::User,
];

/// 接続設定解決サービス
#[derive(Debug, Clone)]
pub struct ConnectionResolver {}

impl ConnectionResolver {
    /// 新しいConnectionResolverを作成
    pub fn new() -> Self {
        Self {}
    }

    /// 指定された識別子の接続設定を解決する
    ///
    /// # Arguments
    ///
    /// * `args` - 未消費の引数リスト（消費したトークンは取り除かれる）
    /// * `id` - 接続識別子（"1" または "2"）
    ///
    /// # Returns
    ///
    /// 接続設定、または設定エラー
    pub fn resolve(
        &self,
        args: &mut ArgumentList,
        id: &str,
    ) -> Result<ConnectionConfig, ConfigError> {
        let type_flag = FlagSpec::new(TYPE_FLAG_ALIASES, id);
        let dialect_name = args
            .extract(MatchRole::Marker, &type_flag)
            .ok_or_else(|| ConfigError::MissingType { id: id.to_string() })?;
        let dialect: Dialect = dialect_name.parse()?;

        let fields = self.populate(args, field_table(dialect), id);
        self.build(dialect, fields, id)
    }

    /// フィールド表を宣言順に走査し、見つかった値を集める
    pub fn populate(
        &self,
        args: &mut ArgumentList,
        table: &[FieldSpec],
        id: &str,
    ) -> HashMap<ConnectionField, FieldValue> {
        let mut values = HashMap::new();

        for spec in table {
            let flag = FlagSpec::new(spec.aliases, id);
            let Some(raw) = args.extract(MatchRole::Value, &flag) else {
                continue;
            };

            match spec.kind.coerce(&raw) {
                Some(value) => {
                    values.insert(spec.field, value);
                }
                None => {
                    warn!(
                        flag = %flag.display(),
                        value = %raw,
                        "ignoring value that is not a valid {:?} number",
                        spec.kind
                    );
                }
            }
        }

        values
    }

    /// 集めた値から接続設定を組み立て、必須チェックとデフォルト値の適用を行う
    fn build(
        &self,
        dialect: Dialect,
        mut values: HashMap<ConnectionField, FieldValue>,
        id: &str,
    ) -> Result<ConnectionConfig, ConfigError> {
        let table = field_table(dialect);

        if let Some(&FieldValue::Unsigned(port)) = values.get(&ConnectionField::Port) {
            if u16::try_from(port).is_err() {
                warn!(port, "port out of range, falling back to the default");
                values.remove(&ConnectionField::Port);
            }
        }
        apply_defaults(table, &mut values, id);

        for field in REQUIRED_CHECK_ORDER {
            let Some(spec) = table.iter().find(|spec| spec.field == field && spec.required) else {
                continue;
            };
            let present =
                matches!(values.get(&field), Some(FieldValue::Text(text)) if !text.is_empty());
            if !present {
                return Err(ConfigError::MissingField {
                    field: field.label(),
                    id: id.to_string(),
                    flags: FlagSpec::new(spec.aliases, id).display(),
                });
            }
        }

        let port = match values.remove(&ConnectionField::Port) {
            Some(FieldValue::Unsigned(port)) => u16::try_from(port).unwrap_or_default(),
            _ => 0,
        };

        let password = match values.remove(&ConnectionField::Password) {
            Some(FieldValue::Text(password)) if !password.is_empty() => Some(password),
            _ => None,
        };

        Ok(ConnectionConfig {
            dialect,
            database: take_text(&mut values, ConnectionField::DbName),
            user: take_text(&mut values, ConnectionField::User),
            password,
            host: take_text(&mut values, ConnectionField::Host),
            port,
        })
    }
}

impl Default for ConnectionResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// 未設定のフィールドに表のデフォルト値を適用する
///
/// 空文字列と数値の0は未設定とみなす。
fn apply_defaults(
    table: &[FieldSpec],
    values: &mut HashMap<ConnectionField, FieldValue>,
    id: &str,
) {
    for spec in table {
        let Some(default) = spec.default else {
            continue;
        };
        let unset = match values.get(&spec.field) {
            None => true,
            Some(FieldValue::Text(text)) => text.is_empty(),
            Some(FieldValue::Signed(value)) => *value == 0,
            Some(FieldValue::Unsigned(value)) => *value == 0,
        };
        if !unset {
            continue;
        }
        if let Some(value) = spec.kind.coerce(default) {
            debug!(id, field = spec.field.label(), default, "using default value");
            values.insert(spec.field, value);
        }
    }
}

fn take_text(values: &mut HashMap<ConnectionField, FieldValue>, field: ConnectionField) -> String {
    match values.remove(&field) {
        Some(FieldValue::Text(text)) => text,
        _ => String::new(),
    }
}
