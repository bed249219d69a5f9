//! SQL dialect configuration.
//!
//! Different databases have slightly different SQL syntax. Rather than a
//! compiler per backend, a [`Dialect`] is plain data describing the handful of
//! places where backends differ:
//!
//! - the placeholder token (`?` or `$1`, `$2`, ...),
//! - the identifier quote character used in DDL,
//! - whether row-locking clauses (`FOR UPDATE`) exist,
//! - how an INSERT hands back the inserted row,
//! - whether OFFSET needs a LIMIT in front of it,
//! - where foreign keys are declared in DDL,
//! - how literals are spelled in DDL defaults,
//! - the column type names used in DDL.
//!
//! Everything else is shared by the one [`Grammar`](crate::Grammar).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::schema::ColumnType;
use crate::value::Value;

/// How bound parameters are written in statement text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` for every parameter (MySQL, SQLite).
    Question,
    /// `$1`, `$2`, ... numbered across the statement (PostgreSQL).
    Numbered,
}

impl PlaceholderStyle {
    /// Writes the placeholder for the 1-based parameter `index`.
    pub fn write(self, out: &mut String, index: usize) {
        match self {
            Self::Question => out.push('?'),
            Self::Numbered => {
                out.push('$');
                out.push_str(&index.to_string());
            }
        }
    }
}

/// How an INSERT returns the inserted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertReturning {
    /// Native `RETURNING col, ...` clause.
    Returning,
    /// A follow-up `SELECT ... WHERE key = LAST_INSERT_ID()` appended to the
    /// statement.
    LastInsertId,
}

/// Where `REFERENCES` constraints are declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyStyle {
    /// On the column: `"team_id" BIGINT REFERENCES "teams" ("id")`.
    Inline,
    /// As a table constraint: `FOREIGN KEY (col) REFERENCES t (c)`. MySQL
    /// parses the column form but does not enforce it.
    TableConstraint,
}

/// Spelling of binary literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BytesLiteral {
    /// `X'DEAD'`
    Hex,
    /// `'\xDEAD'::bytea`
    Bytea,
}

/// Spelling of NaN and the infinities, which have no numeric literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonFiniteFloat {
    /// Typed string casts: `'NaN'::float8`, `'Infinity'::float8`.
    Cast,
    /// Out-of-range literals that read back as infinity (`9e999`). NaN is
    /// stored as NULL by the database, so it is written as NULL.
    Overflow,
    /// The column type cannot hold them; written as NULL.
    Null,
}

/// How values are written inline, for DDL defaults where nothing is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralStyle {
    /// Binary literal form.
    pub bytes: BytesLiteral,
    /// NaN and infinity handling.
    pub non_finite: NonFiniteFloat,
    /// Whether a backslash in a string literal is an escape character and
    /// must be doubled.
    pub backslash_escapes: bool,
    /// `chrono` format for timestamp literals.
    pub datetime: &'static str,
    /// Expression for the current time, matching the dialect's timestamp type.
    pub current_timestamp: &'static str,
    /// Whether literal defaults on JSON and binary columns need parentheses.
    pub wrap_blob_defaults: bool,
}

impl LiteralStyle {
    /// Renders `value` as an inline SQL literal.
    #[must_use]
    pub fn render(&self, value: &Value) -> String {
        match value {
            Value::Null => String::from("NULL"),
            Value::Bool(b) => String::from(if *b { "TRUE" } else { "FALSE" }),
            Value::Int(n) => n.to_string(),
            Value::Double(f) => self.double(*f),
            Value::String(s) => self.quote(s),
            Value::Date(at) => self.quote(&at.format(self.datetime).to_string()),
            Value::Bytes(bytes) => self.bytes(bytes),
            Value::Uuid(id) => self.quote(&id.hyphenated().to_string()),
            Value::Json(doc) => self.quote(&doc.to_string()),
        }
    }

    fn quote(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len() + 2);
        out.push('\'');
        for ch in s.chars() {
            match ch {
                '\'' => out.push_str("''"),
                '\\' if self.backslash_escapes => out.push_str("\\\\"),
                _ => out.push(ch),
            }
        }
        out.push('\'');
        out
    }

    fn double(&self, f: f64) -> String {
        if f.is_finite() {
            return format!("{f:?}");
        }
        let literal = match (self.non_finite, f.is_nan(), f.is_sign_positive()) {
            (NonFiniteFloat::Cast, true, _) => "'NaN'::float8",
            (NonFiniteFloat::Cast, false, true) => "'Infinity'::float8",
            (NonFiniteFloat::Cast, false, false) => "'-Infinity'::float8",
            (NonFiniteFloat::Overflow, false, true) => "9e999",
            (NonFiniteFloat::Overflow, false, false) => "-9e999",
            (NonFiniteFloat::Overflow, true, _) | (NonFiniteFloat::Null, _, _) => "NULL",
        };
        String::from(literal)
    }

    fn bytes(&self, bytes: &[u8]) -> String {
        const HEX: &[u8; 16] = b"0123456789ABCDEF";
        let mut hex = String::with_capacity(bytes.len() * 2);
        for byte in bytes {
            hex.push(char::from(HEX[usize::from(byte >> 4)]));
            hex.push(char::from(HEX[usize::from(byte & 0x0F)]));
        }
        match self.bytes {
            BytesLiteral::Hex => format!("X'{hex}'"),
            BytesLiteral::Bytea => format!("'\\x{hex}'::bytea"),
        }
    }
}

/// Dialect-specific column type names, one per [`ColumnType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeNames {
    /// 32-bit integer.
    pub int: &'static str,
    /// 64-bit integer.
    pub bigint: &'static str,
    /// Text.
    pub string: &'static str,
    /// Boolean.
    pub bool: &'static str,
    /// Double precision float.
    pub double: &'static str,
    /// UUID.
    pub uuid: &'static str,
    /// Timestamp.
    pub date: &'static str,
    /// JSON document.
    pub json: &'static str,
    /// Binary blob.
    pub bytes: &'static str,
    /// Full auto-incrementing primary key declaration.
    pub increments: &'static str,
}

impl TypeNames {
    /// Looks up the type name for `ty`.
    #[must_use]
    pub fn name<'a>(&self, ty: &'a ColumnType) -> &'a str {
        match ty {
            ColumnType::Int => self.int,
            ColumnType::BigInt => self.bigint,
            ColumnType::String => self.string,
            ColumnType::Bool => self.bool,
            ColumnType::Double => self.double,
            ColumnType::Uuid => self.uuid,
            ColumnType::Date => self.date,
            ColumnType::Json => self.json,
            ColumnType::Bytes => self.bytes,
            ColumnType::Increments => self.increments,
            ColumnType::Custom(name) => name,
        }
    }
}

/// The full set of per-backend differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Dialect name.
    pub name: &'static str,
    /// Quote character for identifiers in DDL.
    pub identifier_quote: char,
    /// Parameter placeholder style.
    pub placeholder: PlaceholderStyle,
    /// Whether `FOR UPDATE` / `FOR SHARE` are understood.
    pub locking: bool,
    /// INSERT return idiom.
    pub insert_returning: InsertReturning,
    /// LIMIT written before a lone OFFSET, where OFFSET cannot stand alone.
    pub unbounded_limit: Option<&'static str>,
    /// Foreign key placement in DDL.
    pub foreign_keys: ForeignKeyStyle,
    /// Inline literal spelling for DDL defaults.
    pub literals: LiteralStyle,
    /// DDL type names.
    pub types: TypeNames,
}

impl Dialect {
    /// PostgreSQL.
    pub const POSTGRES: Self = Self {
        name: "postgresql",
        identifier_quote: '"',
        placeholder: PlaceholderStyle::Numbered,
        locking: true,
        insert_returning: InsertReturning::Returning,
        unbounded_limit: None,
        foreign_keys: ForeignKeyStyle::Inline,
        literals: LiteralStyle {
            bytes: BytesLiteral::Bytea,
            non_finite: NonFiniteFloat::Cast,
            backslash_escapes: false,
            datetime: "%Y-%m-%dT%H:%M:%S%.f%:z",
            current_timestamp: "CURRENT_TIMESTAMP",
            wrap_blob_defaults: false,
        },
        types: TypeNames {
            int: "INTEGER",
            bigint: "BIGINT",
            string: "TEXT",
            bool: "BOOLEAN",
            double: "DOUBLE PRECISION",
            uuid: "UUID",
            date: "TIMESTAMPTZ",
            json: "JSONB",
            bytes: "BYTEA",
            increments: "BIGSERIAL PRIMARY KEY",
        },
    };

    /// MySQL / MariaDB.
    pub const MYSQL: Self = Self {
        name: "mysql",
        identifier_quote: '`',
        placeholder: PlaceholderStyle::Question,
        locking: true,
        insert_returning: InsertReturning::LastInsertId,
        unbounded_limit: Some("18446744073709551615"),
        foreign_keys: ForeignKeyStyle::TableConstraint,
        literals: LiteralStyle {
            bytes: BytesLiteral::Hex,
            non_finite: NonFiniteFloat::Null,
            backslash_escapes: true,
            datetime: "%Y-%m-%d %H:%M:%S%.6f",
            current_timestamp: "CURRENT_TIMESTAMP(6)",
            wrap_blob_defaults: true,
        },
        types: TypeNames {
            int: "INT",
            bigint: "BIGINT",
            string: "VARCHAR(255)",
            bool: "BOOLEAN",
            double: "DOUBLE",
            uuid: "CHAR(36)",
            date: "DATETIME(6)",
            json: "JSON",
            bytes: "LONGBLOB",
            increments: "BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY",
        },
    };

    /// SQLite. No row locking; RETURNING since 3.35.0.
    pub const SQLITE: Self = Self {
        name: "sqlite",
        identifier_quote: '"',
        placeholder: PlaceholderStyle::Question,
        locking: false,
        insert_returning: InsertReturning::Returning,
        unbounded_limit: Some("-1"),
        foreign_keys: ForeignKeyStyle::Inline,
        literals: LiteralStyle {
            bytes: BytesLiteral::Hex,
            non_finite: NonFiniteFloat::Overflow,
            backslash_escapes: false,
            datetime: "%Y-%m-%dT%H:%M:%S%.f%:z",
            current_timestamp: "CURRENT_TIMESTAMP",
            wrap_blob_defaults: false,
        },
        types: TypeNames {
            int: "INTEGER",
            bigint: "INTEGER",
            string: "TEXT",
            bool: "INTEGER",
            double: "REAL",
            uuid: "TEXT",
            date: "TEXT",
            json: "TEXT",
            bytes: "BLOB",
            increments: "INTEGER PRIMARY KEY AUTOINCREMENT",
        },
    };

    /// Returns whether row-locking clauses are emitted.
    #[must_use]
    pub const fn supports_locking(&self) -> bool {
        self.locking
    }

    /// Quotes an identifier, doubling any embedded quote character.
    #[must_use]
    pub fn quote_identifier(&self, name: &str) -> String {
        let q = self.identifier_quote;
        let escaped = name.replace(q, &format!("{q}{q}"));
        format!("{q}{escaped}{q}")
    }
}

/// Names the built-in dialects, for configuration files and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// PostgreSQL.
    Postgres,
    /// MySQL / MariaDB.
    Mysql,
    /// SQLite.
    Sqlite,
}

impl DialectKind {
    /// Returns the dialect configuration.
    #[must_use]
    pub const fn dialect(self) -> Dialect {
        match self {
            Self::Postgres => Dialect::POSTGRES,
            Self::Mysql => Dialect::MYSQL,
            Self::Sqlite => Dialect::SQLITE,
        }
    }
}

impl FromStr for DialectKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            "mysql" | "mariadb" => Ok(Self::Mysql),
            "sqlite" | "sqlite3" => Ok(Self::Sqlite),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Sqlite => "sqlite",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_styles() {
        let mut out = String::new();
        PlaceholderStyle::Question.write(&mut out, 3);
        PlaceholderStyle::Numbered.write(&mut out, 12);
        assert_eq!(out, "?$12");
    }

    #[test]
    fn test_quote_identifier() {
        assert_eq!(Dialect::POSTGRES.quote_identifier("users"), "\"users\"");
        assert_eq!(Dialect::MYSQL.quote_identifier("users"), "`users`");
        assert_eq!(Dialect::SQLITE.quote_identifier("a\"b"), "\"a\"\"b\"");
    }

    #[test]
    fn test_type_names_are_table_driven() {
        assert_eq!(Dialect::POSTGRES.types.name(&ColumnType::Uuid), "UUID");
        assert_eq!(Dialect::SQLITE.types.name(&ColumnType::Uuid), "TEXT");
        assert_eq!(Dialect::MYSQL.types.name(&ColumnType::Uuid), "CHAR(36)");
        let custom = ColumnType::Custom(String::from("CITEXT"));
        assert_eq!(Dialect::POSTGRES.types.name(&custom), "CITEXT");
    }

    #[test]
    fn test_string_literals() {
        let value = Value::String(String::from(r"it's C:\tmp"));
        assert_eq!(Dialect::POSTGRES.literals.render(&value), r"'it''s C:\tmp'");
        assert_eq!(Dialect::MYSQL.literals.render(&value), r"'it''s C:\\tmp'");
        let malicious = Value::String(String::from("'; DROP TABLE users; --"));
        assert_eq!(
            Dialect::SQLITE.literals.render(&malicious),
            "'''; DROP TABLE users; --'"
        );
    }

    #[test]
    fn test_bytes_literals() {
        let value = Value::Bytes(vec![0xDE, 0xAD, 0x0F]);
        assert_eq!(Dialect::POSTGRES.literals.render(&value), r"'\xDEAD0F'::bytea");
        assert_eq!(Dialect::MYSQL.literals.render(&value), "X'DEAD0F'");
        assert_eq!(Dialect::SQLITE.literals.render(&value), "X'DEAD0F'");
    }

    #[test]
    fn test_non_finite_doubles() {
        let render = |dialect: &Dialect| -> Vec<String> {
            [f64::NAN, f64::INFINITY, f64::NEG_INFINITY]
                .iter()
                .map(|f| dialect.literals.render(&Value::Double(*f)))
                .collect()
        };
        assert_eq!(
            render(&Dialect::POSTGRES),
            ["'NaN'::float8", "'Infinity'::float8", "'-Infinity'::float8"]
        );
        assert_eq!(render(&Dialect::SQLITE), ["NULL", "9e999", "-9e999"]);
        assert_eq!(render(&Dialect::MYSQL), ["NULL", "NULL", "NULL"]);
        assert_eq!(Dialect::SQLITE.literals.render(&Value::Double(2.5)), "2.5");
        assert_eq!(Dialect::SQLITE.literals.render(&Value::Double(1e300)), "1e300");
    }

    #[test]
    fn test_scalar_literals() {
        let literals = Dialect::POSTGRES.literals;
        assert_eq!(literals.render(&Value::Null), "NULL");
        assert_eq!(literals.render(&Value::Bool(false)), "FALSE");
        assert_eq!(literals.render(&Value::Int(-100)), "-100");
        assert_eq!(
            literals.render(&Value::Uuid(uuid::Uuid::nil())),
            "'00000000-0000-0000-0000-000000000000'"
        );
        let doc = serde_json::json!({"name": "it's"});
        assert_eq!(literals.render(&Value::Json(doc)), r#"'{"name":"it''s"}'"#);
    }

    #[test]
    fn test_datetime_literals() {
        let at = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_opt(12, 30, 0))
            .unwrap()
            .and_utc();
        assert_eq!(
            Dialect::POSTGRES.literals.render(&Value::Date(at)),
            "'2024-03-01T12:30:00+00:00'"
        );
        assert_eq!(
            Dialect::MYSQL.literals.render(&Value::Date(at)),
            "'2024-03-01 12:30:00.000000'"
        );
    }

    #[test]
    fn test_offset_and_foreign_key_settings() {
        assert_eq!(Dialect::POSTGRES.unbounded_limit, None);
        assert_eq!(Dialect::SQLITE.unbounded_limit, Some("-1"));
        assert_eq!(Dialect::MYSQL.foreign_keys, ForeignKeyStyle::TableConstraint);
        assert_eq!(Dialect::SQLITE.foreign_keys, ForeignKeyStyle::Inline);
    }

    #[test]
    fn test_locking_support() {
        assert!(Dialect::POSTGRES.supports_locking());
        assert!(Dialect::MYSQL.supports_locking());
        assert!(!Dialect::SQLITE.supports_locking());
    }

    #[test]
    fn test_dialect_kind_from_str() {
        assert_eq!("pg".parse::<DialectKind>(), Ok(DialectKind::Postgres));
        assert_eq!("MariaDB".parse::<DialectKind>(), Ok(DialectKind::Mysql));
        assert_eq!(" sqlite3 ".parse::<DialectKind>(), Ok(DialectKind::Sqlite));
        assert_eq!(
            "oracle".parse::<DialectKind>(),
            Err(Error::UnknownDialect(String::from("oracle")))
        );
    }

    #[test]
    fn test_dialect_kind_serde() {
        let kind: DialectKind = serde_json::from_str("\"mysql\"").unwrap();
        assert_eq!(kind, DialectKind::Mysql);
        assert_eq!(
            serde_json::to_string(&DialectKind::Sqlite).unwrap(),
            "\"sqlite\""
        );
        assert_eq!(DialectKind::Postgres.dialect(), Dialect::POSTGRES);
        assert_eq!(DialectKind::Postgres.to_string(), "postgres");
    }
}
