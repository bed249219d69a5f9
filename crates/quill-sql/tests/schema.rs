//! DDL compilation across dialects.

mod common;
use common::*;

use pretty_assertions::assert_eq;
use quill_sql::schema::{
    bigint, boolean, bytes, double, increments, integer, json, string, timestamp, uuid,
};
use quill_sql::{ColumnDef, ColumnType, Grammar, Schema, SchemaOp};

fn users_table() -> SchemaOp {
    Schema::create("users")
        .if_not_exists()
        .column(increments("id"))
        .column(string("email").not_null().unique())
        .column(boolean("active").not_null().default(true))
        .column(bigint("team_id").references("teams", "id"))
        .column(timestamp("created_at").default_now())
        .into()
}

#[test]
fn create_table_postgres() {
    assert_eq!(
        Grammar::postgres().schema(&users_table()),
        vec![
            "CREATE TABLE IF NOT EXISTS \"users\" (\n    \
             \"id\" BIGSERIAL PRIMARY KEY,\n    \
             \"email\" TEXT NOT NULL UNIQUE,\n    \
             \"active\" BOOLEAN NOT NULL DEFAULT TRUE,\n    \
             \"team_id\" BIGINT REFERENCES \"teams\" (\"id\"),\n    \
             \"created_at\" TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP\n)"
        ]
    );
}

#[test]
fn create_table_mysql() {
    assert_eq!(
        Grammar::mysql().schema(&users_table()),
        vec![
            "CREATE TABLE IF NOT EXISTS `users` (\n    \
             `id` BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,\n    \
             `email` VARCHAR(255) NOT NULL UNIQUE,\n    \
             `active` BOOLEAN NOT NULL DEFAULT TRUE,\n    \
             `team_id` BIGINT,\n    \
             `created_at` DATETIME(6) DEFAULT CURRENT_TIMESTAMP(6),\n    \
             FOREIGN KEY (`team_id`) REFERENCES `teams` (`id`)\n)"
        ]
    );
}

#[test]
fn create_table_sqlite() {
    assert_eq!(
        Grammar::sqlite().schema(&users_table()),
        vec![
            "CREATE TABLE IF NOT EXISTS \"users\" (\n    \
             \"id\" INTEGER PRIMARY KEY AUTOINCREMENT,\n    \
             \"email\" TEXT NOT NULL UNIQUE,\n    \
             \"active\" INTEGER NOT NULL DEFAULT TRUE,\n    \
             \"team_id\" INTEGER REFERENCES \"teams\" (\"id\"),\n    \
             \"created_at\" TEXT DEFAULT CURRENT_TIMESTAMP\n)"
        ]
    );
}

#[test]
fn type_names_per_dialect() {
    let cases: [(ColumnDef, [&str; 3]); 7] = [
        (integer("c"), ["INTEGER", "INT", "INTEGER"]),
        (double("c"), ["DOUBLE PRECISION", "DOUBLE", "REAL"]),
        (uuid("c"), ["UUID", "CHAR(36)", "TEXT"]),
        (json("c"), ["JSONB", "JSON", "TEXT"]),
        (bytes("c"), ["BYTEA", "LONGBLOB", "BLOB"]),
        (timestamp("c"), ["TIMESTAMPTZ", "DATETIME(6)", "TEXT"]),
        (
            ColumnDef::new("c", ColumnType::Custom(String::from("NUMERIC(10, 2)"))),
            ["NUMERIC(10, 2)"; 3],
        ),
    ];
    for (column, expected) in cases {
        for (grammar, ty) in grammars().iter().zip(expected) {
            let def = grammar.column_definition(&column);
            let q = grammar.dialect().identifier_quote;
            assert_eq!(def, format!("{q}c{q} {ty}"));
        }
    }
}

#[test]
fn schema_all_flattens_in_order() {
    let ops: Vec<SchemaOp> = vec![
        users_table(),
        Schema::alter("users")
            .add_column(string("nickname"))
            .drop_column("legacy")
            .into(),
        Schema::rename("users", "members").into(),
        Schema::drop("members").into(),
    ];
    let statements = Grammar::sqlite().schema_all(&ops);
    assert_eq!(statements.len(), 5);
    assert!(statements[0].starts_with("CREATE TABLE"));
    assert_eq!(
        &statements[1..],
        &[
            "ALTER TABLE \"users\" ADD COLUMN \"nickname\" TEXT",
            "ALTER TABLE \"users\" DROP COLUMN \"legacy\"",
            "ALTER TABLE \"users\" RENAME TO \"members\"",
            "DROP TABLE \"members\"",
        ]
    );
}

#[test]
fn ddl_is_deterministic() {
    for grammar in grammars() {
        assert_eq!(grammar.schema(&users_table()), grammar.schema(&users_table()));
    }
}

#[test]
fn string_defaults_are_escaped_inline() {
    let col = string("motto").default("it's fine");
    assert_eq!(
        Grammar::postgres().column_definition(&col),
        "\"motto\" TEXT DEFAULT 'it''s fine'"
    );
}

#[test]
fn mysql_string_defaults_escape_backslashes() {
    let col = string("path").default(r"C:\tmp\it's");
    assert_eq!(
        Grammar::mysql().column_definition(&col),
        r"`path` VARCHAR(255) DEFAULT 'C:\\tmp\\it''s'"
    );
    assert_eq!(
        Grammar::sqlite().column_definition(&col),
        r#""path" TEXT DEFAULT 'C:\tmp\it''s'"#
    );
}

#[test]
fn non_finite_defaults_per_dialect() {
    let op: SchemaOp = Schema::create("m")
        .column(double("hi").default(f64::INFINITY))
        .column(double("lo").default(f64::NEG_INFINITY))
        .into();
    let postgres = Grammar::postgres().schema(&op);
    assert!(postgres[0].contains("\"hi\" DOUBLE PRECISION DEFAULT 'Infinity'::float8"));
    assert!(postgres[0].contains("\"lo\" DOUBLE PRECISION DEFAULT '-Infinity'::float8"));
    let sqlite = Grammar::sqlite().schema(&op);
    assert!(sqlite[0].contains("\"hi\" REAL DEFAULT 9e999"));
    assert!(sqlite[0].contains("\"lo\" REAL DEFAULT -9e999"));
    let mysql = Grammar::mysql().schema(&op);
    assert!(mysql[0].contains("`hi` DOUBLE DEFAULT NULL"));
    assert!(mysql[0].contains("`lo` DOUBLE DEFAULT NULL"));
}

#[test]
fn blob_defaults_per_dialect() {
    let col = bytes("magic").default(vec![0xCA_u8, 0xFE]);
    assert_eq!(
        Grammar::postgres().column_definition(&col),
        r#""magic" BYTEA DEFAULT '\xCAFE'::bytea"#
    );
    assert_eq!(
        Grammar::mysql().column_definition(&col),
        "`magic` LONGBLOB DEFAULT (X'CAFE')"
    );
    let col = json("meta").default(serde_json::json!({"v": 1}));
    assert_eq!(
        Grammar::mysql().column_definition(&col),
        r#"`meta` JSON DEFAULT ('{"v":1}')"#
    );
    let col = json("meta").default(Option::<i32>::None);
    assert_eq!(
        Grammar::mysql().column_definition(&col),
        "`meta` JSON DEFAULT NULL"
    );
}

#[test]
fn quoted_identifiers_escape_quote_char() {
    let op: SchemaOp = Schema::drop("we\"ird").into();
    assert_eq!(
        Grammar::postgres().schema(&op),
        vec!["DROP TABLE \"we\"\"ird\""]
    );
    let op: SchemaOp = Schema::drop("we`ird").into();
    assert_eq!(Grammar::mysql().schema(&op), vec!["DROP TABLE `we``ird`"]);
}
