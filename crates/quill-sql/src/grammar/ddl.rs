//! DDL compilation.
//!
//! Identifiers are quoted with the dialect's quote character; column types come
//! from the dialect's type table. DDL never binds parameters, so defaults are
//! rendered as inline literals in the dialect's literal syntax.

use tracing::trace;

use super::Grammar;
use crate::dialect::ForeignKeyStyle;
use crate::schema::{
    AlterTable, ColumnDef, ColumnType, Constraint, CreateTable, DefaultValue, DropTable,
    RenameTable, SchemaOp,
};

impl Grammar {
    /// Compiles one schema operation into its DDL statements, in execution
    /// order.
    #[must_use]
    pub fn schema(&self, op: &SchemaOp) -> Vec<String> {
        let statements = match op {
            SchemaOp::CreateTable(op) => vec![self.create_table(op)],
            SchemaOp::AlterTable(op) => self.alter_table(op),
            SchemaOp::DropTable(op) => vec![self.drop_table(op)],
            SchemaOp::RenameTable(op) => vec![self.rename_table(op)],
        };
        trace!(
            dialect = self.dialect.name,
            statements = statements.len(),
            "compiled schema operation"
        );
        statements
    }

    /// Compiles a sequence of schema operations, flattening their statements.
    #[must_use]
    pub fn schema_all(&self, ops: &[SchemaOp]) -> Vec<String> {
        ops.iter().flat_map(|op| self.schema(op)).collect()
    }

    /// Generates SQL for CREATE TABLE.
    #[must_use]
    pub fn create_table(&self, op: &CreateTable) -> String {
        let mut sql = String::from("CREATE TABLE ");
        if op.if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(&self.dialect.quote_identifier(&op.name));

        if op.columns.is_empty() {
            sql.push_str(" ()");
            return sql;
        }

        sql.push_str(" (\n");
        let column_defs: Vec<String> = op
            .columns
            .iter()
            .map(|c| self.column_definition(c))
            .chain(op.columns.iter().flat_map(|c| self.foreign_keys(c)))
            .map(|def| format!("    {def}"))
            .collect();
        sql.push_str(&column_defs.join(",\n"));
        sql.push_str("\n)");
        sql
    }

    /// Generates one `ADD COLUMN` statement per added column, then one
    /// `DROP COLUMN` per dropped column.
    ///
    /// Where foreign keys are table constraints, each added column's keys
    /// follow its `ADD COLUMN` as `ADD FOREIGN KEY` statements.
    #[must_use]
    pub fn alter_table(&self, op: &AlterTable) -> Vec<String> {
        let table = self.dialect.quote_identifier(&op.name);
        let adds = op.add.iter().flat_map(|c| {
            let column = format!(
                "ALTER TABLE {table} ADD COLUMN {}",
                self.column_definition(c)
            );
            let keys = self
                .foreign_keys(c)
                .map(|key| format!("ALTER TABLE {table} ADD {key}"));
            std::iter::once(column).chain(keys).collect::<Vec<_>>()
        });
        let drops = op.drop.iter().map(|c| {
            format!(
                "ALTER TABLE {table} DROP COLUMN {}",
                self.dialect.quote_identifier(c)
            )
        });
        adds.chain(drops).collect()
    }

    /// Generates SQL for DROP TABLE.
    #[must_use]
    pub fn drop_table(&self, op: &DropTable) -> String {
        let mut sql = String::from("DROP TABLE ");
        if op.if_exists {
            sql.push_str("IF EXISTS ");
        }
        sql.push_str(&self.dialect.quote_identifier(&op.name));
        sql
    }

    /// Generates SQL for RENAME TABLE.
    #[must_use]
    pub fn rename_table(&self, op: &RenameTable) -> String {
        format!(
            "ALTER TABLE {} RENAME TO {}",
            self.dialect.quote_identifier(&op.from),
            self.dialect.quote_identifier(&op.to)
        )
    }

    /// Generates SQL for a column definition.
    ///
    /// Constraints are emitted in the order they were added. An `increments`
    /// column already carries `PRIMARY KEY` in its type name, so an explicit
    /// primary constraint on it is skipped. References are left out when the
    /// dialect declares foreign keys as table constraints; see
    /// [`Grammar::create_table`] and [`Grammar::alter_table`].
    #[must_use]
    pub fn column_definition(&self, col: &ColumnDef) -> String {
        let mut sql = format!(
            "{} {}",
            self.dialect.quote_identifier(&col.name),
            self.dialect.types.name(&col.ty)
        );

        for constraint in &col.constraints {
            match constraint {
                Constraint::Primary => {
                    if col.ty != ColumnType::Increments {
                        sql.push_str(" PRIMARY KEY");
                    }
                }
                Constraint::NotNull => sql.push_str(" NOT NULL"),
                Constraint::Unique => sql.push_str(" UNIQUE"),
                Constraint::Default(default) => {
                    sql.push_str(" DEFAULT ");
                    sql.push_str(&self.default_value(&col.ty, default));
                }
                Constraint::References { table, column } => {
                    if self.dialect.foreign_keys == ForeignKeyStyle::Inline {
                        sql.push(' ');
                        sql.push_str(&self.reference(table, column));
                    }
                }
            }
        }

        sql
    }

    fn default_value(&self, ty: &ColumnType, default: &DefaultValue) -> String {
        let literals = &self.dialect.literals;
        match default {
            DefaultValue::Value(value) => {
                let literal = literals.render(value);
                let blob = matches!(ty, ColumnType::Json | ColumnType::Bytes);
                if literals.wrap_blob_defaults && blob && !value.is_null() {
                    format!("({literal})")
                } else {
                    literal
                }
            }
            DefaultValue::CurrentTimestamp => String::from(literals.current_timestamp),
            DefaultValue::Expression(expr) => expr.clone(),
        }
    }

    fn reference(&self, table: &str, column: &str) -> String {
        format!(
            "REFERENCES {} ({})",
            self.dialect.quote_identifier(table),
            self.dialect.quote_identifier(column)
        )
    }

    /// Table-level `FOREIGN KEY` clauses for `col`, empty unless the dialect
    /// declares foreign keys as table constraints.
    fn foreign_keys<'a>(&'a self, col: &'a ColumnDef) -> impl Iterator<Item = String> + 'a {
        let table_level = self.dialect.foreign_keys == ForeignKeyStyle::TableConstraint;
        col.constraints
            .iter()
            .filter(move |_| table_level)
            .filter_map(move |constraint| match constraint {
                Constraint::References { table, column } => Some(format!(
                    "FOREIGN KEY ({}) {}",
                    self.dialect.quote_identifier(&col.name),
                    self.reference(table, column)
                )),
                _ => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{bigint, bytes, double, increments, json, string, timestamp, uuid, Schema};

    #[test]
    fn test_create_table_postgres() {
        let op = Schema::create("users")
            .column(increments("id"))
            .column(string("username").not_null().unique())
            .column(uuid("token"))
            .column(
                timestamp("created_at")
                    .not_null()
                    .default_now(),
            );

        assert_eq!(
            Grammar::postgres().create_table(&op),
            "CREATE TABLE \"users\" (\n    \"id\" BIGSERIAL PRIMARY KEY,\n    \
             \"username\" TEXT NOT NULL UNIQUE,\n    \"token\" UUID,\n    \
             \"created_at\" TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP\n)"
        );
    }

    #[test]
    fn test_create_table_sqlite_autoincrement() {
        let op = Schema::create("users").column(increments("id").primary());
        let sql = Grammar::sqlite().create_table(&op);
        assert!(sql.contains("\"id\" INTEGER PRIMARY KEY AUTOINCREMENT"));
        assert!(!sql.contains("AUTOINCREMENT PRIMARY KEY"));
    }

    #[test]
    fn test_references_and_default_value() {
        let col = bigint("user_id")
            .not_null()
            .default(0)
            .references("users", "id");
        assert_eq!(
            Grammar::postgres().column_definition(&col),
            "\"user_id\" BIGINT NOT NULL DEFAULT 0 REFERENCES \"users\" (\"id\")"
        );
        assert_eq!(
            Grammar::mysql().column_definition(&col),
            "`user_id` BIGINT NOT NULL DEFAULT 0"
        );
    }

    #[test]
    fn test_mysql_foreign_keys_are_table_constraints() {
        let op = Schema::create("posts")
            .column(increments("id"))
            .column(bigint("author_id").references("users", "id"));
        assert_eq!(
            Grammar::mysql().create_table(&op),
            "CREATE TABLE `posts` (\n    \
             `id` BIGINT UNSIGNED AUTO_INCREMENT PRIMARY KEY,\n    \
             `author_id` BIGINT,\n    \
             FOREIGN KEY (`author_id`) REFERENCES `users` (`id`)\n)"
        );

        let op: SchemaOp = Schema::alter("posts")
            .add_column(bigint("editor_id").references("users", "id"))
            .drop_column("legacy")
            .into();
        assert_eq!(
            Grammar::mysql().schema(&op),
            vec![
                "ALTER TABLE `posts` ADD COLUMN `editor_id` BIGINT",
                "ALTER TABLE `posts` ADD FOREIGN KEY (`editor_id`) REFERENCES `users` (`id`)",
                "ALTER TABLE `posts` DROP COLUMN `legacy`",
            ]
        );
    }

    #[test]
    fn test_default_literals_follow_dialect() {
        let op = Schema::create("blobs")
            .column(bytes("magic").default(vec![0xDE_u8, 0xAD]))
            .column(double("ratio").default(f64::NAN))
            .column(json("meta").default(serde_json::json!({})));

        assert_eq!(
            Grammar::postgres().create_table(&op),
            "CREATE TABLE \"blobs\" (\n    \
             \"magic\" BYTEA DEFAULT '\\xDEAD'::bytea,\n    \
             \"ratio\" DOUBLE PRECISION DEFAULT 'NaN'::float8,\n    \
             \"meta\" JSONB DEFAULT '{}'\n)"
        );
        assert_eq!(
            Grammar::mysql().create_table(&op),
            "CREATE TABLE `blobs` (\n    \
             `magic` LONGBLOB DEFAULT (X'DEAD'),\n    \
             `ratio` DOUBLE DEFAULT NULL,\n    \
             `meta` JSON DEFAULT ('{}')\n)"
        );
        assert_eq!(
            Grammar::sqlite().create_table(&op),
            "CREATE TABLE \"blobs\" (\n    \
             \"magic\" BLOB DEFAULT X'DEAD',\n    \
             \"ratio\" REAL DEFAULT NULL,\n    \
             \"meta\" TEXT DEFAULT '{}'\n)"
        );
    }

    #[test]
    fn test_current_timestamp_matches_precision() {
        let col = timestamp("created_at").default_now();
        assert_eq!(
            Grammar::mysql().column_definition(&col),
            "`created_at` DATETIME(6) DEFAULT CURRENT_TIMESTAMP(6)"
        );
        assert_eq!(
            Grammar::sqlite().column_definition(&col),
            "\"created_at\" TEXT DEFAULT CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_alter_table_one_statement_per_column() {
        let op: SchemaOp = Schema::alter("users")
            .add_column(string("nickname"))
            .add_column(bigint("score").not_null().default(0))
            .drop_column("legacy")
            .into();
        assert_eq!(
            Grammar::sqlite().schema(&op),
            vec![
                "ALTER TABLE \"users\" ADD COLUMN \"nickname\" TEXT",
                "ALTER TABLE \"users\" ADD COLUMN \"score\" INTEGER NOT NULL DEFAULT 0",
                "ALTER TABLE \"users\" DROP COLUMN \"legacy\"",
            ]
        );
    }

    #[test]
    fn test_drop_and_rename() {
        let grammar = Grammar::mysql();
        assert_eq!(
            grammar.schema(&Schema::drop("users").if_exists().into()),
            vec!["DROP TABLE IF EXISTS `users`"]
        );
        assert_eq!(
            grammar.schema(&Schema::rename("users", "members").into()),
            vec!["ALTER TABLE `users` RENAME TO `members`"]
        );
    }

    #[test]
    fn test_create_table_without_columns() {
        let op = Schema::create("empty").if_not_exists();
        assert_eq!(
            Grammar::postgres().create_table(&op),
            "CREATE TABLE IF NOT EXISTS \"empty\" ()"
        );
    }
}
