//! Schema operations.
//!
//! Describes DDL intent (create/alter/drop/rename table) without SQL syntax.
//! A [`Grammar`](crate::Grammar) compiles a [`SchemaOp`] into one or more
//! statements for its dialect.
//!
//! # Example
//!
//! ```rust
//! use quill_sql::schema::{Schema, increments, string, timestamp};
//!
//! let op = Schema::create("users")
//!     .column(increments("id"))
//!     .column(string("username").not_null().unique())
//!     .column(timestamp("created_at").not_null().default_now());
//!
//! assert_eq!(op.columns.len(), 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::value::{ToValue, Value};

/// Dialect-neutral column type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    BigInt,
    /// Text.
    String,
    /// Boolean.
    Bool,
    /// Double precision float.
    Double,
    /// UUID.
    Uuid,
    /// Timestamp.
    Date,
    /// JSON document.
    Json,
    /// Binary blob.
    Bytes,
    /// Auto-incrementing primary key.
    Increments,
    /// Type name passed through verbatim.
    Custom(String),
}

/// Default value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A literal, rendered inline in the dialect's literal syntax.
    Value(Value),
    /// The current time, in the precision of the dialect's timestamp type.
    CurrentTimestamp,
    /// Raw SQL expression, passed through verbatim.
    Expression(String),
}

/// A column constraint modifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `PRIMARY KEY`
    Primary,
    /// `NOT NULL`
    NotNull,
    /// `UNIQUE`
    Unique,
    /// `DEFAULT ...`
    Default(DefaultValue),
    /// `REFERENCES table (column)`
    References {
        /// Referenced table.
        table: String,
        /// Referenced column.
        column: String,
    },
}

/// A column definition: name, type and constraints in the order added.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Column type.
    pub ty: ColumnType,
    /// Constraint modifiers, in insertion order.
    pub constraints: Vec<Constraint>,
}

impl ColumnDef {
    /// Creates a column with no constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            constraints: vec![],
        }
    }

    /// Appends a constraint.
    #[must_use]
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Marks the column as PRIMARY KEY.
    #[must_use]
    pub fn primary(self) -> Self {
        self.constraint(Constraint::Primary)
    }

    /// Marks the column as NOT NULL.
    #[must_use]
    pub fn not_null(self) -> Self {
        self.constraint(Constraint::NotNull)
    }

    /// Marks the column as UNIQUE.
    #[must_use]
    pub fn unique(self) -> Self {
        self.constraint(Constraint::Unique)
    }

    /// Sets a literal default value.
    #[must_use]
    pub fn default(self, value: impl ToValue) -> Self {
        self.constraint(Constraint::Default(DefaultValue::Value(value.to_value())))
    }

    /// Defaults the column to the current time.
    #[must_use]
    pub fn default_now(self) -> Self {
        self.constraint(Constraint::Default(DefaultValue::CurrentTimestamp))
    }

    /// Sets a raw SQL expression as default (e.g., `gen_random_uuid()`).
    #[must_use]
    pub fn default_expr(self, expr: impl Into<String>) -> Self {
        self.constraint(Constraint::Default(DefaultValue::Expression(expr.into())))
    }

    /// Adds a foreign key reference.
    #[must_use]
    pub fn references(self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.constraint(Constraint::References {
            table: table.into(),
            column: column.into(),
        })
    }
}

macro_rules! column_helpers {
    ($($(#[$doc:meta])* $fn_name:ident => $ty:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $fn_name(name: impl Into<String>) -> ColumnDef {
                ColumnDef::new(name, ColumnType::$ty)
            }
        )*
    };
}

column_helpers! {
    /// An `int` column.
    integer => Int,
    /// A `bigint` column.
    bigint => BigInt,
    /// A `string` column.
    string => String,
    /// A `bool` column.
    boolean => Bool,
    /// A `double` column.
    double => Double,
    /// A `uuid` column.
    uuid => Uuid,
    /// A `date` (timestamp) column.
    timestamp => Date,
    /// A `json` column.
    json => Json,
    /// A binary column.
    bytes => Bytes,
    /// An auto-incrementing primary key column.
    increments => Increments,
}

/// `CREATE TABLE`
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Table name.
    pub name: String,
    /// Column definitions.
    pub columns: Vec<ColumnDef>,
    /// Whether to use IF NOT EXISTS.
    pub if_not_exists: bool,
}

impl CreateTable {
    /// Adds a column.
    #[must_use]
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    /// Adds IF NOT EXISTS.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }
}

/// `ALTER TABLE` adding and dropping columns.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    /// Table name.
    pub name: String,
    /// Columns to add.
    pub add: Vec<ColumnDef>,
    /// Columns to drop.
    pub drop: Vec<String>,
}

impl AlterTable {
    /// Adds a column.
    #[must_use]
    pub fn add_column(mut self, column: ColumnDef) -> Self {
        self.add.push(column);
        self
    }

    /// Drops a column.
    #[must_use]
    pub fn drop_column(mut self, column: impl Into<String>) -> Self {
        self.drop.push(column.into());
        self
    }
}

/// `DROP TABLE`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTable {
    /// Table name.
    pub name: String,
    /// Whether to use IF EXISTS.
    pub if_exists: bool,
}

impl DropTable {
    /// Adds IF EXISTS.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.if_exists = true;
        self
    }
}

/// `ALTER TABLE ... RENAME TO ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTable {
    /// Current name.
    pub from: String,
    /// New name.
    pub to: String,
}

/// All schema operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaOp {
    /// Create a new table.
    CreateTable(CreateTable),
    /// Add or drop columns.
    AlterTable(AlterTable),
    /// Drop an existing table.
    DropTable(DropTable),
    /// Rename a table.
    RenameTable(RenameTable),
}

impl From<CreateTable> for SchemaOp {
    fn from(op: CreateTable) -> Self {
        Self::CreateTable(op)
    }
}

impl From<AlterTable> for SchemaOp {
    fn from(op: AlterTable) -> Self {
        Self::AlterTable(op)
    }
}

impl From<DropTable> for SchemaOp {
    fn from(op: DropTable) -> Self {
        Self::DropTable(op)
    }
}

impl From<RenameTable> for SchemaOp {
    fn from(op: RenameTable) -> Self {
        Self::RenameTable(op)
    }
}

/// Entry point for schema operations.
#[derive(Debug, Clone, Copy)]
pub struct Schema;

impl Schema {
    /// Starts a `CREATE TABLE`.
    #[must_use]
    pub fn create(name: impl Into<String>) -> CreateTable {
        CreateTable {
            name: name.into(),
            columns: vec![],
            if_not_exists: false,
        }
    }

    /// Starts an `ALTER TABLE`.
    #[must_use]
    pub fn alter(name: impl Into<String>) -> AlterTable {
        AlterTable {
            name: name.into(),
            add: vec![],
            drop: vec![],
        }
    }

    /// `DROP TABLE name`
    #[must_use]
    pub fn drop(name: impl Into<String>) -> DropTable {
        DropTable {
            name: name.into(),
            if_exists: false,
        }
    }

    /// `ALTER TABLE from RENAME TO to`
    #[must_use]
    pub fn rename(from: impl Into<String>, to: impl Into<String>) -> RenameTable {
        RenameTable {
            from: from.into(),
            to: to.into(),
        }
    }
}
