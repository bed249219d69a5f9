//! # quill-sql
//!
//! A dialect-aware SQL compiler.
//!
//! This crate provides:
//! - Statement models for SELECT, INSERT, UPDATE and DELETE built through
//!   consuming builder methods
//! - A single [`Grammar`] that compiles them into SQL text plus an ordered list
//!   of bound values, for PostgreSQL, MySQL or SQLite
//! - Schema operations compiled into DDL statements
//!
//! Nothing here talks to a database. The caller hands the compiled text and
//! values to its driver.
//!
//! ## Compiling a query
//!
//! ```rust
//! use quill_sql::{Grammar, Op, PredicateBuilder, Select};
//!
//! let query = Select::from("users")
//!     .columns(&["id", "name"])
//!     .where_clause("active", Op::Eq, true)
//!     .where_in("role", ["admin", "owner"]);
//!
//! let (sql, params) = Grammar::postgres().select(&query).into_parts();
//! assert_eq!(
//!     sql,
//!     "SELECT id, name FROM users WHERE active = $1 AND role IN ($2, $3)"
//! );
//! assert_eq!(params.len(), 3);
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values are never spliced into the statement text:
//!
//! ```rust
//! use quill_sql::{Grammar, Op, PredicateBuilder, Select, Value};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let (sql, params) = Grammar::sqlite()
//!     .select(&Select::from("users").columns(&["id"]).where_clause("name", Op::Eq, user_input))
//!     .into_parts();
//!
//! assert_eq!(sql, "SELECT id FROM users WHERE name = ?");
//! assert_eq!(params, vec![Value::String(String::from(user_input))]);
//! ```
//!
//! ## Empty statements do not compile
//!
//! UPDATE without SET and INSERT without values are rejected by the type
//! system:
//!
//! ```compile_fail
//! use quill_sql::{Grammar, Update};
//!
//! let update = Update::table("users");
//! let _ = Grammar::sqlite().update(&update);
//! ```

pub mod dialect;
pub mod error;
pub mod fragment;
pub mod grammar;
pub mod predicate;
pub mod query;
pub mod row;
pub mod schema;
pub mod value;

pub use dialect::{
    BytesLiteral, Dialect, DialectKind, ForeignKeyStyle, InsertReturning, LiteralStyle,
    NonFiniteFloat, PlaceholderStyle, TypeNames,
};
pub use error::{Error, Result};
pub use fragment::{Sql, SqlJoined};
pub use grammar::Grammar;
pub use predicate::{Clause, Connector, Op, Predicate, PredicateBuilder};
pub use query::{Delete, Insert, Select, TableRef, Update};
pub use row::{FromValue, Row};
pub use schema::{ColumnDef, ColumnType, Schema, SchemaOp};
pub use value::{ToValue, Value};
