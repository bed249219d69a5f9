//! Statement models.
//!
//! Each model accumulates a statement description through owned, consuming
//! builder methods and never executes anything. The target table is a required
//! constructor argument, so every model that can be built can be compiled.
//!
//! # Example
//!
//! ```rust
//! use quill_sql::{Grammar, Op, PredicateBuilder, Select};
//!
//! let (sql, params) = Grammar::sqlite()
//!     .select(
//!         &Select::from("users")
//!             .where_clause("age", Op::Gt, 21)
//!             .order_by("name")
//!             .limit(10),
//!     )
//!     .into_parts();
//!
//! assert_eq!(sql, "SELECT * FROM users WHERE age > ? ORDER BY name ASC LIMIT 10");
//! assert_eq!(params.len(), 1);
//! ```

mod delete;
mod insert;
mod select;
mod update;

use std::fmt;

pub use delete::Delete;
pub use insert::{HasValues, Insert, NoValues};
pub use select::{Direction, Join, JoinKind, Lock, LockOption, LockStrength, OrderBy, Select};
pub use update::{HasSet, NoSet, Update};

/// A table name with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Table name, verbatim.
    pub name: String,
    /// Optional alias.
    pub alias: Option<String>,
}

impl TableRef {
    /// A table without alias.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// A table with an alias.
    #[must_use]
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} AS {alias}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_ref_display() {
        assert_eq!(TableRef::new("users").to_string(), "users");
        assert_eq!(TableRef::aliased("users", "u").to_string(), "users AS u");
    }
}
