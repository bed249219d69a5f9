//! INSERT statement model using the typestate pattern.
//!
//! An `Insert` can only be compiled once it has at least one column value.

use std::marker::PhantomData;

use super::TableRef;
use crate::value::{ToValue, Value};

/// Marker: No values specified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoValues;
/// Marker: Values have been specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasValues;

/// An INSERT of a single row.
///
/// Columns keep the order in which they were set.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert<Values = HasValues> {
    pub(crate) table: TableRef,
    pub(crate) values: Vec<(String, Value)>,
    pub(crate) returning: Vec<String>,
    pub(crate) key: String,
    _state: PhantomData<Values>,
}

impl Insert<NoValues> {
    /// Starts an `INSERT INTO table`.
    #[must_use]
    pub fn into_table(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            values: vec![],
            returning: vec![],
            key: String::from("id"),
            _state: PhantomData,
        }
    }

    /// Sets the first column value.
    #[must_use]
    pub fn value(self, column: &str, value: impl ToValue) -> Insert<HasValues> {
        Insert {
            table: self.table,
            values: vec![(String::from(column), value.to_value())],
            returning: self.returning,
            key: self.key,
            _state: PhantomData,
        }
    }
}

impl Insert<HasValues> {
    /// Sets another column value.
    #[must_use]
    pub fn value(mut self, column: &str, value: impl ToValue) -> Self {
        self.values.push((String::from(column), value.to_value()));
        self
    }

    /// Sets several column values, in order.
    #[must_use]
    pub fn values<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToValue,
    {
        self.values.extend(
            pairs
                .into_iter()
                .map(|(column, value)| (column.into(), value.to_value())),
        );
        self
    }

    /// Returns the column/value pairs in order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, Value)] {
        &self.values
    }
}

impl<Values> Insert<Values> {
    /// Requests the inserted row's `columns` back.
    ///
    /// Dialects without `RETURNING` fetch the row through the key column
    /// (see [`Insert::key`]).
    #[must_use]
    pub fn returning(mut self, columns: &[&str]) -> Self {
        self.returning = columns.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Sets the auto-generated key column used to fetch the inserted row.
    /// Defaults to `id`.
    #[must_use]
    pub fn key(mut self, column: &str) -> Self {
        self.key = String::from(column);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_keep_declaration_order() {
        let insert = Insert::into_table("users")
            .value("name", "Alice")
            .values([("zeta", 1), ("alpha", 2)])
            .value("email", "a@example.com");
        let columns: Vec<&str> = insert.pairs().iter().map(|(c, _)| c.as_str()).collect();
        assert_eq!(columns, vec!["name", "zeta", "alpha", "email"]);
    }

    #[test]
    fn test_default_key() {
        let insert = Insert::into_table("users").value("name", "x");
        assert_eq!(insert.key, "id");
        assert_eq!(insert.key("user_id").key, "user_id");
    }
}
