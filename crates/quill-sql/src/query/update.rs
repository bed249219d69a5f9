//! UPDATE statement model using the typestate pattern.
//!
//! An `Update` can only be compiled once it has at least one SET assignment,
//! so `UPDATE t SET` with nothing after it cannot be expressed.

use std::marker::PhantomData;

use super::TableRef;
use crate::predicate::{Predicate, PredicateBuilder};
use crate::value::{ToValue, Value};

/// Marker: No SET clause specified yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoSet;
/// Marker: SET clause has been specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasSet;

/// An UPDATE statement description.
#[derive(Debug, Clone, PartialEq)]
pub struct Update<Set = HasSet> {
    pub(crate) table: TableRef,
    pub(crate) assignments: Vec<(String, Value)>,
    pub(crate) predicate: Predicate,
    _state: PhantomData<Set>,
}

impl Update<NoSet> {
    /// Starts an `UPDATE table`.
    #[must_use]
    pub fn table(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            assignments: vec![],
            predicate: Predicate::new(),
            _state: PhantomData,
        }
    }

    /// Adds the first SET assignment.
    #[must_use]
    pub fn set(self, column: &str, value: impl ToValue) -> Update<HasSet> {
        Update {
            table: self.table,
            assignments: vec![(String::from(column), value.to_value())],
            predicate: self.predicate,
            _state: PhantomData,
        }
    }
}

impl Update<HasSet> {
    /// Adds another SET assignment.
    #[must_use]
    pub fn set(mut self, column: &str, value: impl ToValue) -> Self {
        self.assignments.push((String::from(column), value.to_value()));
        self
    }
}

impl PredicateBuilder for Update<HasSet> {
    fn predicate_mut(&mut self) -> &mut Predicate {
        &mut self.predicate
    }
}
