//! DELETE statement model.

use super::TableRef;
use crate::predicate::{Predicate, PredicateBuilder};

/// A DELETE statement description.
///
/// An empty predicate deletes every row; nothing stops that here.
#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub(crate) table: TableRef,
    pub(crate) predicate: Predicate,
}

impl Delete {
    /// Starts a `DELETE FROM table`.
    #[must_use]
    pub fn from(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            predicate: Predicate::new(),
        }
    }
}

impl PredicateBuilder for Delete {
    fn predicate_mut(&mut self) -> &mut Predicate {
        &mut self.predicate
    }
}
