//! Error types.
//!
//! Compiling a statement never fails. Errors only arise at the edges: picking
//! a dialect by name and decoding row values back into Rust types.

use thiserror::Error;

/// Errors produced outside the (total) compiler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A dialect name that does not match any known dialect.
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),

    /// A row does not contain the requested column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A value has a different tag than the requested Rust type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// The value kind the target type expects.
        expected: &'static str,
        /// The value kind that was found.
        found: &'static str,
    },

    /// An integer value does not fit the requested Rust type.
    #[error("value {value} out of range for {kind}")]
    OutOfRange {
        /// Target type name.
        kind: &'static str,
        /// The offending value.
        value: i64,
    },
}

/// Result type alias for fallible operations.
pub type Result<T> = std::result::Result<T, Error>;
