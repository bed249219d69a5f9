//! WHERE / HAVING predicate trees.
//!
//! A [`Predicate`] is an ordered list of clauses, each tagged with the
//! [`Connector`] that joins it to the clause before it. Groups nest by holding
//! another `Predicate`. Compilation produces a dialect-neutral [`Sql`] fragment.

use serde::{Deserialize, Serialize};

use crate::fragment::Sql;
use crate::value::{ToValue, Value};

/// Boolean connector joining a clause to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Connector {
    /// `AND`
    And,
    /// `OR`
    Or,
}

impl Connector {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `LIKE`
    Like,
    /// `NOT LIKE`
    NotLike,
    /// `IS`
    Is,
    /// `IS NOT`
    IsNot,
}

impl Op {
    /// Returns the SQL operator token.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
        }
    }
}

/// One leaf or group of a predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// `column op ?`
    ValueCompare {
        /// Left-hand column expression.
        column: String,
        /// Operator.
        op: Op,
        /// Bound right-hand value.
        value: Value,
    },
    /// `left op right`, both sides verbatim SQL expressions.
    ColumnCompare {
        /// Left-hand expression.
        left: String,
        /// Operator.
        op: Op,
        /// Right-hand expression.
        right: String,
    },
    /// `column [NOT] IN (?, ...)`
    SetMembership {
        /// Column expression.
        column: String,
        /// Bound members.
        values: Vec<Value>,
        /// `NOT IN` when set.
        negate: bool,
    },
    /// Parenthesized sub-predicate.
    Nested(Predicate),
    /// Verbatim SQL with its own bound values.
    Raw(Sql),
}

impl Clause {
    /// Compiles a single clause.
    ///
    /// Empty set membership folds to a constant: `IN ()` is `1 = 0` and
    /// `NOT IN ()` is `1 = 1`.
    #[must_use]
    pub fn compile(&self) -> Sql {
        match self {
            Self::ValueCompare { column, op, value } => {
                let mut sql = Sql::raw(format!("{column} {} ", op.as_sql()));
                sql.push_bind(value.clone());
                sql
            }
            Self::ColumnCompare { left, op, right } => {
                Sql::raw(format!("{left} {} {right}", op.as_sql()))
            }
            Self::SetMembership {
                column,
                values,
                negate,
            } => {
                if values.is_empty() {
                    return Sql::raw(if *negate { "1 = 1" } else { "1 = 0" });
                }
                let keyword = if *negate { "NOT IN" } else { "IN" };
                let mut sql = Sql::raw(format!("{column} {keyword} ("));
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        sql.push_str(", ");
                    }
                    sql.push_bind(value.clone());
                }
                sql.push(')');
                sql
            }
            Self::Nested(inner) => {
                let sql = inner.compile();
                if sql.is_empty() {
                    sql
                } else {
                    sql.paren()
                }
            }
            Self::Raw(sql) => sql.clone(),
        }
    }
}

/// An ordered list of clauses joined by connectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    entries: Vec<(Connector, Clause)>,
}

impl Predicate {
    /// Creates an empty predicate.
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Returns `true` if the predicate holds no clauses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the clauses with their connectors, in order.
    #[must_use]
    pub fn entries(&self) -> &[(Connector, Clause)] {
        &self.entries
    }

    /// Appends a clause.
    pub fn push(&mut self, connector: Connector, clause: Clause) {
        self.entries.push((connector, clause));
    }

    /// Compiles the tree depth-first, left to right.
    ///
    /// The connector of the first emitted clause is dropped, so the output
    /// never starts with `AND`/`OR`. Groups that compile to nothing are
    /// skipped along with their connector.
    #[must_use]
    pub fn compile(&self) -> Sql {
        let mut out = Sql::default();
        for (connector, clause) in &self.entries {
            let sql = clause.compile();
            if sql.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push(' ');
                out.push_str(connector.as_sql());
                out.push(' ');
            }
            out.push_sql(sql);
        }
        out
    }
}

/// Builder methods shared by everything that owns a WHERE predicate.
pub trait PredicateBuilder: Sized {
    /// Returns the predicate new clauses are appended to.
    fn predicate_mut(&mut self) -> &mut Predicate;

    /// Appends `clause` joined with `connector`.
    #[must_use]
    fn push_clause(mut self, connector: Connector, clause: Clause) -> Self {
        self.predicate_mut().push(connector, clause);
        self
    }

    /// `AND column op ?`
    #[must_use]
    fn where_clause(self, column: &str, op: Op, value: impl ToValue) -> Self {
        self.push_clause(Connector::And, value_compare(column, op, value))
    }

    /// `OR column op ?`
    #[must_use]
    fn or_where(self, column: &str, op: Op, value: impl ToValue) -> Self {
        self.push_clause(Connector::Or, value_compare(column, op, value))
    }

    /// `AND left op right` (no binding).
    #[must_use]
    fn where_column(self, left: &str, op: Op, right: &str) -> Self {
        self.push_clause(Connector::And, column_compare(left, op, right))
    }

    /// `OR left op right` (no binding).
    #[must_use]
    fn or_where_column(self, left: &str, op: Op, right: &str) -> Self {
        self.push_clause(Connector::Or, column_compare(left, op, right))
    }

    /// `AND column IN (...)`
    #[must_use]
    fn where_in<T: ToValue>(self, column: &str, values: impl IntoIterator<Item = T>) -> Self {
        self.push_clause(Connector::And, membership(column, values, false))
    }

    /// `AND column NOT IN (...)`
    #[must_use]
    fn where_not_in<T: ToValue>(self, column: &str, values: impl IntoIterator<Item = T>) -> Self {
        self.push_clause(Connector::And, membership(column, values, true))
    }

    /// `OR column IN (...)`
    #[must_use]
    fn or_where_in<T: ToValue>(self, column: &str, values: impl IntoIterator<Item = T>) -> Self {
        self.push_clause(Connector::Or, membership(column, values, false))
    }

    /// `OR column NOT IN (...)`
    #[must_use]
    fn or_where_not_in<T: ToValue>(
        self,
        column: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.push_clause(Connector::Or, membership(column, values, true))
    }

    /// `AND column IS NULL`
    #[must_use]
    fn where_null(self, column: &str) -> Self {
        self.push_clause(Connector::And, column_compare(column, Op::Is, "NULL"))
    }

    /// `AND column IS NOT NULL`
    #[must_use]
    fn where_not_null(self, column: &str) -> Self {
        self.push_clause(Connector::And, column_compare(column, Op::IsNot, "NULL"))
    }

    /// `OR column IS NULL`
    #[must_use]
    fn or_where_null(self, column: &str) -> Self {
        self.push_clause(Connector::Or, column_compare(column, Op::Is, "NULL"))
    }

    /// `OR column IS NOT NULL`
    #[must_use]
    fn or_where_not_null(self, column: &str) -> Self {
        self.push_clause(Connector::Or, column_compare(column, Op::IsNot, "NULL"))
    }

    /// `AND <raw sql>`
    #[must_use]
    fn where_raw(self, sql: Sql) -> Self {
        self.push_clause(Connector::And, Clause::Raw(sql))
    }

    /// `OR <raw sql>`
    #[must_use]
    fn or_where_raw(self, sql: Sql) -> Self {
        self.push_clause(Connector::Or, Clause::Raw(sql))
    }

    /// `AND (...)`, the group built by `build`.
    #[must_use]
    fn where_group(self, build: impl FnOnce(Predicate) -> Predicate) -> Self {
        self.push_clause(Connector::And, Clause::Nested(build(Predicate::new())))
    }

    /// `OR (...)`, the group built by `build`.
    #[must_use]
    fn or_where_group(self, build: impl FnOnce(Predicate) -> Predicate) -> Self {
        self.push_clause(Connector::Or, Clause::Nested(build(Predicate::new())))
    }
}

impl PredicateBuilder for Predicate {
    fn predicate_mut(&mut self) -> &mut Predicate {
        self
    }
}

pub(crate) fn value_compare(column: &str, op: Op, value: impl ToValue) -> Clause {
    Clause::ValueCompare {
        column: String::from(column),
        op,
        value: value.to_value(),
    }
}

pub(crate) fn column_compare(left: &str, op: Op, right: &str) -> Clause {
    Clause::ColumnCompare {
        left: String::from(left),
        op,
        right: String::from(right),
    }
}

fn membership<T: ToValue>(
    column: &str,
    values: impl IntoIterator<Item = T>,
    negate: bool,
) -> Clause {
    Clause::SetMembership {
        column: String::from(column),
        values: values.into_iter().map(ToValue::to_value).collect(),
        negate,
    }
}
