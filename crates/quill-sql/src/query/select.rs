//! SELECT statement model.

use serde::{Deserialize, Serialize};

use super::TableRef;
use crate::fragment::Sql;
use crate::predicate::{
    column_compare, value_compare, Clause, Connector, Op, Predicate, PredicateBuilder,
};
use crate::value::ToValue;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    /// `INNER JOIN`
    Inner,
    /// `LEFT JOIN`
    Left,
    /// `RIGHT JOIN`
    Right,
    /// `FULL OUTER JOIN`
    Full,
    /// `CROSS JOIN`
    Cross,
}

impl JoinKind {
    /// Returns the SQL keyword(s).
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL OUTER JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A join with its ON predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// Join type.
    pub kind: JoinKind,
    /// Joined table.
    pub table: TableRef,
    /// ON predicate; empty means no ON clause.
    pub on: Predicate,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// `ASC`
    Asc,
    /// `DESC`
    Desc,
}

impl Direction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Column expression.
    pub column: String,
    /// Direction.
    pub direction: Direction,
}

/// Row lock strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStrength {
    /// `FOR UPDATE`
    Update,
    /// `FOR SHARE`
    Share,
}

/// Row lock wait behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockOption {
    /// `NOWAIT`
    NoWait,
    /// `SKIP LOCKED`
    SkipLocked,
}

/// A row-locking clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lock {
    /// Lock strength.
    pub strength: LockStrength,
    /// Optional wait behavior.
    pub option: Option<LockOption>,
}

/// A SELECT statement description.
///
/// Projection and DISTINCT follow "last call wins"; WHERE, joins, grouping and
/// ordering accumulate in call order.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub(crate) table: TableRef,
    pub(crate) columns: Vec<String>,
    pub(crate) distinct: bool,
    pub(crate) joins: Vec<Join>,
    pub(crate) predicate: Predicate,
    pub(crate) group_by: Vec<String>,
    pub(crate) having: Predicate,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Option<u64>,
    pub(crate) offset: Option<u64>,
    pub(crate) lock: Option<Lock>,
}

impl Select {
    /// Starts a `SELECT * FROM table`.
    #[must_use]
    pub fn from(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            columns: vec![],
            distinct: false,
            joins: vec![],
            predicate: Predicate::new(),
            group_by: vec![],
            having: Predicate::new(),
            order_by: vec![],
            limit: None,
            offset: None,
            lock: None,
        }
    }

    /// Starts a `SELECT * FROM table AS alias`.
    #[must_use]
    pub fn from_as(table: impl Into<String>, alias: impl Into<String>) -> Self {
        Self::from(TableRef::aliased(table, alias))
    }

    /// Returns the target table.
    #[must_use]
    pub const fn table(&self) -> &TableRef {
        &self.table
    }

    /// Returns the WHERE predicate.
    #[must_use]
    pub const fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Replaces the projection. An empty list selects `*`.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.columns = cols.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Sets or clears DISTINCT.
    #[must_use]
    pub const fn distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    /// Adds a join with a full ON predicate built by `on`.
    #[must_use]
    pub fn join_on(
        mut self,
        kind: JoinKind,
        table: impl Into<TableRef>,
        on: impl FnOnce(Predicate) -> Predicate,
    ) -> Self {
        self.joins.push(Join {
            kind,
            table: table.into(),
            on: on(Predicate::new()),
        });
        self
    }

    fn join_columns(
        self,
        kind: JoinKind,
        table: impl Into<TableRef>,
        left: &str,
        right: &str,
    ) -> Self {
        self.join_on(kind, table, |on| on.where_column(left, Op::Eq, right))
    }

    /// Adds an INNER JOIN on `left = right`.
    #[must_use]
    pub fn join(self, table: impl Into<TableRef>, left: &str, right: &str) -> Self {
        self.join_columns(JoinKind::Inner, table, left, right)
    }

    /// Adds a LEFT JOIN on `left = right`.
    #[must_use]
    pub fn left_join(self, table: impl Into<TableRef>, left: &str, right: &str) -> Self {
        self.join_columns(JoinKind::Left, table, left, right)
    }

    /// Adds a RIGHT JOIN on `left = right`.
    #[must_use]
    pub fn right_join(self, table: impl Into<TableRef>, left: &str, right: &str) -> Self {
        self.join_columns(JoinKind::Right, table, left, right)
    }

    /// Adds a FULL OUTER JOIN on `left = right`.
    #[must_use]
    pub fn full_join(self, table: impl Into<TableRef>, left: &str, right: &str) -> Self {
        self.join_columns(JoinKind::Full, table, left, right)
    }

    /// Adds a CROSS JOIN.
    #[must_use]
    pub fn cross_join(self, table: impl Into<TableRef>) -> Self {
        self.join_on(JoinKind::Cross, table, |on| on)
    }

    /// Appends GROUP BY expressions.
    #[must_use]
    pub fn group_by(mut self, cols: &[&str]) -> Self {
        self.group_by.extend(cols.iter().map(|s| String::from(*s)));
        self
    }

    /// `HAVING ... AND column op ?`
    #[must_use]
    pub fn having(mut self, column: &str, op: Op, value: impl ToValue) -> Self {
        self.having.push(Connector::And, value_compare(column, op, value));
        self
    }

    /// `HAVING ... OR column op ?`
    #[must_use]
    pub fn or_having(mut self, column: &str, op: Op, value: impl ToValue) -> Self {
        self.having.push(Connector::Or, value_compare(column, op, value));
        self
    }

    /// `HAVING ... AND left op right`
    #[must_use]
    pub fn having_column(mut self, left: &str, op: Op, right: &str) -> Self {
        self.having.push(Connector::And, column_compare(left, op, right));
        self
    }

    /// `HAVING ... AND <raw sql>`
    #[must_use]
    pub fn having_raw(mut self, sql: Sql) -> Self {
        self.having.push(Connector::And, Clause::Raw(sql));
        self
    }

    /// `HAVING ... AND (...)`
    #[must_use]
    pub fn having_group(mut self, build: impl FnOnce(Predicate) -> Predicate) -> Self {
        self.having
            .push(Connector::And, Clause::Nested(build(Predicate::new())));
        self
    }

    /// Appends `column ASC` to ORDER BY.
    #[must_use]
    pub fn order_by(self, column: &str) -> Self {
        self.order_by_dir(column, Direction::Asc)
    }

    /// Appends `column DESC` to ORDER BY.
    #[must_use]
    pub fn order_by_desc(self, column: &str) -> Self {
        self.order_by_dir(column, Direction::Desc)
    }

    /// Appends `column direction` to ORDER BY.
    #[must_use]
    pub fn order_by_dir(mut self, column: &str, direction: Direction) -> Self {
        self.order_by.push(OrderBy {
            column: String::from(column),
            direction,
        });
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Sets the row-locking clause.
    #[must_use]
    pub const fn lock(mut self, strength: LockStrength, option: Option<LockOption>) -> Self {
        self.lock = Some(Lock { strength, option });
        self
    }

    /// `FOR UPDATE`
    #[must_use]
    pub const fn for_update(self) -> Self {
        self.lock(LockStrength::Update, None)
    }

    /// `FOR SHARE`
    #[must_use]
    pub const fn for_share(self) -> Self {
        self.lock(LockStrength::Share, None)
    }
}

impl PredicateBuilder for Select {
    fn predicate_mut(&mut self) -> &mut Predicate {
        &mut self.predicate
    }
}
