//! The SQL compiler.
//!
//! A [`Grammar`] turns statement models into SQL text plus bound values for
//! one [`Dialect`]. All compilation logic lives here once; the dialect only
//! supplies data (placeholder style, quoting, lock support, insert-return
//! idiom, type names).
//!
//! Compilation is total: every model that can be built compiles, and nothing
//! here returns an error.

mod ddl;

use tracing::{debug, trace, warn};

use crate::dialect::{Dialect, DialectKind, InsertReturning};
use crate::fragment::{Sql, MARKER};
use crate::predicate::Predicate;
use crate::query::{Delete, Insert, Lock, LockOption, LockStrength, Select, Update};

/// Dialect-aware compiler.
///
/// Stateless apart from its dialect, which is fixed at construction. Cheap to
/// copy and safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar {
    dialect: Dialect,
}

impl Grammar {
    /// Creates a grammar for `dialect`.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// PostgreSQL grammar.
    #[must_use]
    pub const fn postgres() -> Self {
        Self::new(Dialect::POSTGRES)
    }

    /// MySQL grammar.
    #[must_use]
    pub const fn mysql() -> Self {
        Self::new(Dialect::MYSQL)
    }

    /// SQLite grammar.
    #[must_use]
    pub const fn sqlite() -> Self {
        Self::new(Dialect::SQLITE)
    }

    /// Grammar for a named dialect.
    #[must_use]
    pub const fn for_kind(kind: DialectKind) -> Self {
        Self::new(kind.dialect())
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Compiles a SELECT.
    ///
    /// Clause order is fixed: `SELECT [DISTINCT] cols FROM t [joins] [WHERE]
    /// [GROUP BY] [HAVING] [ORDER BY] [LIMIT] [OFFSET] [lock]`; empty sections
    /// are left out. An OFFSET without a LIMIT gets the dialect's unbounded
    /// LIMIT where OFFSET cannot stand alone.
    #[must_use]
    pub fn select(&self, query: &Select) -> Sql {
        let mut sql = Sql::raw("SELECT ");

        if query.distinct {
            sql.push_str("DISTINCT ");
        }

        if query.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&query.columns.join(", "));
        }

        sql.push_str(" FROM ");
        sql.push_str(&query.table.to_string());

        for join in &query.joins {
            sql.push(' ');
            sql.push_str(join.kind.as_sql());
            sql.push(' ');
            sql.push_str(&join.table.to_string());
            push_predicate(&mut sql, " ON ", &join.on);
        }

        push_predicate(&mut sql, " WHERE ", &query.predicate);

        if !query.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&query.group_by.join(", "));
        }

        push_predicate(&mut sql, " HAVING ", &query.having);

        if !query.order_by.is_empty() {
            let order: Vec<String> = query
                .order_by
                .iter()
                .map(|o| format!("{} {}", o.column, o.direction.as_sql()))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        match (query.limit, query.offset, self.dialect.unbounded_limit) {
            (Some(n), _, _) => sql.push_str(&format!(" LIMIT {n}")),
            (None, Some(_), Some(all)) => sql.push_str(&format!(" LIMIT {all}")),
            _ => {}
        }

        if let Some(n) = query.offset {
            sql.push_str(&format!(" OFFSET {n}"));
        }

        if let Some(lock) = query.lock {
            self.push_lock(&mut sql, lock);
        }

        self.finish("select", sql)
    }

    /// Compiles an INSERT, with the dialect's returning idiom when
    /// [`Insert::returning`] was requested.
    #[must_use]
    pub fn insert(&self, query: &Insert) -> Sql {
        let mut sql = Sql::raw(format!("INSERT INTO {} (", query.table));
        let columns: Vec<&str> = query.values.iter().map(|(c, _)| c.as_str()).collect();
        sql.push_str(&columns.join(", "));
        sql.push_str(") VALUES (");
        for (i, (_, value)) in query.values.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_bind(value.clone());
        }
        sql.push(')');

        if !query.returning.is_empty() {
            let returning = query.returning.join(", ");
            match self.dialect.insert_returning {
                InsertReturning::Returning => {
                    sql.push_str(" RETURNING ");
                    sql.push_str(&returning);
                }
                InsertReturning::LastInsertId => {
                    sql.push_str(&format!(
                        "; SELECT {returning} FROM {} WHERE {} = LAST_INSERT_ID()",
                        query.table.name, query.key
                    ));
                }
            }
        }

        self.finish("insert", sql)
    }

    /// Compiles an UPDATE.
    #[must_use]
    pub fn update(&self, query: &Update) -> Sql {
        let mut sql = Sql::raw(format!("UPDATE {} SET ", query.table));
        for (i, (column, value)) in query.assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(column);
            sql.push_str(" = ");
            sql.push_bind(value.clone());
        }
        push_predicate(&mut sql, " WHERE ", &query.predicate);
        self.finish("update", sql)
    }

    /// Compiles a DELETE.
    #[must_use]
    pub fn delete(&self, query: &Delete) -> Sql {
        let mut sql = Sql::raw(format!("DELETE FROM {}", query.table));
        push_predicate(&mut sql, " WHERE ", &query.predicate);
        self.finish("delete", sql)
    }

    /// Rewrites the `?` markers of a dialect-neutral fragment into this
    /// dialect's placeholders, numbering from 1.
    ///
    /// Only markers recorded when values were bound are rewritten; any other
    /// `?` in the text is SQL and stays as written.
    #[must_use]
    pub fn render(&self, sql: Sql) -> Sql {
        let markers = sql.markers().to_vec();
        let (text, values) = sql.into_parts();
        let mut out = String::with_capacity(text.len() + markers.len() * 2);
        let mut last = 0;
        for (i, at) in markers.iter().enumerate() {
            out.push_str(&text[last..*at]);
            self.dialect.placeholder.write(&mut out, i + 1);
            last = at + MARKER.len_utf8();
        }
        out.push_str(&text[last..]);

        if markers.len() != values.len() {
            warn!(
                dialect = self.dialect.name,
                placeholders = markers.len(),
                values = values.len(),
                "placeholder count does not match bound values; check raw fragments"
            );
        }

        Sql::rendered(out, values)
    }

    fn push_lock(&self, sql: &mut Sql, lock: Lock) {
        if !self.dialect.locking {
            debug!(
                dialect = self.dialect.name,
                "row-locking clause dropped: dialect has no row locks"
            );
            return;
        }
        sql.push_str(match lock.strength {
            LockStrength::Update => " FOR UPDATE",
            LockStrength::Share => " FOR SHARE",
        });
        match lock.option {
            Some(LockOption::NoWait) => sql.push_str(" NOWAIT"),
            Some(LockOption::SkipLocked) => sql.push_str(" SKIP LOCKED"),
            None => {}
        }
    }

    fn finish(&self, statement: &'static str, sql: Sql) -> Sql {
        let sql = self.render(sql);
        trace!(
            dialect = self.dialect.name,
            statement,
            sql = sql.text(),
            binds = sql.values().len(),
            "compiled statement"
        );
        sql
    }
}

/// Appends `keyword` and the compiled predicate, or nothing when the predicate
/// compiles empty.
fn push_predicate(sql: &mut Sql, keyword: &str, predicate: &Predicate) {
    let compiled = predicate.compile();
    if compiled.is_empty() {
        return;
    }
    sql.push_str(keyword);
    sql.push_sql(compiled);
}
