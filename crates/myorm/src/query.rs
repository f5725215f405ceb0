//! The fluent query surface: chained configuration plus terminal actions.

use crate::client::Db;
use crate::condition::{Condition, Op};
use crate::error::{OrmError, OrmResult};
use crate::qb::{self, JoinKind, QueryOptions, Statement, StatementKind};
use crate::row::Record;
use crate::value;
use mysql_async::Value;

/// A single-statement fluent builder.
///
/// Chained configuration never fails; only terminal actions touch the pool
/// and surface errors. Terminal actions consume the builder, so one `Query`
/// is exactly one statement — start the next one from [`Db::table`] or
/// [`crate::table`].
#[derive(Clone, Debug)]
pub struct Query {
    db: Option<Db>,
    opts: QueryOptions,
    /// Deferred condition-parse failure, surfaced by the terminal action.
    build_error: Option<String>,
}

impl Query {
    pub(crate) fn bound(db: Db, table: &str) -> Self {
        Self {
            db: Some(db),
            opts: QueryOptions::new(table),
            build_error: None,
        }
    }

    pub(crate) fn detached(table: &str) -> Self {
        Self {
            db: None,
            opts: QueryOptions::new(table),
            build_error: None,
        }
    }

    // ==================== Chained configuration ====================

    /// Replace the target table.
    pub fn table(mut self, table: &str) -> Self {
        self.opts.table = table.to_string();
        self
    }

    /// Append a join to the table expression: `"<table> <kind> join <other>"`.
    /// Join predicates travel in the where clause.
    pub fn join(mut self, table: &str, kind: JoinKind) -> Self {
        self.opts.table = format!("{} {} join {}", self.opts.table, kind.keyword(), table);
        self
    }

    pub fn inner_join(self, table: &str) -> Self {
        self.join(table, JoinKind::Inner)
    }

    pub fn left_join(self, table: &str) -> Self {
        self.join(table, JoinKind::Left)
    }

    pub fn right_join(self, table: &str) -> Self {
        self.join(table, JoinKind::Right)
    }

    /// Set the selected column list (raw SQL text, default `*`).
    pub fn field(mut self, field: &str) -> Self {
        self.opts.field = field.to_string();
        self
    }

    /// Set the order-by text (raw SQL, e.g. `"created_at desc"`).
    pub fn order(mut self, order: &str) -> Self {
        self.opts.order = order.to_string();
        self
    }

    /// Cap the row count. A zero limit counts as absent.
    pub fn limit(mut self, limit: u64) -> Self {
        self.opts.limit = Some(limit);
        self
    }

    /// Page through results; overwrites both limit and offset.
    /// Pages are 1-based: `pager(1, n)` starts at the first row.
    pub fn pager(mut self, page_index: u64, page_size: u64) -> Self {
        self.opts.limit = Some(page_size);
        self.opts.offset = Some((page_index * page_size).saturating_sub(page_size));
        self
    }

    /// Add one column to write.
    pub fn set<T: Into<Value>>(mut self, column: &str, val: T) -> Self {
        self.opts.data.push((column.to_string(), val.into()));
        self
    }

    /// Replace the whole write map.
    pub fn data<K, V>(mut self, data: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.opts.data = data
            .into_iter()
            .map(|(column, val)| (column.into(), val.into()))
            .collect();
        self
    }

    /// Add a condition; all added conditions are AND-ed.
    pub fn filter(mut self, condition: Condition) -> Self {
        self.opts.where_.push(condition);
        self
    }

    /// Add a condition from its polymorphic JSON form. A parse failure is
    /// deferred and surfaced by the terminal action.
    pub fn filter_json(mut self, input: &serde_json::Value) -> Self {
        match Condition::from_json(input) {
            Ok(condition) => self.opts.where_.push(condition),
            Err(error) => {
                if self.build_error.is_none() {
                    self.build_error = Some(error.to_string());
                }
            }
        }
        self
    }

    // ==================== Condition sugar ====================

    /// Add `column = value`.
    pub fn eq<T: Into<Value>>(self, column: &str, val: T) -> Self {
        self.filter(Condition::named(column, Op::eq(val)))
    }

    /// Add `column != value`.
    pub fn ne<T: Into<Value>>(self, column: &str, val: T) -> Self {
        self.filter(Condition::named(column, Op::ne(val)))
    }

    /// Add `column > value`.
    pub fn gt<T: Into<Value>>(self, column: &str, val: T) -> Self {
        self.filter(Condition::named(column, Op::gt(val)))
    }

    /// Add `column >= value`.
    pub fn gte<T: Into<Value>>(self, column: &str, val: T) -> Self {
        self.filter(Condition::named(column, Op::gte(val)))
    }

    /// Add `column < value`.
    pub fn lt<T: Into<Value>>(self, column: &str, val: T) -> Self {
        self.filter(Condition::named(column, Op::lt(val)))
    }

    /// Add `column <= value`.
    pub fn lte<T: Into<Value>>(self, column: &str, val: T) -> Self {
        self.filter(Condition::named(column, Op::lte(val)))
    }

    /// Add `column like %value%`.
    pub fn like<T: Into<Value>>(self, column: &str, pattern: T) -> Self {
        self.filter(Condition::named(column, Op::like(pattern)))
    }

    /// Add `column in (...)`.
    pub fn in_list<T: Into<Value>>(
        self,
        column: &str,
        values: impl IntoIterator<Item = T>,
    ) -> Self {
        self.filter(Condition::named(column, Op::in_list(values)))
    }

    /// Add a `like` OR-ed across several columns as one fragment.
    pub fn any_like<I, S, T>(self, columns: I, pattern: T) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        T: Into<Value>,
    {
        self.filter(Condition::named_any(columns, Op::like(pattern)))
    }

    /// Add a raw SQL fragment. The caller owns its safety.
    pub fn raw_where(self, sql: &str) -> Self {
        self.filter(Condition::raw(sql))
    }

    // ==================== Build ====================

    /// Build `{sql, params}` for `kind` without executing anything.
    pub fn statement(self, kind: StatementKind) -> OrmResult<Statement> {
        if let Some(detail) = self.build_error {
            return Err(OrmError::MissingConditionValue(detail));
        }
        qb::build(self.opts, kind)
    }

    // ==================== Terminal actions ====================

    /// Fetch the first matching row, or fail with a not-found error carrying
    /// the attempted condition.
    pub async fn find(mut self) -> OrmResult<Record> {
        self.opts.limit = Some(1);
        let db = self.resolve_db()?;
        let detail = describe(&self.opts);
        let statement = self.statement(StatementKind::Select)?;
        let rows = db.query(&statement.sql, statement.params).await?;
        match rows.into_iter().next() {
            Some(row) => Ok(row),
            None => Err(OrmError::not_found(detail)),
        }
    }

    /// Count matching rows.
    pub async fn count(self) -> OrmResult<i64> {
        let db = self.resolve_db()?;
        let statement = self.statement(StatementKind::Count)?;
        let rows = db.query(&statement.sql, statement.params).await?;
        match rows.into_iter().next() {
            Some(row) => row.get("total"),
            None => Ok(0),
        }
    }

    /// Fetch all matching rows.
    pub async fn select(self) -> OrmResult<Vec<Record>> {
        let db = self.resolve_db()?;
        let statement = self.statement(StatementKind::Select)?;
        db.query(&statement.sql, statement.params).await
    }

    /// Insert the configured data and return the generated id (`0` when the
    /// table has no auto-increment column).
    pub async fn insert(self) -> OrmResult<u64> {
        let db = self.resolve_db()?;
        let statement = self.statement(StatementKind::Insert)?;
        let result = db.execute(&statement.sql, statement.params).await?;
        Ok(result.last_insert_id.unwrap_or(0))
    }

    /// Update matching rows with the configured data; zero affected rows is a
    /// not-found error.
    pub async fn update(self) -> OrmResult<u64> {
        let db = self.resolve_db()?;
        let detail = describe(&self.opts);
        let statement = self.statement(StatementKind::Update)?;
        let result = db.execute(&statement.sql, statement.params).await?;
        if result.affected_rows == 0 {
            return Err(OrmError::not_found(detail));
        }
        Ok(result.affected_rows)
    }

    /// Delete matching rows; zero affected rows is a not-found error.
    pub async fn delete(self) -> OrmResult<u64> {
        let db = self.resolve_db()?;
        let detail = describe(&self.opts);
        let statement = self.statement(StatementKind::Delete)?;
        let result = db.execute(&statement.sql, statement.params).await?;
        if result.affected_rows == 0 {
            return Err(OrmError::not_found(detail));
        }
        Ok(result.affected_rows)
    }

    fn resolve_db(&self) -> OrmResult<Db> {
        match &self.db {
            Some(db) => Ok(db.clone()),
            None => crate::db(),
        }
    }
}

/// Table plus the compiled condition with literals inlined, for error detail.
fn describe(opts: &QueryOptions) -> String {
    let compiled = qb::compile(&opts.where_);
    if compiled.clause.is_empty() {
        format!("{} (no condition)", opts.table)
    } else {
        format!(
            "{} {}",
            opts.table,
            value::render_inline(&compiled.clause, &compiled.params)
        )
    }
}
