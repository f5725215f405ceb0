//! Statement assembly: one query-options record in, `{sql, params}` out.
//!
//! The where compiler lives in [`where_clause`]; each statement kind has its
//! own assembly file. Everything here is pure string/parameter work with no
//! connection in sight, which is what makes it unit-testable.

mod delete;
mod insert;
mod select;
mod update;
mod where_clause;


pub(crate) use where_clause::{CompiledWhere, compile};

use crate::condition::Condition;
use crate::error::OrmResult;
use mysql_async::Value;

/// Statement kind dispatched by [`build`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatementKind {
    /// `select <field> from <table> ...` (the default).
    #[default]
    Select,
    /// `select count(*) as total from <table> ...`
    Count,
    /// `insert into <table> (...) values (...)`
    Insert,
    /// `update <table> set ...`
    Update,
    /// `delete from <table> ...`
    Delete,
}

/// Join kind for the join-configuration call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub(crate) fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "inner",
            JoinKind::Left => "left",
            JoinKind::Right => "right",
        }
    }
}

/// A SQL text paired with its ordered positional parameters.
///
/// `params` aligns 1:1 with the `?` placeholders in `sql`, left to right.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    /// Create a statement from SQL text and parameters.
    pub fn new(sql: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

/// The per-query configuration consumed by one terminal action.
#[derive(Clone, Debug, Default)]
pub(crate) struct QueryOptions {
    /// Table expression; may carry an embedded join written by the join
    /// calls, treated opaquely from here on.
    pub table: String,
    /// Raw column-list text for select.
    pub field: String,
    /// Top-level AND-list of conditions.
    pub where_: Vec<Condition>,
    /// Raw order-by text.
    pub order: String,
    /// Columns to write, in insertion order.
    pub data: Vec<(String, Value)>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl QueryOptions {
    pub(crate) fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            field: "*".to_string(),
            ..Default::default()
        }
    }
}

/// Build the final SQL text and parameter list for `kind`.
pub(crate) fn build(opts: QueryOptions, kind: StatementKind) -> OrmResult<Statement> {
    let where_ = compile(&opts.where_);
    match kind {
        StatementKind::Select => Ok(select::build(&opts, where_)),
        StatementKind::Count => Ok(select::build_count(&opts, where_)),
        StatementKind::Insert => insert::build(opts, where_),
        StatementKind::Update => update::build(opts, where_),
        StatementKind::Delete => Ok(delete::build(&opts, where_)),
    }
}
