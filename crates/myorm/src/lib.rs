//! # myorm
//!
//! A fluent MySQL query builder with a thin pooled execution facade.
//!
//! ## Features
//!
//! - **Fluent statements**: chain `table`/`field`/`eq`/`like`/`order`/`pager`
//!   and finish with a terminal action (`select`, `find`, `count`, `insert`,
//!   `update`, `delete`)
//! - **Typed conditions**: [`Condition`] and [`Op`] model where clauses as an
//!   explicit tree; the JSON form of dynamic payloads parses into the same
//!   tree
//! - **Consistent casing**: callers speak camelCase, SQL speaks snake_case —
//!   both directions are converted at the boundary
//! - **Fully parameterized**: every generated statement carries positional
//!   `?` placeholders with a matching parameter list
//! - **Pooled execution**: one shared [`Db`] drives the pool; transactions
//!   check out a single connection and run their statements in order
//!
//! ## Queries
//!
//! ```ignore
//! let db = myorm::Db::connect(&config)?;
//!
//! let users = db.table("user")
//!     .field("id, nick_name")
//!     .eq("status", 1)
//!     .like("nickName", "ya")
//!     .order("id desc")
//!     .pager(2, 10)
//!     .select()
//!     .await?;
//!
//! let id = db.table("user")
//!     .set("firstName", "A")
//!     .set("lastCall", 5)
//!     .insert()
//!     .await?;
//! ```
//!
//! ## Raw SQL and transactions
//!
//! Raw SQL may use the `{pre}` token wherever the configured table prefix
//! belongs:
//!
//! ```ignore
//! let rows = db.query("select * from {pre}user where id = ?", vec![7.into()]).await?;
//!
//! db.transaction(vec![
//!     Statement::new("update {pre}account set balance = balance - ? where id = ?",
//!         vec![100.into(), 1.into()]),
//!     Statement::new("update {pre}account set balance = balance + ? where id = ?",
//!         vec![100.into(), 2.into()]),
//! ]).await?;
//! ```

pub mod client;
pub mod condition;
pub mod config;
pub mod error;
mod ident;
pub mod qb;
pub mod query;
pub mod row;
mod value;

pub use client::{Db, ExecResult};
pub use condition::{Condition, Op};
pub use config::DbConfig;
pub use error::{OrmError, OrmResult};
pub use qb::{JoinKind, Statement, StatementKind};
pub use query::Query;
pub use row::Record;

// Condition and data values are expressed with the client's value type.
pub use mysql_async::Value;

use std::sync::OnceLock;

static DEFAULT_DB: OnceLock<Db> = OnceLock::new();

/// Initialize the process-wide default pool.
///
/// A second call keeps the first pool and logs a warning.
pub fn init(config: &DbConfig) -> OrmResult<()> {
    let db = Db::connect(config)?;
    if DEFAULT_DB.set(db).is_err() {
        tracing::warn!(
            target: "myorm.sql",
            "default pool already initialized; keeping the existing one"
        );
    }
    Ok(())
}

/// The process-wide default pool, if [`init`] has run.
pub fn db() -> OrmResult<Db> {
    DEFAULT_DB
        .get()
        .cloned()
        .ok_or_else(|| OrmError::NotInitialized.warned())
}

/// Start a query on the default pool.
///
/// The chain itself never fails; the terminal action reports
/// [`OrmError::NotInitialized`] when [`init`] has not run.
pub fn table(table: &str) -> Query {
    Query::detached(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pool_is_unset_until_init() {
        let err = db().unwrap_err();
        assert_eq!(err.code(), "not_initialized");
    }

    #[tokio::test]
    async fn terminal_actions_need_initialization() {
        let err = table("user").eq("id", 1).find().await.unwrap_err();
        assert_eq!(err.code(), "not_initialized");
    }
}
