//! INSERT statement assembly.

use super::{CompiledWhere, QueryOptions, Statement};
use crate::error::{OrmError, OrmResult};
use crate::ident;

pub(super) fn build(opts: QueryOptions, _where: CompiledWhere) -> OrmResult<Statement> {
    if opts.data.is_empty() {
        return Err(OrmError::EmptyWriteData.warned());
    }
    let mut columns = Vec::with_capacity(opts.data.len());
    let mut params = Vec::with_capacity(opts.data.len());
    for (column, val) in opts.data {
        columns.push(ident::write_column(&column));
        params.push(val);
    }
    // a configured where clause is irrelevant to an insert and is dropped so
    // placeholders and params stay aligned
    let placeholders = vec!["?"; columns.len()].join(",");
    let sql = format!(
        "insert into {} ({}) values ({})",
        opts.table,
        columns.join(","),
        placeholders
    );
    Ok(Statement { sql, params })
}
