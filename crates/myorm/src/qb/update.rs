//! UPDATE statement assembly.

use super::{CompiledWhere, QueryOptions, Statement};
use crate::error::{OrmError, OrmResult};
use crate::ident;

pub(super) fn build(opts: QueryOptions, where_: CompiledWhere) -> OrmResult<Statement> {
    if opts.data.is_empty() {
        return Err(OrmError::EmptyWriteData.warned());
    }
    let mut sets = Vec::with_capacity(opts.data.len());
    let mut params = Vec::with_capacity(opts.data.len() + where_.params.len());
    for (column, val) in opts.data {
        sets.push(format!("{} = ?", ident::write_column(&column)));
        params.push(val);
    }
    let mut sql = format!("update {} set {}", opts.table, sets.join(", "));
    if !where_.clause.is_empty() {
        sql.push(' ');
        sql.push_str(&where_.clause);
    }
    // set params precede where params, matching placeholder order
    params.extend(where_.params);
    Ok(Statement { sql, params })
}
