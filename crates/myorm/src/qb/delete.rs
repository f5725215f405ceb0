//! DELETE statement assembly.

use super::{CompiledWhere, QueryOptions, Statement};

pub(super) fn build(opts: &QueryOptions, where_: CompiledWhere) -> Statement {
    let mut sql = format!("delete from {}", opts.table);
    if !where_.clause.is_empty() {
        sql.push(' ');
        sql.push_str(&where_.clause);
    }
    Statement {
        sql,
        params: where_.params,
    }
}
