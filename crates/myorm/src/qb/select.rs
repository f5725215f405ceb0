//! SELECT and COUNT statement assembly.

use super::{CompiledWhere, QueryOptions, Statement};

pub(super) fn build(opts: &QueryOptions, where_: CompiledWhere) -> Statement {
    let mut sql = format!("select {} from {}", opts.field, opts.table);
    if !where_.clause.is_empty() {
        sql.push(' ');
        sql.push_str(&where_.clause);
    }
    // limit/offset are emitted ahead of any order by; a zero limit or offset
    // counts as absent
    if let Some(limit) = opts.limit.filter(|l| *l > 0) {
        sql.push_str(&format!(" limit {limit}"));
        if let Some(offset) = opts.offset.filter(|o| *o > 0) {
            sql.push_str(&format!(" offset {offset}"));
        }
    }
    if !opts.order.is_empty() {
        sql.push_str(&format!(" order by {}", opts.order));
    }
    Statement {
        sql,
        params: where_.params,
    }
}

pub(super) fn build_count(opts: &QueryOptions, where_: CompiledWhere) -> Statement {
    let mut sql = format!("select count(*) as total from {}", opts.table);
    if !where_.clause.is_empty() {
        sql.push(' ');
        sql.push_str(&where_.clause);
    }
    Statement {
        sql,
        params: where_.params,
    }
}
