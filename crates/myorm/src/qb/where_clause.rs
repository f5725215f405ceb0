//! The where compiler: a condition tree in, AND-joined fragments and a
//! positional parameter list out.

use crate::condition::{Condition, Op};
use crate::ident;
use crate::value;
use mysql_async::Value;

/// A compiled where clause. `clause` is either empty or starts with
/// `where `; `params` aligns with the `?` placeholders in it.
#[derive(Clone, Debug, Default)]
pub(crate) struct CompiledWhere {
    pub clause: String,
    pub params: Vec<Value>,
}

/// Compile a top-level AND-list of conditions.
pub(crate) fn compile(conditions: &[Condition]) -> CompiledWhere {
    let mut compiler = Compiler::default();
    for condition in conditions {
        compiler.push(condition);
    }
    compiler.finish()
}

#[derive(Default)]
struct Compiler {
    fragments: Vec<String>,
    params: Vec<Value>,
}

impl Compiler {
    fn push(&mut self, condition: &Condition) {
        match condition {
            Condition::Raw(sql) => {
                let sql = sql.trim();
                if !sql.is_empty() {
                    self.fragments.push(sql.to_string());
                }
            }
            Condition::All(items) => {
                for item in items {
                    self.push(item);
                }
            }
            Condition::Clause(pairs) => {
                for (column, val) in pairs {
                    if value::is_empty(val) {
                        continue;
                    }
                    self.fragments
                        .push(format!("{} = ?", ident::column_name(column)));
                    self.params.push(val.clone());
                }
            }
            Condition::Named { columns, op } => self.push_named(columns, op),
        }
    }

    fn push_named(&mut self, columns: &[String], op: &Op) {
        if op.is_empty() {
            tracing::warn!(
                target: "myorm.sql",
                columns = ?columns,
                op = ?op,
                "skipping condition without a usable value"
            );
            return;
        }
        let mut parts = Vec::with_capacity(columns.len());
        for column in columns {
            let column = ident::column_name(column);
            match op {
                Op::Like(pattern) => {
                    parts.push(format!("{column} like ?"));
                    self.params.push(value::like_pattern(pattern));
                }
                Op::In(items) => {
                    let placeholders = vec!["?"; items.len()].join(",");
                    parts.push(format!("{column} in ({placeholders})"));
                    self.params.extend(items.iter().cloned());
                }
                Op::Eq(val) | Op::Ne(val) | Op::Gt(val) | Op::Gte(val) | Op::Lt(val)
                | Op::Lte(val) => {
                    parts.push(format!("{column} {} ?", op.comparator()));
                    self.params.push(val.clone());
                }
            }
        }
        match parts.len() {
            0 => {}
            1 => self.fragments.push(parts.remove(0)),
            _ => self.fragments.push(format!("({})", parts.join(" or "))),
        }
    }

    fn finish(self) -> CompiledWhere {
        let clause = if self.fragments.is_empty() {
            String::new()
        } else {
            format!("where {}", self.fragments.join(" and "))
        };
        CompiledWhere {
            clause,
            params: self.params,
        }
    }
}
