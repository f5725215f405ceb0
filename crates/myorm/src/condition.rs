//! Condition primitives for dynamic where clauses.
//!
//! A [`Condition`] is an explicit tagged tree instead of a runtime-probed
//! string/object/array union: `Raw` carries a verbatim fragment, `Clause` is
//! the shorthand equality map, `Named` applies one [`Op`] to one or more
//! columns, and `All` ANDs sub-conditions together.

use crate::error::{OrmError, OrmResult};
use crate::value;
use mysql_async::Value;

/// Comparison operator carrying its right-hand value.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// `column = ?`
    Eq(Value),
    /// `column != ?`
    Ne(Value),
    /// `column > ?`
    Gt(Value),
    /// `column >= ?`
    Gte(Value),
    /// `column < ?`
    Lt(Value),
    /// `column <= ?`
    Lte(Value),
    /// `column like ?` with the value wrapped as `%value%` by the compiler.
    Like(Value),
    /// `column in (?,?,...)` with one placeholder per element.
    In(Vec<Value>),
}

impl Op {
    /// Create an equality operator.
    pub fn eq<T: Into<Value>>(value: T) -> Self {
        Op::Eq(value.into())
    }

    /// Create a not-equal operator.
    pub fn ne<T: Into<Value>>(value: T) -> Self {
        Op::Ne(value.into())
    }

    /// Create a greater-than operator.
    pub fn gt<T: Into<Value>>(value: T) -> Self {
        Op::Gt(value.into())
    }

    /// Create a greater-than-or-equal operator.
    pub fn gte<T: Into<Value>>(value: T) -> Self {
        Op::Gte(value.into())
    }

    /// Create a less-than operator.
    pub fn lt<T: Into<Value>>(value: T) -> Self {
        Op::Lt(value.into())
    }

    /// Create a less-than-or-equal operator.
    pub fn lte<T: Into<Value>>(value: T) -> Self {
        Op::Lte(value.into())
    }

    /// Create a like operator. The compiler owns the `%` wrapping.
    pub fn like<T: Into<Value>>(pattern: T) -> Self {
        Op::Like(pattern.into())
    }

    /// Create an in-list operator.
    pub fn in_list<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Self {
        Op::In(values.into_iter().map(Into::into).collect())
    }

    /// SQL comparator token.
    pub(crate) fn comparator(&self) -> &'static str {
        match self {
            Op::Eq(_) => "=",
            Op::Ne(_) => "!=",
            Op::Gt(_) => ">",
            Op::Gte(_) => ">=",
            Op::Lt(_) => "<",
            Op::Lte(_) => "<=",
            Op::Like(_) => "like",
            Op::In(_) => "in",
        }
    }

    /// Whether the carried value is absent under the omit-falsy rule.
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Op::In(items) => items.is_empty(),
            Op::Eq(v) | Op::Ne(v) | Op::Gt(v) | Op::Gte(v) | Op::Lt(v) | Op::Lte(v)
            | Op::Like(v) => value::is_empty(v),
        }
    }
}

/// A where-condition tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    /// Raw SQL fragment, passed through verbatim. The caller owns its safety.
    Raw(String),
    /// Shorthand equality map in insertion order: each key becomes
    /// `column = ?`; keys with empty values are skipped.
    Clause(Vec<(String, Value)>),
    /// One operator applied to one or more columns. Multiple columns are
    /// OR-joined and parenthesized, forming a single AND-fragment.
    Named { columns: Vec<String>, op: Op },
    /// All sub-conditions AND-ed together.
    All(Vec<Condition>),
}

impl Condition {
    /// Create a raw SQL condition.
    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::Raw(sql.into())
    }

    /// Create a shorthand equality clause from column/value pairs.
    pub fn clause<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Condition::Clause(
            pairs
                .into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }

    /// Create a named condition over a single column.
    pub fn named(column: impl Into<String>, op: Op) -> Self {
        Condition::Named {
            columns: vec![column.into()],
            op,
        }
    }

    /// Create a named condition OR-ed across several columns.
    pub fn named_any<I, S>(columns: I, op: Op) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::Named {
            columns: columns.into_iter().map(Into::into).collect(),
            op,
        }
    }

    /// Create an AND-list of conditions.
    pub fn all(items: Vec<Condition>) -> Self {
        Condition::All(items)
    }

    /// Parse the polymorphic JSON form of a condition.
    ///
    /// - a string is a raw fragment;
    /// - an array is an AND-list of recursively parsed items;
    /// - an object without `_mode` (or with `_mode: "base"`) is a shorthand
    ///   clause over its keys in document order;
    /// - any other `_mode` selects the named form with `name` (string or
    ///   array of strings), `operator` and `value` keys. An unrecognized or
    ///   absent operator means equality. A missing or null `value` yields a
    ///   condition the compiler skips; `operator: "in"` with a non-array
    ///   value is a caller error.
    pub fn from_json(input: &serde_json::Value) -> OrmResult<Self> {
        match input {
            serde_json::Value::String(sql) => Ok(Condition::Raw(sql.clone())),
            serde_json::Value::Array(items) => {
                let mut parsed = Vec::with_capacity(items.len());
                for item in items {
                    parsed.push(Condition::from_json(item)?);
                }
                Ok(Condition::All(parsed))
            }
            serde_json::Value::Object(map) => {
                let mode = map.get("_mode").and_then(|m| m.as_str()).unwrap_or("base");
                if mode == "base" {
                    Ok(Condition::Clause(
                        map.iter()
                            .filter(|(key, _)| key.as_str() != "_mode")
                            .map(|(key, val)| (key.clone(), json_to_value(val)))
                            .collect(),
                    ))
                } else {
                    Self::named_from_json(map)
                }
            }
            other => Err(OrmError::missing_condition_value(format!(
                "unsupported condition payload: {other}"
            ))),
        }
    }

    fn named_from_json(map: &serde_json::Map<String, serde_json::Value>) -> OrmResult<Self> {
        let columns: Vec<String> = match map.get("name") {
            Some(serde_json::Value::String(name)) => vec![name.clone()],
            Some(serde_json::Value::Array(names)) => names
                .iter()
                .filter_map(|name| name.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        };
        let val = map.get("value").cloned().unwrap_or(serde_json::Value::Null);
        let operator = map.get("operator").and_then(|o| o.as_str()).unwrap_or("");
        let op = match operator {
            "like" => Op::Like(json_to_value(&val)),
            "in" => match &val {
                serde_json::Value::Array(items) => Op::In(items.iter().map(json_to_value).collect()),
                // absent value: the compiler skips the whole condition
                serde_json::Value::Null => Op::In(Vec::new()),
                other => {
                    return Err(OrmError::missing_condition_value(format!(
                        "operator 'in' needs a sequence value, got: {other}"
                    )));
                }
            },
            "!=" | "ne" => Op::Ne(json_to_value(&val)),
            ">" | "gt" => Op::Gt(json_to_value(&val)),
            ">=" | "gte" => Op::Gte(json_to_value(&val)),
            "<" | "lt" => Op::Lt(json_to_value(&val)),
            "<=" | "lte" => Op::Lte(json_to_value(&val)),
            // anything else, equality
            _ => Op::Eq(json_to_value(&val)),
        };
        Ok(Condition::Named { columns, op })
    }
}

/// Map a JSON scalar onto a client value. Composite payloads are carried as
/// their JSON text.
fn json_to_value(input: &serde_json::Value) -> Value {
    match input {
        serde_json::Value::Null => Value::NULL,
        serde_json::Value::Bool(flag) => Value::from(*flag),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Value::from(int)
            } else if let Some(uint) = number.as_u64() {
                Value::from(uint)
            } else {
                Value::from(number.as_f64().unwrap_or_default())
            }
        }
        serde_json::Value::String(text) => Value::from(text.as_str()),
        other => Value::from(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_becomes_raw() {
        let cond = Condition::from_json(&json!("status > 0")).unwrap();
        assert_eq!(cond, Condition::Raw("status > 0".into()));
    }

    #[test]
    fn object_becomes_clause() {
        let cond = Condition::from_json(&json!({"id": 7, "nickName": "ya"})).unwrap();
        let Condition::Clause(pairs) = cond else {
            panic!("expected a clause");
        };
        assert_eq!(pairs.len(), 2);
        assert!(pairs.contains(&("id".to_string(), Value::from(7))));
        assert!(pairs.contains(&("nickName".to_string(), Value::from("ya"))));
    }

    #[test]
    fn mode_selects_named_form() {
        let cond = Condition::from_json(&json!({
            "_mode": "where",
            "name": "age",
            "operator": ">",
            "value": 18
        }))
        .unwrap();
        assert_eq!(
            cond,
            Condition::Named {
                columns: vec!["age".into()],
                op: Op::Gt(Value::from(18)),
            }
        );
    }

    #[test]
    fn name_array_spreads_columns() {
        let cond = Condition::from_json(&json!({
            "_mode": "where",
            "name": ["nickName", "email"],
            "operator": "like",
            "value": "ya"
        }))
        .unwrap();
        assert_eq!(
            cond,
            Condition::Named {
                columns: vec!["nickName".into(), "email".into()],
                op: Op::Like(Value::from("ya")),
            }
        );
    }

    #[test]
    fn unknown_operator_falls_back_to_equality() {
        let cond = Condition::from_json(&json!({
            "_mode": "where",
            "name": "id",
            "operator": "whatever",
            "value": 3
        }))
        .unwrap();
        assert_eq!(
            cond,
            Condition::Named {
                columns: vec!["id".into()],
                op: Op::Eq(Value::from(3)),
            }
        );
    }

    #[test]
    fn missing_value_is_skippable() {
        let cond = Condition::from_json(&json!({
            "_mode": "where",
            "name": "id",
            "operator": "="
        }))
        .unwrap();
        let Condition::Named { op, .. } = cond else {
            panic!("expected a named condition");
        };
        assert!(op.is_empty());
    }

    #[test]
    fn in_requires_a_sequence() {
        let err = Condition::from_json(&json!({
            "_mode": "where",
            "name": "id",
            "operator": "in",
            "value": 3
        }))
        .unwrap_err();
        assert_eq!(err.code(), "missing_condition_value");
    }

    #[test]
    fn array_becomes_and_list() {
        let cond = Condition::from_json(&json!([
            "status = 1",
            {"id": 7}
        ]))
        .unwrap();
        let Condition::All(items) = cond else {
            panic!("expected an AND list");
        };
        assert_eq!(items.len(), 2);
    }
}
