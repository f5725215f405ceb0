//! Row mapping: result rows keyed by camelCase column names.

use crate::error::{OrmError, OrmResult};
use crate::ident;
use mysql_async::prelude::FromValue;
use mysql_async::{Row, Value, from_value_opt};

/// One result row with its column keys rewritten from the database's
/// snake_case to camelCase, in the order the server returned them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    pub(crate) fn from_row(row: Row) -> Self {
        let columns = row.columns();
        let values = row.unwrap();
        let entries = columns
            .iter()
            .zip(values)
            .map(|(column, value)| (ident::row_key(&column.name_str()), value))
            .collect();
        Self { entries }
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Column keys in result order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Raw value for a column, if present.
    pub fn value(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(entry_key, _)| entry_key == key)
            .map(|(_, value)| value)
    }

    /// Decode a column into a concrete type.
    pub fn get<T: FromValue>(&self, key: &str) -> OrmResult<T> {
        let value = self
            .value(key)
            .ok_or_else(|| OrmError::decode(key, "column missing from result"))?;
        from_value_opt(value.clone()).map_err(|err| OrmError::decode(key, err.to_string()))
    }

    /// Decode a nullable column; NULL (or a missing column) becomes `None`.
    pub fn get_opt<T: FromValue>(&self, key: &str) -> OrmResult<Option<T>> {
        match self.value(key) {
            None | Some(Value::NULL) => Ok(None),
            Some(value) => from_value_opt(value.clone())
                .map(Some)
                .map_err(|err| OrmError::decode(key, err.to_string())),
        }
    }

    /// Render the row as a JSON object, e.g. for handing rows straight to an
    /// API response.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            map.insert(key.clone(), value_to_json(value));
        }
        serde_json::Value::Object(map)
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::NULL => serde_json::Value::Null,
        Value::Bytes(bytes) => {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }
        Value::Int(int) => serde_json::Value::from(*int),
        Value::UInt(uint) => serde_json::Value::from(*uint),
        Value::Float(float) => serde_json::Value::from(*float),
        Value::Double(double) => serde_json::Value::from(*double),
        other => serde_json::Value::String(crate::value::literal(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Record {
        Record::from_entries(vec![
            ("id".into(), Value::from(7)),
            ("nickName".into(), Value::from("ya")),
            ("deletedAt".into(), Value::NULL),
        ])
    }

    #[test]
    fn typed_getters() {
        let record = sample();
        assert_eq!(record.get::<i64>("id").unwrap(), 7);
        assert_eq!(record.get::<String>("nickName").unwrap(), "ya");
        assert_eq!(record.get_opt::<String>("deletedAt").unwrap(), None);
        assert_eq!(record.get_opt::<i64>("id").unwrap(), Some(7));
    }

    #[test]
    fn missing_column_names_the_column() {
        let err = sample().get::<i64>("missing").unwrap_err();
        assert_eq!(err.code(), "decode");
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn wrong_type_is_a_decode_error() {
        let err = sample().get::<i64>("nickName").unwrap_err();
        assert_eq!(err.code(), "decode");
    }

    #[test]
    fn json_rendering() {
        assert_eq!(
            sample().to_json(),
            json!({"id": 7, "nickName": "ya", "deletedAt": null})
        );
    }
}
