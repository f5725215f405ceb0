//! Value helpers shared by the where compiler and the statement builders.
//!
//! Executed SQL is always fully parameterized; the literal rendering here
//! only feeds log lines and error details.

use mysql_async::Value;

/// The omit-falsy-filters predicate: `NULL` and empty strings count as
/// absent and produce neither a fragment nor a parameter.
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::NULL => true,
        Value::Bytes(bytes) => bytes.is_empty(),
        _ => false,
    }
}

/// Wrap a value's text as a `%value%` like pattern. Exactly one layer of
/// wildcards; the caller's text is embedded verbatim.
pub(crate) fn like_pattern(value: &Value) -> Value {
    Value::Bytes(format!("%{}%", text(value)).into_bytes())
}

/// Literal SQL rendering: strings quoted, numbers raw.
pub(crate) fn literal(value: &Value) -> String {
    value.as_sql(false)
}

/// Substitute literals into `?` placeholders for observability output.
/// Placeholders beyond the parameter list are left as-is.
pub(crate) fn render_inline(sql: &str, params: &[Value]) -> String {
    let mut out = String::with_capacity(sql.len() + params.len() * 8);
    let mut params = params.iter();
    for ch in sql.chars() {
        if ch == '?' {
            match params.next() {
                Some(value) => out.push_str(&literal(value)),
                None => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

fn text(value: &Value) -> String {
    match value {
        Value::Bytes(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        other => literal(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values() {
        assert!(is_empty(&Value::NULL));
        assert!(is_empty(&Value::from("")));
        assert!(!is_empty(&Value::from(0)));
        assert!(!is_empty(&Value::from("a")));
    }

    #[test]
    fn like_wraps_once() {
        assert_eq!(like_pattern(&Value::from("ya")), Value::from("%ya%"));
        assert_eq!(like_pattern(&Value::from(42)), Value::from("%42%"));
    }

    #[test]
    fn literals_quote_strings_only() {
        assert_eq!(literal(&Value::from("A")), "'A'");
        assert_eq!(literal(&Value::from(5)), "5");
        assert_eq!(literal(&Value::NULL), "NULL");
    }

    #[test]
    fn inline_rendering() {
        let sql = "select * from user where id = ? and name = ?";
        let rendered = render_inline(sql, &[Value::from(7), Value::from("A")]);
        assert_eq!(rendered, "select * from user where id = 7 and name = 'A'");
    }

    #[test]
    fn inline_rendering_with_short_params() {
        assert_eq!(render_inline("a = ? and b = ?", &[Value::from(1)]), "a = 1 and b = ?");
    }
}
