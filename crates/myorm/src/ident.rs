//! Identifier case handling.
//!
//! Callers speak camelCase; SQL speaks snake_case. Write columns are
//! additionally backquoted so reserved words survive as column names.

use heck::{ToLowerCamelCase, ToSnakeCase};

/// Convert a caller-facing camelCase column reference to its snake_case SQL
/// form. Dotted qualifiers (`u.firstName`) convert per segment.
pub(crate) fn column_name(name: &str) -> String {
    if name.contains('.') {
        name.split('.')
            .map(|part| part.to_snake_case())
            .collect::<Vec<_>>()
            .join(".")
    } else {
        name.to_snake_case()
    }
}

/// Backquoted snake_case column for insert/update column lists.
pub(crate) fn write_column(name: &str) -> String {
    format!("`{}`", column_name(name))
}

/// Convert a database column name back to the camelCase key callers see.
pub(crate) fn row_key(name: &str) -> String {
    name.to_lower_camel_case()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_to_snake() {
        assert_eq!(column_name("firstName"), "first_name");
        assert_eq!(column_name("id"), "id");
        assert_eq!(column_name("lastCall"), "last_call");
    }

    #[test]
    fn dotted_names_convert_per_segment() {
        assert_eq!(column_name("u.firstName"), "u.first_name");
        assert_eq!(column_name("user.id"), "user.id");
    }

    #[test]
    fn write_columns_are_backquoted() {
        assert_eq!(write_column("firstName"), "`first_name`");
    }

    #[test]
    fn snake_to_camel() {
        assert_eq!(row_key("last_call"), "lastCall");
        assert_eq!(row_key("id"), "id");
    }
}
