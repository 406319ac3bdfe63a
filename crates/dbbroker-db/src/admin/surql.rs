//! Helpers for embedding names and secrets in SurrealQL.
//!
//! `USE`, `DEFINE DATABASE` and `DEFINE USER` take identifiers, not
//! parameters, so names are validated and backtick-quoted here.

use dbbroker_core::error::AdminOperationError;

const MAX_IDENT_LEN: usize = 255;

/// Quote `name` as a SurrealQL identifier.
pub(crate) fn ident(name: &str) -> Result<String, AdminOperationError> {
    if name.is_empty() {
        return Err(AdminOperationError::new("identifier must not be empty"));
    }
    if name.len() > MAX_IDENT_LEN {
        return Err(AdminOperationError::new(format!(
            "identifier longer than {MAX_IDENT_LEN} bytes"
        )));
    }
    if name.chars().any(|c| c == '`' || c == '\\' || c.is_control()) {
        return Err(AdminOperationError::new(format!(
            "identifier {name:?} contains forbidden characters"
        )));
    }
    Ok(format!("`{name}`"))
}

/// Quote `value` as a single-quoted SurrealQL string literal.
pub(crate) fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenated_names_are_quoted() {
        assert_eq!(ident("id-1").unwrap(), "`id-1`");
    }

    #[test]
    fn rejects_backticks_and_empty() {
        assert!(ident("").is_err());
        assert!(ident("a`; REMOVE NAMESPACE x; `").is_err());
        assert!(ident("line\nbreak").is_err());
    }

    #[test]
    fn rejects_overlong_names() {
        assert!(ident(&"a".repeat(MAX_IDENT_LEN + 1)).is_err());
        assert!(ident(&"a".repeat(MAX_IDENT_LEN)).is_ok());
    }

    #[test]
    fn literals_escape_quotes() {
        assert_eq!(string_literal("plain"), "'plain'");
        assert_eq!(string_literal("it's"), "'it\\'s'");
        assert_eq!(string_literal("a\\b"), "'a\\\\b'");
    }
}
