//! Parser for `/label:value` command line tokens.

use crate::error::{ParameterError, Result};

/// Character every token must start with.
pub const PREFIX: char = '/';

/// Character separating the label from the value.
pub const SEPARATOR: char = ':';

/// A token split into its label and value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedToken<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

/// Split a raw token into label and value.
///
/// Separators directly after the prefix are skipped, then the text is split
/// at the next separator. The value may itself contain separators. Both
/// halves must be non-empty.
///
/// ```
/// use slashparam_core::token::parse_token;
///
/// let token = parse_token("/url:http://localhost").unwrap();
/// assert_eq!(token.label, "url");
/// assert_eq!(token.value, "http://localhost");
/// ```
pub fn parse_token(token: &str) -> Result<ParsedToken<'_>> {
    let stripped = token
        .strip_prefix(PREFIX)
        .ok_or_else(|| ParameterError::missing_slash(token))?;

    match stripped.trim_start_matches(SEPARATOR).split_once(SEPARATOR) {
        Some((label, value)) if !label.is_empty() && !value.is_empty() => {
            Ok(ParsedToken { label, value })
        }
        _ => Err(ParameterError::missing_separator(token)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(token: &str) -> Option<(&str, &str)> {
        parse_token(token).ok().map(|t| (t.label, t.value))
    }

    #[test]
    fn splits_label_and_value() {
        assert_eq!(split("/count:5"), Some(("count", "5")));
        assert_eq!(split("/name:foo bar"), Some(("name", "foo bar")));
    }

    #[test]
    fn value_keeps_later_separators() {
        assert_eq!(split("/time:12:30:00"), Some(("time", "12:30:00")));
        assert_eq!(split("/a::b"), Some(("a", ":b")));
    }

    #[test]
    fn leading_separators_are_skipped() {
        assert_eq!(split("/::a:b"), Some(("a", "b")));
    }

    #[test]
    fn missing_slash_is_a_format_error() {
        let err = parse_token("x:5").unwrap_err();
        match err {
            ParameterError::InvalidParameterFormat { reason, token } => {
                assert_eq!(reason, "Initial slash not found");
                assert_eq!(token, "x:5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn incomplete_tokens_are_format_errors() {
        for token in ["/", "/x", "/x:", "/:5", "/::", ""] {
            let err = parse_token(token).unwrap_err();
            assert!(
                matches!(err, ParameterError::InvalidParameterFormat { .. }),
                "token {token:?}"
            );
        }
    }
}
