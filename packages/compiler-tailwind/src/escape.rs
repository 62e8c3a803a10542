//! Arbitrary-value escaping.
//!
//! Values flow from property panels and persisted JSON into utility-class
//! tokens, so they have to survive whitespace, commas and the bracket
//! syntax itself.

/// Escape a raw declaration value for embedding in an arbitrary-value token.
///
/// Whitespace runs collapse to single spaces, literal brackets are
/// stripped, and whitespace right after a comma is compressed so values
/// like `var(--x, #fff)` stay unquoted. Anything still containing
/// whitespace or quotes is wrapped in single quotes.
pub fn escape_arbitrary_value(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    if is_custom_property_reference(&collapsed) {
        return collapsed;
    }

    let stripped: String = collapsed
        .chars()
        .filter(|character| *character != '[' && *character != ']')
        .collect();
    let compressed = compress_after_commas(&stripped);

    if compressed
        .chars()
        .any(|character| character.is_whitespace() || character == '\'' || character == '"')
    {
        format!("'{}'", compressed.replace('\'', "\\'"))
    } else {
        compressed
    }
}

/// Whether `value` is exactly a `var(--name)` reference, with no fallback.
pub fn is_custom_property_reference(value: &str) -> bool {
    let inner = match value
        .strip_prefix("var(--")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(inner) => inner,
        None => return false,
    };
    !inner.is_empty()
        && inner
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '-' || character == '_')
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn compress_after_commas(value: &str) -> String {
    let mut compressed = String::with_capacity(value.len());
    let mut after_comma = false;
    for character in value.chars() {
        if after_comma && character == ' ' {
            continue;
        }
        after_comma = character == ',';
        compressed.push(character);
    }
    compressed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_values_pass_through() {
        assert_eq!(escape_arbitrary_value("16px"), "16px");
        assert_eq!(escape_arbitrary_value("#ff0000"), "#ff0000");
    }

    #[test]
    fn test_custom_property_reference_unquoted() {
        assert_eq!(escape_arbitrary_value("var(--accent)"), "var(--accent)");
        assert!(is_custom_property_reference("var(--accent-2)"));
        assert!(!is_custom_property_reference("var(--x, #fff)"));
        assert!(!is_custom_property_reference("calc(var(--x))"));
    }

    #[test]
    fn test_var_fallback_stays_unquoted_via_comma_compression() {
        assert_eq!(escape_arbitrary_value("var(--x, #fff)"), "var(--x,#fff)");
        assert_eq!(
            escape_arbitrary_value("rgba(0, 0, 0, 0.1)"),
            "rgba(0,0,0,0.1)"
        );
    }

    #[test]
    fn test_whitespace_collapses_then_quotes() {
        assert_eq!(
            escape_arbitrary_value("center   center"),
            "'center center'"
        );
        assert_eq!(
            escape_arbitrary_value("0 2px\n 4px rgba(0, 0, 0, 0.1)"),
            "'0 2px 4px rgba(0,0,0,0.1)'"
        );
    }

    #[test]
    fn test_brackets_are_stripped() {
        assert_eq!(escape_arbitrary_value("mina[x]mal"), "minaxmal");
    }

    #[test]
    fn test_embedded_quotes_are_escaped() {
        assert_eq!(escape_arbitrary_value("'Inter'"), "'\\'Inter\\''");
    }
}
