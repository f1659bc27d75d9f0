//! Markup escaping for user-provided text.

/// Escapes `&`, `<`, `>`, `"` and `'` as HTML entities.
///
/// `&` is handled in the same single pass, so already-escaped input is
/// escaped again rather than passed through.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for ch in unsafe_text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escapes_all_five_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#039;s&lt;/a&gt;"
        );
    }

    #[test]
    fn leaves_plain_text_untouched() {
        assert_eq!(escape_html("Buy milk 2%"), "Buy milk 2%");
    }

    #[test]
    fn escapes_existing_entities_again() {
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }
}
