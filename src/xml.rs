use std::borrow::Cow;

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '<' | '>' | '"' | '\'') || !is_valid_xml_char(c)
}

/// Escapes text for use in SVG element content or attribute values.
///
/// Characters XML 1.0 cannot represent are dropped. Borrows when nothing
/// needs changing, which is the common case for node ids and color names.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if is_valid_xml_char(c) => escaped.push(c),
            _ => {}
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::escape_xml;
    use std::borrow::Cow;

    #[test]
    fn plain_identifiers_are_borrowed() {
        assert!(matches!(escape_xml("darkgreen"), Cow::Borrowed("darkgreen")));
        assert!(matches!(escape_xml("node 42"), Cow::Borrowed(_)));
    }

    #[test]
    fn control_chars_are_dropped_from_labels() {
        assert_eq!(escape_xml("A\u{0007}li\u{000C}ce"), "Alice");
        assert_eq!(escape_xml("tab\there"), "tab\there");
    }

    #[test]
    fn markup_in_labels_is_escaped() {
        assert_eq!(
            escape_xml(r#"<b class="x">Tom & 'Jerry'</b>"#),
            "&lt;b class=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/b&gt;"
        );
    }
}
