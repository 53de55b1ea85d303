//! HTML escaping.

use std::borrow::Cow;

/// Characters that must be escaped inside a double-quoted attribute.
const ATTR_CHARS: [char; 4] = ['<', '>', '&', '"'];

#[inline]
fn entity(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        _ => None,
    }
}

/// Escape a value for a double-quoted HTML attribute.
///
/// Borrows when nothing needs escaping.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ATTR_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match entity(c) {
            Some(e) => result.push_str(e),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr_borrows_plain() {
        assert!(matches!(escape_attr("image-caption"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a"b"#), "a&quot;b");
        assert_eq!(escape_attr("x<y>&z"), "x&lt;y&gt;&amp;z");
        assert_eq!(escape_attr("it's"), "it's");
    }
}
