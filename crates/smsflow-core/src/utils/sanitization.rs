/// HTML escaping and tag stripping for email bodies
use regex::Regex;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Escapes text for safe inclusion in HTML element content and attributes
///
/// # Examples
/// ```
/// use smsflow_core::utils::sanitization::escape_html;
///
/// assert_eq!(escape_html("<b>&\"'</b>"), "&lt;b&gt;&amp;&quot;&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Produces the plain-text fallback of an HTML body.
///
/// `<br>` and block ends become newlines, other tags are dropped, and the
/// entities produced by [`escape_html`] are decoded again.
pub fn strip_tags(html: &str) -> String {
    let with_breaks = html
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("</p>", "\n")
        .replace("</div>", "\n");

    TAG_PATTERN
        .replace_all(&with_breaks, "")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('xss')</script>"),
            "&lt;script&gt;alert(&#39;xss&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello</p><p>World</p>"), "Hello\nWorld\n");
        assert_eq!(strip_tags("a<br>b"), "a\nb");
        assert_eq!(
            strip_tags(r#"<img src="data:image/png;base64,AAAA" style="max-width: 600px">"#),
            ""
        );
    }

    #[test]
    fn test_strip_tags_decodes_escaped_text() {
        let html = format!("<p>{}</p>", escape_html("5 < 6 & \"quoted\""));
        assert_eq!(strip_tags(&html), "5 < 6 & \"quoted\"\n");
    }

    #[test]
    fn test_decode_order_keeps_literal_entities() {
        // "&lt;" typed by the sender must survive the round trip
        let html = escape_html("&lt;");
        assert_eq!(strip_tags(&html), "&lt;");
    }
}
