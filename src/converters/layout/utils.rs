//! Utility functions for SVG output: escaping and number formatting.

/// Escapes special XML characters (`&`, `<`, `>`) for use in SVG text content.
pub fn escape_svg_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes text for use inside a double-quoted SVG attribute value.
pub fn escape_svg_attr(value: &str) -> String {
    escape_svg_text(value)
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Formats a coordinate with at most two decimals, dropping trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "" | "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_svg_text() {
        assert_eq!(escape_svg_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
    }

    #[test]
    fn test_escape_svg_attr_quotes() {
        assert_eq!(
            escape_svg_attr(r#"https://x.dev/?q="a"&b='c'"#),
            "https://x.dev/?q=&quot;a&quot;&amp;b=&#39;c&#39;"
        );
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(20.0), "20");
        assert_eq!(fmt_num(20.5), "20.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.33");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(0.0), "0");
    }
}
