//! Protects comment lines inside fenced code blocks from the document parser.
//!
//! The parser treats lines starting with `#` or `//` as section markers or
//! presentation comments and drops them, even inside code fences. Prefixing such lines
//! with an invisible zero-width non-joiner hides them from the parser; the marker is
//! removed again with [`strip_escape_markers`] before the code is rendered.

use log::debug;

/// Zero-width non-joiner inserted in front of protected lines.
pub const ESCAPE_MARKER: char = '\u{200C}';

const FENCE: &str = "```";

/// Prefixes that the parser would interpret at the start of a line.
/// `#` also covers `##` and `#!`.
const COMMENT_PREFIXES: [&str; 2] = ["#", "//"];

/// Escapes comment-introducing lines inside fenced code blocks, but only for
/// Markdown-flavoured sources (first non-blank line is a `# ` title).
/// Legacy-format sources are returned unchanged.
pub fn preprocess_source(src: &str) -> String {
    if !is_markdown_source(src) {
        debug!("Legacy source format detected, skipping comment escaping.");
        return src.to_string();
    }
    escape_fenced_comments(src)
}

/// Returns true when the source uses the Markdown flavour of the slide format.
pub fn is_markdown_source(src: &str) -> bool {
    src.lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|line| line.starts_with("# "))
}

/// Prepends [`ESCAPE_MARKER`] to every line inside a fenced code block that starts
/// (at column 0) with `#` or `//`.
///
/// Lines outside fences are never touched, and the number of lines is preserved.
pub fn escape_fenced_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + 16);
    let mut in_fence = false;

    for (index, line) in src.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }

        if is_fence_line(line) {
            in_fence = !in_fence;
            out.push_str(line);
            continue;
        }

        if in_fence && starts_with_comment(line) {
            out.push(ESCAPE_MARKER);
        }
        out.push_str(line);
    }

    out
}

/// Removes a leading [`ESCAPE_MARKER`] from every line. Inverse of
/// [`escape_fenced_comments`] for the lines it touched.
pub fn strip_escape_markers(text: &str) -> String {
    if !text.contains(ESCAPE_MARKER) {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| line.strip_prefix(ESCAPE_MARKER).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A fence is a line of three backticks, optionally followed by a language tag.
fn is_fence_line(line: &str) -> bool {
    let trimmed = line.trim();
    match trimmed.strip_prefix(FENCE) {
        Some(tag) => tag
            .trim_start()
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '+' | '-' | '_' | '#' | '.')),
        None => false,
    }
}

fn starts_with_comment(line: &str) -> bool {
    COMMENT_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const HEADER: &str = "# Title\n15 Feb 2026\n\nAuthor\n\n";

    fn md(body: &str) -> String {
        format!("{HEADER}{body}")
    }

    #[test]
    fn test_legacy_format_not_modified() {
        let input = "My Presentation\n```go\n// comment\npackage main\n```\n";
        assert_eq!(preprocess_source(input), input);
    }

    #[test]
    fn test_no_fences_is_noop() {
        let input = md("## Slide\n\n// This is a slide comment\n# not a title\n");
        assert_eq!(escape_fenced_comments(&input), input);
        assert_eq!(preprocess_source(&input), input);
    }

    #[test]
    fn test_slash_comment_inside_fence_escaped() {
        let input = md("## Slide\n\n```go\n// comment\npackage main\n```\n");
        let want = md("## Slide\n\n```go\n\u{200C}// comment\npackage main\n```\n");
        assert_eq!(preprocess_source(&input), want);
    }

    #[test]
    fn test_single_line_marker() {
        assert_eq!(
            escape_fenced_comments("```\n// note\n```"),
            "```\n\u{200C}// note\n```"
        );
    }

    #[test]
    fn test_multiple_comment_lines_in_one_block() {
        let input = md("## Slide\n\n```go\n// Package config\n// provides config.\npackage config\n```\n");
        let want = md(
            "## Slide\n\n```go\n\u{200C}// Package config\n\u{200C}// provides config.\npackage config\n```\n",
        );
        assert_eq!(preprocess_source(&input), want);
    }

    #[test]
    fn test_separate_blocks_each_escaped() {
        let input = md("## Slide 1\n\n```go\n// c1\n```\n\n## Slide 2\n\n```go\n// c2\n```\n");
        let want = md(
            "## Slide 1\n\n```go\n\u{200C}// c1\n```\n\n## Slide 2\n\n```go\n\u{200C}// c2\n```\n",
        );
        assert_eq!(preprocess_source(&input), want);
    }

    #[test]
    fn test_slide_comment_outside_vs_code_comment_inside() {
        let input = md("## Slide\n\n// slide comment\n```go\n// code comment\n```\n");
        let want = md("## Slide\n\n// slide comment\n```go\n\u{200C}// code comment\n```\n");
        assert_eq!(preprocess_source(&input), want);
    }

    #[test]
    fn test_fence_with_space_before_language() {
        let input = md("```  go\n// comment\n```\n// outside\n");
        let want = md("```  go\n\u{200C}// comment\n```\n// outside\n");
        assert_eq!(preprocess_source(&input), want);
    }

    #[test]
    fn test_block_comment_not_escaped() {
        let input = md("## Slide\n\n```go\n/* block comment */\npackage main\n```\n");
        assert_eq!(preprocess_source(&input), input);
    }

    #[test]
    fn test_hash_shebang_and_double_hash_inside_fence() {
        let input = md("```bash\n# shell comment\n#!/usr/bin/env bash\n## pragma\necho hi\n```\n");
        let want = md(
            "```bash\n\u{200C}# shell comment\n\u{200C}#!/usr/bin/env bash\n\u{200C}## pragma\necho hi\n```\n",
        );
        assert_eq!(preprocess_source(&input), want);
    }

    #[test]
    fn test_double_hash_outside_fence_untouched() {
        let input = "## heading\n```\n## heading\n```\n## heading";
        let want = "## heading\n```\n\u{200C}## heading\n```\n## heading";
        assert_eq!(escape_fenced_comments(input), want);
    }

    #[test]
    fn test_non_ascii_comment_and_dollar_line() {
        let input = md("```bash\n# Создание нового модуля\n$ go mod init example.com/m\n```\n");
        let want = md("```bash\n\u{200C}# Создание нового модуля\n$ go mod init example.com/m\n```\n");
        assert_eq!(preprocess_source(&input), want);
    }

    #[test]
    fn test_indented_comment_not_escaped() {
        let input = "```go\n    // indented\n```";
        assert_eq!(escape_fenced_comments(input), input);
    }

    #[test]
    fn test_line_count_preserved() {
        let input = md("```go\n// a\n\n// b\n```\n\ntrailing\n");
        let out = escape_fenced_comments(&input);
        assert_eq!(out.split('\n').count(), input.split('\n').count());
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(preprocess_source(""), "");
        assert_eq!(escape_fenced_comments(""), "");
    }

    #[test]
    fn test_strip_reverses_escape() {
        let input = md("## Slide\n\n```go\n// one\nx := 1 // trailing\n# two\n```\n// outside\n");
        let escaped = escape_fenced_comments(&input);
        assert_ne!(escaped, input);
        assert_eq!(strip_escape_markers(&escaped), input);
    }

    #[test]
    fn test_strip_without_markers_is_identity() {
        assert_eq!(strip_escape_markers("a\nb"), "a\nb");
    }
}
