//! Syntax highlighting of code blocks.
//!
//! Code is tokenized with `syntect`. Token colours come from the configured syntect theme
//! where it sets an explicit foreground for the token's scope, and from a fixed table per
//! token category otherwise.

use log::debug;
use syntect::easy::ScopeRangeIterator;
use syntect::highlighting::{Highlighter, Theme as SyntectTheme, ThemeSet};
use syntect::parsing::{ParseState, Scope, ScopeStack, SyntaxSet};
use syntect::util::LinesWithEndings;
use thiserror::Error;

use crate::errors::{ConversionError, Result};
use crate::models::colors::Rgb;

/// Colour of tokens without an explicit theme colour or known category.
pub const DEFAULT_TOKEN_COLOR: Rgb = Rgb::new(171, 178, 191);

/// A highlighted fragment of code. May contain newlines until split into lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorToken {
    pub text: String,
    pub color: Rgb,
}

impl ColorToken {
    pub fn new(text: impl Into<String>, color: Rgb) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}

/// One rendered line of code. Its tokens never contain newlines.
pub type CodeLine = Vec<ColorToken>;

/// Coarse token classes used for the fallback colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCategory {
    Keyword,
    String,
    Comment,
    Name,
    Number,
    Operator,
    Builtin,
}

impl TokenCategory {
    /// Classifies a scope by its dotted prefix.
    pub fn from_scope(scope: &str) -> Option<Self> {
        let category = if scope.starts_with("comment") {
            TokenCategory::Comment
        } else if scope.starts_with("string") {
            TokenCategory::String
        } else if scope.starts_with("constant.numeric") {
            TokenCategory::Number
        } else if scope.starts_with("keyword.operator") {
            TokenCategory::Operator
        } else if scope.starts_with("keyword") || scope.starts_with("storage") {
            TokenCategory::Keyword
        } else if scope.starts_with("support")
            || scope.starts_with("entity.name.type")
            || scope.starts_with("entity.name.class")
        {
            TokenCategory::Builtin
        } else if scope.starts_with("entity.name") || scope.starts_with("variable") {
            TokenCategory::Name
        } else {
            return None;
        };
        Some(category)
    }

    pub fn fallback_color(self) -> Rgb {
        match self {
            TokenCategory::Keyword => Rgb::new(198, 120, 221),
            TokenCategory::String => Rgb::new(152, 195, 121),
            TokenCategory::Comment => Rgb::new(92, 99, 112),
            TokenCategory::Name => Rgb::new(97, 175, 239),
            TokenCategory::Number => Rgb::new(209, 154, 102),
            TokenCategory::Operator => Rgb::new(198, 120, 221),
            TokenCategory::Builtin => Rgb::new(229, 192, 123),
        }
    }
}

/// Raised when the tokenizer fails on its input. Callers fall back to plain rendering.
#[derive(Error, Debug)]
pub enum HighlightError {
    #[error("Failed to tokenize code: {0}")]
    Parsing(#[from] syntect::parsing::ParsingError),

    #[error("Invalid scope stack operation: {0}")]
    Scope(#[from] syntect::parsing::ScopeError),
}

/// Tokenizes code and assigns token colours.
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme: SyntectTheme,
}

impl std::fmt::Debug for CodeHighlighter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodeHighlighter")
            .field("theme", &self.theme.name)
            .finish()
    }
}

impl CodeHighlighter {
    /// Loads the bundled syntaxes and the named bundled theme.
    pub fn new(theme_name: &str) -> Result<Self> {
        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(theme_name)
            .ok_or_else(|| ConversionError::UnknownCodeTheme(theme_name.to_string()))?;
        Ok(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    /// Tokenizes `code` written in `language` (a language name or file extension).
    ///
    /// Unknown languages are tokenized as plain text, which yields a single
    /// default-coloured token per line.
    pub fn highlight(
        &self,
        code: &str,
        language: &str,
    ) -> std::result::Result<Vec<ColorToken>, HighlightError> {
        let syntax = self
            .syntax_set
            .find_syntax_by_token(language)
            .unwrap_or_else(|| {
                debug!("No syntax for language '{}', using plain text.", language);
                self.syntax_set.find_syntax_plain_text()
            });

        let highlighter = Highlighter::new(&self.theme);
        let mut parse_state = ParseState::new(syntax);
        let mut stack = ScopeStack::new();
        let mut tokens = Vec::new();

        for line in LinesWithEndings::from(code) {
            let ops = parse_state.parse_line(line, &self.syntax_set)?;
            for (range, op) in ScopeRangeIterator::new(&ops, line) {
                stack.apply(op)?;
                if range.is_empty() {
                    continue;
                }
                let color = token_color(&highlighter, stack.as_slice());
                tokens.push(ColorToken::new(&line[range], color));
            }
        }
        Ok(tokens)
    }
}

fn token_color(highlighter: &Highlighter<'_>, scopes: &[Scope]) -> Rgb {
    if let Some(color) = highlighter.style_mod_for_stack(scopes).foreground {
        return Rgb::new(color.r, color.g, color.b);
    }
    scopes
        .iter()
        .rev()
        .find_map(|scope| TokenCategory::from_scope(&scope.build_string()))
        .map_or(DEFAULT_TOKEN_COLOR, TokenCategory::fallback_color)
}

/// Names of the bundled syntax themes, sorted.
pub fn available_code_themes() -> Vec<String> {
    ThemeSet::load_defaults().themes.into_keys().collect()
}

/// Splits a token stream into lines.
///
/// Every newline closes the current line, even an empty one. Empty text segments produce
/// no token. An empty stream yields no lines; otherwise `n` newlines yield `n + 1` lines.
pub fn split_into_lines(tokens: &[ColorToken]) -> Vec<CodeLine> {
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut lines = Vec::new();
    let mut current: CodeLine = Vec::new();
    for token in tokens {
        for (index, part) in token.text.split('\n').enumerate() {
            if index > 0 {
                lines.push(std::mem::take(&mut current));
            }
            if !part.is_empty() {
                current.push(ColorToken::new(part, token.color));
            }
        }
    }
    lines.push(current);
    lines
}

/// Lines of `code` in a single colour, for rendering without highlighting.
pub fn plain_lines(code: &str, color: Rgb) -> Vec<CodeLine> {
    code.split('\n')
        .map(|line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![ColorToken::new(line, color)]
            }
        })
        .collect()
}

/// Replaces tabs with spaces up to the next multiple of `tab_width` columns.
/// Columns restart after every newline.
pub fn expand_tabs(code: &str, tab_width: usize) -> String {
    if !code.contains('\t') {
        return code.to_string();
    }
    let mut out = String::with_capacity(code.len() + 16);
    let mut column = 0;
    for c in code.chars() {
        match c {
            '\t' => {
                let spaces = tab_width - column % tab_width;
                out.extend(std::iter::repeat(' ').take(spaces));
                column += spaces;
            }
            '\n' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Maps a file name to a language name by its extension.
pub fn detect_language(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    let language = match extension {
        "go" => "go",
        "py" => "python",
        "js" => "javascript",
        "ts" => "typescript",
        "java" => "java",
        "c" => "c",
        "cpp" | "cc" | "cxx" => "cpp",
        "rs" => "rust",
        "rb" => "ruby",
        "php" => "php",
        "sh" | "bash" => "bash",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "xml" => "xml",
        "yaml" | "yml" => "yaml",
        "sql" => "sql",
        _ => return None,
    };
    Some(language)
}

/// Finds the first fenced code block in `content`.
///
/// Returns the language tag (empty when absent) and the trimmed code, or `None` when
/// there is no complete fence.
pub fn extract_fenced_code(content: &str) -> Option<(&str, &str)> {
    const FENCE: &str = "```";

    let open = content.find(FENCE)?;
    let after_fence = &content[open + FENCE.len()..];
    let language_len = after_fence
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(after_fence.len());
    let language = &after_fence[..language_len];

    // Only whitespace may follow the language tag, up to and including a newline.
    let rest = &after_fence[language_len..];
    let header_len = rest.len() - rest.trim_start().len();
    let header = &rest[..header_len];
    let newline = header.rfind('\n')?;
    let body = &rest[newline + 1..];

    let close = body.find(FENCE)?;
    Some((language, body[..close].trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::layout::constants::DEFAULT_CODE_THEME;
    use pretty_assertions::assert_eq;

    fn highlighter() -> CodeHighlighter {
        CodeHighlighter::new(DEFAULT_CODE_THEME).expect("default theme exists")
    }

    fn token(text: &str) -> ColorToken {
        ColorToken::new(text, DEFAULT_TOKEN_COLOR)
    }

    #[test]
    fn test_split_empty_stream_has_no_lines() {
        assert!(split_into_lines(&[]).is_empty());
    }

    #[test]
    fn test_split_counts_newlines() {
        let tokens = vec![token("a\nb"), token("\n"), token("c\n")];
        let lines = split_into_lines(&tokens);
        // Three newlines, four lines; the last one empty.
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], vec![token("a")]);
        assert_eq!(lines[1], vec![token("b")]);
        assert_eq!(lines[2], vec![token("c")]);
        assert!(lines[3].is_empty());
    }

    #[test]
    fn test_split_keeps_all_text() {
        let tokens = vec![token("func "), token("main"), token("() {\n\tx := 1\n}")];
        let lines = split_into_lines(&tokens);
        let joined: Vec<String> = lines
            .iter()
            .map(|line| line.iter().map(|t| t.text.as_str()).collect())
            .collect();
        assert_eq!(joined.join("\n"), "func main() {\n\tx := 1\n}");
        assert!(lines.iter().flatten().all(|t| !t.text.contains('\n')));
    }

    #[test]
    fn test_fallback_colors() {
        assert_eq!(TokenCategory::Keyword.fallback_color(), Rgb::new(198, 120, 221));
        assert_eq!(TokenCategory::Builtin.fallback_color(), Rgb::new(229, 192, 123));
        assert_eq!(
            TokenCategory::from_scope("keyword.operator.assignment.go"),
            Some(TokenCategory::Operator)
        );
        assert_eq!(
            TokenCategory::from_scope("storage.type.go"),
            Some(TokenCategory::Keyword)
        );
        assert_eq!(
            TokenCategory::from_scope("comment.line.double-slash.go"),
            Some(TokenCategory::Comment)
        );
        assert_eq!(TokenCategory::from_scope("source.go"), None);
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let code = "some words\nmore words";
        let tokens = highlighter().highlight(code, "klingon").expect("plain text never fails");
        let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(text, code);
        assert_eq!(split_into_lines(&tokens).len(), 2);
    }

    #[test]
    fn test_go_code_is_colored() {
        let code = "// Comment\npackage main\n\nfunc main() {}";
        let tokens = highlighter().highlight(code, "go").expect("go highlights");
        let text: String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(text, code);

        let lines = split_into_lines(&tokens);
        assert_eq!(lines.len(), 4);
        let colors: std::collections::HashSet<Rgb> =
            lines.iter().flatten().map(|t| t.color).collect();
        assert!(colors.len() > 1, "expected several token colours");
    }

    #[test]
    fn test_unknown_code_theme_is_an_error() {
        assert!(matches!(
            CodeHighlighter::new("no-such-theme"),
            Err(ConversionError::UnknownCodeTheme(_))
        ));
        let themes = available_code_themes();
        assert!(themes.contains(&DEFAULT_CODE_THEME.to_string()));
        assert!(themes.contains(&"InspiredGitHub".to_string()));
    }

    #[test]
    fn test_plain_lines() {
        let color = Rgb::new(1, 2, 3);
        let lines = plain_lines("a\n\nb", color);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_empty());
        assert_eq!(lines[2], vec![ColorToken::new("b", color)]);
    }

    #[test]
    fn test_expand_tabs_to_next_stop() {
        assert_eq!(expand_tabs("\tx := 1", 4), "    x := 1");
        assert_eq!(expand_tabs("ab\tc", 4), "ab  c");
        assert_eq!(expand_tabs("\t\tx\n\ty", 4), "        x\n    y");
        assert_eq!(expand_tabs("no tabs", 4), "no tabs");
    }

    #[test]
    fn test_detect_language() {
        assert_eq!(detect_language("main.go"), Some("go"));
        assert_eq!(detect_language("script.py"), Some("python"));
        assert_eq!(detect_language("lib.cc"), Some("cpp"));
        assert_eq!(detect_language("config.yml"), Some("yaml"));
        assert_eq!(detect_language("archive.tar.rs"), Some("rust"));
        assert_eq!(detect_language("Makefile"), None);
        assert_eq!(detect_language("notes.txt"), None);
    }

    #[test]
    fn test_extract_fenced_code() {
        let content = "```python\nprint('hi')\n```";
        assert_eq!(extract_fenced_code(content), Some(("python", "print('hi')")));

        let content = "Intro\n```\n  x := 1\n```\ntrailing";
        assert_eq!(extract_fenced_code(content), Some(("", "x := 1")));

        assert_eq!(extract_fenced_code("```go\nunterminated"), None);
        assert_eq!(extract_fenced_code("```go code```"), None);
    }
}
