//! Turns inline markup into a sequence of uniformly formatted text runs.

use super::entities::decode_entities;
use super::markup::{attribute, tokenize, Tag, TokenKind};

/// A piece of text with uniform formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Inline code: monospace font on a background.
    pub code: bool,
    /// Target of the enclosing hyperlink, if any.
    pub link: Option<String>,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// The inline tags that change formatting.
#[derive(Debug, Clone, PartialEq)]
enum InlineTag {
    Bold,
    Italic,
    Code,
    Anchor { href: Option<String> },
    Unrecognized,
}

impl InlineTag {
    fn parse(tag: &Tag<'_>) -> Self {
        match tag.name.as_str() {
            "strong" | "b" => InlineTag::Bold,
            "em" | "i" => InlineTag::Italic,
            "code" => InlineTag::Code,
            "a" => InlineTag::Anchor {
                href: if tag.closing {
                    None
                } else {
                    attribute(tag.raw, "href").filter(|href| !href.is_empty())
                },
            },
            _ => InlineTag::Unrecognized,
        }
    }
}

#[derive(Debug, Default)]
struct InlineState {
    bold: bool,
    italic: bool,
    code: bool,
    link: Option<String>,
}

impl InlineState {
    fn apply(&mut self, tag: InlineTag, opening: bool) {
        match tag {
            InlineTag::Bold => self.bold = opening,
            InlineTag::Italic => self.italic = opening,
            InlineTag::Code => self.code = opening,
            // An anchor without href leaves the link inactive.
            InlineTag::Anchor { href } => self.link = if opening { href } else { None },
            InlineTag::Unrecognized => {}
        }
    }

    fn run(&self, raw_text: &str) -> TextRun {
        TextRun {
            text: decode_entities(raw_text),
            bold: self.bold,
            italic: self.italic,
            code: self.code,
            link: self.link.clone(),
        }
    }
}

/// Parses inline markup into runs, in source order.
///
/// Each text segment between two tags becomes one run carrying the formatting active at
/// that point. Closing tags reset their formatting even when unmatched. Entities are
/// decoded in the run text; empty segments produce no run.
pub fn format_inline(markup: &str) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut state = InlineState::default();
    let mut pending = String::new();

    for token in tokenize(markup) {
        match token.kind {
            TokenKind::Text(text) => pending.push_str(text),
            TokenKind::Tag(tag) => {
                if !pending.is_empty() {
                    runs.push(state.run(&pending));
                    pending.clear();
                }
                if !tag.self_closing {
                    state.apply(InlineTag::parse(&tag), !tag.closing);
                }
            }
        }
    }
    if !pending.is_empty() {
        runs.push(state.run(&pending));
    }
    runs
}
