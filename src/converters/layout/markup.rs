//! Splits raw markup fragments into the block types the layout knows how to render.
//!
//! Only a fixed subset of tags is understood: `<p>`, `<ul>`/`<ol>`/`<li>`,
//! `<pre><code>`, `<blockquote>` and `<img>`. Fragments are scanned with a small
//! tokenizer; block boundaries are found by matching open and close tags of the same name.

use log::debug;

use super::entities::decode_entities;
use crate::preprocess::strip_escape_markers;

/// A tag as it appears in the fragment.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tag<'a> {
    /// Lowercased tag name, without the `/` of closing tags.
    pub name: String,
    pub closing: bool,
    pub self_closing: bool,
    /// The complete tag text including the angle brackets.
    pub raw: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind<'a> {
    Text(&'a str),
    Tag(Tag<'a>),
}

/// A token together with its byte span in the source fragment.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub start: usize,
    pub end: usize,
}

impl<'a> Token<'a> {
    fn tag(&self) -> Option<&Tag<'a>> {
        match &self.kind {
            TokenKind::Tag(tag) => Some(tag),
            TokenKind::Text(_) => None,
        }
    }
}

/// A renderable block extracted from a markup fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Inline markup of a `<p>` element.
    Paragraph(String),
    /// Inline markup of each `<li>`.
    List { ordered: bool, items: Vec<String> },
    /// Decoded code text and the language from a `language-xxx` class, if any.
    Code {
        language: Option<String>,
        code: String,
    },
    /// Inline markup of each paragraph of the quote.
    Blockquote(Vec<String>),
    Image { src: String },
    /// Plain text of a fragment without any block tags.
    Text(String),
}

/// Breaks `src` into text and tag tokens. A `<` that does not start a well-formed tag
/// is kept as text.
pub(crate) fn tokenize(src: &str) -> Vec<Token<'_>> {
    let mut tokens: Vec<Token<'_>> = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(offset) = src[pos..].find('<') {
        let open = pos + offset;
        let Some(tag) = parse_tag_at(src, open) else {
            pos = open + 1;
            continue;
        };
        if open > text_start {
            tokens.push(Token {
                kind: TokenKind::Text(&src[text_start..open]),
                start: text_start,
                end: open,
            });
        }
        let end = open + tag.raw.len();
        tokens.push(Token {
            kind: TokenKind::Tag(tag),
            start: open,
            end,
        });
        text_start = end;
        pos = end;
    }

    if text_start < src.len() {
        tokens.push(Token {
            kind: TokenKind::Text(&src[text_start..]),
            start: text_start,
            end: src.len(),
        });
    }
    tokens
}

fn parse_tag_at(src: &str, open: usize) -> Option<Tag<'_>> {
    let close = open + src[open..].find('>')?;
    let raw = &src[open..=close];
    let inner = &raw[1..raw.len() - 1];

    let (closing, body) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name: String = body
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    // The name must end at whitespace, `/` or the end of the tag.
    match body[name.len()..].chars().next() {
        None | Some('/') => {}
        Some(c) if c.is_whitespace() => {}
        Some(_) => return None,
    }

    Some(Tag {
        name: name.to_ascii_lowercase(),
        closing,
        self_closing: body.trim_end().ends_with('/'),
        raw,
    })
}

/// Extracts the value of a quoted attribute from a raw tag, case-insensitively.
pub(crate) fn attribute(raw_tag: &str, name: &str) -> Option<String> {
    let lower = raw_tag.to_ascii_lowercase();
    let needle = format!("{}=", name.to_ascii_lowercase());
    let mut search_from = 0;

    while let Some(offset) = lower[search_from..].find(&needle) {
        let at = search_from + offset;
        search_from = at + needle.len();

        let preceded_by_space = lower[..at]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if !preceded_by_space {
            continue;
        }

        let value_start = at + needle.len();
        let quote = raw_tag[value_start..].chars().next()?;
        if quote != '"' && quote != '\'' {
            continue;
        }
        let rest = &raw_tag[value_start + 1..];
        let value_end = rest.find(quote)?;
        return Some(decode_entities(&rest[..value_end]));
    }
    None
}

/// Index of the tag closing the element opened at `open`, counting nested elements of
/// the same name.
fn find_matching_close(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let name = &tokens[open].tag()?.name;
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        let Some(tag) = token.tag() else { continue };
        if &tag.name != name || tag.self_closing {
            continue;
        }
        if tag.closing {
            depth = depth.saturating_sub(1);
            if depth == 0 {
                return Some(index);
            }
        } else {
            depth += 1;
        }
    }
    None
}

/// Inner markup of every top-level `<name>` element in `fragment`.
fn elements_named<'a>(fragment: &'a str, name: &str) -> Vec<&'a str> {
    let tokens = tokenize(fragment);
    let mut found = Vec::new();
    let mut index = 0;
    while index < tokens.len() {
        let is_open = tokens[index]
            .tag()
            .is_some_and(|tag| tag.name == name && !tag.closing && !tag.self_closing);
        if is_open {
            if let Some(close) = find_matching_close(&tokens, index) {
                found.push(fragment[tokens[index].end..tokens[close].start].trim());
                index = close + 1;
                continue;
            }
        }
        index += 1;
    }
    found
}

/// Splits a markup fragment into blocks, in source order.
///
/// Elements without a matching close tag, and elements whose content does not have the
/// expected shape, are skipped. A fragment with no block element at all yields a single
/// [`Block::Text`] with its tags stripped (or nothing if that text is empty).
pub fn split_blocks(fragment: &str) -> Vec<Block> {
    let tokens = tokenize(fragment);
    let mut blocks = Vec::new();
    let mut saw_block_tag = false;
    let mut index = 0;

    while index < tokens.len() {
        let Some(tag) = tokens[index].tag().filter(|tag| !tag.closing) else {
            index += 1;
            continue;
        };

        match tag.name.as_str() {
            "img" => {
                saw_block_tag = true;
                match attribute(tag.raw, "src") {
                    Some(src) => blocks.push(Block::Image { src }),
                    None => debug!("Skipping <img> without src: {}", tag.raw),
                }
            }
            "p" | "ul" | "ol" | "pre" | "blockquote" => {
                saw_block_tag = true;
                match find_matching_close(&tokens, index) {
                    Some(close) => {
                        let inner = &fragment[tokens[index].end..tokens[close].start];
                        if let Some(block) = build_block(&tag.name, tag.raw, inner) {
                            blocks.push(block);
                        }
                        index = close + 1;
                        continue;
                    }
                    None => debug!("Skipping unterminated <{}> element", tag.name),
                }
            }
            _ => {}
        }
        index += 1;
    }

    if blocks.is_empty() && !saw_block_tag {
        let text = strip_tags(fragment);
        let text = text.trim();
        if !text.is_empty() {
            blocks.push(Block::Text(text.to_string()));
        }
    }
    blocks
}

fn build_block(name: &str, raw_open: &str, inner: &str) -> Option<Block> {
    match name {
        "p" => paragraph_block(inner),
        "ul" | "ol" => {
            let items: Vec<String> = elements_named(inner, "li")
                .into_iter()
                .map(str::to_string)
                .collect();
            if items.is_empty() {
                debug!("Skipping list without items");
                return None;
            }
            Some(Block::List {
                ordered: name == "ol",
                items,
            })
        }
        "pre" => code_block(inner),
        "blockquote" => {
            let mut paragraphs: Vec<String> = elements_named(inner, "p")
                .into_iter()
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
            if paragraphs.is_empty() && !inner.trim().is_empty() {
                paragraphs.push(inner.trim().to_string());
            }
            if paragraphs.is_empty() {
                debug!("Skipping empty blockquote");
                return None;
            }
            Some(Block::Blockquote(paragraphs))
        }
        _ => {
            debug!("Unsupported block element: {}", raw_open);
            None
        }
    }
}

fn paragraph_block(inner: &str) -> Option<Block> {
    let inner = inner.trim();
    if inner.is_empty() {
        return None;
    }

    // A paragraph holding nothing but an image is rendered as that image.
    let tokens = tokenize(inner);
    let only_images = tokens.iter().all(|token| match &token.kind {
        TokenKind::Tag(tag) => tag.name == "img",
        TokenKind::Text(text) => text.trim().is_empty(),
    });
    if only_images {
        let src = tokens
            .iter()
            .filter_map(Token::tag)
            .find_map(|tag| attribute(tag.raw, "src"))?;
        return Some(Block::Image { src });
    }

    Some(Block::Paragraph(inner.to_string()))
}

fn code_block(inner: &str) -> Option<Block> {
    let tokens = tokenize(inner);
    let Some(open) = tokens.iter().position(|token| {
        token
            .tag()
            .is_some_and(|tag| tag.name == "code" && !tag.closing)
    }) else {
        debug!("Skipping <pre> without <code>");
        return None;
    };
    let close = find_matching_close(&tokens, open)?;

    let language = tokens[open]
        .tag()
        .and_then(|tag| attribute(tag.raw, "class"))
        .and_then(|class| {
            class
                .split_whitespace()
                .find_map(|c| c.strip_prefix("language-"))
                .filter(|lang| !lang.is_empty())
                .map(str::to_string)
        });

    let text = inner[tokens[open].end..tokens[close].start].trim();
    let code = strip_escape_markers(&decode_entities(text));
    Some(Block::Code { language, code })
}

/// Removes all tags and decodes entities.
pub fn strip_tags(markup: &str) -> String {
    let text: String = tokenize(markup)
        .iter()
        .filter_map(|token| match token.kind {
            TokenKind::Text(text) => Some(text),
            TokenKind::Tag(_) => None,
        })
        .collect();
    decode_entities(&text)
}
