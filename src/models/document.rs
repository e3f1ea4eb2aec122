// src/models/document.rs

use serde::{Deserialize, Serialize};

/// A parsed presentation, as handed over by the document parser.
/// Immutable for the lifetime of a conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// The presentation title, shown on the title page.
    pub title: String,
    /// Optional subtitle shown below the title.
    pub subtitle: Option<String>,
    /// One entry per author block; each entry is already flattened to a single line.
    pub authors: Vec<String>,
    /// Presentation date, pre-formatted for display (e.g. "January 2, 2006").
    pub date: Option<String>,
    /// The slides in presentation order.
    pub slides: Vec<Slide>,
}

/// One presentation section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Slide {
    pub title: String,
    pub elements: Vec<ContentElement>,
}

/// A content element of a slide, already classified by the document parser.
/// The JSON representation is internally tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ContentElement {
    /// Plain text lines. Lines are joined with spaces when rendered, unless they
    /// contain a fenced code block.
    Text { lines: Vec<String> },
    /// A bullet list of plain items.
    List { items: Vec<String> },
    /// A code block from a code directive.
    #[serde(rename_all = "camelCase")]
    Code {
        raw: String,
        file_name: Option<String>,
        language: Option<String>,
    },
    /// A hyperlink directive. An empty label falls back to the URL.
    Link { label: String, url: String },
    /// A raw fragment of the supported markup subset (paragraphs, lists, code,
    /// blockquotes, images), possibly mixing several block types.
    Markup { html: String },
    /// A legacy image directive.
    Image { url: String },
}

impl ContentElement {
    /// Short name used in log messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ContentElement::Text { .. } => "text",
            ContentElement::List { .. } => "list",
            ContentElement::Code { .. } => "code",
            ContentElement::Link { .. } => "link",
            ContentElement::Markup { .. } => "markup",
            ContentElement::Image { .. } => "image",
        }
    }
}
