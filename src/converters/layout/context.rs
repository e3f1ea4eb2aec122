use std::path::Path;

use super::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
use super::highlight::CodeHighlighter;
use crate::models::colors::Theme;

/// Everything the element renderers need besides the surface.
///
/// Themes and the highlighter are shared read-only; only the diagnostics sink is mutable.
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub highlighter: &'a CodeHighlighter,
    /// Language of code blocks that carry no language hint.
    pub default_language: &'a str,
    /// Directory relative image paths are resolved against.
    pub base_dir: &'a Path,
    pub slide_number: usize,
    pub slide_title: &'a str,
    pub diagnostics: &'a mut Diagnostics,
}

impl<'a> RenderContext<'a> {
    /// Records a diagnostic for the current slide.
    pub fn report(&mut self, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic {
            slide_number: self.slide_number,
            slide_title: self.slide_title.to_string(),
            kind,
        });
    }

    /// A copy of this context reporting into `sink` instead, for dry runs whose
    /// diagnostics are thrown away.
    pub fn with_sink<'b>(&'b self, sink: &'b mut Diagnostics) -> RenderContext<'b> {
        RenderContext {
            theme: self.theme,
            highlighter: self.highlighter,
            default_language: self.default_language,
            base_dir: self.base_dir,
            slide_number: self.slide_number,
            slide_title: self.slide_title,
            diagnostics: sink,
        }
    }
}
