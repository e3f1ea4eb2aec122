//! Lays out parsed presentations on fixed A4-landscape pages.
//!
//! The entry points are [`Converter`] (configured through [`ConverterBuilder`]) and the
//! [`convert_document_to_svg`] shortcut. Rendering goes through the [`Surface`] trait, so
//! the same layout can be written as SVG ([`SvgSurface`]) or recorded for inspection
//! ([`DisplayList`]).
//!
//! # Current Features & Limitations:
//! *   Title page with title, subtitle, authors and date.
//! *   Paragraphs with bold, italic, inline code and hyperlinks, word-wrapped to the content width.
//! *   Bullet and numbered lists, blockquotes, images (PNG, JPEG, GIF) scaled to the remaining space.
//! *   Syntax-highlighted code blocks, cut off after a fixed number of lines.
//! *   Content that does not fit on a slide is dropped from the first element that crosses
//!     the bottom of the page. Problems like this are reported as [`Diagnostic`]s, never as errors.
//! *   Only a small markup subset is understood; other tags are ignored. No font embedding:
//!     text widths are estimated.

mod constants;
mod context;
mod diagnostics;
mod elements;
mod entities;
mod flow;
mod highlight;
mod image;
mod inline;
mod markup;
mod metrics;
mod structure;
mod surface;
mod svg;
mod utils;

use log::debug;
use std::path::{Path, PathBuf};

pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use entities::decode_entities;
pub use flow::{wrap_text, LayoutCursor};
pub use highlight::{available_code_themes, split_into_lines, CodeLine, ColorToken};
pub use image::{fit_image, EmbeddedImage, ImageKind, ImageLoadError, ImagePlacement};
pub use inline::{format_inline, TextRun};
pub use markup::{split_blocks, strip_tags, Block};
pub use surface::{DisplayList, DrawOp, Font, FontFamily, Rect, Surface, TextMeasure, TextStyle};
pub use svg::SvgSurface;

use crate::errors::{ConversionError, Result};
use crate::models::colors::Theme;
use crate::models::document::Document;
use context::RenderContext;
use diagnostics::Diagnostics;
use highlight::CodeHighlighter;
use structure::{render_slide, render_title_page};

/// Builder for creating a [`Converter`].
#[derive(Default)]
pub struct ConverterBuilder {
    theme_name: Option<String>,
    theme_file: Option<PathBuf>,
    code_theme: Option<String>,
    default_language: Option<String>,
    base_dir: Option<PathBuf>,
    quiet: bool,
}

impl ConverterBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Selects a built-in page theme by name (`light` or `dark`).
    pub fn set_theme(mut self, name: impl Into<String>) -> Self {
        self.theme_name = Some(name.into());
        self
    }

    /// Loads the page theme from a JSON file. Takes precedence over [`Self::set_theme`].
    pub fn set_theme_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.theme_file = Some(path.into());
        self
    }

    /// Selects the syntax highlighting theme.
    pub fn set_code_theme(mut self, name: impl Into<String>) -> Self {
        self.code_theme = Some(name.into());
        self
    }

    /// Language for code blocks that carry no language hint.
    pub fn set_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = Some(language.into());
        self
    }

    /// Directory relative image paths are resolved against.
    pub fn set_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Collects diagnostics without logging them.
    pub fn set_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Builds the `Converter`.
    /// Fails on unknown theme names and on unreadable theme files.
    pub fn build(self) -> Result<Converter> {
        let theme = match (&self.theme_file, &self.theme_name) {
            (Some(path), _) => {
                debug!("Loading page theme from {}", path.display());
                let json = std::fs::read_to_string(path)?;
                serde_json::from_str::<Theme>(&json)?
            }
            (None, Some(name)) => {
                Theme::by_name(name).ok_or_else(|| ConversionError::UnknownTheme(name.clone()))?
            }
            (None, None) => Theme::light(),
        };
        let code_theme = self
            .code_theme
            .unwrap_or_else(|| constants::DEFAULT_CODE_THEME.to_string());

        Ok(Converter {
            theme,
            highlighter: CodeHighlighter::new(&code_theme)?,
            default_language: self
                .default_language
                .unwrap_or_else(|| constants::DEFAULT_CODE_LANGUAGE.to_string()),
            base_dir: self.base_dir.unwrap_or_else(|| PathBuf::from(".")),
            quiet: self.quiet,
        })
    }
}

/// Renders documents onto surfaces. Immutable once built.
#[derive(Debug)]
pub struct Converter {
    theme: Theme,
    highlighter: CodeHighlighter,
    default_language: String,
    base_dir: PathBuf,
    quiet: bool,
}

impl Converter {
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Draws the title page followed by one page per slide.
    ///
    /// Returns the diagnostics of the conversion. Only failures of the surface itself abort
    /// the conversion.
    pub fn render<S: Surface>(&self, document: &Document, surface: &mut S) -> Result<Vec<Diagnostic>> {
        let mut diagnostics = Diagnostics::new(self.quiet);

        render_title_page(surface, &self.theme, document)?;

        for (index, slide) in document.slides.iter().enumerate() {
            let mut ctx = RenderContext {
                theme: &self.theme,
                highlighter: &self.highlighter,
                default_language: &self.default_language,
                base_dir: &self.base_dir,
                slide_number: index + 1,
                slide_title: &slide.title,
                diagnostics: &mut diagnostics,
            };
            let end = render_slide(surface, &mut ctx, slide)?;
            debug!(
                "Slide {} \"{}\": {} elements, content ends at y={:.1}",
                index + 1,
                slide.title,
                slide.elements.len(),
                end
            );
        }

        if !diagnostics.is_empty() {
            debug!(
                "{} diagnostics for {} slides",
                diagnostics.len(),
                document.slides.len()
            );
        }
        Ok(diagnostics.into_vec())
    }

    /// Renders `document` into one SVG document per page.
    pub fn convert_to_svg(&self, document: &Document) -> Result<SvgOutput> {
        let mut surface = SvgSurface::new();
        let diagnostics = self.render(document, &mut surface)?;
        Ok(SvgOutput {
            pages: surface.finish()?,
            diagnostics,
        })
    }
}

/// SVG pages of a converted document (title page first) and the problems found on the way.
#[derive(Debug, Clone)]
pub struct SvgOutput {
    pub pages: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Converts `document` to SVG pages with the default configuration: light theme, default
/// code theme, images resolved against the working directory.
pub fn convert_document_to_svg(document: &Document) -> Result<SvgOutput> {
    ConverterBuilder::new().build()?.convert_to_svg(document)
}
