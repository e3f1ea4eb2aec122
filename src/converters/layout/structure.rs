//! Page-level structure: the title page, slide chrome, and placement of a slide's
//! elements with overflow detection.

use log::debug;

use super::{
    constants::*,
    context::RenderContext,
    diagnostics::{DiagnosticKind, Diagnostics},
    elements::render_element,
    flow::{render_centered, render_runs, LayoutCursor},
    inline::TextRun,
    surface::{Font, MeasuringSurface, Rect, Surface, TextStyle},
};
use crate::errors::Result;
use crate::models::{
    colors::Theme,
    document::{ContentElement, Document, Slide},
};

/// Draws the title page: title, optional subtitle, authors and date, centred.
pub fn render_title_page<S: Surface>(
    surface: &mut S,
    theme: &Theme,
    document: &Document,
) -> Result<()> {
    surface.begin_page()?;
    surface.fill_rect(
        Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT),
        theme.title_background,
    )?;

    render_centered(
        surface,
        &document.title,
        TextStyle::new(Font::sans(TITLE_PAGE_TITLE_SIZE), theme.title_text),
        true,
        TITLE_PAGE_TITLE_Y,
        TITLE_PAGE_TITLE_LINE_HEIGHT,
    )?;

    if let Some(subtitle) = document.subtitle.as_deref().filter(|s| !s.is_empty()) {
        render_centered(
            surface,
            subtitle,
            TextStyle::new(Font::sans(TITLE_PAGE_SUBTITLE_SIZE), theme.title_subtext),
            false,
            TITLE_PAGE_SUBTITLE_Y,
            TITLE_PAGE_SUBTITLE_LINE_HEIGHT,
        )?;
    }

    let author_style = TextStyle::new(Font::sans(TITLE_PAGE_AUTHOR_SIZE), theme.title_subtext);
    let mut author_y = TITLE_PAGE_AUTHORS_Y;
    for author in document.authors.iter().map(|a| a.trim()) {
        if author.is_empty() {
            continue;
        }
        render_centered(
            surface,
            author,
            author_style,
            false,
            author_y,
            TITLE_PAGE_AUTHOR_LINE_HEIGHT,
        )?;
        author_y += TITLE_PAGE_AUTHOR_SPACING;
    }

    if let Some(date) = document.date.as_deref().filter(|d| !d.is_empty()) {
        render_centered(
            surface,
            date,
            TextStyle::new(Font::sans(TITLE_PAGE_DATE_SIZE), theme.title_date),
            false,
            TITLE_PAGE_DATE_Y,
            TITLE_PAGE_DATE_LINE_HEIGHT,
        )?;
    }
    Ok(())
}

/// Starts a content slide page: background, bold title and the rule below it.
/// Returns the y coordinate where content starts.
pub fn render_slide_chrome<S: Surface>(surface: &mut S, theme: &Theme, title: &str) -> Result<f64> {
    surface.begin_page()?;
    surface.fill_rect(
        Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT),
        theme.slide_background,
    )?;

    let title_run = TextRun {
        text: title.to_string(),
        bold: true,
        ..Default::default()
    };
    render_runs(
        surface,
        theme,
        &[title_run],
        TextStyle::new(Font::sans(SLIDE_TITLE_SIZE), theme.slide_title),
        LayoutCursor::new(
            CONTENT_X,
            SLIDE_TITLE_Y,
            CONTENT_WIDTH,
            SLIDE_TITLE_LINE_HEIGHT,
        ),
    )?;

    surface.line(
        (CONTENT_X, SLIDE_TITLE_RULE_Y),
        (CONTENT_X + CONTENT_WIDTH, SLIDE_TITLE_RULE_Y),
        theme.slide_title_line,
        SLIDE_TITLE_RULE_WIDTH,
    )?;
    Ok(CONTENT_TOP)
}

/// Where composition of a slide's elements stands.
#[derive(Debug, Clone, Copy, PartialEq)]
enum CompositionState {
    /// The element at this index is next.
    Rendering(usize),
    /// An element did not fit; it and everything after it are dropped.
    Overflow,
    Done,
}

/// Places `elements` from `start_y` down, and returns the y coordinate after the last
/// placed element.
///
/// Each element is first laid out without drawing. If it would end below the bottom of
/// the content area, a single overflow diagnostic is reported and neither it nor any
/// later element is drawn.
pub fn compose_elements<S: Surface>(
    surface: &mut S,
    ctx: &mut RenderContext<'_>,
    elements: &[ContentElement],
    start_y: f64,
) -> Result<f64> {
    let mut y = start_y;
    let mut state = CompositionState::Rendering(0);

    loop {
        state = match state {
            CompositionState::Rendering(index) if index >= elements.len() => {
                CompositionState::Done
            }
            CompositionState::Rendering(index) => {
                let element = &elements[index];
                let end = measure_element(surface, ctx, element, y)?;
                if end > CONTENT_BOTTOM {
                    debug!(
                        "Element {} ({}) ends at y={:.1}, past the content area.",
                        index,
                        element.kind_name(),
                        end
                    );
                    ctx.report(DiagnosticKind::Overflow { y: end });
                    CompositionState::Overflow
                } else {
                    y = render_element(surface, ctx, element, y)?;
                    CompositionState::Rendering(index + 1)
                }
            }
            CompositionState::Overflow | CompositionState::Done => break,
        };
    }
    Ok(y)
}

/// End y of `element` if it were drawn at `y`. Diagnostics of the dry run are discarded.
fn measure_element<S: Surface>(
    surface: &S,
    ctx: &RenderContext<'_>,
    element: &ContentElement,
    y: f64,
) -> Result<f64> {
    let mut scratch = Diagnostics::new(true);
    let mut dry_ctx = ctx.with_sink(&mut scratch);
    let mut dry_run = MeasuringSurface::new(surface);
    render_element(&mut dry_run, &mut dry_ctx, element, y)
}

/// Renders a full content slide.
pub fn render_slide<S: Surface>(
    surface: &mut S,
    ctx: &mut RenderContext<'_>,
    slide: &Slide,
) -> Result<f64> {
    let start_y = render_slide_chrome(surface, ctx.theme, &slide.title)?;
    compose_elements(surface, ctx, &slide.elements, start_y)
}
