//! Renders individual slide content elements and markup blocks.
//!
//! Every renderer takes the y coordinate to start at and returns the y coordinate the
//! next element starts at, trailing spacing included.

use log::debug;

use super::{
    constants::*,
    context::RenderContext,
    diagnostics::DiagnosticKind,
    flow::{code_style, render_code_line, render_runs, render_wrapped, LayoutCursor},
    highlight::{detect_language, expand_tabs, extract_fenced_code, plain_lines, split_into_lines},
    image::{fit_image, load_image, resolve_image_path},
    inline::{format_inline, TextRun},
    markup::{split_blocks, Block},
    surface::{Font, MeasuringSurface, Rect, Surface, TextStyle},
};
use crate::errors::Result;
use crate::models::{colors::Theme, document::ContentElement};
use crate::preprocess::strip_escape_markers;

fn body_style(theme: &Theme) -> TextStyle {
    TextStyle::new(Font::sans(BODY_TEXT_SIZE), theme.slide_text)
}

/// Renders one content element starting at `y`.
pub fn render_element<S: Surface>(
    surface: &mut S,
    ctx: &mut RenderContext<'_>,
    element: &ContentElement,
    y: f64,
) -> Result<f64> {
    match element {
        ContentElement::Text { lines } => render_text(surface, ctx, lines, y),
        ContentElement::List { items } => render_plain_list(surface, ctx.theme, items, y),
        ContentElement::Code {
            raw,
            file_name,
            language,
        } => {
            let language = language
                .as_deref()
                .filter(|lang| !lang.is_empty())
                .or_else(|| file_name.as_deref().and_then(detect_language))
                .unwrap_or(ctx.default_language)
                .to_string();
            let code = strip_escape_markers(raw.trim_end());
            render_code_block(surface, ctx, &code, &language, y)
        }
        ContentElement::Link { label, url } => render_link(surface, ctx.theme, label, url, y),
        ContentElement::Markup { html } => {
            let mut y = y;
            for block in split_blocks(html) {
                y = render_block(surface, ctx, &block, y)?;
            }
            Ok(y)
        }
        ContentElement::Image { url } => render_image(surface, ctx, url, y),
    }
}

/// Plain text lines. A text element holding a fenced code block is rendered as that
/// code block instead.
fn render_text<S: Surface>(
    surface: &mut S,
    ctx: &mut RenderContext<'_>,
    lines: &[String],
    y: f64,
) -> Result<f64> {
    let content = lines.join("\n");
    if content.contains("```") {
        match extract_fenced_code(&content) {
            Some((language, code)) => {
                let language = if language.is_empty() {
                    ctx.default_language
                } else {
                    language
                };
                let code = strip_escape_markers(code);
                return render_code_block(surface, ctx, &code, language, y);
            }
            None => debug!("Incomplete code fence, rendering as plain text."),
        }
    }

    let style = TextStyle::new(Font::sans(PLAIN_TEXT_SIZE), ctx.theme.slide_text);
    let end = render_wrapped(
        surface,
        &lines.join(" "),
        style,
        CONTENT_X,
        y,
        CONTENT_WIDTH,
        PLAIN_TEXT_LINE_HEIGHT,
    )?;
    Ok(end + PLAIN_TEXT_SPACING)
}

fn render_plain_list<S: Surface>(
    surface: &mut S,
    theme: &Theme,
    items: &[String],
    mut y: f64,
) -> Result<f64> {
    let style = body_style(theme);
    for item in items {
        surface.text(LIST_BULLET_X, y, LIST_LINE_HEIGHT, BULLET, style)?;
        y = render_wrapped(
            surface,
            item,
            style,
            LIST_TEXT_X,
            y,
            LIST_TEXT_WIDTH,
            LIST_LINE_HEIGHT,
        )? + LIST_ITEM_SPACING;
    }
    Ok(y + LIST_SPACING)
}

/// A hyperlink directive: underlined label in the link colour, clickable. An empty label
/// shows the URL.
fn render_link<S: Surface>(
    surface: &mut S,
    theme: &Theme,
    label: &str,
    url: &str,
    y: f64,
) -> Result<f64> {
    let label = if label.is_empty() { url } else { label };
    let lh = PARAGRAPH_LINE_HEIGHT;
    let style = TextStyle::new(Font::sans(BODY_TEXT_SIZE), theme.link_color);
    let width = surface.text_width(label, style.font);

    surface.text(CONTENT_X, y, lh, label, style)?;
    surface.line(
        (CONTENT_X, y + lh - 1.0),
        (CONTENT_X + width, y + lh - 1.0),
        theme.link_color,
        LINK_UNDERLINE_WIDTH,
    )?;
    if !url.is_empty() {
        surface.link(Rect::new(CONTENT_X, y, width, lh), url)?;
    }
    Ok(y + lh + LINK_SPACING)
}

/// Renders one block of a markup fragment.
pub fn render_block<S: Surface>(
    surface: &mut S,
    ctx: &mut RenderContext<'_>,
    block: &Block,
    y: f64,
) -> Result<f64> {
    let theme = ctx.theme;
    match block {
        Block::Paragraph(markup) => {
            let runs = format_inline(markup);
            let cursor = LayoutCursor::new(CONTENT_X, y, CONTENT_WIDTH, PARAGRAPH_LINE_HEIGHT);
            Ok(render_runs(surface, theme, &runs, body_style(theme), cursor)? + PARAGRAPH_SPACING)
        }
        Block::List { ordered, items } => {
            let mut y = y;
            for (index, item) in items.iter().enumerate() {
                let marker = if *ordered {
                    format!("{}. ", index + 1)
                } else {
                    BULLET.to_string()
                };
                surface.text(LIST_BULLET_X, y, LIST_LINE_HEIGHT, &marker, body_style(theme))?;

                let runs = format_inline(item);
                let cursor = LayoutCursor::new(LIST_TEXT_X, y, LIST_TEXT_WIDTH, LIST_LINE_HEIGHT);
                y = render_runs(surface, theme, &runs, body_style(theme), cursor)? + LIST_ITEM_SPACING;
            }
            Ok(y + LIST_SPACING)
        }
        Block::Code { language, code } => {
            let language = language.as_deref().unwrap_or(ctx.default_language);
            render_code_block(surface, ctx, code, language, y)
        }
        Block::Blockquote(paragraphs) => render_blockquote(surface, theme, paragraphs, y),
        Block::Image { src } => render_image(surface, ctx, src, y),
        Block::Text(text) => Ok(render_wrapped(
            surface,
            text,
            body_style(theme),
            CONTENT_X,
            y,
            CONTENT_WIDTH,
            FALLBACK_TEXT_LINE_HEIGHT,
        )? + FALLBACK_TEXT_SPACING),
    }
}

/// A quote box: background, left border, then the paragraphs on top. The box height
/// comes from laying the paragraphs out once without drawing.
fn render_blockquote<S: Surface>(
    surface: &mut S,
    theme: &Theme,
    paragraphs: &[String],
    y: f64,
) -> Result<f64> {
    let paragraphs: Vec<Vec<TextRun>> = paragraphs.iter().map(|p| format_inline(p)).collect();
    let text_top = y + BLOCKQUOTE_PADDING;

    let text_height = {
        let mut dry_run = MeasuringSurface::new(&*surface);
        quote_paragraphs(&mut dry_run, theme, &paragraphs, text_top)? - text_top
    };
    let height = text_height + 2.0 * BLOCKQUOTE_PADDING;

    surface.fill_rect(
        Rect::new(CONTENT_X, y, CONTENT_WIDTH, height),
        theme.blockquote_background,
    )?;
    surface.fill_rect(
        Rect::new(CONTENT_X, y, BLOCKQUOTE_BORDER_WIDTH, height),
        theme.blockquote_border,
    )?;
    quote_paragraphs(surface, theme, &paragraphs, text_top)?;

    Ok(y + height + BLOCKQUOTE_SPACING)
}

fn quote_paragraphs<S: Surface>(
    surface: &mut S,
    theme: &Theme,
    paragraphs: &[Vec<TextRun>],
    y: f64,
) -> Result<f64> {
    let mut text_y = y;
    for (index, runs) in paragraphs.iter().enumerate() {
        if index > 0 {
            text_y += BLOCKQUOTE_PARAGRAPH_SPACING;
        }
        let cursor = LayoutCursor::new(
            BLOCKQUOTE_TEXT_X,
            text_y,
            BLOCKQUOTE_TEXT_WIDTH,
            PARAGRAPH_LINE_HEIGHT,
        );
        text_y = render_runs(surface, theme, runs, body_style(theme), cursor)?;
    }
    Ok(text_y)
}

/// Renders a highlighted code block of at most [`MAX_CODE_LINES`] lines.
///
/// Longer blocks end with an ellipsis and report a truncation. When the tokenizer fails
/// the code is drawn in the theme's plain code colour. Tabs are expanded to spaces.
pub fn render_code_block<S: Surface>(
    surface: &mut S,
    ctx: &mut RenderContext<'_>,
    code: &str,
    language: &str,
    y: f64,
) -> Result<f64> {
    let theme = ctx.theme;
    let code = expand_tabs(code, CODE_TAB_WIDTH);
    let lines = match ctx.highlighter.highlight(&code, language) {
        Ok(tokens) => split_into_lines(&tokens),
        Err(err) => {
            debug!("{}; rendering {} code without highlighting.", err, language);
            plain_lines(&code, theme.code_text)
        }
    };

    let height = (lines.len() as f64 * CODE_LINE_HEIGHT).min(MAX_CODE_HEIGHT);
    surface.fill_rect(
        Rect::new(CONTENT_X, y, CONTENT_WIDTH, height + CODE_BOX_PADDING),
        theme.code_background,
    )?;

    let mut line_y = y + CODE_TOP_PADDING;
    for (index, line) in lines.iter().enumerate() {
        if index >= MAX_CODE_LINES {
            ctx.report(DiagnosticKind::CodeTruncated {
                max_lines: MAX_CODE_LINES,
                lines: lines.len(),
            });
            surface.text(
                CODE_TEXT_X,
                line_y,
                CODE_LINE_HEIGHT,
                CODE_ELLIPSIS,
                code_style(theme.code_line_number),
            )?;
            break;
        }
        render_code_line(surface, line, CODE_TEXT_X, line_y)?;
        line_y += CODE_LINE_HEIGHT;
    }

    Ok(y + height + CODE_SPACING)
}

/// Places an image centred in the content width, scaled into the space left above the
/// bottom boundary. Images that cannot be loaded are skipped with a diagnostic.
pub fn render_image<S: Surface>(
    surface: &mut S,
    ctx: &mut RenderContext<'_>,
    url: &str,
    y: f64,
) -> Result<f64> {
    let path = resolve_image_path(ctx.base_dir, url);
    let image = match load_image(&path) {
        Ok(image) => image,
        Err(err) => {
            ctx.report(DiagnosticKind::image_skipped(&err));
            return Ok(y);
        }
    };

    let available = CONTENT_BOTTOM - y;
    if available <= MIN_IMAGE_SPACE {
        debug!(
            "Skipping image {}: only {:.1}mm left on the slide.",
            path.display(),
            available
        );
        return Ok(y);
    }

    let placement = fit_image(
        f64::from(image.pixel_width) * PX_TO_MM,
        f64::from(image.pixel_height) * PX_TO_MM,
        available - IMAGE_SPACING,
        CONTENT_WIDTH,
    );
    surface.image(
        &image,
        Rect::new(
            CONTENT_X + placement.x_offset,
            y,
            placement.width,
            placement.height,
        ),
    )?;
    Ok(y + placement.height + IMAGE_SPACING)
}
