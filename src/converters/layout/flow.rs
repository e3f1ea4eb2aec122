//! Line-wrapped placement of formatted text and of highlighted code lines.

use super::{
    constants::*,
    highlight::CodeLine,
    inline::TextRun,
    surface::{Font, Rect, Surface, TextMeasure, TextStyle},
};
use crate::errors::Result;
use crate::models::colors::{Rgb, Theme};

/// Write position of the flow renderer. The cursor only ever moves right or down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub x: f64,
    pub y: f64,
    /// Left margin lines restart at.
    pub left: f64,
    /// Width available from the left margin.
    pub width: f64,
    pub line_height: f64,
}

impl LayoutCursor {
    pub fn new(left: f64, y: f64, width: f64, line_height: f64) -> Self {
        Self {
            x: left,
            y,
            left,
            width,
            line_height,
        }
    }

    fn at_line_start(&self) -> bool {
        self.x <= self.left
    }

    /// Moves to the start of the next line if a word of `word_width` does not fit.
    fn wrap_for(&mut self, word_width: f64) {
        if self.x + word_width > self.left + self.width && !self.at_line_start() {
            self.x = self.left;
            self.y += self.line_height;
        }
    }
}

/// Renders `runs` word by word, wrapping at the cursor's width bound.
///
/// Plain words use `base`; inline code, links, bold and italic derive their styles from
/// `base` and `theme`. Returns the y coordinate below the last line.
pub fn render_runs<S: Surface>(
    surface: &mut S,
    theme: &Theme,
    runs: &[TextRun],
    base: TextStyle,
    mut cursor: LayoutCursor,
) -> Result<f64> {
    let lh = cursor.line_height;

    for run in runs {
        let style = run_style(run, base, theme);

        for word in run.text.split_whitespace() {
            // Measured with its trailing space, so consecutive words stay apart.
            let width = surface.text_width(&format!("{word} "), style.font);
            cursor.wrap_for(width);
            let (x, y) = (cursor.x, cursor.y);

            if run.code {
                surface.fill_rect(
                    Rect::new(x, y + 0.5, width, lh - 1.0),
                    theme.inline_code_background,
                )?;
            }
            if run.italic {
                surface.push_shear(ITALIC_SKEW, (x, y))?;
            }

            surface.text(x, y, lh, word, style)?;
            if run.bold {
                surface.text(x + BOLD_OFFSET, y, lh, word, style)?;
            }
            if let Some(target) = &run.link {
                let underline_y = y + lh - 1.0;
                surface.line(
                    (x, underline_y),
                    (x + width, underline_y),
                    theme.link_color,
                    LINK_UNDERLINE_WIDTH,
                )?;
                surface.link(Rect::new(x, y, width, lh), target)?;
            }

            if run.italic {
                surface.pop_transform()?;
            }
            cursor.x += width;
        }
    }

    Ok(cursor.y + lh)
}

fn run_style(run: &TextRun, base: TextStyle, theme: &Theme) -> TextStyle {
    if run.code {
        TextStyle::new(Font::mono(INLINE_CODE_SIZE), theme.inline_code_text)
    } else if run.link.is_some() {
        TextStyle::new(base.font, theme.link_color)
    } else {
        base
    }
}

/// Greedy word wrap of plain text into lines no wider than `width`.
///
/// A single word wider than `width` gets a line of its own. Returns no lines for text
/// without words.
pub fn wrap_text(measure: &dyn TextMeasure, text: &str, font: Font, width: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure.text_width(&candidate, font) > width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draws wrapped plain text from `(x, y)`. Returns the y coordinate below the last line;
/// text without words still occupies one line.
pub fn render_wrapped<S: Surface>(
    surface: &mut S,
    text: &str,
    style: TextStyle,
    x: f64,
    y: f64,
    width: f64,
    line_height: f64,
) -> Result<f64> {
    let lines = wrap_text(&*surface, text, style.font, width);
    let mut line_y = y;
    for line in &lines {
        surface.text(x, line_y, line_height, line, style)?;
        line_y += line_height;
    }
    Ok(y + line_height * lines.len().max(1) as f64)
}

/// Like [`render_wrapped`], with every line centred in the content area. Bold text is
/// simulated the same way as in [`render_runs`].
pub fn render_centered<S: Surface>(
    surface: &mut S,
    text: &str,
    style: TextStyle,
    bold: bool,
    y: f64,
    line_height: f64,
) -> Result<f64> {
    let lines = wrap_text(&*surface, text, style.font, CONTENT_WIDTH);
    let mut line_y = y;
    for line in &lines {
        let width = surface.text_width(line, style.font);
        let x = CONTENT_X + ((CONTENT_WIDTH - width) / 2.0).max(0.0);
        surface.text(x, line_y, line_height, line, style)?;
        if bold {
            surface.text(x + BOLD_OFFSET, line_y, line_height, line, style)?;
        }
        line_y += line_height;
    }
    Ok(line_y)
}

/// Draws one line of highlighted code. Tokens are placed side by side, never wrapped.
pub fn render_code_line<S: Surface>(surface: &mut S, line: &CodeLine, x: f64, y: f64) -> Result<()> {
    let font = Font::mono(CODE_SIZE);
    let mut token_x = x;
    for token in line {
        let style = TextStyle::new(font, token.color);
        surface.text(token_x, y, CODE_LINE_HEIGHT, &token.text, style)?;
        token_x += surface.text_width(&token.text, font);
    }
    Ok(())
}

/// Style of a single cell of monospace code text.
pub fn code_style(color: Rgb) -> TextStyle {
    TextStyle::new(Font::mono(CODE_SIZE), color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::layout::highlight::ColorToken;
    use crate::converters::layout::inline::format_inline;
    use crate::converters::layout::surface::{DisplayList, DrawOp};

    fn body() -> TextStyle {
        TextStyle::new(Font::sans(BODY_TEXT_SIZE), Theme::light().slide_text)
    }

    fn cursor() -> LayoutCursor {
        LayoutCursor::new(CONTENT_X, CONTENT_TOP, CONTENT_WIDTH, PARAGRAPH_LINE_HEIGHT)
    }

    #[test]
    fn test_single_line_returns_y_below_line() {
        let mut list = DisplayList::new();
        let runs = format_inline("Hello world");
        let end = render_runs(&mut list, &Theme::light(), &runs, body(), cursor()).unwrap();
        assert_eq!(end, CONTENT_TOP + PARAGRAPH_LINE_HEIGHT);
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["Hello", "world"]);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let mut list = DisplayList::new();
        let text = "lorem ipsum dolor sit amet ".repeat(20);
        let runs = vec![TextRun::plain(text)];
        let end = render_runs(&mut list, &Theme::light(), &runs, body(), cursor()).unwrap();
        assert!(end > CONTENT_TOP + 2.0 * PARAGRAPH_LINE_HEIGHT);

        for op in &list.ops {
            if let DrawOp::Text { x, text, style, .. } = op {
                let width = metrics_width(text, style.font);
                assert!(*x >= CONTENT_X);
                assert!(x + width <= CONTENT_X + CONTENT_WIDTH + 1e-9);
            }
        }
    }

    fn metrics_width(text: &str, font: Font) -> f64 {
        crate::converters::layout::metrics::text_width(text, font)
    }

    #[test]
    fn test_overlong_word_is_not_wrapped_at_line_start() {
        let mut list = DisplayList::new();
        let runs = vec![TextRun::plain("x".repeat(300))];
        let end = render_runs(&mut list, &Theme::light(), &runs, body(), cursor()).unwrap();
        assert_eq!(end, CONTENT_TOP + PARAGRAPH_LINE_HEIGHT);
    }

    #[test]
    fn test_bold_is_drawn_twice_with_offset() {
        let mut list = DisplayList::new();
        let runs = format_inline("<b>bold</b>");
        render_runs(&mut list, &Theme::light(), &runs, body(), cursor()).unwrap();
        let xs: Vec<f64> = list
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, .. } => Some(*x),
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![CONTENT_X, CONTENT_X + BOLD_OFFSET]);
    }

    #[test]
    fn test_italic_is_sheared_and_restored() {
        let mut list = DisplayList::new();
        let runs = format_inline("<em>slanted</em>");
        render_runs(&mut list, &Theme::light(), &runs, body(), cursor()).unwrap();
        assert_eq!(
            list.ops.first(),
            Some(&DrawOp::PushShear {
                degrees: ITALIC_SKEW,
                origin: (CONTENT_X, CONTENT_TOP)
            })
        );
        assert_eq!(list.ops.last(), Some(&DrawOp::PopTransform));
    }

    #[test]
    fn test_inline_code_has_background_and_code_colors() {
        let theme = Theme::light();
        let mut list = DisplayList::new();
        let runs = format_inline("<code>x</code>");
        render_runs(&mut list, &theme, &runs, body(), cursor()).unwrap();
        match &list.ops[..] {
            [DrawOp::FillRect { rect, color }, DrawOp::Text { style, .. }] => {
                assert_eq!(*color, theme.inline_code_background);
                assert_eq!(rect.y, CONTENT_TOP + 0.5);
                assert_eq!(rect.height, PARAGRAPH_LINE_HEIGHT - 1.0);
                assert_eq!(style.color, theme.inline_code_text);
                assert_eq!(style.font, Font::mono(INLINE_CODE_SIZE));
            }
            ops => panic!("unexpected ops: {ops:?}"),
        }
    }

    #[test]
    fn test_link_is_underlined_and_registered() {
        let theme = Theme::light();
        let mut list = DisplayList::new();
        let runs = format_inline(r#"<a href="https://go.dev">Go site</a> after"#);
        render_runs(&mut list, &theme, &runs, body(), cursor()).unwrap();

        assert_eq!(
            list.link_targets().collect::<Vec<_>>(),
            vec!["https://go.dev", "https://go.dev"]
        );
        let underlines = list
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { color, .. } if *color == theme.link_color))
            .count();
        assert_eq!(underlines, 2);

        // The style returns to the base after the link.
        let last_text_style = list.ops.iter().rev().find_map(|op| match op {
            DrawOp::Text { style, .. } => Some(*style),
            _ => None,
        });
        assert_eq!(last_text_style, Some(body()));
    }

    #[test]
    fn test_wrap_text() {
        let measure = DisplayList::new();
        let font = Font::sans(BODY_TEXT_SIZE);
        let lines = wrap_text(&measure, "one two three", font, 1000.0);
        assert_eq!(lines, vec!["one two three"]);

        let narrow = wrap_text(&measure, "one two three", font, 1.0);
        assert_eq!(narrow, vec!["one", "two", "three"]);

        assert!(wrap_text(&measure, "   ", font, 100.0).is_empty());
    }

    #[test]
    fn test_render_wrapped_empty_text_takes_one_line() {
        let mut list = DisplayList::new();
        let end = render_wrapped(&mut list, "", body(), 20.0, 45.0, 257.0, 11.0).unwrap();
        assert_eq!(end, 56.0);
        assert!(list.ops.is_empty());
    }

    #[test]
    fn test_centered_lines() {
        let mut list = DisplayList::new();
        render_centered(&mut list, "Title", body(), false, 70.0, 23.0).unwrap();
        match &list.ops[..] {
            [DrawOp::Text { x, text, style, .. }] => {
                let width = metrics_width(text, style.font);
                assert!((x - (CONTENT_X + (CONTENT_WIDTH - width) / 2.0)).abs() < 1e-9);
            }
            ops => panic!("unexpected ops: {ops:?}"),
        }
    }

    #[test]
    fn test_code_line_tokens_are_atomic() {
        let mut list = DisplayList::new();
        let red = Rgb::new(255, 0, 0);
        let line = vec![ColorToken::new("func ", red), ColorToken::new("main()", Rgb::new(0, 0, 255))];
        render_code_line(&mut list, &line, CODE_TEXT_X, 50.0).unwrap();
        assert_eq!(list.texts().collect::<Vec<_>>(), vec!["func ", "main()"]);
        match &list.ops[0] {
            DrawOp::Text { style, .. } => assert_eq!(*style, code_style(red)),
            op => panic!("unexpected op: {op:?}"),
        }
    }
}
