//! A [`Surface`] that writes one standalone SVG document per page.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::fmt::Write;

use super::{
    constants::*,
    image::EmbeddedImage,
    metrics,
    surface::{Font, FontFamily, Rect, Surface, TextMeasure, TextStyle},
    utils::{escape_svg_attr, escape_svg_text, fmt_num},
};
use crate::errors::{ConversionError, Result};
use crate::models::colors::Rgb;

const SANS_FAMILY: &str = "'Helvetica', 'Arial', sans-serif";
const MONO_FAMILY: &str = "'JetBrains Mono', 'DejaVu Sans Mono', monospace";

/// Collects SVG pages. Coordinates are millimetres; each page's `viewBox` spans the
/// A4-landscape page.
#[derive(Debug, Default)]
pub struct SvgSurface {
    pages: Vec<String>,
    current: Option<String>,
    open_groups: usize,
}

impl SvgSurface {
    pub fn new() -> Self {
        Default::default()
    }

    /// Closes the open page and returns all pages.
    pub fn finish(mut self) -> Result<Vec<String>> {
        self.close_page()?;
        Ok(self.pages)
    }

    fn page_mut(&mut self) -> Result<&mut String> {
        self.current
            .as_mut()
            .ok_or_else(|| ConversionError::Internal("drawing before begin_page".to_string()))
    }

    fn close_page(&mut self) -> Result<()> {
        if let Some(mut page) = self.current.take() {
            for _ in 0..self.open_groups {
                writeln!(page, "</g>")?;
            }
            self.open_groups = 0;
            writeln!(page, "</svg>")?;
            self.pages.push(page);
        }
        Ok(())
    }
}

fn font_css(font: Font) -> String {
    let family = match font.family {
        FontFamily::Sans => SANS_FAMILY,
        FontFamily::Mono => MONO_FAMILY,
    };
    format!(
        "font-family:{}; font-size:{}px",
        family,
        fmt_num(font.size_pt * MM_PER_PT)
    )
}

impl TextMeasure for SvgSurface {
    fn text_width(&self, text: &str, font: Font) -> f64 {
        metrics::text_width(text, font)
    }
}

impl Surface for SvgSurface {
    fn begin_page(&mut self) -> Result<()> {
        self.close_page()?;
        let mut page = String::new();
        writeln!(
            page,
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{0}mm" height="{1}mm" viewBox="0 0 {0} {1}">"#,
            fmt_num(PAGE_WIDTH),
            fmt_num(PAGE_HEIGHT)
        )?;
        self.current = Some(page);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        let page = self.page_mut()?;
        writeln!(
            page,
            r#"  <rect x="{}" y="{}" width="{}" height="{}" fill="{}" />"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            color
        )?;
        Ok(())
    }

    fn text(
        &mut self,
        x: f64,
        y: f64,
        cell_height: f64,
        text: &str,
        style: TextStyle,
    ) -> Result<()> {
        // Baseline sits slightly below the middle of the cell.
        let baseline = y + cell_height / 2.0 + 0.3 * style.font.size_pt * MM_PER_PT;
        let page = self.page_mut()?;
        writeln!(
            page,
            r#"  <text x="{}" y="{}" style="{}; fill:{}" xml:space="preserve">{}</text>"#,
            fmt_num(x),
            fmt_num(baseline),
            font_css(style.font),
            style.color,
            escape_svg_text(text)
        )?;
        Ok(())
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64) -> Result<()> {
        let page = self.page_mut()?;
        writeln!(
            page,
            r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" />"#,
            fmt_num(from.0),
            fmt_num(from.1),
            fmt_num(to.0),
            fmt_num(to.1),
            color,
            fmt_num(width)
        )?;
        Ok(())
    }

    fn push_shear(&mut self, degrees: f64, origin: (f64, f64)) -> Result<()> {
        let page = self.page_mut()?;
        // Negative skew leans the glyph tops to the right in a y-down space.
        writeln!(
            page,
            r#"  <g transform="translate({0} {1}) skewX({2}) translate(-{0} -{1})">"#,
            fmt_num(origin.0),
            fmt_num(origin.1),
            fmt_num(-degrees)
        )?;
        self.open_groups += 1;
        Ok(())
    }

    fn pop_transform(&mut self) -> Result<()> {
        if self.open_groups == 0 {
            return Err(ConversionError::Internal(
                "pop_transform without matching push_shear".to_string(),
            ));
        }
        let page = self.page_mut()?;
        writeln!(page, "  </g>")?;
        self.open_groups -= 1;
        Ok(())
    }

    fn image(&mut self, image: &EmbeddedImage, rect: Rect) -> Result<()> {
        let encoded = BASE64.encode(&image.bytes);
        let page = self.page_mut()?;
        writeln!(
            page,
            r#"  <image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="none" xlink:href="data:{};base64,{}" />"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height),
            image.kind.mime_type(),
            encoded
        )?;
        Ok(())
    }

    fn link(&mut self, rect: Rect, target: &str) -> Result<()> {
        let page = self.page_mut()?;
        writeln!(
            page,
            r##"  <a xlink:href="{0}" href="{0}"><rect x="{1}" y="{2}" width="{3}" height="{4}" fill="#000000" fill-opacity="0" /></a>"##,
            escape_svg_attr(target),
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width),
            fmt_num(rect.height)
        )?;
        Ok(())
    }
}
