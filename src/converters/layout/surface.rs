//! The page-drawing surface the layout engine writes to.
//!
//! Every drawing call carries its complete style (font and color), so a surface keeps no
//! "current font" or "current color" state between calls.

use super::{image::EmbeddedImage, metrics};
use crate::errors::Result;
use crate::models::colors::Rgb;

/// Font families available to the layout. Neither has a bold or italic face;
/// both are simulated by the flow renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFamily {
    Sans,
    Mono,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub size_pt: f64,
}

impl Font {
    pub const fn sans(size_pt: f64) -> Self {
        Self {
            family: FontFamily::Sans,
            size_pt,
        }
    }

    pub const fn mono(size_pt: f64) -> Self {
        Self {
            family: FontFamily::Mono,
            size_pt,
        }
    }
}

/// Font plus fill color of a text cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: Font,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(font: Font, color: Rgb) -> Self {
        Self { font, color }
    }
}

/// An axis-aligned rectangle in page coordinates (mm, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Measures rendered string widths.
pub trait TextMeasure {
    /// Width of `text` in millimetres when set in `font`.
    fn text_width(&self, text: &str, font: Font) -> f64;
}

/// Drawing primitives addressed in the fixed page coordinate space.
pub trait Surface: TextMeasure {
    /// Starts a new, empty page.
    fn begin_page(&mut self) -> Result<()>;

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()>;

    /// Places `text` in a cell whose top-left corner is `(x, y)`. The text is vertically
    /// centred in a cell of `cell_height`.
    fn text(&mut self, x: f64, y: f64, cell_height: f64, text: &str, style: TextStyle)
        -> Result<()>;

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64) -> Result<()>;

    /// Shears everything drawn until the matching [`Surface::pop_transform`] horizontally
    /// by `degrees` around `origin`.
    fn push_shear(&mut self, degrees: f64, origin: (f64, f64)) -> Result<()>;

    fn pop_transform(&mut self) -> Result<()>;

    fn image(&mut self, image: &EmbeddedImage, rect: Rect) -> Result<()>;

    /// Registers `rect` as a clickable region pointing at `target`.
    fn link(&mut self, rect: Rect, target: &str) -> Result<()>;
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPage,
    FillRect {
        rect: Rect,
        color: Rgb,
    },
    Text {
        x: f64,
        y: f64,
        cell_height: f64,
        text: String,
        style: TextStyle,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Rgb,
        width: f64,
    },
    PushShear {
        degrees: f64,
        origin: (f64, f64),
    },
    PopTransform,
    Image {
        rect: Rect,
        pixel_width: u32,
        pixel_height: u32,
    },
    Link {
        rect: Rect,
        target: String,
    },
}

/// A surface that records every drawing call, for inspection or replay.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn page_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::BeginPage))
            .count()
    }

    /// Strings of all text cells, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Link targets of all registered clickable regions, in drawing order.
    pub fn link_targets(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Link { target, .. } => Some(target.as_str()),
            _ => None,
        })
    }
}

impl TextMeasure for DisplayList {
    fn text_width(&self, text: &str, font: Font) -> f64 {
        metrics::text_width(text, font)
    }
}

impl Surface for DisplayList {
    fn begin_page(&mut self) -> Result<()> {
        self.ops.push(DrawOp::BeginPage);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) -> Result<()> {
        self.ops.push(DrawOp::FillRect { rect, color });
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
        self.ops.push(DrawOp::Text {
            x,
            y,
            cell_height,
            text: text.to_string(),
            style,
        });
        Ok(())
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb, width: f64) -> Result<()> {
        self.ops.push(DrawOp::Line {
            from,
            to,
            color,
            width,
        });
        Ok(())
    }

    fn push_shear(&mut self, degrees: f64, origin: (f64, f64)) -> Result<()> {
        self.ops.push(DrawOp::PushShear { degrees, origin });
        Ok(())
    }

    fn pop_transform(&mut self) -> Result<()> {
        self.ops.push(DrawOp::PopTransform);
        Ok(())
    }

    fn image(&mut self, image: &EmbeddedImage, rect: Rect) -> Result<()> {
        self.ops.push(DrawOp::Image {
            rect,
            pixel_width: image.pixel_width,
            pixel_height: image.pixel_height,
        });
        Ok(())
    }

    fn link(&mut self, rect: Rect, target: &str) -> Result<()> {
        self.ops.push(DrawOp::Link {
            rect,
            target: target.to_string(),
        });
        Ok(())
    }
}

/// Lays content out without drawing it. Used to find out where an element would end
/// before committing it to the page.
pub(crate) struct MeasuringSurface<'a> {
    measure: &'a dyn TextMeasure,
}

impl<'a> MeasuringSurface<'a> {
    pub(crate) fn new(measure: &'a dyn TextMeasure) -> Self {
        Self { measure }
    }
}

impl TextMeasure for MeasuringSurface<'_> {
    fn text_width(&self, text: &str, font: Font) -> f64 {
        self.measure.text_width(text, font)
    }
}

impl Surface for MeasuringSurface<'_> {
    fn begin_page(&mut self) -> Result<()> {
        Ok(())
    }

    fn fill_rect(&mut self, _rect: Rect, _color: Rgb) -> Result<()> {
        Ok(())
    }

    fn text(&mut self, _x: f64, _y: f64, _h: f64, _text: &str, _style: TextStyle) -> Result<()> {
        Ok(())
    }

    fn line(&mut self, _from: (f64, f64), _to: (f64, f64), _color: Rgb, _w: f64) -> Result<()> {
        Ok(())
    }

    fn push_shear(&mut self, _degrees: f64, _origin: (f64, f64)) -> Result<()> {
        Ok(())
    }

    fn pop_transform(&mut self) -> Result<()> {
        Ok(())
    }

    fn image(&mut self, _image: &EmbeddedImage, _rect: Rect) -> Result<()> {
        Ok(())
    }

    fn link(&mut self, _rect: Rect, _target: &str) -> Result<()> {
        Ok(())
    }
}
