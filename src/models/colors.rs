use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    /// Formats as an SVG/CSS hex color (`#rrggbb`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The color scheme of the rendered pages.
///
/// Passed explicitly to every renderer; there is no global theme state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    // Title page
    pub title_background: Rgb,
    pub title_text: Rgb,
    pub title_subtext: Rgb,
    pub title_date: Rgb,

    // Content slides
    pub slide_background: Rgb,
    pub slide_title: Rgb,
    pub slide_title_line: Rgb,
    pub slide_text: Rgb,

    // Code blocks
    pub code_background: Rgb,
    pub code_text: Rgb,
    /// Also used for the truncation ellipsis.
    pub code_line_number: Rgb,

    // Inline code
    pub inline_code_background: Rgb,
    pub inline_code_text: Rgb,

    pub link_color: Rgb,

    // Blockquotes
    pub blockquote_background: Rgb,
    pub blockquote_border: Rgb,
}

impl Theme {
    /// The default light theme: blue title page, white slides.
    pub fn light() -> Self {
        Self {
            title_background: Rgb::new(41, 128, 185),
            title_text: Rgb::new(255, 255, 255),
            title_subtext: Rgb::new(255, 255, 255),
            title_date: Rgb::new(255, 255, 255),
            slide_background: Rgb::new(255, 255, 255),
            slide_title: Rgb::new(41, 128, 185),
            slide_title_line: Rgb::new(41, 128, 185),
            slide_text: Rgb::new(0, 0, 0),
            code_background: Rgb::new(40, 44, 52),
            code_text: Rgb::new(171, 178, 191),
            code_line_number: Rgb::new(128, 128, 128),
            inline_code_background: Rgb::new(235, 236, 240),
            inline_code_text: Rgb::new(199, 37, 78),
            link_color: Rgb::new(0, 102, 204),
            blockquote_background: Rgb::new(240, 247, 255),
            blockquote_border: Rgb::new(41, 128, 185),
        }
    }

    /// A dark theme with light text on blue-gray slides.
    pub fn dark() -> Self {
        Self {
            title_background: Rgb::new(30, 30, 46),
            title_text: Rgb::new(205, 214, 244),
            title_subtext: Rgb::new(166, 173, 200),
            title_date: Rgb::new(137, 180, 250),
            slide_background: Rgb::new(36, 39, 58),
            slide_title: Rgb::new(137, 180, 250),
            slide_title_line: Rgb::new(137, 180, 250),
            slide_text: Rgb::new(205, 214, 244),
            code_background: Rgb::new(30, 30, 46),
            code_text: Rgb::new(205, 214, 244),
            code_line_number: Rgb::new(108, 112, 134),
            inline_code_background: Rgb::new(54, 58, 79),
            inline_code_text: Rgb::new(243, 139, 168),
            link_color: Rgb::new(137, 180, 250),
            blockquote_background: Rgb::new(48, 52, 72),
            blockquote_border: Rgb::new(137, 180, 250),
        }
    }

    /// Looks up a built-in theme by name.
    pub fn by_name(name: &str) -> Option<Theme> {
        builtin_themes().shift_remove(name)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Built-in themes in presentation order.
pub fn builtin_themes() -> IndexMap<&'static str, Theme> {
    let mut themes = IndexMap::new();
    themes.insert("light", Theme::light());
    themes.insert("dark", Theme::dark());
    themes
}

/// Names of the built-in themes, default first.
pub fn available_themes() -> Vec<&'static str> {
    builtin_themes().keys().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_display_is_hex() {
        assert_eq!(Rgb::new(41, 128, 185).to_string(), "#2980b9");
        assert_eq!(Rgb::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_available_themes() {
        assert_eq!(available_themes(), vec!["light", "dark"]);
        assert_eq!(Theme::by_name("dark"), Some(Theme::dark()));
        assert!(Theme::by_name("solarized").is_none());
    }

    #[test]
    fn test_link_colors_differ_from_text() {
        for theme in builtin_themes().values() {
            assert_ne!(theme.link_color, theme.slide_text);
        }
    }

    #[test]
    fn test_theme_json_round_trip_uses_camel_case() {
        let json = serde_json::to_string(&Theme::light()).unwrap();
        assert!(json.contains("\"inlineCodeBackground\""));
        let back: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Theme::light());
    }
}
