//! Approximate string widths for the two font families.
//!
//! Sans-serif widths follow Helvetica's advance widths (in em) for the common
//! character classes; the monospace family uses a fixed advance.

use super::constants::MM_PER_PT;
use super::surface::{Font, FontFamily};
use unicode_width::UnicodeWidthChar;

const MONO_ADVANCE_EM: f64 = 0.6;

/// Width of `text` in millimetres when set in `font`.
pub fn text_width(text: &str, font: Font) -> f64 {
    let em: f64 = text.chars().map(|c| char_advance(c, font.family)).sum();
    em * font.size_pt * MM_PER_PT
}

fn char_advance(c: char, family: FontFamily) -> f64 {
    match c.width() {
        Some(0) | None => return 0.0,
        Some(2) => return 1.0,
        _ => {}
    }
    if family == FontFamily::Mono {
        return MONO_ADVANCE_EM;
    }
    match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | ']' | '\\' | 'I' | 'f' | 't' => 0.278,
        '\'' | '|' => 0.191,
        'i' | 'j' | 'l' => 0.222,
        '"' => 0.355,
        '(' | ')' | '-' | '`' | 'r' => 0.333,
        '*' => 0.389,
        '{' | '}' => 0.334,
        'J' | 'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 0.5,
        '+' | '<' | '=' | '>' | '~' => 0.584,
        '#' | '$' | '?' | '_' => 0.556,
        '%' | 'm' | 'M' => 0.833,
        '&' | 'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 0.667,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 0.722,
        'F' | 'T' | 'Z' => 0.611,
        'G' | 'O' | 'Q' => 0.778,
        'L' => 0.556,
        '@' => 1.015,
        'W' => 0.944,
        c if c.is_ascii_digit() => 0.556,
        c if c.is_uppercase() => 0.667,
        _ => 0.556,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_width_is_uniform() {
        let font = Font::mono(10.0);
        assert!((text_width("iiii", font) - text_width("MMMM", font)).abs() < 1e-9);
        assert!((text_width("ab", font) - 2.0 * 0.6 * 10.0 * MM_PER_PT).abs() < 1e-9);
    }

    #[test]
    fn test_sans_width_depends_on_glyph() {
        let font = Font::sans(18.0);
        assert!(text_width("MMMM", font) > text_width("iiii", font));
    }

    #[test]
    fn test_zero_width_marker_has_no_width() {
        let font = Font::sans(18.0);
        assert_eq!(
            text_width("\u{200C}// note", font),
            text_width("// note", font)
        );
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = text_width("hello", Font::sans(10.0));
        let large = text_width("hello", Font::sans(20.0));
        assert!((large - 2.0 * small).abs() < 1e-9);
    }
}
