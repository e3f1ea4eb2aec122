//! Defines the fixed page geometry and typography used throughout the layout.
//! All lengths are in millimetres, font sizes in points.

// A4 landscape
pub const PAGE_WIDTH: f64 = 297.0;
pub const PAGE_HEIGHT: f64 = 210.0;

pub const MM_PER_PT: f64 = 25.4 / 72.0;

// Content area
pub const CONTENT_X: f64 = 20.0;
pub const CONTENT_WIDTH: f64 = 257.0;
pub const CONTENT_TOP: f64 = 45.0;
/// Content whose cursor passes this line overflows the slide.
pub const CONTENT_BOTTOM: f64 = 190.0;

// Slide chrome
pub const SLIDE_TITLE_Y: f64 = 15.0;
pub const SLIDE_TITLE_LINE_HEIGHT: f64 = 12.0;
pub const SLIDE_TITLE_RULE_Y: f64 = 36.0;
pub const SLIDE_TITLE_RULE_WIDTH: f64 = 0.5;

// Title page
pub const TITLE_PAGE_TITLE_Y: f64 = 70.0;
pub const TITLE_PAGE_SUBTITLE_Y: f64 = 95.0;
pub const TITLE_PAGE_AUTHORS_Y: f64 = 130.0;
pub const TITLE_PAGE_AUTHOR_SPACING: f64 = 15.0;
pub const TITLE_PAGE_DATE_Y: f64 = 180.0;
pub const TITLE_PAGE_TITLE_LINE_HEIGHT: f64 = 23.0;
pub const TITLE_PAGE_SUBTITLE_LINE_HEIGHT: f64 = 15.0;
pub const TITLE_PAGE_AUTHOR_LINE_HEIGHT: f64 = 12.0;
pub const TITLE_PAGE_DATE_LINE_HEIGHT: f64 = 9.0;

// Font sizes (pt)
pub const TITLE_PAGE_TITLE_SIZE: f64 = 54.0;
pub const TITLE_PAGE_SUBTITLE_SIZE: f64 = 30.0;
pub const TITLE_PAGE_AUTHOR_SIZE: f64 = 21.0;
pub const TITLE_PAGE_DATE_SIZE: f64 = 18.0;
pub const SLIDE_TITLE_SIZE: f64 = 29.0;
pub const PLAIN_TEXT_SIZE: f64 = 21.0;
pub const BODY_TEXT_SIZE: f64 = 18.0;
pub const INLINE_CODE_SIZE: f64 = 16.0;
pub const CODE_SIZE: f64 = 11.0;

// Flow text
pub const PLAIN_TEXT_LINE_HEIGHT: f64 = 11.0;
pub const PLAIN_TEXT_SPACING: f64 = 4.0;
/// Markup without block elements.
pub const FALLBACK_TEXT_LINE_HEIGHT: f64 = 9.0;
pub const FALLBACK_TEXT_SPACING: f64 = 3.0;
pub const PARAGRAPH_LINE_HEIGHT: f64 = 11.0;
pub const PARAGRAPH_SPACING: f64 = 5.0;
pub const BOLD_OFFSET: f64 = 0.2;
/// Shear angle (degrees) simulating italics.
pub const ITALIC_SKEW: f64 = 12.0;
pub const LINK_UNDERLINE_WIDTH: f64 = 0.2;

// Lists
pub const LIST_BULLET_X: f64 = 25.0;
pub const LIST_TEXT_X: f64 = 30.0;
pub const LIST_TEXT_WIDTH: f64 = 247.0;
pub const LIST_LINE_HEIGHT: f64 = 9.0;
pub const LIST_ITEM_SPACING: f64 = 3.0;
pub const LIST_SPACING: f64 = 6.0;
pub const BULLET: &str = "\u{2022} ";

// Hyperlink directive
pub const LINK_SPACING: f64 = 4.0;

// Code blocks
pub const CODE_TEXT_X: f64 = 25.0;
pub const CODE_LINE_HEIGHT: f64 = 6.0;
pub const MAX_CODE_LINES: usize = 20;
/// Upper bound for the code area, independent of the number of lines.
pub const MAX_CODE_HEIGHT: f64 = 120.0;
pub const CODE_TOP_PADDING: f64 = 2.0;
pub const CODE_BOX_PADDING: f64 = 5.0;
pub const CODE_SPACING: f64 = 12.0;
pub const CODE_ELLIPSIS: &str = "...";
/// Columns between tab stops in code.
pub const CODE_TAB_WIDTH: usize = 4;

// Blockquotes
pub const BLOCKQUOTE_BORDER_WIDTH: f64 = 4.0;
pub const BLOCKQUOTE_TEXT_X: f64 = 28.0;
pub const BLOCKQUOTE_TEXT_WIDTH: f64 = 249.0;
pub const BLOCKQUOTE_PADDING: f64 = 4.0;
pub const BLOCKQUOTE_PARAGRAPH_SPACING: f64 = 3.0;
pub const BLOCKQUOTE_SPACING: f64 = 5.0;

// Images
pub const IMAGE_SPACING: f64 = 5.0;
/// Images are skipped when less vertical space than this remains.
pub const MIN_IMAGE_SPACE: f64 = 5.0;
pub const PX_TO_MM: f64 = 25.4 / 72.0;

/// Language assumed for code blocks without any language hint.
pub const DEFAULT_CODE_LANGUAGE: &str = "go";
/// Syntax theme used when none is configured.
pub const DEFAULT_CODE_THEME: &str = "base16-ocean.dark";
