//! Non-fatal problems found while laying out slides.

use log::warn;
use std::fmt;

use super::image::ImageLoadError;

#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// Content passed the bottom boundary; the crossing element and all later elements
    /// of the slide were dropped. `y` is where the crossing element would have ended.
    Overflow { y: f64 },
    /// A code block had more lines than fit and was cut off.
    CodeTruncated { max_lines: usize, lines: usize },
    /// An image was skipped. The message carries the path and the cause.
    ImageSkipped { message: String },
}

/// A problem on one slide. Slides are numbered from 1, not counting the title page.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub slide_number: usize,
    pub slide_title: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (number, title) = (self.slide_number, &self.slide_title);
        match &self.kind {
            DiagnosticKind::Overflow { y } => write!(
                f,
                "slide {number} \"{title}\" does not fit - content overflow (y={y:.0}), some elements cut off"
            ),
            DiagnosticKind::CodeTruncated { max_lines, lines } => write!(
                f,
                "code block truncated on slide {number} \"{title}\" (max {max_lines} lines, has {lines})"
            ),
            DiagnosticKind::ImageSkipped { message } => {
                write!(f, "slide {number} \"{title}\": {message}")
            }
        }
    }
}

impl DiagnosticKind {
    pub fn image_skipped(err: &ImageLoadError) -> Self {
        DiagnosticKind::ImageSkipped {
            message: err.to_string(),
        }
    }
}

/// Collects the diagnostics of one conversion and logs each one as a warning unless quiet.
#[derive(Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    quiet: bool,
}

impl Diagnostics {
    pub fn new(quiet: bool) -> Self {
        Self {
            entries: Vec::new(),
            quiet,
        }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if !self.quiet {
            warn!("{}", diagnostic);
        }
        self.entries.push(diagnostic);
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn diagnostic(kind: DiagnosticKind) -> Diagnostic {
        Diagnostic {
            slide_number: 3,
            slide_title: "Channels".to_string(),
            kind,
        }
    }

    #[test]
    fn test_overflow_message() {
        let d = diagnostic(DiagnosticKind::Overflow { y: 201.6 });
        assert_eq!(
            d.to_string(),
            "slide 3 \"Channels\" does not fit - content overflow (y=202), some elements cut off"
        );
    }

    #[test]
    fn test_truncation_message() {
        let d = diagnostic(DiagnosticKind::CodeTruncated {
            max_lines: 20,
            lines: 35,
        });
        assert_eq!(
            d.to_string(),
            "code block truncated on slide 3 \"Channels\" (max 20 lines, has 35)"
        );
    }

    #[test]
    fn test_image_message() {
        let err = ImageLoadError::NotFound(PathBuf::from("img/missing.png"));
        let d = diagnostic(DiagnosticKind::image_skipped(&err));
        assert_eq!(
            d.to_string(),
            "slide 3 \"Channels\": image not found: img/missing.png"
        );
    }

    #[test]
    fn test_quiet_still_collects() {
        let mut diagnostics = Diagnostics::new(true);
        diagnostics.push(diagnostic(DiagnosticKind::Overflow { y: 195.0 }));
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics.into_vec()[0].slide_number, 3);
    }
}
