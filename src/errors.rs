use thiserror::Error;

/// Represents the errors that abort a conversion.
///
/// Content problems inside a slide (overflow, truncated code, missing images) are never
/// surfaced here; they are reported as [`Diagnostic`](crate::Diagnostic)s instead.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Formatting error while writing SVG markup.
    #[error("Formatting error during SVG generation: {0}")]
    FormatError(#[from] std::fmt::Error),

    /// The document or a theme file could not be (de)serialized.
    #[error("Failed to deserialize JSON input: {0}")]
    JsonDeserialization(#[from] serde_json::Error),

    /// The requested page theme is not registered.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// The requested syntax highlighting theme is not available.
    #[error("Unknown code theme: {0}")]
    UnknownCodeTheme(String),

    /// An I/O error occurred, e.g. while reading a theme file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// An internal invariant was violated.
    #[error("An internal error occurred during conversion: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, ConversionError>` for convenience within the crate.
pub type Result<T> = std::result::Result<T, ConversionError>;
