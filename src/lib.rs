pub mod converters;
pub mod errors;
pub mod models;
pub mod preprocess;

pub use converters::layout::{
    available_code_themes, convert_document_to_svg, Converter, ConverterBuilder, Diagnostic,
    DiagnosticKind, SvgOutput,
};
pub use errors::{ConversionError, Result};
pub use models::colors::{available_themes, Theme};
pub use models::document::{ContentElement, Document, Slide};
pub use preprocess::preprocess_source;

mod wasm;
pub use wasm::convert_document_json;
