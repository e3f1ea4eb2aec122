pub mod colors;
pub mod document;
