//! Error types for slide show loading, saving and navigation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the document model and its accessors.
///
/// Per-item problems (a bad `level`, an unknown item kind, an image that
/// cannot be read) are logged and recovered where they occur and never show
/// up here.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read or write a file.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The document is not well-formed XML.
    #[error("XML parsing error: {0}")]
    XmlError(String),

    /// The document is well-formed but is not a slide show.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A slide index outside `0..len`.
    #[error("Slide index {index} out of range (presentation has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },

    /// An item index outside `0..len`.
    #[error("Item index {index} out of range (slide has {len} items)")]
    ItemOutOfRange { index: usize, len: usize },

    /// The operation is not available for this accessor or value.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}
