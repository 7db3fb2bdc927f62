//! Error types for document loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for document operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while loading a Mapnik document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read the document from disk.
    #[error("failed to read {}: {source}", .path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// The XML itself is malformed.
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The document ended with elements still open.
    #[error("unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// The document has no root element.
    #[error("document has no root element")]
    EmptyDocument,

    /// An element appeared where it is not allowed, e.g. a non-`Rule` child of `Style`.
    #[error("unexpected <{found}> inside <{parent}>")]
    UnexpectedElement { parent: String, found: String },

    /// A scale denominator is not a non-negative integer.
    #[error("invalid {element} in style \"{style}\": {value:?}")]
    InvalidScale {
        style: String,
        element: String,
        value: String,
    },

    /// A `Style` or `Layer` element has no `name` attribute.
    #[error("<{0}> element without a name attribute")]
    MissingName(String),
}
