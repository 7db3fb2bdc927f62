//! Error types for the export driver.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::document::DocumentError;
use crate::scale::ScaleError;
use crate::zoom_set::ZoomSpecError;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that abort an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The input document could not be loaded.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The zoom specification could not be parsed.
    #[error(transparent)]
    ZoomSpec(#[from] ZoomSpecError),

    /// A requested zoom level has no scale interval.
    #[error(transparent)]
    Scale(#[from] ScaleError),

    /// Failed to create or write an output file.
    #[error("failed to write {}: {source}", .path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// Failed to serialize a layer list.
    #[error("failed to serialize layers for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        source: serde_json::Error,
    },
}
