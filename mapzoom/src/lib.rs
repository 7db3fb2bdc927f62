//! mapzoom - Per-zoom layer extraction for Mapnik style documents
//!
//! This library reads the `Style` and `Layer` definitions of a Mapnik XML
//! document, works out which styles are visible at each web-map zoom level
//! from their rules' scale denominators, and writes the layers that use those
//! styles to one JSON file per zoom level.
//!
//! # Pipeline
//!
//! ```text
//! mapnik.xml ─► document::parse_document ─► Styles + Layers
//!                                               │
//!        zoom spec "10-20" ─► zoom_set ─► ZoomExporter ─► layers_z10.json ...
//! ```

pub mod document;
pub mod export;
pub mod layer;
pub mod scale;
pub mod style;
pub mod zoom_set;

pub use document::{load_document, parse_document, DocumentError, MapDocument};
pub use export::{export_file, ExportConfig, ExportError, ExportReport, ZoomExporter};
pub use layer::{DatasourceParameter, Layer, Layers};
pub use scale::{zoom_limits, ScaleError, ScaleInterval, MAX_ZOOM, MIN_ZOOM, SCALE_TABLE};
pub use style::{Rule, Style, Styles};

use thiserror::Error;

/// Error returned when a name lookup on a collection finds nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// No style carries the requested name.
    #[error("no style with name: \"{0}\"")]
    StyleNotFound(String),

    /// No layer carries the requested name.
    #[error("no layer with name: \"{0}\"")]
    LayerNotFound(String),
}
