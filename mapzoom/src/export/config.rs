//! Export configuration.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Default input document.
pub const DEFAULT_INPUT: &str = "mapnik.xml";

/// Default zoom specification.
pub const DEFAULT_ZOOM_SPEC: &str = "10-20";

/// Default output filename prefix.
pub const DEFAULT_PREFIX: &str = "layers_z";

/// Zoom levels an export may produce unless configured otherwise.
pub const DEFAULT_ALLOWED_ZOOMS: RangeInclusive<u8> = 10..=20;

/// Extension of the per-zoom output files.
pub const OUTPUT_EXTENSION: &str = "json";

/// Configuration for one export run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportConfig {
    /// Mapnik XML document to read.
    pub input: PathBuf,

    /// Requested zoom levels, e.g. `"10-12,15"`.
    pub zoom_spec: String,

    /// Output filename prefix; files are named `<prefix><zoom>.json`.
    pub prefix: String,

    /// Zoom levels outside this range are dropped from the request.
    pub allowed: RangeInclusive<u8>,

    /// Directory the output files are written to.
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            zoom_spec: DEFAULT_ZOOM_SPEC.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            allowed: DEFAULT_ALLOWED_ZOOMS,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExportConfig {
    /// Set the input document.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Set the zoom specification.
    pub fn with_zoom_spec(mut self, spec: impl Into<String>) -> Self {
        self.zoom_spec = spec.into();
        self
    }

    /// Set the output filename prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set the allowed zoom range.
    pub fn with_allowed(mut self, allowed: RangeInclusive<u8>) -> Self {
        self.allowed = allowed;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Path of the output file for `zoom`.
    pub fn output_path(&self, zoom: u8) -> PathBuf {
        self.output_dir.join(output_file_name(&self.prefix, zoom))
    }

    /// The input document path.
    pub fn input(&self) -> &Path {
        &self.input
    }
}

/// `<prefix><zoom>.json`
pub fn output_file_name(prefix: &str, zoom: u8) -> String {
    format!("{}{}.{}", prefix, zoom, OUTPUT_EXTENSION)
}
