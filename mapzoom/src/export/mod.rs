//! Per-zoom layer export.
//!
//! For every requested zoom level the driver resolves the zoom's scale
//! interval, keeps the styles whose rules cover it, keeps the layers that use
//! one of those styles, and writes the surviving layers to
//! `<prefix><zoom>.json`. Zoom levels are processed strictly in order and each
//! file is flushed and closed before the next one is started.

mod config;
mod error;

pub use config::{
    output_file_name, ExportConfig, DEFAULT_ALLOWED_ZOOMS, DEFAULT_INPUT, DEFAULT_PREFIX,
    DEFAULT_ZOOM_SPEC, OUTPUT_EXTENSION,
};
pub use error::{ExportError, ExportResult};

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::document::{load_document, MapDocument};
use crate::layer::Layers;
use crate::scale::ScaleError;
use crate::zoom_set::{parse_zoom_spec, restrict};

/// One written output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoomExport {
    pub zoom: u8,
    pub path: PathBuf,
    /// Number of layers written for this zoom.
    pub layer_count: usize,
}

/// Summary of an export run, in zoom order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub exports: Vec<ZoomExport>,
}

impl ExportReport {
    /// Zoom levels that were written.
    pub fn zooms(&self) -> Vec<u8> {
        self.exports.iter().map(|e| e.zoom).collect()
    }
}

/// Layers of `document` using at least one style visible at `zoom`.
pub fn visible_layers(document: &MapDocument, zoom: u8) -> Result<Layers, ScaleError> {
    let styles = document.styles.visible_at_zoom_level(zoom as i32)?;
    Ok(document.layers.with_any_style(styles.names()))
}

/// Drives an export run for one configuration.
#[derive(Debug, Clone)]
pub struct ZoomExporter {
    config: ExportConfig,
}

impl ZoomExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Requested zoom levels, restricted to the allowed range.
    pub fn resolve_zooms(&self) -> ExportResult<BTreeSet<u8>> {
        let requested = parse_zoom_spec(&self.config.zoom_spec)?;
        let zooms = restrict(&requested, &self.config.allowed);

        let dropped: Vec<u8> = requested.difference(&zooms).copied().collect();
        if !dropped.is_empty() {
            debug!(
                ?dropped,
                allowed = ?self.config.allowed,
                "Ignoring zoom levels outside the allowed range"
            );
        }

        Ok(zooms)
    }

    /// Write one layer file per resolved zoom level.
    pub fn run(&self, document: &MapDocument) -> ExportResult<ExportReport> {
        let zooms = self.resolve_zooms()?;
        info!(
            zooms = zooms.len(),
            prefix = %self.config.prefix,
            "Exporting layers per zoom level"
        );

        if !zooms.is_empty() {
            fs::create_dir_all(&self.config.output_dir).map_err(|source| {
                ExportError::WriteFailed {
                    path: self.config.output_dir.clone(),
                    source,
                }
            })?;
        }

        let mut report = ExportReport::default();
        for zoom in zooms {
            report.exports.push(self.export_zoom(document, zoom)?);
        }

        Ok(report)
    }

    /// Filter and write the layers for a single zoom level.
    pub fn export_zoom(&self, document: &MapDocument, zoom: u8) -> ExportResult<ZoomExport> {
        let layers = visible_layers(document, zoom)?;
        let path = self.config.output_path(zoom);

        write_layers(&path, &layers)?;
        info!(zoom, layers = layers.len(), path = %path.display(), "Wrote zoom layers");

        Ok(ZoomExport {
            zoom,
            path,
            layer_count: layers.len(),
        })
    }
}

/// Load the configured document and run the export.
pub fn export_file(config: ExportConfig) -> ExportResult<ExportReport> {
    let document = load_document(config.input())?;
    ZoomExporter::new(config).run(&document)
}

fn write_layers(path: &Path, layers: &Layers) -> ExportResult<()> {
    let write_failed = |source: std::io::Error| ExportError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_failed)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, layers).map_err(|source| {
        ExportError::Serialize {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.write_all(b"\n").map_err(write_failed)?;
    writer.flush().map_err(write_failed)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    const DOC: &str = r#"<Map>
  <Style name="overview"><Rule><MinScaleDenominator>100000</MinScaleDenominator></Rule></Style>
  <Style name="detail"><Rule><MaxScaleDenominator>40000</MaxScaleDenominator></Rule></Style>
  <Layer name="countries"><StyleName>overview</StyleName></Layer>
  <Layer name="buildings"><StyleName>detail</StyleName></Layer>
  <Layer name="unstyled"/>
</Map>"#;

    fn names(layers: &Layers) -> Vec<&str> {
        layers.names().collect()
    }

    #[test]
    fn test_visible_layers_per_zoom() {
        let doc = parse_document(DOC).unwrap();

        // Zoom 10 spans [272989, 545979]
        assert_eq!(names(&visible_layers(&doc, 10).unwrap()), vec!["countries"]);
        // Zoom 12 spans [68247, 136495]; neither rule covers it
        assert!(visible_layers(&doc, 12).unwrap().is_empty());
        // Zoom 15 spans [8531, 17062]
        assert_eq!(names(&visible_layers(&doc, 15).unwrap()), vec!["buildings"]);
    }

    #[test]
    fn test_visible_layers_rejects_invalid_zoom() {
        let doc = parse_document(DOC).unwrap();
        assert_eq!(
            visible_layers(&doc, 21),
            Err(ScaleError::ZoomOutOfRange(21))
        );
    }

    #[test]
    fn test_resolve_zooms_drops_disallowed() {
        let exporter = ZoomExporter::new(ExportConfig::default().with_zoom_spec("5,9-11,20,21"));
        let zooms: Vec<u8> = exporter.resolve_zooms().unwrap().into_iter().collect();
        assert_eq!(zooms, vec![10, 11, 20]);
    }

    #[test]
    fn test_resolve_zooms_bad_spec() {
        let exporter = ZoomExporter::new(ExportConfig::default().with_zoom_spec("ten"));
        assert!(matches!(
            exporter.resolve_zooms(),
            Err(ExportError::ZoomSpec(_))
        ));
    }

    #[test]
    fn test_run_writes_one_file_per_zoom() {
        let dir = tempfile::tempdir().unwrap();
        let doc = parse_document(DOC).unwrap();
        let config = ExportConfig::default()
            .with_zoom_spec("10,12,15")
            .with_output_dir(dir.path());

        let report = ZoomExporter::new(config).run(&doc).unwrap();

        assert_eq!(report.zooms(), vec![10, 12, 15]);
        assert_eq!(
            report
                .exports
                .iter()
                .map(|e| e.layer_count)
                .collect::<Vec<_>>(),
            vec![1, 0, 1]
        );

        let z12 = fs::read_to_string(dir.path().join("layers_z12.json")).unwrap();
        assert_eq!(z12.trim(), "[]");

        let z15 = fs::read_to_string(dir.path().join("layers_z15.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&z15).unwrap();
        assert_eq!(json[0]["attributes"]["name"], "buildings");
        assert_eq!(json[0]["styles"], serde_json::json!(["detail"]));
    }

    #[test]
    fn test_run_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("out");
        let doc = parse_document(DOC).unwrap();
        let config = ExportConfig::default()
            .with_zoom_spec("10")
            .with_output_dir(&out);

        ZoomExporter::new(config).run(&doc).unwrap();
        assert!(out.join("layers_z10.json").exists());
    }

    #[test]
    fn test_run_with_nothing_requested_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let doc = parse_document(DOC).unwrap();
        let config = ExportConfig::default()
            .with_zoom_spec("1-5")
            .with_output_dir(dir.path());

        let report = ZoomExporter::new(config).run(&doc).unwrap();
        assert!(report.exports.is_empty());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_write_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let doc = parse_document(DOC).unwrap();
        let config = ExportConfig::default()
            .with_zoom_spec("10")
            .with_output_dir(&blocker);

        assert!(matches!(
            ZoomExporter::new(config).run(&doc),
            Err(ExportError::WriteFailed { .. })
        ));
    }
}
