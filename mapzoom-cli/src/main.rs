//! mapzoom CLI - Command-line interface
//!
//! Reads a Mapnik XML style document and writes, for each requested zoom
//! level, the layers whose styles are visible at that zoom to
//! `<prefix><zoom>.json`.

mod error;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use mapzoom::export::{DEFAULT_INPUT, DEFAULT_PREFIX, DEFAULT_ZOOM_SPEC};
use mapzoom::{export_file, ExportConfig, ExportReport};
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "mapzoom")]
#[command(version)]
#[command(about = "Group Mapnik layers by the zoom levels at which they are visible", long_about = None)]
struct Args {
    /// Mapnik XML style document
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Zoom levels to export, e.g. "10-12,15" (levels outside 10-20 are ignored)
    #[arg(short, long, default_value = DEFAULT_ZOOM_SPEC)]
    zoom: String,

    /// Output filename prefix; files are named <PREFIX><ZOOM>.json
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,
}

impl Args {
    fn into_config(self) -> ExportConfig {
        ExportConfig::default()
            .with_input(self.input)
            .with_zoom_spec(self.zoom)
            .with_prefix(self.prefix)
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logging().and_then(|_| run(args)) {
        e.exit();
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = args.into_config();
    debug!(
        input = %config.input.display(),
        zoom_spec = %config.zoom_spec,
        prefix = %config.prefix,
        allowed = ?config.allowed,
        "Resolved export configuration"
    );

    let report = export_file(config)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &ExportReport) {
    if report.exports.is_empty() {
        println!("No zoom levels to export.");
        return;
    }

    for export in &report.exports {
        println!(
            "zoom {:>2}: {} layer(s) -> {}",
            export.zoom,
            export.layer_count,
            export.path.display()
        );
    }
}
