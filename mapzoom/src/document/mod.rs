//! Mapnik document loading.
//!
//! Reads the top-level `<Style>` and `<Layer>` elements of a Mapnik XML map
//! into [`Styles`] and [`Layers`]:
//!
//! ```xml
//! <Map>
//!   <Style name="roads">
//!     <Rule>
//!       <MaxScaleDenominator>100000</MaxScaleDenominator>
//!       <LineSymbolizer stroke="#888"/>
//!     </Rule>
//!   </Style>
//!   <Layer name="roads" srs="+init=epsg:3857">
//!     <StyleName>roads</StyleName>
//!     <Datasource>
//!       <Parameter name="type">postgis</Parameter>
//!     </Datasource>
//!   </Layer>
//! </Map>
//! ```
//!
//! Every child of a `Style` must be a `Rule`. Anything else aborts the load,
//! since dropping a rule would change which zoom levels the style is visible at.

mod error;
mod tree;

pub use error::{DocumentError, DocumentResult};
pub use tree::{read_tree, Element};

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::layer::{DatasourceParameter, Layer, Layers};
use crate::style::{Rule, Style, Styles};

const STYLE_TAG: &str = "Style";
const RULE_TAG: &str = "Rule";
const LAYER_TAG: &str = "Layer";
const STYLE_NAME_TAG: &str = "StyleName";
const DATASOURCE_TAG: &str = "Datasource";
const MIN_SCALE_TAG: &str = "MinScaleDenominator";
const MAX_SCALE_TAG: &str = "MaxScaleDenominator";

/// Styles and layers of one Mapnik document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapDocument {
    pub styles: Styles,
    pub layers: Layers,
}

/// Read and parse the Mapnik document at `path`.
pub fn load_document(path: impl AsRef<Path>) -> DocumentResult<MapDocument> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path).map_err(|source| DocumentError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let document = parse_document(&xml)?;
    info!(
        path = %path.display(),
        styles = document.styles.len(),
        layers = document.layers.len(),
        "Loaded map document"
    );
    Ok(document)
}

/// Parse a Mapnik document from a string.
pub fn parse_document(xml: &str) -> DocumentResult<MapDocument> {
    let root = read_tree(xml)?;

    let styles = root
        .children_named(STYLE_TAG)
        .map(parse_style)
        .collect::<DocumentResult<Styles>>()?;

    let layers = root
        .children_named(LAYER_TAG)
        .map(parse_layer)
        .collect::<DocumentResult<Layers>>()?;

    Ok(MapDocument { styles, layers })
}

fn parse_style(element: &Element) -> DocumentResult<Style> {
    let name = required_name(element)?;

    let rules = element
        .children
        .iter()
        .map(|child| {
            if child.name != RULE_TAG {
                return Err(DocumentError::UnexpectedElement {
                    parent: STYLE_TAG.to_string(),
                    found: child.name.clone(),
                });
            }
            parse_rule(name, child)
        })
        .collect::<DocumentResult<Vec<_>>>()?;

    debug!(style = name, rules = rules.len(), "Parsed style");
    Ok(Style::new(element.attributes.clone(), rules))
}

/// Only the scale denominators matter here; symbolizers and filters are skipped.
fn parse_rule(style: &str, element: &Element) -> DocumentResult<Rule> {
    let mut min_scale = None;
    let mut max_scale = None;

    for child in &element.children {
        match child.name.as_str() {
            MIN_SCALE_TAG => min_scale = Some(parse_scale(style, child)?),
            MAX_SCALE_TAG => max_scale = Some(parse_scale(style, child)?),
            _ => {}
        }
    }

    Ok(Rule::new(min_scale, max_scale))
}

fn parse_scale(style: &str, element: &Element) -> DocumentResult<u64> {
    let raw = element.text.as_deref().unwrap_or_default();
    raw.trim()
        .parse::<u64>()
        .map_err(|_| DocumentError::InvalidScale {
            style: style.to_string(),
            element: element.name.clone(),
            value: raw.to_string(),
        })
}

fn parse_layer(element: &Element) -> DocumentResult<Layer> {
    required_name(element)?;
    let mut layer = Layer::new(element.attributes.clone());

    for child in &element.children {
        match child.name.as_str() {
            STYLE_NAME_TAG => {
                // An empty <StyleName/> references nothing.
                let style = child.text.as_deref().unwrap_or_default().trim();
                if !style.is_empty() {
                    layer.styles.push(style.to_string());
                }
            }
            DATASOURCE_TAG => {
                layer
                    .datasources
                    .extend(child.children.iter().map(|parameter| {
                        DatasourceParameter::new(
                            parameter.attributes.clone(),
                            parameter.text.clone(),
                        )
                    }));
            }
            _ => {}
        }
    }

    debug!(
        layer = layer.name(),
        styles = layer.styles.len(),
        parameters = layer.datasources.len(),
        "Parsed layer"
    );
    Ok(layer)
}

fn required_name(element: &Element) -> DocumentResult<&str> {
    element
        .attributes
        .get("name")
        .map(String::as_str)
        .ok_or_else(|| DocumentError::MissingName(element.name.clone()))
}
