//! Layers, their datasource parameters, and style-based layer filtering.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::LookupError;

/// One `<Parameter>` of a layer's `<Datasource>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasourceParameter {
    /// Attributes of the parameter element (usually just `name`).
    pub attributes: BTreeMap<String, String>,
    /// Literal text content, `None` for an empty element.
    pub parameter: Option<String>,
}

impl DatasourceParameter {
    pub fn new(attributes: BTreeMap<String, String>, parameter: Option<String>) -> Self {
        Self {
            attributes,
            parameter,
        }
    }
}

/// A named Mapnik layer.
///
/// Source attributes serialize under `"attributes"` rather than beside
/// `styles` and `datasources`, so an attribute that happens to be called
/// `styles` cannot shadow the style list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layer {
    /// Attributes of the `<Layer>` element, including `name`.
    pub attributes: BTreeMap<String, String>,
    /// Referenced style names in document order.
    pub styles: Vec<String>,
    /// Datasource parameters in document order, carried through unmodified.
    pub datasources: Vec<DatasourceParameter>,
}

impl Layer {
    /// Create a layer with no styles or datasource parameters.
    pub fn new(attributes: BTreeMap<String, String>) -> Self {
        Self {
            attributes,
            styles: Vec::new(),
            datasources: Vec::new(),
        }
    }

    /// The layer's `name` attribute, or an empty string when unset.
    pub fn name(&self) -> &str {
        self.attributes
            .get("name")
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Returns true if the layer references `style`.
    pub fn uses_style(&self, style: &str) -> bool {
        self.styles.iter().any(|s| s == style)
    }
}

/// Ordered collection of layers.
///
/// Serializes as a JSON array of layer records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Layers {
    layers: Vec<Layer>,
}

impl Layers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    /// Layer names in collection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(Layer::name)
    }

    /// Layer at position `index`, if any.
    pub fn get_by_position(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// First layer whose name equals `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::LayerNotFound`] if no layer matches.
    pub fn find_by_name(&self, name: &str) -> Result<&Layer, LookupError> {
        self.layers
            .iter()
            .find(|layer| layer.name() == name)
            .ok_or_else(|| LookupError::LayerNotFound(name.to_string()))
    }

    /// Layers referencing `style`.
    pub fn with_style(&self, style: &str) -> Layers {
        self.layers
            .iter()
            .filter(|layer| layer.uses_style(style))
            .cloned()
            .collect()
    }

    /// Layers referencing at least one of `styles`.
    ///
    /// To filter by a single name, use [`Layers::with_style`] or pass a
    /// one-element slice.
    pub fn with_any_style<I, S>(&self, styles: I) -> Layers
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let wanted: HashSet<String> = styles
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .collect();

        self.layers
            .iter()
            .filter(|layer| layer.styles.iter().any(|s| wanted.contains(s)))
            .cloned()
            .collect()
    }
}

impl FromIterator<Layer> for Layers {
    fn from_iter<I: IntoIterator<Item = Layer>>(iter: I) -> Self {
        Self {
            layers: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Layers {
    type Item = Layer;
    type IntoIter = std::vec::IntoIter<Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.into_iter()
    }
}

impl<'a> IntoIterator for &'a Layers {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
