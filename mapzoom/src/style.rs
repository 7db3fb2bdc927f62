//! Styles, their rules, and scale-based style filtering.

use std::collections::BTreeMap;

use tracing::debug;

use crate::scale::{zoom_limits, ScaleError, ScaleInterval, SCALE_TABLE};
use crate::LookupError;

/// A single style rule, reduced to its scale denominator bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// `MinScaleDenominator`, 0 when absent.
    pub min_scale: u64,
    /// `MaxScaleDenominator`, the zoom 0 denominator when absent.
    pub max_scale: u64,
}

impl Rule {
    /// Create a rule from optional bounds, applying the defaults.
    pub fn new(min_scale: Option<u64>, max_scale: Option<u64>) -> Self {
        Self {
            min_scale: min_scale.unwrap_or(0),
            max_scale: max_scale.unwrap_or(SCALE_TABLE[0]),
        }
    }

    /// The scale interval over which this rule is active.
    pub fn interval(&self) -> ScaleInterval {
        ScaleInterval::new(self.min_scale, self.max_scale)
    }

    /// Returns true if the rule is active over the whole of `query`.
    #[inline]
    pub fn covers(&self, query: &ScaleInterval) -> bool {
        query.is_within(&self.interval())
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A named Mapnik style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    /// Attributes of the `<Style>` element, including `name`.
    pub attributes: BTreeMap<String, String>,
    /// Rules in document order.
    pub rules: Vec<Rule>,
}

impl Style {
    /// Create a style from its attributes and rules.
    pub fn new(attributes: BTreeMap<String, String>, rules: Vec<Rule>) -> Self {
        Self { attributes, rules }
    }

    /// The style's `name` attribute, or an empty string when unset.
    pub fn name(&self) -> &str {
        self.attributes
            .get("name")
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Returns true if at least one rule covers `query`.
    ///
    /// Stops at the first covering rule.
    pub fn is_visible_over(&self, query: &ScaleInterval) -> bool {
        self.rules.iter().any(|rule| rule.covers(query))
    }
}

/// Ordered collection of styles.
///
/// Filtering methods return new collections and leave `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styles {
    styles: Vec<Style>,
}

impl Styles {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a style, keeping insertion order.
    pub fn push(&mut self, style: Style) {
        self.styles.push(style);
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Style> {
        self.styles.iter()
    }

    /// Style names in collection order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(Style::name)
    }

    /// Style at position `index`, if any.
    pub fn get_by_position(&self, index: usize) -> Option<&Style> {
        self.styles.get(index)
    }

    /// First style whose name equals `name`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::StyleNotFound`] if no style matches.
    pub fn find_by_name(&self, name: &str) -> Result<&Style, LookupError> {
        self.styles
            .iter()
            .find(|style| style.name() == name)
            .ok_or_else(|| LookupError::StyleNotFound(name.to_string()))
    }

    /// Styles with at least one rule covering `[scale_min, scale_max]`.
    ///
    /// A rule covers the query when `rule.min <= scale_min` and
    /// `rule.max >= scale_max`. Partial overlap does not count.
    pub fn find_by_scale(&self, scale_min: u64, scale_max: u64) -> Styles {
        let query = ScaleInterval::new(scale_min, scale_max);
        self.styles
            .iter()
            .filter(|style| style.is_visible_over(&query))
            .cloned()
            .collect()
    }

    /// Styles visible from scale 0 up to `scale_max`.
    pub fn with_scale_leq_than(&self, scale_max: u64) -> Styles {
        self.find_by_scale(0, scale_max)
    }

    /// Styles visible from `scale_min` up to the zoom 0 denominator.
    pub fn with_scale_geq_than(&self, scale_min: u64) -> Styles {
        self.find_by_scale(scale_min, SCALE_TABLE[0])
    }

    /// Styles visible across the whole scale band of `zoom`.
    ///
    /// # Errors
    ///
    /// Returns [`ScaleError::ZoomOutOfRange`] for an invalid zoom level.
    pub fn visible_at_zoom_level(&self, zoom: i32) -> Result<Styles, ScaleError> {
        let limits = zoom_limits(zoom)?;
        debug!(zoom, min = limits.min, max = limits.max, "Resolved zoom scale interval");
        Ok(self.find_by_scale(limits.min, limits.max))
    }
}

impl FromIterator<Style> for Styles {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        Self {
            styles: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Styles {
    type Item = Style;
    type IntoIter = std::vec::IntoIter<Style>;

    fn into_iter(self) -> Self::IntoIter {
        self.styles.into_iter()
    }
}

impl<'a> IntoIterator for &'a Styles {
    type Item = &'a Style;
    type IntoIter = std::slice::Iter<'a, Style>;

    fn into_iter(self) -> Self::IntoIter {
        self.styles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::{MAX_ZOOM, MIN_ZOOM};

    fn style(name: &str, rules: &[(Option<u64>, Option<u64>)]) -> Style {
        let mut attributes = BTreeMap::new();
        attributes.insert("name".to_string(), name.to_string());
        let rules = rules.iter().map(|(min, max)| Rule::new(*min, *max)).collect();
        Style::new(attributes, rules)
    }

    fn names(styles: &Styles) -> Vec<&str> {
        styles.names().collect()
    }

    #[test]
    fn test_rule_defaults() {
        let rule = Rule::default();
        assert_eq!(rule.min_scale, 0);
        assert_eq!(rule.max_scale, SCALE_TABLE[0]);
    }

    #[test]
    fn test_find_by_scale_is_containment() {
        let styles: Styles = vec![style("a", &[(Some(0), Some(1000))])].into_iter().collect();

        assert_eq!(names(&styles.find_by_scale(200, 800)), vec!["a"]);
        // Max bound violated
        assert!(styles.find_by_scale(200, 1200).is_empty());
    }

    #[test]
    fn test_find_by_scale_rejects_rule_starting_above_query_min() {
        let styles: Styles = vec![style("a", &[(Some(500), Some(1000))])].into_iter().collect();
        assert!(styles.find_by_scale(200, 800).is_empty());
    }

    #[test]
    fn test_any_covering_rule_is_enough() {
        let styles: Styles = vec![style(
            "roads",
            &[(Some(0), Some(100)), (Some(0), Some(5000)), (Some(9000), None)],
        )]
        .into_iter()
        .collect();

        let found = styles.find_by_scale(200, 800);
        assert_eq!(found.len(), 1);
        assert_eq!(found.get_by_position(0).unwrap().name(), "roads");
    }

    #[test]
    fn test_find_by_scale_preserves_order_and_original() {
        let styles: Styles = vec![
            style("c", &[(None, None)]),
            style("narrow", &[(Some(0), Some(10))]),
            style("a", &[(None, Some(1_000_000))]),
        ]
        .into_iter()
        .collect();

        let found = styles.find_by_scale(500, 600);
        assert_eq!(names(&found), vec!["c", "a"]);
        assert_eq!(styles.len(), 3, "original collection must be untouched");
    }

    #[test]
    fn test_style_without_rules_is_never_visible() {
        let styles: Styles = vec![style("empty", &[])].into_iter().collect();
        assert!(styles.find_by_scale(0, 0).is_empty());
    }

    #[test]
    fn test_with_scale_leq_and_geq() {
        let styles: Styles = vec![
            style("fine", &[(None, Some(5000))]),
            style("coarse", &[(Some(5000), None)]),
        ]
        .into_iter()
        .collect();

        assert_eq!(names(&styles.with_scale_leq_than(4000)), vec!["fine"]);
        assert_eq!(names(&styles.with_scale_geq_than(6000)), vec!["coarse"]);
    }

    #[test]
    fn test_visible_at_zoom_level_uses_zoom_band() {
        // Zoom 12 spans [68247, 136495]
        let styles: Styles = vec![
            style("z12", &[(Some(68_000), Some(140_000))]),
            style("z13", &[(Some(34_124), Some(68_247))]),
        ]
        .into_iter()
        .collect();

        assert_eq!(names(&styles.visible_at_zoom_level(12).unwrap()), vec!["z12"]);
        assert_eq!(names(&styles.visible_at_zoom_level(13).unwrap()), vec!["z13"]);
    }

    #[test]
    fn test_visible_at_zoom_level_rejects_invalid_zoom() {
        let styles = Styles::new();
        assert_eq!(
            styles.visible_at_zoom_level(21),
            Err(ScaleError::ZoomOutOfRange(21))
        );
    }

    #[test]
    fn test_unbounded_rules_visible_at_every_zoom() {
        let styles: Styles = vec![
            style("land", &[(None, None)]),
            style("water", &[(Some(0), Some(SCALE_TABLE[0]))]),
        ]
        .into_iter()
        .collect();

        for zoom in MIN_ZOOM..=MAX_ZOOM {
            let visible = styles.visible_at_zoom_level(zoom as i32).unwrap();
            assert_eq!(visible, styles, "zoom {} should see every style", zoom);
        }
    }

    #[test]
    fn test_find_by_name() {
        let styles: Styles = vec![
            style("roads", &[(Some(1), None)]),
            style("roads", &[(Some(2), None)]),
        ]
        .into_iter()
        .collect();

        let found = styles.find_by_name("roads").unwrap();
        assert_eq!(found.rules[0].min_scale, 1, "first match wins");

        assert_eq!(
            styles.find_by_name("rivers"),
            Err(LookupError::StyleNotFound("rivers".to_string()))
        );
    }

    #[test]
    fn test_get_by_position() {
        let styles: Styles = vec![style("a", &[]), style("b", &[])].into_iter().collect();
        assert_eq!(styles.get_by_position(1).unwrap().name(), "b");
        assert!(styles.get_by_position(2).is_none());
    }
}
