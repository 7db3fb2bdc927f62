//! Zoom level set specifications.
//!
//! A specification is a comma-separated union of single levels and inclusive
//! ranges, e.g. `"10-12,15"` → `{10, 11, 12, 15}`.

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use thiserror::Error;

/// Errors from parsing a zoom specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ZoomSpecError {
    /// A token is not a zoom level or `a-b` range.
    #[error("invalid zoom level token: \"{0}\"")]
    InvalidToken(String),

    /// A range whose start is after its end.
    #[error("zoom range {start}-{end} is reversed")]
    ReversedRange { start: u8, end: u8 },
}

/// Parse a zoom specification into a sorted, deduplicated set.
///
/// Whitespace around items is ignored, as are empty items.
///
/// # Examples
///
/// ```
/// use mapzoom::zoom_set::parse_zoom_spec;
///
/// let zooms = parse_zoom_spec("10-12, 15").unwrap();
/// assert_eq!(zooms.into_iter().collect::<Vec<_>>(), vec![10, 11, 12, 15]);
/// ```
pub fn parse_zoom_spec(spec: &str) -> Result<BTreeSet<u8>, ZoomSpecError> {
    let mut zooms = BTreeSet::new();

    for item in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match item.split_once('-') {
            Some((start, end)) => {
                let start = parse_level(start, item)?;
                let end = parse_level(end, item)?;
                if start > end {
                    return Err(ZoomSpecError::ReversedRange { start, end });
                }
                zooms.extend(start..=end);
            }
            None => {
                zooms.insert(parse_level(item, item)?);
            }
        }
    }

    Ok(zooms)
}

/// Keep only the zoom levels inside `allowed`.
pub fn restrict(zooms: &BTreeSet<u8>, allowed: &RangeInclusive<u8>) -> BTreeSet<u8> {
    zooms
        .iter()
        .copied()
        .filter(|zoom| allowed.contains(zoom))
        .collect()
}

fn parse_level(raw: &str, item: &str) -> Result<u8, ZoomSpecError> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| ZoomSpecError::InvalidToken(item.to_string()))
}
