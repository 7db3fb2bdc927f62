//! Scale denominator table and zoom range resolution.
//!
//! Mapnik rules declare visibility with `MinScaleDenominator` and
//! `MaxScaleDenominator`. Web maps are addressed by zoom level instead, so
//! each zoom level is mapped to the band of scale denominators between its
//! own table entry and the next finer one.

use thiserror::Error;

/// Minimum supported zoom level.
pub const MIN_ZOOM: u8 = 0;

/// Maximum supported zoom level.
pub const MAX_ZOOM: u8 = 20;

/// Scale denominator per zoom level, from whole-world (0) to finest (20).
///
/// Values are the standard Mapnik/OSM denominators for 256px web-mercator
/// tiles at 0.28mm per pixel.
pub const SCALE_TABLE: [u64; 21] = [
    559_082_264,
    279_541_132,
    139_770_566,
    69_885_283,
    34_942_642,
    17_471_321,
    8_735_660,
    4_367_830,
    2_183_915,
    1_091_958,
    545_979,
    272_989,
    136_495,
    68_247,
    34_124,
    17_062,
    8_531,
    4_265,
    2_133,
    1_066,
    533,
];

/// Errors from zoom resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScaleError {
    /// Zoom level outside `MIN_ZOOM..=MAX_ZOOM`.
    #[error("zoom level should be an integer z with {min} <= z <= {max}, got {0}", min = MIN_ZOOM, max = MAX_ZOOM)]
    ZoomOutOfRange(i32),
}

/// Inclusive interval of scale denominators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScaleInterval {
    /// Smallest denominator (most zoomed in).
    pub min: u64,
    /// Largest denominator (most zoomed out).
    pub max: u64,
}

impl ScaleInterval {
    /// Create an interval from its bounds.
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    /// Interval spanning the whole table, from 0 up to the zoom 0 denominator.
    pub const fn full() -> Self {
        Self::new(0, SCALE_TABLE[0])
    }

    /// Returns true if `self` lies entirely inside `outer`.
    ///
    /// This is containment, not overlap: both bounds must be satisfied.
    #[inline]
    pub fn is_within(&self, outer: &ScaleInterval) -> bool {
        outer.min <= self.min && outer.max >= self.max
    }
}

/// Resolve a zoom level to its scale denominator interval.
///
/// `max` is the table entry for `zoom`; `min` is the entry for `zoom + 1`,
/// or 0 at the finest zoom level.
///
/// # Errors
///
/// Returns [`ScaleError::ZoomOutOfRange`] for zoom levels below 0 or above 20.
///
/// # Examples
///
/// ```
/// use mapzoom::scale::zoom_limits;
///
/// let limits = zoom_limits(12).unwrap();
/// assert_eq!(limits.max, 136_495);
/// assert_eq!(limits.min, 68_247);
///
/// assert_eq!(zoom_limits(20).unwrap().min, 0);
/// assert!(zoom_limits(21).is_err());
/// ```
pub fn zoom_limits(zoom: i32) -> Result<ScaleInterval, ScaleError> {
    if zoom < MIN_ZOOM as i32 || zoom > MAX_ZOOM as i32 {
        return Err(ScaleError::ZoomOutOfRange(zoom));
    }

    let index = zoom as usize;
    let max = SCALE_TABLE[index];
    let min = if zoom == MAX_ZOOM as i32 {
        0
    } else {
        SCALE_TABLE[index + 1]
    };

    Ok(ScaleInterval { min, max })
}
