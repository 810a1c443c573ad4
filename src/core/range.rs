//! Affine mapping between value ranges.
//!
//! Every mapping here is defined against a [`Range`], whose constructor
//! guarantees finite, strictly ascending endpoints, so the divisions below can
//! never hit a zero-width source range.

use serde::{Deserialize, Serialize};

use crate::error::{CanvasError, CanvasResult};

/// Closed interval `[min, max]` with `min < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    min: f64,
    max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> CanvasResult<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(CanvasError::config(format!(
                "range endpoints must be finite, got [{min}, {max}]"
            )));
        }
        if min >= max {
            return Err(CanvasError::config(format!(
                "range min must be < max, got [{min}, {max}]"
            )));
        }
        Ok(Self { min, max })
    }

    /// Skips validation; only for compile-time presets known to be ascending.
    pub(crate) const fn new_unchecked(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The `[0, 1]` range.
    #[must_use]
    pub const fn unit() -> Self {
        Self { min: 0.0, max: 1.0 }
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn bounds(self) -> (f64, f64) {
        (self.min, self.max)
    }

    #[must_use]
    pub fn size(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn mid(self) -> f64 {
        self.min + self.size() / 2.0
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Expands the range by `fraction * size` on each side.
    pub fn with_margin(self, fraction: f64) -> CanvasResult<Self> {
        add_margin(self, fraction)
    }
}

impl TryFrom<(f64, f64)> for Range {
    type Error = CanvasError;

    fn try_from((min, max): (f64, f64)) -> CanvasResult<Self> {
        Self::new(min, max)
    }
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        range.bounds()
    }
}

/// How normalized coordinates outside `[0, 1]` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoundsPolicy {
    /// Reject with [`CanvasError::OutOfBounds`].
    #[default]
    Strict,
    /// Clamp into `[0, 1]` silently.
    Clamp,
}

/// Affine map of `value` from `from` onto `to`.
#[must_use]
pub fn map_range(from: Range, to: Range, value: f64) -> f64 {
    to.min + (value - from.min) / from.size() * to.size()
}

/// Affine map onto `to` traversed from `max` down to `min`.
///
/// This is the Y-axis convention for plots: larger domain values land on
/// smaller (higher on screen) pixel coordinates.
#[must_use]
pub fn map_range_descending(from: Range, to: Range, value: f64) -> f64 {
    to.max - (value - from.min) / from.size() * to.size()
}

/// Inverse of [`map_range_descending`].
#[must_use]
pub fn unmap_range_descending(from: Range, to: Range, pixel: f64) -> f64 {
    from.min + (to.max - pixel) / to.size() * from.size()
}

/// Normalizes `value` into `[0, 1]`, clamping anything outside `range`.
#[must_use]
pub fn map_to_unit(range: Range, value: f64) -> f64 {
    map_range(range, Range::unit(), value).clamp(0.0, 1.0)
}

/// Maps a normalized `value` onto `range`, rejecting values outside `[0, 1]`.
pub fn map_from_unit(range: Range, value: f64) -> CanvasResult<f64> {
    if !Range::unit().contains(value) {
        return Err(CanvasError::OutOfBounds {
            value,
            min: 0.0,
            max: 1.0,
        });
    }
    Ok(map_range(Range::unit(), range, value))
}

/// Lenient counterpart of [`map_from_unit`].
#[must_use]
pub fn map_from_unit_clamped(range: Range, value: f64) -> f64 {
    map_range(Range::unit(), range, value.clamp(0.0, 1.0))
}

pub fn map_from_unit_with(policy: BoundsPolicy, range: Range, value: f64) -> CanvasResult<f64> {
    match policy {
        BoundsPolicy::Strict => map_from_unit(range, value),
        BoundsPolicy::Clamp => Ok(map_from_unit_clamped(range, value)),
    }
}

/// Scales a magnitude measured in `from` units into `to` units.
#[must_use]
pub fn map_length_to_range(from: Range, to: Range, length: f64) -> f64 {
    length * (to.size() / from.size())
}

/// Inverse of [`map_length_to_range`].
#[must_use]
pub fn map_length_from_range(from: Range, to: Range, length: f64) -> f64 {
    length * (from.size() / to.size())
}

/// Expands `range` symmetrically by `fraction * size` on each side.
pub fn add_margin(range: Range, fraction: f64) -> CanvasResult<Range> {
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(CanvasError::config(format!(
            "range margin fraction must be finite and >= 0, got {fraction}"
        )));
    }
    let pad = fraction * range.size();
    Range::new(range.min - pad, range.max + pad)
}

/// Converts the top edge of a unit-space span between top-left and bottom-left
/// origins. Applying it twice yields the input.
#[must_use]
pub fn flip_unit_y(y: f64, height: f64) -> f64 {
    1.0 - (y + height)
}
