use serde::{Deserialize, Serialize};

use crate::core::range::{
    Range, map_length_from_range, map_length_to_range, map_range, map_range_descending,
    unmap_range_descending,
};
use crate::core::types::{Margins, PlotArea, Point, Viewport};
use crate::error::CanvasResult;

/// Direction in which increasing domain values travel along the pixel axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AxisOrientation {
    #[default]
    Ascending,
    /// Larger domain values map to smaller pixel coordinates (screen Y up).
    Descending,
}

/// One axis of domain <-> pixel mapping, bound to fixed ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    domain: Range,
    pixel_range: Range,
    #[serde(default)]
    orientation: AxisOrientation,
}

impl Scale {
    #[must_use]
    pub fn new(domain: Range, pixel_range: Range) -> Self {
        Self {
            domain,
            pixel_range,
            orientation: AxisOrientation::Ascending,
        }
    }

    /// Scale whose pixel axis runs from `pixel_range.max()` down to `pixel_range.min()`.
    #[must_use]
    pub fn inverted(domain: Range, pixel_range: Range) -> Self {
        Self {
            domain,
            pixel_range,
            orientation: AxisOrientation::Descending,
        }
    }

    /// Builds a scale from pixel endpoints in mapping order, so
    /// `(height - bottom, top)` yields an inverted scale.
    pub fn from_endpoints(domain: Range, pixel_start: f64, pixel_end: f64) -> CanvasResult<Self> {
        if pixel_start <= pixel_end {
            Ok(Self::new(domain, Range::new(pixel_start, pixel_end)?))
        } else {
            Ok(Self::inverted(domain, Range::new(pixel_end, pixel_start)?))
        }
    }

    #[must_use]
    pub fn domain(self) -> Range {
        self.domain
    }

    /// Pixel extent covered by the scale, always ascending.
    #[must_use]
    pub fn pixel_range(self) -> Range {
        self.pixel_range
    }

    #[must_use]
    pub fn orientation(self) -> AxisOrientation {
        self.orientation
    }

    /// Pixel coordinates of `domain.min()` and `domain.max()`, in that order.
    #[must_use]
    pub fn pixel_endpoints(self) -> (f64, f64) {
        (
            self.to_pixel(self.domain.min()),
            self.to_pixel(self.domain.max()),
        )
    }

    #[must_use]
    pub fn to_pixel(self, value: f64) -> f64 {
        match self.orientation {
            AxisOrientation::Ascending => map_range(self.domain, self.pixel_range, value),
            AxisOrientation::Descending => {
                map_range_descending(self.domain, self.pixel_range, value)
            }
        }
    }

    #[must_use]
    pub fn to_domain(self, pixel: f64) -> f64 {
        match self.orientation {
            AxisOrientation::Ascending => map_range(self.pixel_range, self.domain, pixel),
            AxisOrientation::Descending => {
                unmap_range_descending(self.domain, self.pixel_range, pixel)
            }
        }
    }

    /// Converts a domain magnitude (width, standard deviation) into pixels.
    #[must_use]
    pub fn length_to_pixels(self, length: f64) -> f64 {
        map_length_to_range(self.domain, self.pixel_range, length)
    }

    #[must_use]
    pub fn length_to_domain(self, pixels: f64) -> f64 {
        map_length_from_range(self.domain, self.pixel_range, pixels)
    }
}

/// The x/y scales of one plot. Frame, grid and selectors drawn on the same
/// surface must share one pair so ticks and marks line up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalePair {
    pub x: Scale,
    pub y: Scale,
}

impl ScalePair {
    #[must_use]
    pub fn new(x: Scale, y: Scale) -> Self {
        Self { x, y }
    }

    /// Conventional plot scales: x over `[left, width - right]`, y over
    /// `[height - bottom, top]` so larger y values move up.
    pub fn for_plot(
        viewport: Viewport,
        margins: Margins,
        x_domain: Range,
        y_domain: Range,
    ) -> CanvasResult<Self> {
        let area = margins.plot_area(viewport)?;
        Ok(Self {
            x: Scale::new(x_domain, Range::new(area.min_x, area.max_x)?),
            y: Scale::inverted(y_domain, Range::new(area.min_y, area.max_y)?),
        })
    }

    #[must_use]
    pub fn to_pixel(self, point: Point) -> Point {
        Point::new(self.x.to_pixel(point.x), self.y.to_pixel(point.y))
    }

    #[must_use]
    pub fn to_domain(self, pixel: Point) -> Point {
        Point::new(self.x.to_domain(pixel.x), self.y.to_domain(pixel.y))
    }

    #[must_use]
    pub fn plot_area(self) -> PlotArea {
        let (min_x, max_x) = self.x.pixel_range().bounds();
        let (min_y, max_y) = self.y.pixel_range().bounds();
        PlotArea {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }
}
