use tracing::{debug, trace};

use crate::core::{Point, ScalePair};
use crate::error::{CanvasError, CanvasResult};
use crate::render::{
    CirclePrimitive, Color, EllipsePrimitive, MarkerId, MarkerPrimitive, Surface,
};

use super::{LabelSink, format_readout};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RemoteMarkerStyle {
    pub dot_radius_px: f64,
    pub dot_color: Color,
    pub spread_color: Color,
}

impl Default for RemoteMarkerStyle {
    fn default() -> Self {
        Self {
            dot_radius_px: 2.0,
            dot_color: Color::RED,
            spread_color: Color::UNCERTAINTY_BLUE,
        }
    }
}

/// Non-interactive marker showing a mean position with an uncertainty
/// ellipse, positioned by program updates only.
///
/// The ellipse is placed before the dot so the dot stays on top.
pub struct RemoteControlledMarker {
    scales: ScalePair,
    style: RemoteMarkerStyle,
    mean: Point,
    spread: Point,
    labels: Option<RemoteLabels>,
}

struct RemoteLabels {
    mean: (LabelSink, LabelSink),
    spread: (LabelSink, LabelSink),
}

impl std::fmt::Debug for RemoteControlledMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteControlledMarker")
            .field("scales", &self.scales)
            .field("style", &self.style)
            .field("mean", &self.mean)
            .field("spread", &self.spread)
            .finish_non_exhaustive()
    }
}

impl RemoteControlledMarker {
    pub fn new<S: Surface + ?Sized>(
        surface: &mut S,
        scales: ScalePair,
        mean: Point,
        spread: Point,
    ) -> CanvasResult<Self> {
        Self::with_style(surface, scales, RemoteMarkerStyle::default(), mean, spread)
    }

    pub fn with_style<S: Surface + ?Sized>(
        surface: &mut S,
        scales: ScalePair,
        style: RemoteMarkerStyle,
        mean: Point,
        spread: Point,
    ) -> CanvasResult<Self> {
        let mut marker = Self {
            scales,
            style,
            mean,
            spread,
            labels: None,
        };
        debug!(?mean, ?spread, "remote marker created");
        marker.update(surface, mean, spread)?;
        Ok(marker)
    }

    /// Attaches labels for the mean (x, y) and spread (x, y) readouts. They
    /// receive the current values at once and again on every update.
    #[must_use]
    pub fn with_labels(
        mut self,
        mean_x: impl FnMut(&str) + 'static,
        mean_y: impl FnMut(&str) + 'static,
        spread_x: impl FnMut(&str) + 'static,
        spread_y: impl FnMut(&str) + 'static,
    ) -> Self {
        self.labels = Some(RemoteLabels {
            mean: (Box::new(mean_x), Box::new(mean_y)),
            spread: (Box::new(spread_x), Box::new(spread_y)),
        });
        self.write_labels();
        self
    }

    #[must_use]
    pub fn mean(&self) -> Point {
        self.mean
    }

    #[must_use]
    pub fn spread(&self) -> Point {
        self.spread
    }

    /// Moves the marker. `spread` is a per-axis radius in domain units and
    /// must be non-negative; a zero spread collapses the ellipse.
    pub fn update<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        mean: Point,
        spread: Point,
    ) -> CanvasResult<()> {
        if !mean.is_finite() {
            return Err(CanvasError::InvalidData(
                "remote marker mean must be finite".to_owned(),
            ));
        }
        if !spread.is_finite() || spread.x < 0.0 || spread.y < 0.0 {
            return Err(CanvasError::InvalidData(
                "remote marker spread must be finite and >= 0".to_owned(),
            ));
        }

        let center = self.scales.to_pixel(mean);
        surface.set_marker(
            MarkerId::REMOTE_ELLIPSE,
            MarkerPrimitive::Ellipse(EllipsePrimitive {
                cx: center.x,
                cy: center.y,
                rx: self.scales.x.length_to_pixels(spread.x),
                ry: self.scales.y.length_to_pixels(spread.y),
                fill_color: self.style.spread_color,
            }),
        )?;
        surface.set_marker(
            MarkerId::REMOTE_DOT,
            MarkerPrimitive::Circle(CirclePrimitive::new(
                center.x,
                center.y,
                self.style.dot_radius_px,
                self.style.dot_color,
            )),
        )?;

        self.mean = mean;
        self.spread = spread;
        self.write_labels();
        trace!(x = center.x, y = center.y, "remote marker moved");
        Ok(())
    }

    fn write_labels(&mut self) {
        let (mean, spread) = (self.mean, self.spread);
        if let Some(labels) = self.labels.as_mut() {
            (labels.mean.0)(&format_readout(mean.x));
            (labels.mean.1)(&format_readout(mean.y));
            (labels.spread.0)(&format_readout(spread.x));
            (labels.spread.1)(&format_readout(spread.y));
        }
    }
}
