//! Serializable setup for plots and selectors.

pub mod presets;

use serde::{Deserialize, Serialize};

use crate::core::{Margins, PlotArea, Range, ScalePair, Viewport};
use crate::error::{CanvasError, CanvasResult};

/// Geometry of one interactive plot: surface size, insets, axis domains.
///
/// This type is serializable so host applications can persist/load widget
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    pub viewport: Viewport,
    #[serde(default)]
    pub margins: Margins,
    pub x_domain: Range,
    pub y_domain: Range,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
}

impl PlotConfig {
    #[must_use]
    pub fn new(viewport: Viewport, x_domain: Range, y_domain: Range) -> Self {
        Self {
            viewport,
            margins: Margins::default(),
            x_domain,
            y_domain,
            tick_count: default_tick_count(),
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    pub fn validate(self) -> CanvasResult<Self> {
        self.margins.plot_area(self.viewport)?;
        if self.tick_count < 2 {
            return Err(CanvasError::config(format!(
                "tick count must be >= 2, got {}",
                self.tick_count
            )));
        }
        Ok(self)
    }

    pub fn plot_area(self) -> CanvasResult<PlotArea> {
        self.margins.plot_area(self.viewport)
    }

    /// The scale pair every renderer and selector on this plot must share.
    pub fn scales(self) -> CanvasResult<ScalePair> {
        let config = self.validate()?;
        ScalePair::for_plot(config.viewport, config.margins, config.x_domain, config.y_domain)
    }

    pub fn from_json_str(json: &str) -> CanvasResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| CanvasError::config(format!("failed to parse plot config: {err}")))?;
        config.validate()
    }

    pub fn to_json_string(self) -> CanvasResult<String> {
        serde_json::to_string_pretty(&self)
            .map_err(|err| CanvasError::config(format!("failed to serialize plot config: {err}")))
    }
}

fn default_tick_count() -> usize {
    6
}

/// Behaviour of the draggable point marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointSelectorConfig {
    #[serde(default = "default_dot_radius_px")]
    pub dot_radius_px: f64,
    /// Grab distance around the dot when `click_anywhere` is off.
    #[serde(default = "default_dot_radius_px")]
    pub hit_radius_px: f64,
    /// Pressing anywhere in the plot area jumps the dot there and starts a drag.
    #[serde(default = "default_click_anywhere")]
    pub click_anywhere: bool,
}

impl Default for PointSelectorConfig {
    fn default() -> Self {
        Self {
            dot_radius_px: default_dot_radius_px(),
            hit_radius_px: default_dot_radius_px(),
            click_anywhere: default_click_anywhere(),
        }
    }
}

impl PointSelectorConfig {
    #[must_use]
    pub fn with_click_anywhere(mut self, click_anywhere: bool) -> Self {
        self.click_anywhere = click_anywhere;
        self
    }

    #[must_use]
    pub fn with_hit_radius(mut self, hit_radius_px: f64) -> Self {
        self.hit_radius_px = hit_radius_px;
        self
    }

    pub fn validate(self) -> CanvasResult<Self> {
        for (name, value) in [
            ("dot_radius_px", self.dot_radius_px),
            ("hit_radius_px", self.hit_radius_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CanvasError::config(format!(
                    "point selector `{name}` must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

fn default_dot_radius_px() -> f64 {
    9.0
}

fn default_click_anywhere() -> bool {
    true
}

/// Behaviour and look of the resizable selection rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaSelectorConfig {
    /// Floor applied to width and height on every update.
    #[serde(default = "default_min_size_px")]
    pub min_size_px: f64,
    /// Side of the square resize handle in the bottom-right corner.
    #[serde(default = "default_handle_size_px")]
    pub handle_size_px: f64,
}

impl Default for AreaSelectorConfig {
    fn default() -> Self {
        Self {
            min_size_px: default_min_size_px(),
            handle_size_px: default_handle_size_px(),
        }
    }
}

impl AreaSelectorConfig {
    #[must_use]
    pub fn with_min_size(mut self, min_size_px: f64) -> Self {
        self.min_size_px = min_size_px;
        self
    }

    pub fn validate(self) -> CanvasResult<Self> {
        if !self.min_size_px.is_finite() || self.min_size_px <= 0.0 {
            return Err(CanvasError::config("area selector min size must be finite and > 0"));
        }
        if !self.handle_size_px.is_finite() || self.handle_size_px <= 0.0 {
            return Err(CanvasError::config("area selector handle size must be finite and > 0"));
        }
        Ok(self)
    }
}

fn default_min_size_px() -> f64 {
    10.0
}

fn default_handle_size_px() -> f64 {
    14.0
}
