//! Ranges and layouts shared by the exploration widgets.

use crate::core::{Margins, Range, Viewport};
use crate::error::CanvasResult;

use super::PlotConfig;

/// Size parameter sweep of the synthetic face dataset.
pub const SIZE_RANGE: Range = Range::new_unchecked(0.4, 1.4);
/// Hue parameter sweep of the synthetic face dataset.
pub const HUE_RANGE: Range = Range::new_unchecked(0.3, 0.8);
/// Plotted extent of each latent coordinate.
pub const Z_RANGE: Range = Range::new_unchecked(-3.0, 3.0);

/// Rows and columns of the parameter sweep grid.
pub const GRID_SIZE: usize = 10;
/// Padding added around the dataset ranges on interactive canvases.
pub const INTERACTIVE_MARGIN_FRACTION: f64 = 0.2;

pub const PLOT_MARGINS: Margins = Margins::new(10.0, 40.0, 40.0, 40.0);
pub const PLOT_VIEWPORT: Viewport = Viewport {
    width: 280,
    height: 250,
};

/// Latent-space plot used by the decoding, mapping and sampling widgets.
#[must_use]
pub fn latent_plot() -> PlotConfig {
    PlotConfig::new(PLOT_VIEWPORT, Z_RANGE, Z_RANGE).with_margins(PLOT_MARGINS)
}

/// Dataset parameter plot (size x hue).
#[must_use]
pub fn dataset_plot() -> PlotConfig {
    PlotConfig::new(PLOT_VIEWPORT, SIZE_RANGE, HUE_RANGE).with_margins(PLOT_MARGINS)
}

/// Dataset parameter plot padded so the selector can leave the training bounds.
pub fn extended_dataset_plot() -> CanvasResult<PlotConfig> {
    Ok(PlotConfig::new(
        PLOT_VIEWPORT,
        SIZE_RANGE.with_margin(INTERACTIVE_MARGIN_FRACTION)?,
        HUE_RANGE.with_margin(INTERACTIVE_MARGIN_FRACTION)?,
    )
    .with_margins(PLOT_MARGINS))
}
