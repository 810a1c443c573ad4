mod axes;
mod frame;
mod mesh;
mod null_renderer;
mod primitives;
pub mod raster;
mod scatter;

pub use axes::{FrameStyle, draw_frame, generate_ticks};
pub use frame::RenderFrame;
pub use mesh::{GridStyle, draw_grid, grid_segments};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, EllipsePrimitive, LinePrimitive, MarkerId, MarkerPrimitive,
    RectPrimitive, TextHAlign, TextPrimitive,
};
pub use raster::RasterImage;
pub use scatter::{ScatterStyle, draw_scatter};

use crate::core::Viewport;
use crate::error::CanvasResult;

/// Drawing capability the geometry code renders against.
///
/// Immediate primitives (`draw_*`) accumulate until `clear`. Markers are
/// retained scene elements addressed by id and repositioned with
/// `set_marker`; `clear` leaves them in place.
pub trait Surface {
    fn viewport(&self) -> Viewport;
    fn draw_line(&mut self, line: LinePrimitive) -> CanvasResult<()>;
    fn draw_rect(&mut self, rect: RectPrimitive) -> CanvasResult<()>;
    fn draw_circle(&mut self, circle: CirclePrimitive) -> CanvasResult<()>;
    fn draw_text(&mut self, text: TextPrimitive) -> CanvasResult<()>;
    fn set_marker(&mut self, id: MarkerId, marker: MarkerPrimitive) -> CanvasResult<()>;
    fn remove_marker(&mut self, id: MarkerId);
    fn clear(&mut self);
}

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from mapping and interaction logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> CanvasResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
